//! `nexy generate`: add controller/service/model stubs to a project.

use std::path::{Path, PathBuf};

use serde_json::json;
use tracing::{info, instrument};

use nexy_adapters::LocalFilesystem;
use nexy_core::{
    application::{ComponentGenerator, WriteMode},
    domain::ArtifactKind,
};

use crate::{
    cli::{GenerateArgs, OutputFormat},
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all, fields(kind = ?args.kind, entity = %args.name))]
pub fn execute(args: GenerateArgs, output: OutputManager) -> CliResult<()> {
    let root = args.dir.clone().unwrap_or_else(|| PathBuf::from("."));
    ensure_project(&root)?;

    let mode = if args.force {
        WriteMode::Overwrite
    } else {
        WriteMode::SkipExisting
    };

    let generator =
        ComponentGenerator::new(Box::new(LocalFilesystem::new()), Box::new(output.clone()));
    let report = generator.generate(&root, args.kind.entity_kinds(), &args.name, mode)?;
    info!(written = report.written.len(), "generate finished");

    if output.format() == OutputFormat::Json {
        let paths = |list: &[PathBuf]| {
            list.iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
        };
        let payload = json!({
            "entity": args.name,
            "written": paths(&report.written),
            "skipped": paths(&report.skipped),
        });
        output.data(&payload.to_string())?;
        return Ok(());
    }

    if !report.written.is_empty() {
        output.success(&format!(
            "Generated {} file(s) for '{}'",
            report.written.len(),
            args.name
        ))?;
    }
    if !report.skipped.is_empty() {
        output.warning(&format!(
            "{} file(s) already existed and were kept; use --force to overwrite",
            report.skipped.len()
        ))?;
    }
    Ok(())
}

/// A generated project always has a `requirements.txt` at its root.
fn ensure_project(root: &Path) -> CliResult<()> {
    if root.join(ArtifactKind::Requirements.path()).is_file() {
        Ok(())
    } else {
        Err(CliError::NotAProject {
            path: root.to_path_buf(),
        })
    }
}
