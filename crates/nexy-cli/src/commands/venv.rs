//! `nexy venv`: provision the project's virtual environment.

use std::path::{Path, PathBuf};

use serde_json::json;
use tracing::instrument;

use nexy_adapters::{LocalFilesystem, VenvProvisioner};
use nexy_core::{
    application::{EnvironmentService, ProvisionOutcome},
    domain::ArtifactKind,
};

use crate::{
    cli::{OutputFormat, VenvArgs},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all)]
pub fn execute(args: VenvArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let root = args.dir.clone().unwrap_or_else(|| PathBuf::from("."));
    let env_name = args
        .name
        .clone()
        .unwrap_or_else(|| config.environment.name.clone());

    let requirements = requirements_file(&args, &config, &root);
    if requirements.is_none() && !args.no_install && config.environment.install_requirements {
        output.info(&format!(
            "No {} in {}; skipping package installation",
            ArtifactKind::Requirements.path(),
            root.display()
        ))?;
    }

    let outcome = provision(&root, &env_name, requirements.as_deref(), &config, &output)?;

    if output.format() == OutputFormat::Json {
        let payload = json!({
            "path": outcome.path().display().to_string(),
            "created": matches!(outcome, ProvisionOutcome::Created { .. }),
        });
        output.data(&payload.to_string())?;
    }

    Ok(())
}

/// Run the provisioning flow for `<root>/<env_name>`, reporting each step on
/// `output`. Shared with `nexy new --venv`.
pub fn provision(
    root: &Path,
    env_name: &str,
    requirements: Option<&Path>,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<ProvisionOutcome> {
    let provisioner = match &config.environment.python {
        Some(python) => VenvProvisioner::with_python(python.clone()),
        None => VenvProvisioner::new(),
    };

    let service = EnvironmentService::new(
        Box::new(provisioner),
        Box::new(LocalFilesystem::new()),
        Box::new(output.clone()),
    );

    Ok(service.provision(root, env_name, requirements)?)
}

/// Which requirements file to install, if any.
///
/// An explicit `--requirements` always wins; otherwise the project's
/// `requirements.txt` is used when present and installation is enabled.
fn requirements_file(args: &VenvArgs, config: &AppConfig, root: &Path) -> Option<PathBuf> {
    if args.no_install {
        return None;
    }
    if let Some(explicit) = &args.requirements {
        return Some(explicit.clone());
    }

    let default = PathBuf::from(ArtifactKind::Requirements.path());
    (config.environment.install_requirements && root.join(&default).is_file()).then_some(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> VenvArgs {
        VenvArgs {
            name: None,
            requirements: None,
            no_install: false,
            dir: None,
        }
    }

    #[test]
    fn no_install_wins_over_everything() {
        let mut a = args();
        a.no_install = true;
        a.requirements = Some("dev.txt".into());
        assert_eq!(requirements_file(&a, &AppConfig::default(), Path::new(".")), None);
    }

    #[test]
    fn explicit_file_is_used_even_if_missing() {
        let mut a = args();
        a.requirements = Some("dev.txt".into());
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            requirements_file(&a, &AppConfig::default(), dir.path()),
            Some(PathBuf::from("dev.txt"))
        );
    }

    #[test]
    fn default_file_only_when_present() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::default();
        assert_eq!(requirements_file(&args(), &config, dir.path()), None);

        std::fs::write(dir.path().join("requirements.txt"), "nexy\n").unwrap();
        assert_eq!(
            requirements_file(&args(), &config, dir.path()),
            Some(PathBuf::from("requirements.txt"))
        );
    }

    #[test]
    fn config_can_disable_default_install() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("requirements.txt"), "nexy\n").unwrap();

        let mut config = AppConfig::default();
        config.environment.install_requirements = false;
        assert_eq!(requirements_file(&args(), &config, dir.path()), None);
    }
}
