//! Project Materializer - main application orchestrator.
//!
//! This service coordinates the generation workflow:
//! 1. Validate the configuration
//! 2. Plan directories and files (pure, `domain::blueprint`)
//! 3. Write them through the `Filesystem` port
//!
//! There is no rollback: when a write fails the error surfaces immediately
//! and whatever was already written stays on disk.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::{
    application::ports::{Filesystem, ProgressEvent, ProgressSink},
    domain::{DomainValidator as validator, FsEntry, ProjectConfig, ProjectStructure, blueprint},
    error::NexyResult,
};

/// What to do with files that already exist at a planned path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WriteMode {
    /// Truncate and rewrite every planned file.
    #[default]
    Overwrite,
    /// Leave existing files untouched.
    SkipExisting,
}

/// Outcome of a materialization, in write order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterializeReport {
    pub root: PathBuf,
    pub directories: Vec<PathBuf>,
    pub written: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

impl MaterializeReport {
    pub fn file_count(&self) -> usize {
        self.written.len() + self.skipped.len()
    }
}

/// Writes generation plans to disk.
pub struct ProjectMaterializer {
    filesystem: Box<dyn Filesystem>,
    sink: Box<dyn ProgressSink>,
}

impl ProjectMaterializer {
    /// Create a new materializer with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use nexy_core::application::{ProjectMaterializer, WriteMode, ports::NullSink};
    /// # use nexy_core::application::ports::Filesystem;
    /// # fn demo(filesystem: Box<dyn Filesystem>, config: nexy_core::domain::ProjectConfig) {
    /// let materializer = ProjectMaterializer::new(filesystem, Box::new(NullSink));
    /// materializer.materialize("./shop", &config, WriteMode::Overwrite).unwrap();
    /// # }
    /// ```
    pub fn new(filesystem: Box<dyn Filesystem>, sink: Box<dyn ProgressSink>) -> Self {
        Self { filesystem, sink }
    }

    /// Compute (without writing) what [`Self::materialize`] would produce.
    pub fn plan(&self, root: impl AsRef<Path>, config: &ProjectConfig) -> NexyResult<ProjectStructure> {
        validator::validate_config(config)?;
        let structure = blueprint::plan(root.as_ref(), config);
        validator::validate_project_structure(&structure)?;
        Ok(structure)
    }

    /// Generate the project described by `config` into `root`.
    #[instrument(
        skip_all,
        fields(
            project = %config.project_name(),
            root = %root.as_ref().display(),
            mode = ?mode
        )
    )]
    pub fn materialize(
        &self,
        root: impl AsRef<Path>,
        config: &ProjectConfig,
        mode: WriteMode,
    ) -> NexyResult<MaterializeReport> {
        info!(
            project_type = %config.project_type(),
            database = %config.database(),
            orm = %config.orm(),
            test_framework = %config.test_framework(),
            "Materializing project"
        );

        let structure = self.plan(root, config)?;
        let report = self.write_structure(&structure, mode)?;

        info!(
            directories = report.directories.len(),
            written = report.written.len(),
            skipped = report.skipped.len(),
            "Materialization completed"
        );
        Ok(report)
    }

    /// Write an already-validated structure.
    pub fn write_structure(
        &self,
        structure: &ProjectStructure,
        mode: WriteMode,
    ) -> NexyResult<MaterializeReport> {
        write_structure(self.filesystem.as_ref(), self.sink.as_ref(), structure, mode)
    }
}

/// Write every entry of `structure` in order, emitting one event per entry.
pub(crate) fn write_structure(
    filesystem: &dyn Filesystem,
    sink: &dyn ProgressSink,
    structure: &ProjectStructure,
    mode: WriteMode,
) -> NexyResult<MaterializeReport> {
    let root = structure.root();
    let mut report = MaterializeReport {
        root: root.to_path_buf(),
        ..MaterializeReport::default()
    };

    for entry in structure.entries() {
        let path = resolve(root, entry.path());
        match entry {
            FsEntry::Directory(_) => {
                filesystem.create_dir_all(&path)?;
                debug!(path = %path.display(), "directory ready");
                sink.emit(&ProgressEvent::DirectoryCreated { path: path.clone() });
                report.directories.push(path);
            }
            FsEntry::File(file) => {
                if mode == WriteMode::SkipExisting && filesystem.exists(&path) {
                    debug!(path = %path.display(), "file exists, skipping");
                    sink.emit(&ProgressEvent::FileSkipped { path: path.clone() });
                    report.skipped.push(path);
                    continue;
                }

                // Ensure parent exists
                if let Some(parent) = path.parent() {
                    if !parent.as_os_str().is_empty() {
                        filesystem.create_dir_all(parent)?;
                    }
                }

                filesystem.write_file(&path, &file.content)?;
                debug!(path = %path.display(), bytes = file.size(), "file written");
                sink.emit(&ProgressEvent::FileWritten { path: path.clone() });
                report.written.push(path);
            }
        }
    }

    Ok(report)
}

/// Join a plan-relative path onto the root; the empty path is the root.
fn resolve(root: &Path, relative: &Path) -> PathBuf {
    if relative.as_os_str().is_empty() {
        root.to_path_buf()
    } else {
        root.join(relative)
    }
}
