//! Component Generator - writes per-entity stubs into an existing project.

use std::path::Path;

use tracing::{info, instrument};

use crate::{
    application::{
        ports::{Filesystem, ProgressSink},
        services::materialize_service::{self, MaterializeReport, WriteMode},
    },
    domain::{DomainValidator as validator, EntityKind, ProjectStructure, blueprint, templates},
    error::NexyResult,
};

pub struct ComponentGenerator {
    filesystem: Box<dyn Filesystem>,
    sink: Box<dyn ProgressSink>,
}

impl ComponentGenerator {
    pub fn new(filesystem: Box<dyn Filesystem>, sink: Box<dyn ProgressSink>) -> Self {
        Self { filesystem, sink }
    }

    /// Plan `app/<entity>/<kind>.py` for each of `kinds`.
    pub fn plan(
        &self,
        root: impl AsRef<Path>,
        kinds: &[EntityKind],
        entity: &str,
    ) -> NexyResult<ProjectStructure> {
        validator::validate_entity_name(entity)?;

        let mut structure = ProjectStructure::new(root.as_ref());
        structure.add_directory(blueprint::entity_directory(entity));
        for &kind in kinds {
            structure.add_file(
                blueprint::entity_path(kind, entity),
                templates::render_entity(kind, entity)?,
            );
        }

        validator::validate_project_structure(&structure)?;
        Ok(structure)
    }

    #[instrument(skip(self, root), fields(root = %root.as_ref().display()))]
    pub fn generate(
        &self,
        root: impl AsRef<Path>,
        kinds: &[EntityKind],
        entity: &str,
        mode: WriteMode,
    ) -> NexyResult<MaterializeReport> {
        let structure = self.plan(root, kinds, entity)?;
        let report = materialize_service::write_structure(
            self.filesystem.as_ref(),
            self.sink.as_ref(),
            &structure,
            mode,
        )?;

        info!(
            written = report.written.len(),
            skipped = report.skipped.len(),
            "Components generated"
        );
        Ok(report)
    }
}
