// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Nexy.
//!
//! This module contains pure generation logic with ZERO I/O.
//! Filesystem, network and process concerns are handled via ports (traits)
//! defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **No logging**: Only the application layer emits `tracing` events
//! - **Immutable entities**: `ProjectConfig` has no mutators
//!
// Public API - what the world sees
pub mod blueprint;
pub mod catalog;
pub mod entities;
pub mod error;
pub mod templates;
pub mod value_objects;

// Private implementation details - not visible outside domain
mod validation;

// Re-exports for convenience
pub use entities::{
    project_config::{ProjectConfig, ProjectConfigBuilder},
    project_structure::{DirectoryToCreate, FileToWrite, FsEntry, ProjectStructure},
};

pub use error::{DomainError, ErrorCategory};

pub use templates::{ArtifactKind, EntityKind};

pub use value_objects::{Database, Orm, ProjectType, TestFramework};

pub use validation::DomainValidator;
