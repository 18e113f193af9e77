//! Application layer for Nexy.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (ProjectMaterializer, PortScanner, ...)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! generation logic itself. All of that lives in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    ComponentGenerator, EnvironmentService, MaterializeReport, PortScanner, ProjectMaterializer,
    ProvisionOutcome, SettingsService, WriteMode,
};

// Re-export port traits (for adapter implementation)
pub use ports::{
    ConfigScriptLoader, EnvironmentProvisioner, Filesystem, PortProbe, ProgressEvent, ProgressSink,
};

pub use error::ApplicationError;
