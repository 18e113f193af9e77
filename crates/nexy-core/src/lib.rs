//! Nexy Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Nexy
//! project generator, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │             nexy-cli (CLI)              │
//! │       (Implements Driving Ports)        │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │          Application Services           │
//! │  (ProjectMaterializer, PortScanner, ..) │
//! │          Orchestrates Use Cases         │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Application Ports (Traits)        │
//! │  (Filesystem, PortProbe, Provisioner)   │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     nexy-adapters (Infrastructure)      │
//! │ (LocalFilesystem, TcpConnectProbe, etc) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │  (ProjectConfig, templates, blueprint)  │
//! │         No External Dependencies        │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use nexy_core::prelude::*;
//! # fn demo(filesystem: Box<dyn Filesystem>) -> NexyResult<()> {
//!
//! // 1. Describe the project
//! let config = ProjectConfig::builder("shop")
//!     .project_type(ProjectType::Webapp)
//!     .database(Database::Postgresql)
//!     .feature("auth")
//!     .build()?;
//!
//! // 2. Use application service (with injected adapters)
//! let materializer = ProjectMaterializer::new(filesystem, Box::new(NullSink));
//! materializer.materialize("./shop", &config, WriteMode::Overwrite)?;
//! # Ok(())
//! # }
//! ```

// Re-export domain layer (stable, well-defined API)
pub mod domain;

// Re-export application layer (orchestration logic)
pub mod application;

// Re-export error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ComponentGenerator, EnvironmentService, MaterializeReport, PortScanner,
        ProjectMaterializer, ProvisionOutcome, SettingsService, WriteMode,
        ports::{
            ConfigBindings, ConfigScriptLoader, EnvironmentProvisioner, Filesystem, NullSink,
            PortProbe, ProgressEvent, ProgressSink,
        },
    };
    pub use crate::domain::{
        ArtifactKind, Database, EntityKind, Orm, ProjectConfig, ProjectConfigBuilder,
        ProjectStructure, ProjectType, TestFramework,
    };
    pub use crate::error::{NexyError, NexyResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
