//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "materialize a project" or "suggest a port".

pub mod component_service;
pub mod environment_service;
pub mod materialize_service;
pub mod port_service;
pub mod settings_service;

pub use component_service::ComponentGenerator;
pub use environment_service::{EnvironmentService, ProvisionOutcome};
pub use materialize_service::{MaterializeReport, ProjectMaterializer, WriteMode};
pub use port_service::{MAX_CANDIDATES, MAX_PORT, PortScanner};
pub use settings_service::SettingsService;
