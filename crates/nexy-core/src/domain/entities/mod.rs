pub mod project_config;
pub mod project_structure;

pub use crate::domain::DomainError;
pub use project_config::{ProjectConfig, ProjectConfigBuilder};
pub use project_structure::ProjectStructure;
