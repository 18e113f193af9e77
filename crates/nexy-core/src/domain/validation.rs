use crate::domain::{
    entities::{ProjectConfig, ProjectStructure},
    error::DomainError,
};

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across entities.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_config(config: &ProjectConfig) -> Result<(), DomainError> {
        config.validate()
    }

    pub fn validate_project_structure(structure: &ProjectStructure) -> Result<(), DomainError> {
        structure.validate()
    }

    /// A project name becomes the root directory, so it must be a single
    /// path component.
    pub fn validate_project_name(name: &str) -> Result<(), DomainError> {
        let invalid = |reason: &str| DomainError::InvalidProjectName {
            name: name.to_string(),
            reason: reason.to_string(),
        };

        if name.trim().is_empty() {
            return Err(invalid("name cannot be empty"));
        }
        if name.starts_with('.') {
            return Err(invalid("name cannot start with '.'"));
        }
        if name.contains('/') || name.contains('\\') {
            return Err(invalid("name cannot contain path separators"));
        }
        if name.chars().any(char::is_whitespace) {
            return Err(invalid("name cannot contain whitespace"));
        }
        Ok(())
    }

    /// Entity names end up as Python class names and module directories.
    pub fn validate_entity_name(name: &str) -> Result<(), DomainError> {
        let invalid = |reason: &str| DomainError::InvalidEntityName {
            name: name.to_string(),
            reason: reason.to_string(),
        };

        let mut chars = name.chars();
        match chars.next() {
            None => Err(invalid("name cannot be empty")),
            Some(c) if !c.is_ascii_alphabetic() => Err(invalid("name must start with a letter")),
            Some(_) if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') => Err(invalid(
                "only letters, digits and '_' are allowed",
            )),
            Some(_) => Ok(()),
        }
    }
}
