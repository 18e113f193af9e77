// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (the CLI re-renders them)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (400-level equivalent)
    // ========================================================================
    #[error("unsupported {category} option '{value}'")]
    UnsupportedOption {
        category: &'static str,
        value: String,
        /// Accepted spellings, taken from the option catalog.
        expected: &'static [&'static str],
    },

    #[error("invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    #[error("invalid entity name '{name}': {reason}")]
    InvalidEntityName { name: String, reason: String },

    // ========================================================================
    // Structure Errors (internal consistency of a generation plan)
    // ========================================================================
    #[error("Project structure is empty")]
    EmptyStructure,

    #[error("Duplicate path in project structure: {path}")]
    DuplicatePath { path: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::UnsupportedOption {
                category, expected, ..
            } => {
                let mut out = vec![format!("Supported {category} options:")];
                out.extend(expected.iter().map(|v| format!("  • {v}")));
                out
            }
            Self::InvalidProjectName { .. } => vec![
                "Use letters, digits, hyphens and underscores".into(),
                "Do not start the name with '.'".into(),
                "Examples: shop, my-api, blog_app".into(),
            ],
            Self::InvalidEntityName { .. } => vec![
                "Entity names must be identifiers: a letter followed by letters, digits or '_'"
                    .into(),
                "Examples: user, product, order_item".into(),
            ],
            Self::EmptyStructure | Self::DuplicatePath { .. } => vec![
                "The generation plan is inconsistent".into(),
                "Please report this issue".into(),
            ],
            Self::AbsolutePathNotAllowed { path } => {
                vec![format!("Use a path relative to the project root instead of {path}")]
            }
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnsupportedOption { .. }
            | Self::InvalidProjectName { .. }
            | Self::InvalidEntityName { .. } => ErrorCategory::Validation,
            Self::EmptyStructure
            | Self::DuplicatePath { .. }
            | Self::AbsolutePathNotAllowed { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Internal,
}
