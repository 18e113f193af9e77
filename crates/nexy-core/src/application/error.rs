//! Application layer errors.
//!
//! These errors represent failures in orchestration and in the external
//! collaborators behind the ports, not generation logic. Generation errors
//! are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// In-memory adapter state is unavailable (lock poisoned).
    #[error("Adapter state lock poisoned")]
    StoreLockError,

    /// Port 0 is not a scannable TCP port.
    #[error("Invalid port {port}: ports start at 1")]
    InvalidPort { port: u16 },

    /// Every port from `start` up to the maximum is occupied.
    #[error("No free port found between {start} and {max}")]
    PortRangeExhausted { start: u16, max: u16 },

    /// Host resolution or socket failure while probing.
    #[error("Network error probing {host}:{port}: {reason}")]
    NetworkError {
        host: String,
        port: u16,
        reason: String,
    },

    /// An environment provisioning command exited unsuccessfully.
    #[error("Command `{command}` failed ({status}): {stderr}")]
    ProvisioningFailed {
        command: String,
        status: String,
        stderr: String,
    },

    /// No `config.py` in the project directory.
    #[error("Config script not found at {path}")]
    ConfigScriptMissing { path: PathBuf },

    /// `config.py` raised or produced unreadable output.
    #[error("Failed to load config script {path}: {reason}")]
    ConfigScriptFailed { path: PathBuf, reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Check available disk space".into(),
            ],
            Self::InvalidPort { .. } => vec!["Pick a starting port between 1 and 65535".into()],
            Self::PortRangeExhausted { start, .. } => vec![
                format!("Every port from {start} upward is in use"),
                "Try a lower starting port with --start".into(),
            ],
            Self::NetworkError { host, .. } => vec![
                format!("Check that '{host}' resolves on this machine"),
                "Use a local host such as localhost or 127.0.0.1".into(),
            ],
            Self::ProvisioningFailed { command, .. } => vec![
                format!("Re-run manually to see the full output: {command}"),
                "Ensure Python 3 with the venv module is installed".into(),
                "Set environment.python in the config to pick another interpreter".into(),
            ],
            Self::ConfigScriptMissing { path } => vec![
                format!("Create {} at the project root", path.display()),
                "Or run the command from the project directory".into(),
            ],
            Self::ConfigScriptFailed { .. } => vec![
                "Fix the error raised by config.py".into(),
                "Run `python config.py` to reproduce it".into(),
            ],
            Self::StoreLockError => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidPort { .. } => ErrorCategory::Validation,
            Self::PortRangeExhausted { .. } | Self::ConfigScriptMissing { .. } => {
                ErrorCategory::NotFound
            }
            Self::FilesystemError { .. }
            | Self::StoreLockError
            | Self::NetworkError { .. }
            | Self::ProvisioningFailed { .. }
            | Self::ConfigScriptFailed { .. } => ErrorCategory::Internal,
        }
    }
}
