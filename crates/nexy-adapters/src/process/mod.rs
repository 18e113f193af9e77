//! Adapters that shell out to a Python interpreter.

mod config_loader;
mod venv;

pub use config_loader::PythonConfigLoader;
pub use venv::VenvProvisioner;

use std::process::{Command, Output};

use nexy_core::{application::ApplicationError, error::NexyResult};

/// Interpreter used when none is configured.
pub const DEFAULT_PYTHON: &str = if cfg!(windows) { "python" } else { "python3" };

/// Human-readable rendering of a command line, for error messages.
fn describe(command: &Command) -> String {
    std::iter::once(command.get_program())
        .chain(command.get_args())
        .map(|part| part.to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Run to completion, capturing output. Spawn failures and non-zero exits
/// both become `ProvisioningFailed`.
fn run(command: &mut Command) -> NexyResult<Output> {
    let line = describe(command);
    tracing::debug!(command = %line, "running");

    let output = command
        .output()
        .map_err(|e| ApplicationError::ProvisioningFailed {
            command: line.clone(),
            status: "failed to start".into(),
            stderr: e.to_string(),
        })?;

    if !output.status.success() {
        return Err(ApplicationError::ProvisioningFailed {
            command: line,
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
        .into());
    }
    Ok(output)
}
