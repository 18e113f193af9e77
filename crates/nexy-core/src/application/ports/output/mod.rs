//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `nexy-adapters` crate provides implementations.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::NexyResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `nexy_adapters::filesystem::LocalFilesystem` (production)
/// - `nexy_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories. Succeeds if it exists.
    fn create_dir_all(&self, path: &Path) -> NexyResult<()>;

    /// Write content to a file, truncating any existing content.
    fn write_file(&self, path: &Path, content: &str) -> NexyResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Port for TCP occupancy checks.
///
/// A port is *in use* when something accepts connections on it. Implemented
/// by `nexy_adapters::network::TcpConnectProbe`.
#[cfg_attr(test, mockall::automock)]
pub trait PortProbe: Send + Sync {
    /// Fails only when the host cannot be resolved or the socket layer
    /// errors; a refused connection means the port is free.
    fn is_in_use(&self, host: &str, port: u16) -> NexyResult<bool>;
}

/// Port for creating isolated Python environments.
///
/// Implemented by `nexy_adapters::process::VenvProvisioner`.
#[cfg_attr(test, mockall::automock)]
pub trait EnvironmentProvisioner: Send + Sync {
    /// Create a fresh environment at `venv`.
    fn create_environment(&self, venv: &Path) -> NexyResult<()>;

    /// Upgrade the package installer inside `venv`.
    fn upgrade_installer(&self, venv: &Path) -> NexyResult<()>;

    /// Install every package listed in `requirements` into `venv`.
    fn install_requirements(&self, venv: &Path, requirements: &Path) -> NexyResult<()>;
}

/// Top-level bindings exported by a project's `config.py`, name → JSON text.
pub type ConfigBindings = BTreeMap<String, String>;

/// Port for reading a project's `config.py`.
///
/// Implemented by `nexy_adapters::process::PythonConfigLoader`.
pub trait ConfigScriptLoader: Send + Sync {
    /// Locate and execute `config.py` in `dir`.
    fn load(&self, dir: &Path) -> NexyResult<ConfigBindings>;
}

/// Something worth telling the user while a service runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    DirectoryCreated { path: PathBuf },
    FileWritten { path: PathBuf },
    FileSkipped { path: PathBuf },
    PortOccupied { port: u16 },
    PortAvailable { port: u16 },
    EnvironmentExists { path: PathBuf },
    EnvironmentStep { step: EnvironmentStep, path: PathBuf },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvironmentStep {
    Creating,
    UpgradingInstaller,
    InstallingRequirements,
    Ready,
}

/// Output sink injected into services in place of a global console.
///
/// Implemented by:
/// - [`NullSink`] (discard)
/// - `nexy_adapters::sink::RecordingSink` (testing)
/// - the CLI's `OutputManager` (terminal)
pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: &ProgressEvent);
}

/// Sink that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl ProgressSink for NullSink {
    fn emit(&self, _event: &ProgressEvent) {}
}
