//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `nexy-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `PortProbe`: TCP occupancy checks
//!   - `EnvironmentProvisioner`: virtualenv creation + package install
//!   - `ConfigScriptLoader`: reading a project's `config.py`
//!   - `ProgressSink`: user-facing progress output
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{
    ConfigBindings, ConfigScriptLoader, EnvironmentProvisioner, EnvironmentStep, Filesystem,
    NullSink, PortProbe, ProgressEvent, ProgressSink,
};
