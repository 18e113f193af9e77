//! Infrastructure adapters for Nexy.
//!
//! This crate implements the ports defined in `nexy-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod filesystem;
pub mod network;
pub mod process;
pub mod sink;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use network::TcpConnectProbe;
pub use process::{PythonConfigLoader, VenvProvisioner};
pub use sink::RecordingSink;
