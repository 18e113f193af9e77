//! Command handlers, one module per subcommand.
//!
//! Handlers translate parsed arguments into core service calls and render
//! the results. No generation logic lives here.

pub mod completions;
pub mod config;
pub mod generate;
pub mod init;
pub mod new;
pub mod port;
pub mod settings;
pub mod venv;
