//! Tracing setup for the `nexy` binary.
//!
//! `nexy-core` and `nexy-adapters` only emit events (generation steps, port
//! probes, subprocess runs); this module decides where they go. Records are
//! always written to stderr because stdout carries command results: generated
//! file listings, port numbers, JSON reports. When the run resolves to
//! [`OutputFormat::Json`] each record is a JSON object, so a JSON run never
//! mixes human text into either stream.
//!
//! Levels come from [`GlobalArgs::log_level`]; `RUST_LOG`, when set, replaces
//! the whole filter.

use std::io::{self, IsTerminal as _};

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{GlobalArgs, OutputFormat};

/// Crates whose events follow the `-v` / `--quiet` flags.
const NEXY_TARGETS: [&str; 3] = ["nexy", "nexy_core", "nexy_adapters"];

/// Install the global subscriber. `configured_format` is the settings file's
/// `output.format`, if a settings file was readable.
pub fn init_logging(args: &GlobalArgs, configured_format: Option<&str>) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directives(args.log_level())));

    let json = args.resolve_format(configured_format) == OutputFormat::Json;
    let layer = fmt::layer()
        .with_target(false)
        .with_ansi(!json && !args.no_color && io::stderr().is_terminal())
        .with_writer(io::stderr);

    let registry = tracing_subscriber::registry().with(filter);
    let installed = if json {
        registry.with(layer.json()).try_init()
    } else {
        registry.with(layer).try_init()
    };
    installed.map_err(|e| anyhow::anyhow!("Failed to initialise tracing: {e}"))
}

/// `nexy=<level>,nexy_core=<level>,...`; other crates stay at the default.
fn directives(level: &str) -> String {
    NEXY_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_nexy_crate_gets_the_level() {
        assert_eq!(
            directives("debug"),
            "nexy=debug,nexy_core=debug,nexy_adapters=debug"
        );
    }

    #[test]
    fn directives_parse_as_a_filter() {
        for level in ["error", "warn", "info", "debug", "trace"] {
            assert!(EnvFilter::try_new(directives(level)).is_ok(), "{level}");
        }
    }
}
