//! Flags accepted by every `nexy` subcommand.
//!
//! Besides the flag definitions, [`GlobalArgs`] owns two decisions that both
//! the logger and the [`OutputManager`](crate::output::OutputManager) depend
//! on: the effective [`OutputFormat`] and the log level.

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use clap::{Args, ValueEnum};

#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// Show what nexy is doing: `-v` reports generation steps and port
    /// probes, `-vv` adds per-file detail, `-vvv` everything.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Report more of what nexy is doing (-v, -vv, -vvv)"
    )]
    pub verbose: u8,

    /// Only errors and requested data (JSON reports, port numbers) are printed.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Print errors and requested data only"
    )]
    pub quiet: bool,

    /// Plain glyphs instead of colored ones. `NO_COLOR=1` has the same
    /// effect; `NO_COLOR=0` or an empty value does not.
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new(),
        help = "Disable colored output"
    )]
    pub no_color: bool,

    /// Settings file to use instead of `./.nexy.toml` or the user config.
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        help = "Use this nexy settings file"
    )]
    pub config: Option<PathBuf>,

    #[arg(
        long = "output-format",
        global = true,
        value_enum,
        default_value = "auto",
        help = "How results are printed (auto picks human on a terminal, plain otherwise)"
    )]
    pub output_format: OutputFormat,
}

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `output.format` from the settings file, else human on a terminal.
    #[default]
    Auto,
    /// Colored, with the banner, spinner and next-step hints.
    Human,
    /// Same text without colors or animation.
    Plain,
    /// A single JSON document per command; logs become JSON lines on stderr.
    Json,
}

impl GlobalArgs {
    /// The format this run writes in.
    ///
    /// An explicit `--output-format` wins over `configured` (the settings
    /// file's `output.format`); whatever is still `auto` becomes human on a
    /// terminal and plain when stdout is piped. Never returns `Auto`.
    pub fn resolve_format(&self, configured: Option<&str>) -> OutputFormat {
        let requested = match self.output_format {
            OutputFormat::Auto => configured
                .and_then(|name| <OutputFormat as ValueEnum>::from_str(name.trim(), true).ok())
                .unwrap_or(OutputFormat::Auto),
            explicit => explicit,
        };

        match requested {
            OutputFormat::Auto if io::stdout().is_terminal() => OutputFormat::Human,
            OutputFormat::Auto => OutputFormat::Plain,
            resolved => resolved,
        }
    }

    /// Log level for the nexy crates: `--quiet` keeps errors only, otherwise
    /// each `-v` goes one step down from warnings.
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(verbose: u8, quiet: bool, output_format: OutputFormat) -> GlobalArgs {
        GlobalArgs {
            verbose,
            quiet,
            no_color: true,
            config: None,
            output_format,
        }
    }

    #[test]
    fn flag_beats_settings_file() {
        let json = args(0, false, OutputFormat::Json);
        assert_eq!(json.resolve_format(Some("plain")), OutputFormat::Json);

        let human = args(0, false, OutputFormat::Human);
        assert_eq!(human.resolve_format(Some("json")), OutputFormat::Human);
    }

    #[test]
    fn settings_file_applies_when_flag_is_auto() {
        let auto = args(0, false, OutputFormat::Auto);
        assert_eq!(auto.resolve_format(Some("json")), OutputFormat::Json);
        assert_eq!(auto.resolve_format(Some("Plain")), OutputFormat::Plain);
    }

    #[test]
    fn auto_never_survives_resolution() {
        let auto = args(0, false, OutputFormat::Auto);
        for configured in [None, Some("auto"), Some("yaml")] {
            let resolved = auto.resolve_format(configured);
            assert!(
                matches!(resolved, OutputFormat::Human | OutputFormat::Plain),
                "{configured:?} resolved to {resolved:?}"
            );
        }
    }

    #[test]
    fn each_verbose_flag_lowers_the_level() {
        let levels: Vec<_> = (0..=4)
            .map(|v| args(v, false, OutputFormat::Auto).log_level())
            .collect();
        assert_eq!(levels, ["warn", "info", "debug", "trace", "trace"]);
    }

    #[test]
    fn quiet_keeps_errors_only() {
        assert_eq!(args(0, true, OutputFormat::Auto).log_level(), "error");
        assert_eq!(args(3, true, OutputFormat::Auto).log_level(), "error");
    }
}
