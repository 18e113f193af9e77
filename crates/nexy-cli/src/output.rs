//! Output management and formatting.

use std::io::{self, IsTerminal};
use std::time::Duration;

use console::Term;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use tracing::warn;

use nexy_core::application::ports::{EnvironmentStep, ProgressEvent, ProgressSink};

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

const BANNER: &str = r"
    _   __
   / | / /__  _  ____  __
  /  |/ / _ \| |/_/ / / /
 / /|  /  __/>  </ /_/ /
/_/ |_/\___/_/|_|\__, /
                /____/";

/// Manages CLI output based on configuration.
///
/// Also the terminal [`ProgressSink`] handed to core services.
#[derive(Debug, Clone)]
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let resolved_format = args.resolve_format(Some(&config.output.format));

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color
                || config.output.no_color
                || resolved_format != OutputFormat::Human,
            term: Term::stdout(),
        }
    }

    /// Human-oriented text goes to stdout only outside quiet and JSON runs;
    /// a JSON run's stdout is exactly the documents passed to [`Self::data`].
    fn writes_text(&self) -> bool {
        !self.quiet && self.resolved_format != OutputFormat::Json
    }

    // ── Public write methods ───────────────────────────────────────────────

    /// Generic message; suppressed in quiet and JSON mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if !self.writes_text() {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Machine-readable payload; written even in quiet mode.
    pub fn data(&self, msg: &str) -> io::Result<()> {
        self.term.write_line(msg)
    }

    /// Success indicator: `✓ <msg>`.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        if !self.writes_text() {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2713} {msg}") // ✓
        } else {
            format!("{} {}", "\u{2713}".green().bold(), msg.green())
        };
        self.term.write_line(&line)
    }

    /// Warning indicator: `⚠ <msg>`. In JSON mode the warning becomes a log
    /// record on stderr instead.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        if self.resolved_format == OutputFormat::Json {
            warn!("{msg}");
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{26a0} {msg}") // ⚠
        } else {
            format!("{} {}", "\u{26a0}".yellow().bold(), msg.yellow())
        };
        self.term.write_line(&line)
    }

    /// Informational indicator: `ℹ <msg>`.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        if !self.writes_text() {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2139} {msg}") // ℹ
        } else {
            format!("{} {}", "\u{2139}".blue().bold(), msg.blue())
        };
        self.term.write_line(&line)
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if !self.writes_text() {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    /// ASCII-art logo, only on an interactive human-format terminal.
    pub fn banner(&self) -> io::Result<()> {
        if self.quiet || self.resolved_format != OutputFormat::Human {
            return Ok(());
        }
        let art = if self.no_color {
            BANNER.to_owned()
        } else {
            BANNER.green().bold().to_string()
        };
        self.term.write_line(&art)?;
        self.term.write_line("")
    }

    /// Numbered list of candidate ports, first one highlighted.
    pub fn port_choices(&self, host: &str, ports: &[u16]) -> io::Result<()> {
        self.header(&format!("Free ports on {host}:"))?;
        for (i, port) in ports.iter().enumerate() {
            let line = format!("  {}. Port {port}  {host}:{port}", i + 1);
            if i == 0 && !self.no_color {
                self.print(&format!("{}  {}", line.green().bold(), "(suggested)".dimmed()))?;
            } else if i == 0 {
                self.print(&format!("{line}  (suggested)"))?;
            } else {
                self.print(&line)?;
            }
        }
        Ok(())
    }

    /// Spinner on stderr; hidden unless this is an interactive human run.
    pub fn spinner(&self, message: &str) -> ProgressBar {
        if self.quiet
            || self.resolved_format != OutputFormat::Human
            || !io::stderr().is_terminal()
        {
            return ProgressBar::hidden();
        }

        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "✓"])
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        spinner.set_style(style);
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(80));
        spinner
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// The resolved (non-Auto) output format.
    pub fn format(&self) -> OutputFormat {
        self.resolved_format
    }
}

impl ProgressSink for OutputManager {
    fn emit(&self, event: &ProgressEvent) {
        if self.resolved_format == OutputFormat::Json {
            return;
        }
        // Write failures here are not worth aborting a generation for.
        let _ = match event {
            ProgressEvent::DirectoryCreated { .. } | ProgressEvent::PortAvailable { .. } => Ok(()),
            ProgressEvent::FileWritten { path } => self.print(&format!("  + {}", path.display())),
            ProgressEvent::FileSkipped { path } => {
                self.warning(&format!("Kept existing {}", path.display()))
            }
            ProgressEvent::PortOccupied { port } => self.info(&format!("Port {port} is in use")),
            ProgressEvent::EnvironmentExists { path } => self.warning(&format!(
                "Virtual environment already exists at {}",
                path.display()
            )),
            ProgressEvent::EnvironmentStep { step, path } => match step {
                EnvironmentStep::Creating => {
                    self.info(&format!("Creating virtual environment at {}", path.display()))
                }
                EnvironmentStep::UpgradingInstaller => self.info("Upgrading pip"),
                EnvironmentStep::InstallingRequirements => {
                    self.info(&format!("Installing packages from {}", path.display()))
                }
                EnvironmentStep::Ready => self.success("Virtual environment ready"),
            },
        };
    }
}

/// Sink that turns file events into spinner messages.
#[derive(Debug, Clone)]
pub struct SpinnerSink {
    bar: ProgressBar,
}

impl SpinnerSink {
    pub fn new(bar: ProgressBar) -> Self {
        Self { bar }
    }
}

impl ProgressSink for SpinnerSink {
    fn emit(&self, event: &ProgressEvent) {
        match event {
            ProgressEvent::DirectoryCreated { path } | ProgressEvent::FileWritten { path } => {
                self.bar.set_message(path.display().to_string());
            }
            ProgressEvent::FileSkipped { path } => {
                self.bar.println(format!("  kept {}", path.display()));
            }
            _ => {}
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
