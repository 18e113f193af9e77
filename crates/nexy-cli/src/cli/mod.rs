//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.
//!
//! Project options (`--type`, `--database`, ...) are taken as strings and
//! parsed by `nexy_core` so that flags and config-file defaults share one
//! set of spellings and one error.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use nexy_core::domain::EntityKind;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "nexy",
    bin_name = "nexy",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{26a1} Create and manage Nexy web projects",
    long_about = "Nexy generates Python web projects (API or web app) with the \
                  database driver, ORM and test framework of your choice, and \
                  helps you pick a free port for the development server.",
    after_help = "EXAMPLES:\n\
        \x20 nexy new shop --type webapp --database postgresql --orm sqlalchemy --test pytest\n\
        \x20 nexy generate all product\n\
        \x20 nexy port --start 3000\n\
        \x20 nexy completions bash > /usr/share/bash-completion/completions/nexy",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new project.
    #[command(
        visible_alias = "n",
        about = "Create a new project",
        after_help = "EXAMPLES:\n\
            \x20 nexy new my-api\n\
            \x20 nexy new shop --type webapp --database postgresql --orm sqlalchemy\n\
            \x20 nexy new shop --test robot --feature auth --yes --venv"
    )]
    New(NewArgs),

    /// Generate controller/service/model stubs for an entity.
    #[command(
        visible_alias = "g",
        about = "Generate entity components",
        after_help = "EXAMPLES:\n\
            \x20 nexy generate controller user\n\
            \x20 nexy generate all product --force"
    )]
    Generate(GenerateArgs),

    /// Suggest a free TCP port for the development server.
    #[command(
        about = "Find a free port",
        after_help = "EXAMPLES:\n\
            \x20 nexy port\n\
            \x20 nexy port --start 8000 --next\n\
            \x20 nexy port --format json"
    )]
    Port(PortArgs),

    /// Create the project's virtual environment.
    #[command(
        about = "Create a virtual environment",
        after_help = "EXAMPLES:\n\
            \x20 nexy venv\n\
            \x20 nexy venv --name .venv --no-install"
    )]
    Venv(VenvArgs),

    /// Show the values defined in the project's `config.py`.
    #[command(
        about = "Show config.py settings",
        after_help = "EXAMPLES:\n\
            \x20 nexy settings\n\
            \x20 nexy settings DATABASE_URL --dir ./shop"
    )]
    Settings(SettingsArgs),

    /// Initialise a Nexy configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 nexy init           # user config directory\n\
            \x20 nexy init --local   # .nexy.toml in CWD"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 nexy completions bash > ~/.local/share/bash-completion/completions/nexy\n\
            \x20 nexy completions zsh  > ~/.zfunc/_nexy\n\
            \x20 nexy completions fish > ~/.config/fish/completions/nexy.fish"
    )]
    Completions(CompletionsArgs),

    /// Manage the Nexy configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 nexy config get defaults.database\n\
            \x20 nexy config set defaults.database postgresql\n\
            \x20 nexy config list"
    )]
    Config(ConfigCommands),
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `nexy new`.
#[derive(Debug, Args)]
pub struct NewArgs {
    /// Project name or path.  A plain name creates `./name`; a path like
    /// `../foo` places the project one level up.
    #[arg(value_name = "NAME", help = "Project name or path")]
    pub name: String,

    #[arg(
        short = 't',
        long = "type",
        value_name = "TYPE",
        help = "Project type: api, webapp"
    )]
    pub project_type: Option<String>,

    #[arg(
        short = 'd',
        long = "database",
        value_name = "DATABASE",
        help = "Database: none, mysql, postgresql, mongodb, sqlite"
    )]
    pub database: Option<String>,

    #[arg(
        short = 'o',
        long = "orm",
        value_name = "ORM",
        help = "ORM: none, prisma, sqlalchemy"
    )]
    pub orm: Option<String>,

    #[arg(
        long = "test",
        value_name = "FRAMEWORK",
        help = "Test framework: none, pytest, unittest, robot"
    )]
    pub test_framework: Option<String>,

    /// Repeatable; also accepts a comma-separated list.
    #[arg(
        short = 'f',
        long = "feature",
        value_name = "FEATURE",
        value_delimiter = ',',
        help = "Optional feature to enable (e.g. auth)"
    )]
    pub features: Vec<String>,

    /// Skip prompts; unspecified options come from the config defaults.
    #[arg(
        short = 'y',
        long = "yes",
        help = "Use defaults for unspecified options and skip confirmation"
    )]
    pub yes: bool,

    /// Preview what would be created without writing any files.
    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,

    #[arg(long = "skip-existing", help = "Keep files that already exist")]
    pub skip_existing: bool,

    #[arg(long = "venv", help = "Create a virtual environment after generating")]
    pub venv: bool,

    #[arg(
        long = "env-name",
        value_name = "DIR",
        requires = "venv",
        help = "Virtual environment directory name"
    )]
    pub env_name: Option<String>,
}

// ── generate ──────────────────────────────────────────────────────────────────

/// Arguments for `nexy generate`.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    #[arg(value_enum, help = "What to generate")]
    pub kind: ComponentKind,

    #[arg(value_name = "NAME", help = "Entity name, e.g. user")]
    pub name: String,

    #[arg(long = "force", help = "Overwrite existing files")]
    pub force: bool,

    #[arg(
        long = "dir",
        value_name = "DIR",
        help = "Project root (default: current directory)"
    )]
    pub dir: Option<PathBuf>,
}

/// Component selection for `nexy generate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ComponentKind {
    Controller,
    Service,
    Model,
    /// Controller, service and model.
    All,
}

impl ComponentKind {
    pub fn entity_kinds(self) -> &'static [EntityKind] {
        match self {
            Self::Controller => &[EntityKind::Controller],
            Self::Service => &[EntityKind::Service],
            Self::Model => &[EntityKind::Model],
            Self::All => &EntityKind::ALL,
        }
    }
}

// ── port ──────────────────────────────────────────────────────────────────────

/// Arguments for `nexy port`.
#[derive(Debug, Args)]
pub struct PortArgs {
    #[arg(
        short = 's',
        long = "start",
        value_name = "PORT",
        help = "First port to try (default from config: 3000)"
    )]
    pub start: Option<u16>,

    #[arg(long = "host", value_name = "HOST", help = "Host to probe")]
    pub host: Option<String>,

    #[arg(long = "next", help = "Print only the next free port")]
    pub next: bool,

    #[arg(long = "format", value_enum, help = "Output format")]
    pub format: Option<PortFormat>,
}

/// Output format for the `port` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PortFormat {
    Human,
    Json,
}

// ── venv ──────────────────────────────────────────────────────────────────────

/// Arguments for `nexy venv`.
#[derive(Debug, Args)]
pub struct VenvArgs {
    #[arg(long = "name", value_name = "DIR", help = "Environment directory name")]
    pub name: Option<String>,

    #[arg(
        long = "requirements",
        value_name = "FILE",
        help = "Requirements file (default: requirements.txt)"
    )]
    pub requirements: Option<PathBuf>,

    #[arg(long = "no-install", help = "Do not install requirements")]
    pub no_install: bool,

    #[arg(
        long = "dir",
        value_name = "DIR",
        help = "Project root (default: current directory)"
    )]
    pub dir: Option<PathBuf>,
}

// ── settings ──────────────────────────────────────────────────────────────────

/// Arguments for `nexy settings`.
#[derive(Debug, Args)]
pub struct SettingsArgs {
    #[arg(value_name = "NAME", help = "Print only this setting")]
    pub name: Option<String>,

    #[arg(
        long = "dir",
        value_name = "DIR",
        help = "Directory containing config.py (default: current directory)"
    )]
    pub dir: Option<PathBuf>,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `nexy init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to `.nexy.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `nexy completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `nexy config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `ports.start`.
        key: String,
    },
    /// Set a configuration key to a value.
    Set {
        /// Dotted key path.
        key: String,
        /// New value.
        value: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
