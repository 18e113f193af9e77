//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `NEXY_<SECTION>__<KEY>`, e.g. `NEXY_PORTS__START=8000`
//! 3. Config file (`--config FILE`, else the user config dir, else `./.nexy.toml`)
//! 4. Built-in defaults (always present)

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use nexy_core::domain::{Database, Orm, ProjectType, TestFramework};

/// Name of the per-directory config file.
pub const LOCAL_CONFIG_FILE: &str = ".nexy.toml";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default values for new projects.
    pub defaults: Defaults,
    /// Output settings.
    pub output: OutputConfig,
    /// File generation behaviour.
    pub generation: GenerationConfig,
    /// Port discovery.
    pub ports: PortsConfig,
    /// Virtual environment provisioning.
    pub environment: EnvironmentConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub project_type: ProjectType,
    pub database: Database,
    pub orm: Orm,
    pub test_framework: TestFramework,
    pub features: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    /// `auto`, `human`, `plain` or `json`; used when `--output-format` is absent.
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Keep files that already exist instead of rewriting them.
    pub skip_existing: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortsConfig {
    pub start: u16,
    pub host: String,
    pub connect_timeout_ms: u64,
}

impl Default for PortsConfig {
    fn default() -> Self {
        Self {
            start: 3000,
            host: "localhost".into(),
            connect_timeout_ms: 250,
        }
    }
}

impl PortsConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    /// Directory name of the virtual environment inside the project.
    pub name: String,
    /// Interpreter used to create environments and run `config.py`.
    pub python: Option<String>,
    pub install_requirements: bool,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            name: "venv".into(),
            python: None,
            install_requirements: true,
        }
    }
}

impl AppConfig {
    /// Load configuration, layering file and environment over defaults.
    ///
    /// An explicit `config_file` must exist; the default locations are
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let file = match config_file {
            Some(path) => config::File::from(path.as_path()).required(true),
            None => config::File::from(Self::config_path()).required(false),
        };

        let settings = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix("NEXY")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("defaults.features")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read configuration sources")?;

        settings
            .try_deserialize()
            .context("Invalid configuration values")
    }

    /// Path to the configuration file used when `--config` is absent.
    ///
    /// A `.nexy.toml` in the current directory wins; otherwise uses
    /// `directories::ProjectDirs` for cross-platform correctness, falling
    /// back to `.nexy.toml` when no home directory is known.
    pub fn config_path() -> PathBuf {
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.is_file() {
            return local;
        }
        Self::user_config_path().unwrap_or(local)
    }

    /// `<config dir>/nexy/config.toml`, if the platform has one.
    pub fn user_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("dev", "nexy", "nexy")
            .map(|d| d.config_dir().join("config.toml"))
    }

    /// Serialise to pretty TOML.
    pub fn to_toml(&self) -> anyhow::Result<String> {
        toml::to_string_pretty(self).context("Failed to serialise configuration")
    }
}
