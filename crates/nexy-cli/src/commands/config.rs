//! `nexy config`: read and write configuration values.
//!
//! Keys are dotted paths into [`AppConfig`], e.g. `ports.start`. `set`
//! edits only the file (never the environment layer) and refuses to write
//! anything that would not load back.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, instrument};

use nexy_core::domain::{Database, Orm, ProjectType, TestFramework};

use crate::{
    cli::{ConfigCommands, GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
#[instrument(skip_all)]
pub fn execute(
    cmd: ConfigCommands,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config, &key)?;
            output.data(&render(&value))?;
        }

        ConfigCommands::Set { key, value } => {
            let path = active_path(&global);
            set_in_file(&path, &key, &value)?;
            output.success(&format!("Set {key} = {value} in {}", path.display()))?;
        }

        ConfigCommands::List => {
            output.header("Current configuration:")?;
            let text = config
                .to_toml()
                .with_cli_context(|| "Failed to serialise config")?;
            output.data(text.trim_end())?;
        }

        ConfigCommands::Path => {
            output.data(&active_path(&global).display().to_string())?;
        }
    }

    Ok(())
}

/// `--config FILE` if given, else the default location.
fn active_path(global: &GlobalArgs) -> PathBuf {
    global.config.clone().unwrap_or_else(AppConfig::config_path)
}

// ── get ───────────────────────────────────────────────────────────────────────

fn get_config_value(config: &AppConfig, key: &str) -> CliResult<Value> {
    let tree = serde_json::to_value(config).map_err(|e| CliError::ConfigError {
        message: "Failed to serialise config".into(),
        source: Some(Box::new(e)),
    })?;

    match lookup(&tree, key) {
        Some(Value::Object(_)) | None => Err(CliError::UnknownConfigKey { key: key.into() }),
        Some(value) => Ok(value.clone()),
    }
}

fn lookup<'a>(tree: &'a Value, key: &str) -> Option<&'a Value> {
    key.split('.').try_fold(tree, |node, part| node.get(part))
}

/// Strings print bare; an unset optional prints nothing.
fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

// ── set ───────────────────────────────────────────────────────────────────────

/// Update `key` in the TOML file at `path`, creating the file if needed.
fn set_in_file(path: &Path, key: &str, raw: &str) -> CliResult<()> {
    let value = parse_value(key, raw)?;

    let mut table = if path.is_file() {
        let text = std::fs::read_to_string(path)
            .with_cli_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str::<toml::Table>(&text).map_err(|e| CliError::ConfigError {
            message: format!("Failed to parse {}", path.display()),
            source: Some(Box::new(e)),
        })?
    } else {
        toml::Table::new()
    };

    set_path(&mut table, key, value)?;

    let text = toml::to_string_pretty(&table).map_err(|e| CliError::ConfigError {
        message: "Failed to serialise config".into(),
        source: Some(Box::new(e)),
    })?;
    toml::from_str::<AppConfig>(&text).map_err(|e| CliError::InvalidInput {
        message: format!("'{raw}' is not a valid value for {key}"),
        source: Some(Box::new(e)),
    })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_cli_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(path, text)
        .with_cli_context(|| format!("Failed to write {}", path.display()))?;

    debug!(key, path = %path.display(), "config updated");
    Ok(())
}

/// Convert `raw` to the TOML type the default value of `key` has.
fn parse_value(key: &str, raw: &str) -> CliResult<toml::Value> {
    let template = get_config_value(&AppConfig::default(), key)?;
    let invalid = |expected: &str| CliError::InvalidInput {
        message: format!("{key} expects {expected}, got '{raw}'"),
        source: None,
    };

    let value = match template {
        Value::Bool(_) => {
            toml::Value::Boolean(raw.trim().parse().map_err(|_| invalid("true or false"))?)
        }
        Value::Number(_) => {
            toml::Value::Integer(raw.trim().parse().map_err(|_| invalid("a number"))?)
        }
        Value::Array(_) => toml::Value::Array(
            raw.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| toml::Value::String(s.to_string()))
                .collect(),
        ),
        _ => toml::Value::String(normalize_option(key, raw)?),
    };
    Ok(value)
}

/// Project options are stored under their canonical spelling.
fn normalize_option(key: &str, raw: &str) -> CliResult<String> {
    let canonical = match key {
        "defaults.project_type" => raw.parse::<ProjectType>()?.as_str(),
        "defaults.database" => raw.parse::<Database>()?.as_str(),
        "defaults.orm" => raw.parse::<Orm>()?.as_str(),
        "defaults.test_framework" => raw.parse::<TestFramework>()?.as_str(),
        _ => return Ok(raw.to_string()),
    };
    Ok(canonical.to_string())
}

fn set_path(table: &mut toml::Table, key: &str, value: toml::Value) -> CliResult<()> {
    let mut parts: Vec<&str> = key.split('.').collect();
    let leaf = parts
        .pop()
        .ok_or_else(|| CliError::UnknownConfigKey { key: key.into() })?;

    let mut current = table;
    for part in parts {
        current = current
            .entry(part)
            .or_insert(toml::Value::Table(toml::Table::new()))
            .as_table_mut()
            .ok_or_else(|| CliError::ConfigError {
                message: format!("'{part}' is not a table in the config file"),
                source: None,
            })?;
    }
    current.insert(leaf.to_string(), value);
    Ok(())
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_known_keys() {
        let cfg = AppConfig::default();
        assert_eq!(render(&get_config_value(&cfg, "defaults.database").unwrap()), "none");
        assert_eq!(render(&get_config_value(&cfg, "ports.start").unwrap()), "3000");
        assert_eq!(render(&get_config_value(&cfg, "output.no_color").unwrap()), "false");
        assert_eq!(render(&get_config_value(&cfg, "environment.python").unwrap()), "");
    }

    #[test]
    fn get_unknown_key_or_section_is_error() {
        let cfg = AppConfig::default();
        for key in ["does.not.exist", "ports", ""] {
            assert!(
                matches!(
                    get_config_value(&cfg, key),
                    Err(CliError::UnknownConfigKey { .. })
                ),
                "key: {key}"
            );
        }
    }

    #[test]
    fn parse_value_follows_default_types() {
        assert_eq!(parse_value("ports.start", "8000").unwrap(), toml::Value::Integer(8000));
        assert_eq!(
            parse_value("generation.skip_existing", "true").unwrap(),
            toml::Value::Boolean(true)
        );
        assert_eq!(
            parse_value("environment.python", "python3.12").unwrap(),
            toml::Value::String("python3.12".into())
        );
        assert!(matches!(
            parse_value("ports.start", "many"),
            Err(CliError::InvalidInput { .. })
        ));
    }

    #[test]
    fn option_aliases_are_canonicalised() {
        assert_eq!(
            parse_value("defaults.database", "Postgres").unwrap(),
            toml::Value::String("postgresql".into())
        );
        assert_eq!(parse_value("defaults.database", "oracle").unwrap_err().exit_code(), 2);
    }

    #[test]
    fn features_split_on_commas() {
        let value = parse_value("defaults.features", "auth, admin,").unwrap();
        assert_eq!(
            value,
            toml::Value::Array(vec![
                toml::Value::String("auth".into()),
                toml::Value::String("admin".into())
            ])
        );
    }

    #[test]
    fn set_creates_file_and_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        set_in_file(&path, "ports.start", "8000").unwrap();
        set_in_file(&path, "defaults.orm", "sqlalchemy").unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let cfg: AppConfig = toml::from_str(&written).unwrap();
        assert_eq!(cfg.ports.start, 8000);
        assert_eq!(cfg.defaults.orm, Orm::Sqlalchemy);
        assert_eq!(cfg.ports.host, "localhost");
    }

    #[test]
    fn out_of_range_value_is_not_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        assert!(set_in_file(&path, "ports.start", "70000").is_err());
        assert!(!path.exists());
    }
}
