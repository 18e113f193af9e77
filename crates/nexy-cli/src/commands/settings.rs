//! `nexy settings`: show what a project's `config.py` defines.

use std::path::PathBuf;

use serde_json::{Map, Value};
use tracing::instrument;

use nexy_adapters::PythonConfigLoader;
use nexy_core::application::{SettingsService, ports::ConfigBindings};

use crate::{
    cli::{OutputFormat, SettingsArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all)]
pub fn execute(args: SettingsArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let dir = args.dir.clone().unwrap_or_else(|| PathBuf::from("."));

    let loader = match &config.environment.python {
        Some(python) => PythonConfigLoader::with_python(python.clone()),
        None => PythonConfigLoader::new(),
    };
    let service = SettingsService::new(Box::new(loader));

    let bindings = match &args.name {
        Some(name) => {
            let value = service
                .get(&dir, name)?
                .ok_or_else(|| CliError::UnknownSetting {
                    name: name.clone(),
                    dir: dir.clone(),
                })?;
            ConfigBindings::from([(name.clone(), value)])
        }
        None => service.load(&dir)?,
    };

    if output.format() == OutputFormat::Json {
        output.data(&to_json(&bindings).to_string())?;
        return Ok(());
    }

    if args.name.is_some() {
        for value in bindings.values() {
            output.data(value)?;
        }
        return Ok(());
    }

    if bindings.is_empty() {
        output.info("config.py defines no public settings")?;
    }
    for (name, value) in &bindings {
        output.print(&format!("{name} = {value}"))?;
    }
    Ok(())
}

/// Bindings as one JSON object; values that are not valid JSON stay strings.
fn to_json(bindings: &ConfigBindings) -> Value {
    let map: Map<String, Value> = bindings
        .iter()
        .map(|(name, text)| {
            let value = serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.clone()));
            (name.clone(), value)
        })
        .collect();
    Value::Object(map)
}
