//! Loads a project's `config.py` by executing it with Python.

use std::path::Path;
use std::process::Command;

use serde_json::{Map, Value};
use tracing::debug;

use nexy_core::{
    application::{
        ApplicationError,
        ports::{ConfigBindings, ConfigScriptLoader},
    },
    error::{NexyError, NexyResult},
};

use super::{DEFAULT_PYTHON, run};

/// Name of the script looked up in the project directory.
pub const CONFIG_SCRIPT: &str = "config.py";

/// Runs the script, then prints its public bindings as one JSON object on
/// the last stdout line. Modules, functions and classes are dropped; values
/// JSON cannot encode fall back to `repr`.
const DUMP_BINDINGS: &str = r#"
import json, runpy, sys, types
ns = runpy.run_path(sys.argv[1], run_name="__nexy_config__")
out = {}
for key, value in ns.items():
    if key.startswith("_") or isinstance(value, (types.ModuleType, types.FunctionType, type)):
        continue
    try:
        json.dumps(value)
        out[key] = value
    except (TypeError, ValueError):
        out[key] = repr(value)
print()
print(json.dumps(out))
"#;

#[derive(Debug, Clone)]
pub struct PythonConfigLoader {
    python: String,
}

impl PythonConfigLoader {
    pub fn new() -> Self {
        Self::with_python(DEFAULT_PYTHON)
    }

    pub fn with_python(python: impl Into<String>) -> Self {
        Self {
            python: python.into(),
        }
    }

    fn parse(script: &Path, stdout: &str) -> NexyResult<ConfigBindings> {
        let failed = |reason: String| -> NexyError {
            ApplicationError::ConfigScriptFailed {
                path: script.to_path_buf(),
                reason,
            }
            .into()
        };

        let line = stdout
            .lines()
            .rev()
            .find(|l| !l.trim().is_empty())
            .ok_or_else(|| failed("no output from interpreter".into()))?;

        let object: Map<String, Value> =
            serde_json::from_str(line).map_err(|e| failed(format!("unreadable bindings: {e}")))?;

        Ok(object
            .into_iter()
            .map(|(name, value)| (name, value.to_string()))
            .collect())
    }
}

impl Default for PythonConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigScriptLoader for PythonConfigLoader {
    fn load(&self, dir: &Path) -> NexyResult<ConfigBindings> {
        let script = dir.join(CONFIG_SCRIPT);
        if !script.is_file() {
            return Err(ApplicationError::ConfigScriptMissing { path: script }.into());
        }

        let output = run(Command::new(&self.python)
            .arg("-c")
            .arg(DUMP_BINDINGS)
            .arg(&script)
            .current_dir(dir))
        .map_err(|e| match e {
            NexyError::Application(ApplicationError::ProvisioningFailed { stderr, .. }) => {
                ApplicationError::ConfigScriptFailed {
                    path: script.clone(),
                    reason: stderr,
                }
                .into()
            }
            other => other,
        })?;

        let bindings = Self::parse(&script, &String::from_utf8_lossy(&output.stdout))?;
        debug!(path = %script.display(), count = bindings.len(), "bindings read");
        Ok(bindings)
    }
}
