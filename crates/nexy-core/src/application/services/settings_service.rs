//! Settings Service - exposes the bindings of a project's `config.py`.

use std::path::Path;

use tracing::{debug, instrument};

use crate::{
    application::ports::{ConfigBindings, ConfigScriptLoader},
    error::NexyResult,
};

pub struct SettingsService {
    loader: Box<dyn ConfigScriptLoader>,
}

impl SettingsService {
    pub fn new(loader: Box<dyn ConfigScriptLoader>) -> Self {
        Self { loader }
    }

    #[instrument(skip(self, dir), fields(dir = %dir.as_ref().display()))]
    pub fn load(&self, dir: impl AsRef<Path>) -> NexyResult<ConfigBindings> {
        let bindings = self.loader.load(dir.as_ref())?;
        debug!(count = bindings.len(), "config.py loaded");
        Ok(bindings)
    }

    /// JSON text of a single binding, if `config.py` defines it.
    pub fn get(&self, dir: impl AsRef<Path>, name: &str) -> NexyResult<Option<String>> {
        Ok(self.load(dir)?.remove(name))
    }
}
