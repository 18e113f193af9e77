//! Virtual environment provisioning via `python -m venv` and pip.

use std::path::{Path, PathBuf};
use std::process::Command;

use nexy_core::{application::ports::EnvironmentProvisioner, error::NexyResult};

use super::{DEFAULT_PYTHON, run};

#[derive(Debug, Clone)]
pub struct VenvProvisioner {
    python: String,
}

impl VenvProvisioner {
    pub fn new() -> Self {
        Self::with_python(DEFAULT_PYTHON)
    }

    pub fn with_python(python: impl Into<String>) -> Self {
        Self {
            python: python.into(),
        }
    }

    pub fn python(&self) -> &str {
        &self.python
    }

    /// Interpreter inside an environment.
    pub fn venv_python(venv: &Path) -> PathBuf {
        if cfg!(windows) {
            venv.join("Scripts").join("python.exe")
        } else {
            venv.join("bin").join("python")
        }
    }

    /// pip inside an environment.
    pub fn venv_pip(venv: &Path) -> PathBuf {
        if cfg!(windows) {
            venv.join("Scripts").join("pip.exe")
        } else {
            venv.join("bin").join("pip")
        }
    }
}

impl Default for VenvProvisioner {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvironmentProvisioner for VenvProvisioner {
    fn create_environment(&self, venv: &Path) -> NexyResult<()> {
        run(Command::new(&self.python).args(["-m", "venv"]).arg(venv))?;
        Ok(())
    }

    fn upgrade_installer(&self, venv: &Path) -> NexyResult<()> {
        run(Command::new(Self::venv_python(venv)).args(["-m", "pip", "install", "--upgrade", "pip"]))?;
        Ok(())
    }

    fn install_requirements(&self, venv: &Path, requirements: &Path) -> NexyResult<()> {
        run(Command::new(Self::venv_pip(venv))
            .args(["install", "-r"])
            .arg(requirements))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_paths_live_inside_the_environment() {
        let venv = Path::new("shop/venv");
        assert!(VenvProvisioner::venv_python(venv).starts_with(venv));
        assert!(VenvProvisioner::venv_pip(venv).starts_with(venv));

        #[cfg(unix)]
        assert_eq!(VenvProvisioner::venv_pip(venv), Path::new("shop/venv/bin/pip"));
    }

    #[test]
    fn missing_interpreter_reports_command() {
        let provisioner = VenvProvisioner::with_python("nexy-definitely-not-a-python");
        let err = provisioner
            .create_environment(Path::new("venv"))
            .unwrap_err();
        let text = err.to_string();
        assert!(text.contains("nexy-definitely-not-a-python -m venv venv"));
    }
}
