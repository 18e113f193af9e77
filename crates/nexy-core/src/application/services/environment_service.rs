//! Environment Service - provisions a project's virtual environment.

use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use crate::{
    application::ports::{
        EnvironmentProvisioner, EnvironmentStep, Filesystem, ProgressEvent, ProgressSink,
    },
    error::NexyResult,
};

/// Result of [`EnvironmentService::provision`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisionOutcome {
    Created { path: PathBuf },
    /// Nothing was run; the directory was already there.
    AlreadyExists { path: PathBuf },
}

impl ProvisionOutcome {
    pub fn path(&self) -> &Path {
        match self {
            Self::Created { path } | Self::AlreadyExists { path } => path,
        }
    }
}

pub struct EnvironmentService {
    provisioner: Box<dyn EnvironmentProvisioner>,
    filesystem: Box<dyn Filesystem>,
    sink: Box<dyn ProgressSink>,
}

impl EnvironmentService {
    pub fn new(
        provisioner: Box<dyn EnvironmentProvisioner>,
        filesystem: Box<dyn Filesystem>,
        sink: Box<dyn ProgressSink>,
    ) -> Self {
        Self {
            provisioner,
            filesystem,
            sink,
        }
    }

    /// Create `<root>/<env_name>`, upgrade its installer and optionally
    /// install `requirements` (resolved against `root` when relative).
    ///
    /// Any failing step aborts the rest.
    #[instrument(skip(self, root, requirements), fields(root = %root.as_ref().display()))]
    pub fn provision(
        &self,
        root: impl AsRef<Path>,
        env_name: &str,
        requirements: Option<&Path>,
    ) -> NexyResult<ProvisionOutcome> {
        let root = root.as_ref();
        let venv = root.join(env_name);

        if self.filesystem.exists(&venv) {
            info!(path = %venv.display(), "Environment already exists");
            self.sink
                .emit(&ProgressEvent::EnvironmentExists { path: venv.clone() });
            return Ok(ProvisionOutcome::AlreadyExists { path: venv });
        }

        self.step(EnvironmentStep::Creating, &venv);
        self.provisioner.create_environment(&venv)?;

        self.step(EnvironmentStep::UpgradingInstaller, &venv);
        self.provisioner.upgrade_installer(&venv)?;

        if let Some(requirements) = requirements {
            let requirements = root.join(requirements);
            self.step(EnvironmentStep::InstallingRequirements, &requirements);
            self.provisioner
                .install_requirements(&venv, &requirements)?;
        }

        self.step(EnvironmentStep::Ready, &venv);
        info!(path = %venv.display(), "Environment ready");
        Ok(ProvisionOutcome::Created { path: venv })
    }

    fn step(&self, step: EnvironmentStep, path: &Path) {
        self.sink.emit(&ProgressEvent::EnvironmentStep {
            step,
            path: path.to_path_buf(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{
        ApplicationError,
        ports::{
            NullSink,
            output::{MockEnvironmentProvisioner, MockFilesystem},
        },
    };
    use crate::error::NexyError;
    use mockall::Sequence;
    use mockall::predicate::*;

    fn absent() -> MockFilesystem {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);
        fs
    }

    #[test]
    fn existing_environment_runs_nothing() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists()
            .with(eq(PathBuf::from("shop/venv")))
            .returning(|_| true);
        let mut provisioner = MockEnvironmentProvisioner::new();
        provisioner.expect_create_environment().never();
        provisioner.expect_upgrade_installer().never();
        provisioner.expect_install_requirements().never();

        let service = EnvironmentService::new(Box::new(provisioner), Box::new(fs), Box::new(NullSink));
        let outcome = service.provision("shop", "venv", None).unwrap();
        assert_eq!(
            outcome,
            ProvisionOutcome::AlreadyExists {
                path: PathBuf::from("shop/venv")
            }
        );
    }

    #[test]
    fn steps_run_in_order() {
        let mut seq = Sequence::new();
        let mut provisioner = MockEnvironmentProvisioner::new();
        provisioner
            .expect_create_environment()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        provisioner
            .expect_upgrade_installer()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        provisioner
            .expect_install_requirements()
            .with(
                eq(PathBuf::from("shop/venv")),
                eq(PathBuf::from("shop/requirements.txt")),
            )
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));

        let service = EnvironmentService::new(Box::new(provisioner), Box::new(absent()), Box::new(NullSink));
        let outcome = service
            .provision("shop", "venv", Some(Path::new("requirements.txt")))
            .unwrap();
        assert_eq!(outcome.path(), Path::new("shop/venv"));
    }

    #[test]
    fn install_is_skipped_without_requirements() {
        let mut provisioner = MockEnvironmentProvisioner::new();
        provisioner.expect_create_environment().returning(|_| Ok(()));
        provisioner.expect_upgrade_installer().returning(|_| Ok(()));
        provisioner.expect_install_requirements().never();

        let service = EnvironmentService::new(Box::new(provisioner), Box::new(absent()), Box::new(NullSink));
        assert!(matches!(
            service.provision("shop", ".env-py", None).unwrap(),
            ProvisionOutcome::Created { .. }
        ));
    }

    #[test]
    fn failed_creation_stops_provisioning() {
        let mut provisioner = MockEnvironmentProvisioner::new();
        provisioner.expect_create_environment().returning(|_| {
            Err(ApplicationError::ProvisioningFailed {
                command: "python3 -m venv shop/venv".into(),
                status: "exit status: 1".into(),
                stderr: "No module named venv".into(),
            }
            .into())
        });
        provisioner.expect_upgrade_installer().never();

        let service = EnvironmentService::new(Box::new(provisioner), Box::new(absent()), Box::new(NullSink));
        let err = service.provision("shop", "venv", None).unwrap_err();
        assert!(matches!(
            err,
            NexyError::Application(ApplicationError::ProvisioningFailed { .. })
        ));
    }
}
