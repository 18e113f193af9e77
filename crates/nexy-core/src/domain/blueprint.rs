//! Generation plan: which directories and files a configuration produces.
//!
//! [`plan`] is pure; the application layer's materializer writes the
//! resulting [`ProjectStructure`] through the `Filesystem` port.

use std::path::{Path, PathBuf};

use crate::domain::{
    catalog,
    entities::{ProjectConfig, ProjectStructure},
    templates::{self, ArtifactKind, EntityKind},
    value_objects::TestFramework,
};

/// Directories every project gets. `""` is the root itself.
pub const BASE_DIRECTORIES: &[&str] = &["", "app", "public", "tests", "config"];

/// Files every project gets, in write order.
pub const CORE_ARTIFACTS: &[ArtifactKind] = &[
    ArtifactKind::NexyConfig,
    ArtifactKind::AppController,
    ArtifactKind::Requirements,
    ArtifactKind::EnvFile,
    ArtifactKind::Readme,
];

pub fn directories(config: &ProjectConfig) -> Vec<&'static str> {
    let mut dirs = BASE_DIRECTORIES.to_vec();
    dirs.extend_from_slice(catalog::project_type_directories(config.project_type()));
    dirs
}

/// Extra files for the chosen test framework. Unittest needs no runner
/// config, so it contributes nothing here.
pub const fn test_artifacts(framework: TestFramework) -> &'static [ArtifactKind] {
    match framework {
        TestFramework::None | TestFramework::Unittest => &[],
        TestFramework::Pytest => &[ArtifactKind::PytestConfig, ArtifactKind::PytestExample],
        TestFramework::Robot => &[ArtifactKind::RobotSuite],
    }
}

pub fn artifacts(config: &ProjectConfig) -> Vec<ArtifactKind> {
    let mut kinds = CORE_ARTIFACTS.to_vec();
    kinds.extend_from_slice(test_artifacts(config.test_framework()));
    kinds
}

/// Build the full directory + file plan for `config` under `root`.
pub fn plan(root: impl Into<PathBuf>, config: &ProjectConfig) -> ProjectStructure {
    let mut structure = ProjectStructure::new(root);

    for dir in directories(config) {
        structure.add_directory(dir);
    }

    for kind in artifacts(config) {
        structure.add_file(kind.path(), templates::resolve(kind, config));
    }

    structure
}

/// Directory (relative to the project root) that holds an entity's files.
pub fn entity_directory(entity: &str) -> PathBuf {
    Path::new("app").join(entity.to_lowercase())
}

/// Relative path of one generated entity file, e.g. `app/user/model.py`.
pub fn entity_path(kind: EntityKind, entity: &str) -> PathBuf {
    entity_directory(entity).join(kind.file_name())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{Database, Orm, ProjectType};
    use std::collections::BTreeSet;

    fn paths(structure: &ProjectStructure) -> BTreeSet<String> {
        structure
            .files()
            .map(|f| f.path.display().to_string())
            .collect()
    }

    #[test]
    fn api_project_has_base_directories_only() {
        let cfg = ProjectConfig::builder("svc").build().unwrap();
        assert_eq!(directories(&cfg), BASE_DIRECTORIES.to_vec());
    }

    #[test]
    fn webapp_adds_template_and_static_directories() {
        let cfg = ProjectConfig::builder("shop")
            .project_type(ProjectType::Webapp)
            .build()
            .unwrap();
        let dirs = directories(&cfg);
        for dir in ["app/templates", "app/static", "app/static/css", "app/static/js"] {
            assert!(dirs.contains(&dir), "{dir}");
        }
    }

    #[test]
    fn file_set_per_test_framework() {
        let core = [
            "nexy-config.py",
            "app/controller.py",
            "requirements.txt",
            ".env",
            "README.md",
        ];
        let cases: [(TestFramework, &[&str]); 4] = [
            (TestFramework::None, &[]),
            (TestFramework::Unittest, &[]),
            (TestFramework::Pytest, &["pytest.ini", "tests/test_main.py"]),
            (TestFramework::Robot, &["tests/main.robot"]),
        ];

        for (fw, extra) in cases {
            let cfg = ProjectConfig::builder("p").test_framework(fw).build().unwrap();
            let expected: BTreeSet<String> = core
                .iter()
                .chain(extra.iter())
                .map(|s| s.to_string())
                .collect();
            assert_eq!(paths(&plan("p", &cfg)), expected, "{fw}");
        }
    }

    #[test]
    fn plan_is_valid_for_every_combination() {
        for project_type in ProjectType::ALL {
            for database in Database::ALL {
                for orm in Orm::ALL {
                    for fw in TestFramework::ALL {
                        let cfg = ProjectConfig::builder("p")
                            .project_type(project_type)
                            .database(database)
                            .orm(orm)
                            .test_framework(fw)
                            .build()
                            .unwrap();
                        assert!(plan("p", &cfg).validate().is_ok(), "{cfg}");
                    }
                }
            }
        }
    }

    #[test]
    fn plan_contents_come_from_resolver() {
        let cfg = ProjectConfig::builder("shop")
            .database(Database::Mongodb)
            .build()
            .unwrap();
        let structure = plan("shop", &cfg);
        let env = structure.file(".env").unwrap();
        assert_eq!(env.content, templates::env_file(&cfg));
    }

    #[test]
    fn entity_files_live_under_app() {
        assert_eq!(
            entity_path(EntityKind::Service, "User"),
            Path::new("app").join("user").join("service.py")
        );
    }
}
