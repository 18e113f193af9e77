//! End-to-end materialization against a real temporary directory.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use nexy_adapters::{LocalFilesystem, MemoryFilesystem, RecordingSink};
use nexy_core::application::ports::ProgressEvent;
use nexy_core::prelude::*;
use tempfile::TempDir;
use walkdir::WalkDir;

/// Every entry under `root`, relative and `/`-separated; directories end in `/`.
fn tree(root: &Path) -> BTreeSet<String> {
    WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .map(|entry| {
            let entry = entry.unwrap();
            let rel = entry
                .path()
                .strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/");
            if entry.file_type().is_dir() { format!("{rel}/") } else { rel }
        })
        .collect()
}

fn materialize(dir: &TempDir, framework: TestFramework) -> BTreeSet<String> {
    let root = dir.path().join("shop");
    let config = ProjectConfig::builder("shop")
        .test_framework(framework)
        .build()
        .unwrap();
    ProjectMaterializer::new(Box::new(LocalFilesystem::new()), Box::new(NullSink))
        .materialize(&root, &config, WriteMode::Overwrite)
        .unwrap();
    tree(&root)
}

const BASE: &[&str] = &[
    "app/",
    "app/controller.py",
    "public/",
    "tests/",
    "config/",
    "nexy-config.py",
    "requirements.txt",
    ".env",
    "README.md",
];

fn expected(extra: &[&str]) -> BTreeSet<String> {
    BASE.iter().chain(extra).map(|s| s.to_string()).collect()
}

#[test]
fn pytest_project_has_exactly_the_expected_files() {
    let dir = TempDir::new().unwrap();
    assert_eq!(
        materialize(&dir, TestFramework::Pytest),
        expected(&["pytest.ini", "tests/test_main.py"])
    );
}

#[test]
fn robot_project_has_exactly_the_expected_files() {
    let dir = TempDir::new().unwrap();
    assert_eq!(
        materialize(&dir, TestFramework::Robot),
        expected(&["tests/main.robot"])
    );
}

#[test]
fn unittest_and_none_add_no_extras() {
    for framework in [TestFramework::Unittest, TestFramework::None] {
        let dir = TempDir::new().unwrap();
        assert_eq!(materialize(&dir, framework), expected(&[]));
    }
}

#[test]
fn second_run_rewrites_identically() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("shop");
    let config = ProjectConfig::builder("shop")
        .database(Database::Sqlite)
        .build()
        .unwrap();
    let materializer =
        ProjectMaterializer::new(Box::new(LocalFilesystem::new()), Box::new(NullSink));

    const CONFIG_DRIVEN: [&str; 3] = ["requirements.txt", ".env", "README.md"];
    let read_all = || CONFIG_DRIVEN.map(|name| fs::read_to_string(root.join(name)).unwrap());

    materializer.materialize(&root, &config, WriteMode::Overwrite).unwrap();
    let first = read_all();
    let files_first = tree(&root);

    materializer.materialize(&root, &config, WriteMode::Overwrite).unwrap();
    assert_eq!(read_all(), first);
    assert_eq!(tree(&root), files_first);
}

#[test]
fn skip_existing_preserves_user_edits() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("shop");
    let config = ProjectConfig::builder("shop").build().unwrap();
    let materializer =
        ProjectMaterializer::new(Box::new(LocalFilesystem::new()), Box::new(NullSink));

    materializer.materialize(&root, &config, WriteMode::Overwrite).unwrap();
    fs::write(root.join("README.md"), "mine").unwrap();

    let report = materializer
        .materialize(&root, &config, WriteMode::SkipExisting)
        .unwrap();
    assert_eq!(fs::read_to_string(root.join("README.md")).unwrap(), "mine");
    assert!(report.skipped.contains(&root.join("README.md")));
}

#[test]
fn file_in_place_of_directory_fails_and_keeps_partial_output() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("shop");
    fs::create_dir_all(&root).unwrap();
    fs::write(root.join("public"), "not a directory").unwrap();

    let config = ProjectConfig::builder("shop").build().unwrap();
    let err = ProjectMaterializer::new(Box::new(LocalFilesystem::new()), Box::new(NullSink))
        .materialize(&root, &config, WriteMode::Overwrite)
        .unwrap_err();

    assert!(err.to_string().contains("public"));
    // `app/` comes before `public/` and is not rolled back
    assert!(root.join("app").is_dir());
}

#[test]
fn memory_filesystem_and_sink_capture_a_dry_run() {
    let fs = MemoryFilesystem::new();
    let sink = RecordingSink::new();
    let config = ProjectConfig::builder("shop")
        .project_type(ProjectType::Webapp)
        .build()
        .unwrap();

    let report = ProjectMaterializer::new(Box::new(fs.clone()), Box::new(sink.clone()))
        .materialize("shop", &config, WriteMode::Overwrite)
        .unwrap();

    assert_eq!(fs.list_files().len(), report.written.len());
    assert_eq!(sink.len(), report.directories.len() + report.written.len());
    assert!(
        sink.events()
            .contains(&ProgressEvent::DirectoryCreated { path: "shop/app/static/js".into() })
    );
    assert!(fs.read_file(Path::new("shop/requirements.txt")).unwrap().contains("jinja2"));
}

#[test]
fn generated_components_land_in_the_project() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("shop");
    let generator = ComponentGenerator::new(Box::new(LocalFilesystem::new()), Box::new(NullSink));

    generator
        .generate(&root, &[EntityKind::Controller, EntityKind::Model], "Invoice", WriteMode::Overwrite)
        .unwrap();

    assert!(root.join("app/invoice/controller.py").is_file());
    assert!(root.join("app/invoice/model.py").is_file());
    assert!(!root.join("app/invoice/service.py").exists());
}
