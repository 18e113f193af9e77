//! Implementation of the `nexy new` command.
//!
//! Responsibility: resolve the project options (flags, prompts, config
//! defaults), call the core materializer, and display results. No generation
//! logic lives here.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde_json::json;
use tracing::{debug, info, instrument};

use nexy_adapters::LocalFilesystem;
use nexy_core::{
    application::{MaterializeReport, ProjectMaterializer, WriteMode, ports::NullSink},
    domain::{
        ArtifactKind, Database, DomainError, Orm, ProjectConfig, ProjectStructure, ProjectType,
        TestFramework, catalog,
    },
};

use crate::{
    cli::{NewArgs, OutputFormat, global::GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::{OutputManager, SpinnerSink},
};

/// Execute the `nexy new` command.
///
/// Dispatch sequence:
/// 1. Split the argument into project name and target directory
/// 2. Resolve every option: flag, then prompt, then config default
/// 3. Show the summary and confirm (interactive runs only)
/// 4. Early-exit with the plan if `--dry-run`
/// 5. Materialize through `ProjectMaterializer`
/// 6. Provision the virtual environment if `--venv`
/// 7. Print next-steps guidance
#[instrument(skip_all, fields(project = %args.name))]
pub fn execute(
    args: NewArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    // 1. Resolve project path
    let (project_name, project_path) = resolve_project_path(&args.name)?;

    // 2. Build the configuration (validation happens in the core builder)
    let interactive = is_interactive(&args, &global);
    output.banner()?;
    let project = build_config(&args, &config, &project_name, interactive)?;

    debug!(
        project_type = %project.project_type(),
        database = %project.database(),
        orm = %project.orm(),
        test_framework = %project.test_framework(),
        "Configuration resolved"
    );

    // 3. Show configuration and confirm
    if !args.yes {
        show_configuration(&project, &project_path, &output)?;
        if interactive && !prompt::confirm("Create the project?")? {
            return Err(CliError::Cancelled);
        }
    }

    let mode = write_mode(&args, &config);

    // 4. Dry run: describe but do not write.
    if args.dry_run {
        let materializer =
            ProjectMaterializer::new(Box::new(LocalFilesystem::new()), Box::new(NullSink));
        let structure = materializer.plan(&project_path, &project)?;
        return print_plan(&structure, &output);
    }

    if project_path.exists() {
        match mode {
            WriteMode::Overwrite => output.warning(&format!(
                "{} already exists; generated files will be rewritten",
                project_path.display()
            ))?,
            WriteMode::SkipExisting => output.info(&format!(
                "{} already exists; existing files are kept",
                project_path.display()
            ))?,
        }
    }

    // 5. Materialize
    info!(path = %project_path.display(), ?mode, "Generation started");
    let spinner = output.spinner(&format!("Creating '{project_name}'..."));
    let materializer = ProjectMaterializer::new(
        Box::new(LocalFilesystem::new()),
        Box::new(SpinnerSink::new(spinner.clone())),
    );
    let result = materializer.materialize(&project_path, &project, mode);
    spinner.finish_and_clear();
    let report = result?;

    if output.format() == OutputFormat::Json {
        output.data(&report_json(&project, &report).to_string())?;
    } else {
        output.success(&format!(
            "Project '{project_name}' created ({} directories, {} files written, {} kept)",
            report.directories.len(),
            report.written.len(),
            report.skipped.len(),
        ))?;
    }

    // 6. Virtual environment
    if args.venv {
        let env_name = args
            .env_name
            .as_deref()
            .unwrap_or(&config.environment.name);
        let requirements = config
            .environment
            .install_requirements
            .then(|| Path::new(ArtifactKind::Requirements.path()));
        super::venv::provision(&project_path, env_name, requirements, &config, &output)?;
    }

    // 7. Next steps
    if output.format() != OutputFormat::Json {
        output.print("")?;
        output.header("Next steps:")?;
        for line in next_steps(&project, &project_path, args.venv, &config) {
            output.print(&format!("  {line}"))?;
        }
    }

    Ok(())
}

// ── Path resolution ───────────────────────────────────────────────────────────

/// Split `name` into the project name (last component) and the directory to
/// generate into (the whole path).
pub fn resolve_project_path(name: &str) -> CliResult<(String, PathBuf)> {
    let path = Path::new(name);

    let project_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| CliError::InvalidInput {
            message: format!("cannot derive a project name from '{name}'"),
            source: None,
        })?
        .to_string();

    Ok((project_name, path.to_path_buf()))
}

// ── Option resolution ─────────────────────────────────────────────────────────

#[cfg(feature = "interactive")]
fn is_interactive(args: &NewArgs, global: &GlobalArgs) -> bool {
    use std::io::{self, IsTerminal};

    !args.yes && !global.quiet && io::stdin().is_terminal() && io::stdout().is_terminal()
}

#[cfg(not(feature = "interactive"))]
fn is_interactive(_args: &NewArgs, _global: &GlobalArgs) -> bool {
    false
}

fn build_config(
    args: &NewArgs,
    config: &AppConfig,
    project_name: &str,
    interactive: bool,
) -> CliResult<ProjectConfig> {
    let defaults = &config.defaults;

    let project_type = choose(
        args.project_type.as_deref(),
        "Project type",
        &ProjectType::ALL,
        defaults.project_type,
        interactive,
    )?;
    let database = choose(
        args.database.as_deref(),
        "Database",
        &Database::ALL,
        defaults.database,
        interactive,
    )?;
    let orm = choose(
        args.orm.as_deref(),
        "ORM",
        &Orm::ALL,
        defaults.orm,
        interactive,
    )?;
    let test_framework = choose(
        args.test_framework.as_deref(),
        "Test framework",
        &TestFramework::ALL,
        defaults.test_framework,
        interactive,
    )?;

    let features = if !args.features.is_empty() {
        args.features.clone()
    } else if interactive {
        prompt::features(&defaults.features)?
    } else {
        defaults.features.clone()
    };

    let project = ProjectConfig::builder(project_name)
        .project_type(project_type)
        .database(database)
        .orm(orm)
        .test_framework(test_framework)
        .features(features)
        .build()?;

    Ok(project)
}

/// Flag value if given, else ask, else the configured default.
fn choose<T>(
    flag: Option<&str>,
    label: &str,
    options: &[T],
    default: T,
    interactive: bool,
) -> CliResult<T>
where
    T: FromStr<Err = DomainError> + Copy + PartialEq + fmt::Display,
{
    if let Some(raw) = flag {
        return Ok(raw.parse()?);
    }
    if interactive {
        return prompt::select(label, options, default);
    }
    Ok(default)
}

fn write_mode(args: &NewArgs, config: &AppConfig) -> WriteMode {
    if args.skip_existing || config.generation.skip_existing {
        WriteMode::SkipExisting
    } else {
        WriteMode::Overwrite
    }
}

// ── Prompts ───────────────────────────────────────────────────────────────────

#[cfg(feature = "interactive")]
mod prompt {
    use std::fmt;
    use std::io;

    use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};

    use crate::error::{CliError, CliResult};

    pub fn select<T: Copy + PartialEq + fmt::Display>(
        label: &str,
        options: &[T],
        default: T,
    ) -> CliResult<T> {
        let labels: Vec<String> = options.iter().map(ToString::to_string).collect();
        let default_index = options.iter().position(|o| *o == default).unwrap_or(0);

        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(label)
            .items(&labels)
            .default(default_index)
            .interact()
            .map_err(prompt_error)?;

        options.get(selection).copied().ok_or(CliError::Cancelled)
    }

    pub fn features(defaults: &[String]) -> CliResult<Vec<String>> {
        let raw: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Features (comma separated, blank for none)")
            .default(defaults.join(","))
            .allow_empty(true)
            .interact_text()
            .map_err(prompt_error)?;

        Ok(raw
            .split(',')
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(String::from)
            .collect())
    }

    pub fn confirm(label: &str) -> CliResult<bool> {
        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(label)
            .default(true)
            .interact()
            .map_err(prompt_error)
    }

    fn prompt_error(err: dialoguer::Error) -> CliError {
        match err {
            dialoguer::Error::IO(e) if e.kind() == io::ErrorKind::Interrupted => CliError::Cancelled,
            dialoguer::Error::IO(e) => CliError::IoError {
                message: "failed to read from the terminal".into(),
                source: e,
            },
        }
    }
}

#[cfg(not(feature = "interactive"))]
mod prompt {
    //! Prompt-free build: every question takes its default.

    use crate::error::CliResult;

    pub fn select<T: Copy>(_label: &str, _options: &[T], default: T) -> CliResult<T> {
        Ok(default)
    }

    pub fn features(defaults: &[String]) -> CliResult<Vec<String>> {
        Ok(defaults.to_vec())
    }

    pub fn confirm(_label: &str) -> CliResult<bool> {
        Ok(true)
    }
}

// ── UI helpers ────────────────────────────────────────────────────────────────

fn show_configuration(project: &ProjectConfig, path: &Path, out: &OutputManager) -> CliResult<()> {
    let features = project.features().collect::<Vec<_>>().join(", ");

    out.header("Configuration")?;
    out.print(&format!("  Project:        {}", project.project_name()))?;
    out.print(&format!("  Type:           {}", project.project_type()))?;
    out.print(&format!("  Database:       {}", project.database()))?;
    out.print(&format!("  ORM:            {}", project.orm()))?;
    out.print(&format!("  Test framework: {}", project.test_framework()))?;
    out.print(&format!(
        "  Features:       {}",
        if features.is_empty() { "none" } else { &features }
    ))?;
    out.print(&format!("  Location:       {}", path.display()))?;
    out.print("")?;
    Ok(())
}

fn print_plan(structure: &ProjectStructure, out: &OutputManager) -> CliResult<()> {
    let root = structure.root();

    if out.format() == OutputFormat::Json {
        let payload = json!({
            "root": root.display().to_string(),
            "directories": structure
                .directories()
                .map(|d| d.path.display().to_string())
                .collect::<Vec<_>>(),
            "files": structure
                .files()
                .map(|f| f.path.display().to_string())
                .collect::<Vec<_>>(),
        });
        out.data(&payload.to_string())?;
        return Ok(());
    }

    out.info(&format!("Dry run: nothing written under {}", root.display()))?;
    for dir in structure.directories() {
        if !dir.path.as_os_str().is_empty() {
            out.print(&format!("  {}/", dir.path.display()))?;
        }
    }
    for file in structure.files() {
        out.print(&format!("  {} ({} bytes)", file.path.display(), file.size()))?;
    }
    Ok(())
}

fn report_json(project: &ProjectConfig, report: &MaterializeReport) -> serde_json::Value {
    let paths = |list: &[PathBuf]| {
        list.iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
    };
    json!({
        "project": project.project_name(),
        "root": report.root.display().to_string(),
        "directories": paths(&report.directories),
        "written": paths(&report.written),
        "skipped": paths(&report.skipped),
    })
}

/// Commands to run after generation, in order.
fn next_steps(
    project: &ProjectConfig,
    path: &Path,
    venv_created: bool,
    config: &AppConfig,
) -> Vec<String> {
    let env = &config.environment.name;
    let activate = if cfg!(windows) {
        format!(r"{env}\Scripts\activate")
    } else {
        format!("source {env}/bin/activate")
    };

    let mut steps = vec![format!("cd {}", path.display())];
    if !venv_created {
        steps.push(format!("python -m venv {env}"));
    }
    steps.push(activate);
    if !venv_created || !config.environment.install_requirements {
        steps.push(format!("pip install -r {}", ArtifactKind::Requirements.path()));
    }
    steps.push("nexy port".into());
    steps.push("python main.py".into());
    if let Some(command) = catalog::test_command(project.test_framework()) {
        steps.push(command.to_string());
    }
    steps
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn args(name: &str) -> NewArgs {
        NewArgs {
            name: name.into(),
            project_type: None,
            database: None,
            orm: None,
            test_framework: None,
            features: Vec::new(),
            yes: true,
            dry_run: false,
            skip_existing: false,
            venv: false,
            env_name: None,
        }
    }

    // ── resolve_project_path ──────────────────────────────────────────────────

    #[test]
    fn simple_name_resolves_to_cwd() {
        let (name, dir) = resolve_project_path("my-app").unwrap();
        assert_eq!(name, "my-app");
        assert_eq!(dir, PathBuf::from("my-app"));
    }

    #[test]
    fn relative_path_keeps_leaf_as_name() {
        let (name, dir) = resolve_project_path("../my-app").unwrap();
        assert_eq!(name, "my-app");
        assert_eq!(dir, PathBuf::from("../my-app"));
    }

    #[test]
    fn nested_path_works_on_all_platforms() {
        let sep = std::path::MAIN_SEPARATOR;
        let path = format!("foo{sep}bar{sep}my-app");

        let (name, dir) = resolve_project_path(&path).unwrap();
        assert_eq!(name, "my-app");
        assert_eq!(dir, PathBuf::from("foo").join("bar").join("my-app"));
    }

    #[test]
    fn parent_only_path_is_rejected() {
        assert!(matches!(
            resolve_project_path(".."),
            Err(CliError::InvalidInput { .. })
        ));
    }

    // ── build_config ──────────────────────────────────────────────────────────

    #[test]
    fn flags_override_config_defaults() {
        let mut config = AppConfig::default();
        config.defaults.database = Database::Sqlite;

        let mut a = args("shop");
        a.project_type = Some("webapp".into());
        a.database = Some("postgres".into());
        a.test_framework = Some("robot".into());

        let project = build_config(&a, &config, "shop", false).unwrap();
        assert_eq!(project.project_type(), ProjectType::Webapp);
        assert_eq!(project.database(), Database::Postgresql);
        assert_eq!(project.orm(), Orm::None);
        assert_eq!(project.test_framework(), TestFramework::Robot);
    }

    #[test]
    fn missing_options_fall_back_to_config_defaults() {
        let mut config = AppConfig::default();
        config.defaults.orm = Orm::Sqlalchemy;
        config.defaults.features = vec!["auth".into()];

        let project = build_config(&args("shop"), &config, "shop", false).unwrap();
        assert_eq!(project.orm(), Orm::Sqlalchemy);
        assert!(project.wants_auth());
    }

    #[test]
    fn explicit_features_replace_defaults() {
        let mut config = AppConfig::default();
        config.defaults.features = vec!["auth".into()];

        let mut a = args("shop");
        a.features = vec!["admin".into(), " ".into()];

        let project = build_config(&a, &config, "shop", false).unwrap();
        assert_eq!(project.features().collect::<Vec<_>>(), vec!["admin"]);
    }

    #[test]
    fn unknown_option_is_a_user_error() {
        let mut a = args("shop");
        a.database = Some("oracle".into());

        let err = build_config(&a, &AppConfig::default(), "shop", false).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("oracle"));
    }

    #[test]
    fn invalid_project_name_is_rejected_by_core() {
        let err = build_config(&args(".hidden"), &AppConfig::default(), ".hidden", false)
            .unwrap_err();
        assert!(matches!(err, CliError::Core(_)));
    }

    // ── write_mode ────────────────────────────────────────────────────────────

    #[test]
    fn skip_existing_from_flag_or_config() {
        let config = AppConfig::default();
        assert_eq!(write_mode(&args("a"), &config), WriteMode::Overwrite);

        let mut a = args("a");
        a.skip_existing = true;
        assert_eq!(write_mode(&a, &config), WriteMode::SkipExisting);

        let mut config = AppConfig::default();
        config.generation.skip_existing = true;
        assert_eq!(write_mode(&args("a"), &config), WriteMode::SkipExisting);
    }

    // ── next_steps ────────────────────────────────────────────────────────────

    #[test]
    fn next_steps_without_venv_create_and_install() {
        let project = ProjectConfig::builder("shop")
            .test_framework(TestFramework::Pytest)
            .build()
            .unwrap();
        let steps = next_steps(&project, Path::new("shop"), false, &AppConfig::default());

        assert_eq!(steps[0], "cd shop");
        assert!(steps.iter().any(|s| s == "python -m venv venv"));
        assert!(steps.iter().any(|s| s == "pip install -r requirements.txt"));
        assert_eq!(steps.last().map(String::as_str), Some("pytest"));
    }

    #[test]
    fn next_steps_after_venv_skip_setup() {
        let project = ProjectConfig::builder("shop").build().unwrap();
        let steps = next_steps(&project, Path::new("shop"), true, &AppConfig::default());

        assert!(!steps.iter().any(|s| s.starts_with("python -m venv")));
        assert!(!steps.iter().any(|s| s.starts_with("pip install")));
        assert_eq!(steps.last().map(String::as_str), Some("python main.py"));
    }
}
