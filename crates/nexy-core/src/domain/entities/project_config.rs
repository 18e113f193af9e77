//! The `ProjectConfig` aggregate and its builder.
//!
//! A `ProjectConfig` is the validated set of user choices that drives
//! generation. Once built it never changes; every resolver function takes it
//! by shared reference and is pure.
//!
//! # Domain purity
//!
//! This module must not import `tracing`. Observability is the responsibility
//! of the application and CLI layers, not the domain.

use std::collections::BTreeSet;
use std::fmt;

use crate::domain::{
    catalog::AUTH_FEATURE,
    error::DomainError,
    validation::DomainValidator,
    value_objects::{Database, Orm, ProjectType, TestFramework},
};

// ── Aggregate root ────────────────────────────────────────────────────────────

/// A fully-validated project configuration.
///
/// Guarantees on construction:
/// - `project_name` is a usable directory name
/// - `features` holds no blank flags and is ordered (generated text is stable)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectConfig {
    project_name: String,
    project_type: ProjectType,
    database: Database,
    orm: Orm,
    test_framework: TestFramework,
    features: BTreeSet<String>,
}

impl ProjectConfig {
    /// Start building a configuration for `project_name`.
    pub fn builder(project_name: impl Into<String>) -> ProjectConfigBuilder {
        ProjectConfigBuilder::new(project_name)
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }
    pub const fn project_type(&self) -> ProjectType {
        self.project_type
    }
    pub const fn database(&self) -> Database {
        self.database
    }
    pub const fn orm(&self) -> Orm {
        self.orm
    }
    pub const fn test_framework(&self) -> TestFramework {
        self.test_framework
    }
    pub fn features(&self) -> impl Iterator<Item = &str> {
        self.features.iter().map(String::as_str)
    }

    pub fn has_feature(&self, feature: &str) -> bool {
        self.features.contains(feature)
    }

    pub fn wants_auth(&self) -> bool {
        self.has_feature(AUTH_FEATURE)
    }

    /// Re-check invariants, e.g. after deserialization.
    pub fn validate(&self) -> Result<(), DomainError> {
        DomainValidator::validate_project_name(&self.project_name)
    }
}

impl fmt::Display for ProjectConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, db: {}, orm: {}, tests: {})",
            self.project_name, self.project_type, self.database, self.orm, self.test_framework
        )
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

/// Builder for [`ProjectConfig`]. Unset options default to their `None` /
/// `Api` variants.
#[derive(Debug, Clone)]
pub struct ProjectConfigBuilder {
    project_name: String,
    project_type: ProjectType,
    database: Database,
    orm: Orm,
    test_framework: TestFramework,
    features: BTreeSet<String>,
}

impl ProjectConfigBuilder {
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            project_type: ProjectType::default(),
            database: Database::default(),
            orm: Orm::default(),
            test_framework: TestFramework::default(),
            features: BTreeSet::new(),
        }
    }

    pub fn project_type(mut self, project_type: ProjectType) -> Self {
        self.project_type = project_type;
        self
    }

    pub fn database(mut self, database: Database) -> Self {
        self.database = database;
        self
    }

    pub fn orm(mut self, orm: Orm) -> Self {
        self.orm = orm;
        self
    }

    pub fn test_framework(mut self, test_framework: TestFramework) -> Self {
        self.test_framework = test_framework;
        self
    }

    /// Add one feature flag. Surrounding whitespace is trimmed; blank flags
    /// are dropped.
    pub fn feature(mut self, feature: impl AsRef<str>) -> Self {
        let feature = feature.as_ref().trim();
        if !feature.is_empty() {
            self.features.insert(feature.to_string());
        }
        self
    }

    pub fn features<I, S>(self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        features.into_iter().fold(self, |b, f| b.feature(f))
    }

    pub fn build(self) -> Result<ProjectConfig, DomainError> {
        let config = ProjectConfig {
            project_name: self.project_name,
            project_type: self.project_type,
            database: self.database,
            orm: self.orm,
            test_framework: self.test_framework,
            features: self.features,
        };
        config.validate()?;
        Ok(config)
    }
}
