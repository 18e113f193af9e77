//! Domain value objects: ProjectType, Database, Orm, TestFramework.
//!
//! # Design
//!
//! These are pure value types — `Copy`, equality-by-value, no identity.
//! They hold NO package or template knowledge. All lookups live in
//! `catalog.rs`. This file's only job is to define the types, their
//! string representations (the `.value` shown in generated text), and
//! their `FromStr` parsers.
//!
//! # Adding New Variants
//!
//! 1. Add the enum variant here
//! 2. Add the `as_str` arm, the `ALL` entry and the `FromStr` arm here
//! 3. Fix every non-exhaustive `match` the compiler reports in `catalog.rs`

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

fn unsupported(
    category: &'static str,
    value: &str,
    expected: &'static [&'static str],
) -> DomainError {
    DomainError::UnsupportedOption {
        category,
        value: value.to_string(),
        expected,
    }
}

// ── ProjectType ──────────────────────────────────────────────────────────────

/// The kind of Nexy project to generate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    /// JSON API, no server-side templates.
    #[default]
    Api,
    /// Server-rendered web application with templates and static assets.
    Webapp,
}

impl ProjectType {
    pub const ALL: [Self; 2] = [Self::Api, Self::Webapp];
    const NAMES: &'static [&'static str] = &["api", "webapp"];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Api => "api",
            Self::Webapp => "webapp",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "api" => Ok(Self::Api),
            "webapp" | "web" | "web-app" => Ok(Self::Webapp),
            other => Err(unsupported("project type", other, Self::NAMES)),
        }
    }
}

// ── Database ─────────────────────────────────────────────────────────────────

/// Database backend the project talks to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    #[default]
    None,
    Mysql,
    Postgresql,
    Mongodb,
    Sqlite,
}

impl Database {
    pub const ALL: [Self; 5] = [
        Self::None,
        Self::Mysql,
        Self::Postgresql,
        Self::Mongodb,
        Self::Sqlite,
    ];
    const NAMES: &'static [&'static str] = &["none", "mysql", "postgresql", "mongodb", "sqlite"];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Mysql => "mysql",
            Self::Postgresql => "postgresql",
            Self::Mongodb => "mongodb",
            Self::Sqlite => "sqlite",
        }
    }

    pub const fn is_none(self) -> bool {
        matches!(self, Self::None)
    }
}

impl fmt::Display for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Database {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "mysql" => Ok(Self::Mysql),
            "postgresql" | "postgres" | "pg" => Ok(Self::Postgresql),
            "mongodb" | "mongo" => Ok(Self::Mongodb),
            "sqlite" => Ok(Self::Sqlite),
            other => Err(unsupported("database", other, Self::NAMES)),
        }
    }
}

// ── Orm ──────────────────────────────────────────────────────────────────────

/// Object-relational mapper added to the requirements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orm {
    #[default]
    None,
    Prisma,
    Sqlalchemy,
}

impl Orm {
    pub const ALL: [Self; 3] = [Self::None, Self::Prisma, Self::Sqlalchemy];
    const NAMES: &'static [&'static str] = &["none", "prisma", "sqlalchemy"];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Prisma => "prisma",
            Self::Sqlalchemy => "sqlalchemy",
        }
    }
}

impl fmt::Display for Orm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Orm {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "prisma" => Ok(Self::Prisma),
            "sqlalchemy" => Ok(Self::Sqlalchemy),
            other => Err(unsupported("orm", other, Self::NAMES)),
        }
    }
}

// ── TestFramework ────────────────────────────────────────────────────────────

/// Test framework wired into the generated project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestFramework {
    #[default]
    None,
    Pytest,
    Unittest,
    Robot,
}

impl TestFramework {
    pub const ALL: [Self; 4] = [Self::None, Self::Pytest, Self::Unittest, Self::Robot];
    const NAMES: &'static [&'static str] = &["none", "pytest", "unittest", "robot"];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Pytest => "pytest",
            Self::Unittest => "unittest",
            Self::Robot => "robot",
        }
    }

    pub const fn is_none(self) -> bool {
        matches!(self, Self::None)
    }
}

impl fmt::Display for TestFramework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TestFramework {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "pytest" => Ok(Self::Pytest),
            "unittest" => Ok(Self::Unittest),
            "robot" | "robotframework" => Ok(Self::Robot),
            other => Err(unsupported("test framework", other, Self::NAMES)),
        }
    }
}
