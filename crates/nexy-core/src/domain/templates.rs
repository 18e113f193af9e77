//! Template resolver: configuration → file content.
//!
//! Everything here is a pure function of its inputs. Option-dependent lines
//! come from the exhaustive tables in [`crate::domain::catalog`]; a `None`
//! choice contributes nothing.

use std::fmt;

use crate::domain::{
    catalog,
    entities::ProjectConfig,
    error::DomainError,
    validation::DomainValidator,
    value_objects::TestFramework,
};

/// A project-level file the resolver knows how to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    Requirements,
    EnvFile,
    Readme,
    NexyConfig,
    AppController,
    PytestConfig,
    PytestExample,
    RobotSuite,
}

impl ArtifactKind {
    /// Location of the artifact relative to the project root.
    pub const fn path(self) -> &'static str {
        match self {
            Self::Requirements => "requirements.txt",
            Self::EnvFile => ".env",
            Self::Readme => "README.md",
            Self::NexyConfig => "nexy-config.py",
            Self::AppController => "app/controller.py",
            Self::PytestConfig => "pytest.ini",
            Self::PytestExample => "tests/test_main.py",
            Self::RobotSuite => "tests/main.robot",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Produce the content of `kind` for `config`.
pub fn resolve(kind: ArtifactKind, config: &ProjectConfig) -> String {
    match kind {
        ArtifactKind::Requirements => requirements(config),
        ArtifactKind::EnvFile => env_file(config),
        ArtifactKind::Readme => readme(config),
        ArtifactKind::NexyConfig => NEXY_CONFIG.to_string(),
        ArtifactKind::AppController => APP_CONTROLLER.to_string(),
        ArtifactKind::PytestConfig => PYTEST_INI.to_string(),
        ArtifactKind::PytestExample => PYTEST_EXAMPLE.to_string(),
        ArtifactKind::RobotSuite => ROBOT_SUITE.to_string(),
    }
}

// ── requirements.txt ──────────────────────────────────────────────────────────

/// Requirement lines in install order: base, database, ORM, tests, project
/// type, auth.
pub fn requirement_list(config: &ProjectConfig) -> Vec<&'static str> {
    let mut packages: Vec<&'static str> = catalog::BASE_REQUIREMENTS.to_vec();
    packages.extend_from_slice(catalog::database_packages(config.database()));
    packages.extend_from_slice(catalog::orm_packages(config.orm()));
    packages.extend_from_slice(catalog::test_packages(config.test_framework()));
    packages.extend_from_slice(catalog::project_type_packages(config.project_type()));
    if config.wants_auth() {
        packages.extend_from_slice(catalog::AUTH_REQUIREMENTS);
    }
    packages
}

pub fn requirements(config: &ProjectConfig) -> String {
    requirement_list(config).join("\n")
}

// ── .env ──────────────────────────────────────────────────────────────────────

pub fn env_file(config: &ProjectConfig) -> String {
    let mut lines: Vec<String> = catalog::BASE_ENV.iter().map(|l| l.to_string()).collect();
    if let Some(url) = catalog::database_url(config.database()) {
        lines.push(format!("DATABASE_URL={url}"));
    }
    lines.join("\n")
}

// ── README.md ─────────────────────────────────────────────────────────────────

pub fn readme(config: &ProjectConfig) -> String {
    let name = config.project_name();
    let features = config.features().collect::<Vec<_>>().join(", ");
    let testing = testing_section(config.test_framework());

    format!(
        r#"# {name}

## Description
{project_type} project generated with Nexy CLI

## Technical configuration
- Type: {project_type}
- Database: {database}
- ORM: {orm}
- Test framework: {test_framework}
- Features: {features}

## Installation

1. Clone the project
```bash
git clone <project-url>
cd {name}
```

2. Install the dependencies
```bash
pip install -r requirements.txt
```

3. Configure the environment variables
```bash
cp .env.example .env
# Edit the variables in .env
```

4. Start the development server
```bash
python main.py
```
{testing}
"#,
        project_type = config.project_type(),
        database = config.database(),
        orm = config.orm(),
        test_framework = config.test_framework(),
    )
}

fn testing_section(framework: TestFramework) -> String {
    match catalog::test_command(framework) {
        Some(command) => format!(
            r#"
## Tests
Run the tests with:
```bash
{command}
```
"#
        ),
        None => String::new(),
    }
}

// ── static boilerplate ────────────────────────────────────────────────────────

const NEXY_CONFIG: &str = r#"
from nexy import Nexy
app = Nexy()
"#;

const APP_CONTROLLER: &str = r#"
async def GET():
    return {"name": "hello world"}

async def POST():
    return {"name": "hello world"}
"#;

const PYTEST_INI: &str = r#"[pytest]
testpaths = tests
python_files = test_*.py
python_classes = Test
python_functions = test_*
addopts = -v --cov=app
"#;

const PYTEST_EXAMPLE: &str = r#"import pytest
from fastapi.testclient import TestClient
from main import app

client = TestClient(app)

def test_read_main():
    response = client.get("/")
    assert response.status_code == 200
"#;

const ROBOT_SUITE: &str = r#"*** Settings ***
Documentation     Example Test Suite
Library           RequestsLibrary

*** Test Cases ***
Test Main Page
    Create Session    app    http://localhost:3000
    ${response}=    GET On Session    app    /
    Status Should Be    200    ${response}
"#;

// ── entity stubs ──────────────────────────────────────────────────────────────

/// A per-entity source file produced by `nexy generate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Controller,
    Service,
    Model,
}

impl EntityKind {
    pub const ALL: [Self; 3] = [Self::Controller, Self::Service, Self::Model];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Controller => "controller",
            Self::Service => "service",
            Self::Model => "model",
        }
    }

    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Controller => "controller.py",
            Self::Service => "service.py",
            Self::Model => "model.py",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Render the stub for `kind` named after `entity`.
pub fn render_entity(kind: EntityKind, entity: &str) -> Result<String, DomainError> {
    DomainValidator::validate_entity_name(entity)?;
    Ok(match kind {
        EntityKind::Controller => controller_stub(entity),
        EntityKind::Service => service_stub(entity),
        EntityKind::Model => model_stub(entity),
    })
}

/// First character uppercased, the rest lowercased (`"userProfile"` →
/// `"Userprofile"`).
pub fn class_name(entity: &str) -> String {
    let mut chars = entity.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

pub fn table_name(entity: &str) -> String {
    format!("{}s", entity.to_lowercase())
}

fn controller_stub(name: &str) -> String {
    let class = class_name(name);
    format!(
        r#"from nexy.app import Controller

class {class}Controller(Controller):
    def __init__(self):
        super().__init__()

    async def index(self):
        return {{"message": "Welcome to {name} controller"}}

    async def get_by_id(self, id: int):
        return {{"id": id, "name": "{name}"}}

    async def create(self, data: dict):
        return {{"message": f"Created {name}", "data": data}}

    async def update(self, id: int, data: dict):
        return {{"message": f"Updated {name} {{id}}", "data": data}}

    async def delete(self, id: int):
        return {{"message": f"Deleted {name} {{id}}"}}
"#
    )
}

fn service_stub(name: &str) -> String {
    let class = class_name(name);
    format!(
        r#"class {class}Service:
    def __init__(self):
        # Initialize your service
        pass

    async def get_all(self):
        # Implement get all logic
        pass

    async def get_by_id(self, id: int):
        # Implement get by id logic
        pass

    async def create(self, data: dict):
        # Implement create logic
        pass

    async def update(self, id: int, data: dict):
        # Implement update logic
        pass

    async def delete(self, id: int):
        # Implement delete logic
        pass
"#
    )
}

fn model_stub(name: &str) -> String {
    let class = class_name(name);
    let table = table_name(name);
    format!(
        r#"from sqlalchemy import Column, Integer, String, DateTime
from datetime import datetime
from nexy.app import Base

class {class}(Base):
    __tablename__ = "{table}"

    id = Column(Integer, primary_key=True, index=True)
    name = Column(String, index=True)
    created_at = Column(DateTime, default=datetime.utcnow)
    updated_at = Column(DateTime, default=datetime.utcnow, onupdate=datetime.utcnow)

    def to_dict(self):
        return {{
            "id": self.id,
            "name": self.name,
            "created_at": self.created_at.isoformat(),
            "updated_at": self.updated_at.isoformat()
        }}
"#
    )
}
