//! sp-project: canonical study file format and validation.

pub mod entities;
pub mod migrate;
pub mod schema;
pub mod validate;

pub use entities::StudyEntities;
pub use migrate::{LATEST_VERSION, migrate_to_latest};
pub use schema::*;
pub use validate::{ValidationError, validate_study};

use tracing::info;

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Migration error: {what}")]
    Migration { what: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parse, migrate and validate a YAML study document.
pub fn from_yaml_str(content: &str) -> ProjectResult<Study> {
    let study: Study = serde_yaml::from_str(content)?;
    finish_load(study)
}

/// Parse, migrate and validate a JSON study document.
pub fn from_json_str(content: &str) -> ProjectResult<Study> {
    let study: Study = serde_json::from_str(content)?;
    finish_load(study)
}

fn finish_load(study: Study) -> ProjectResult<Study> {
    let study = migrate_to_latest(study)?;
    validate_study(&study)?;
    Ok(study)
}

pub fn load_yaml(path: &std::path::Path) -> ProjectResult<Study> {
    let content = std::fs::read_to_string(path)?;
    let study = from_yaml_str(&content)?;
    info!(path = %path.display(), "loaded study");
    Ok(study)
}

pub fn save_yaml(path: &std::path::Path, study: &Study) -> ProjectResult<()> {
    validate_study(study)?;
    let content = serde_yaml::to_string(study)?;
    std::fs::write(path, content)?;
    info!(path = %path.display(), "saved study");
    Ok(())
}

pub fn load_json(path: &std::path::Path) -> ProjectResult<Study> {
    let content = std::fs::read_to_string(path)?;
    let study = from_json_str(&content)?;
    info!(path = %path.display(), "loaded study");
    Ok(study)
}

pub fn save_json(path: &std::path::Path, study: &Study) -> ProjectResult<()> {
    validate_study(study)?;
    let content = serde_json::to_string_pretty(study)?;
    std::fs::write(path, content)?;
    info!(path = %path.display(), "saved study");
    Ok(())
}
