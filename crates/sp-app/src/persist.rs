//! Content-hashed persistence for session observers.

use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use sp_project::Study;
use tracing::{debug, info};

use crate::error::{AppError, AppResult};

/// On-disk encoding of a study document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudyFormat {
    Yaml,
    Json,
}

impl StudyFormat {
    /// `.json` files are JSON, anything else is YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => StudyFormat::Json,
            _ => StudyFormat::Yaml,
        }
    }

    pub fn render(self, study: &Study) -> AppResult<String> {
        match self {
            StudyFormat::Yaml => serde_yaml::to_string(study)
                .map_err(|e| AppError::Study(format!("Failed to serialize study: {}", e))),
            StudyFormat::Json => serde_json::to_string_pretty(study)
                .map_err(|e| AppError::Study(format!("Failed to serialize study: {}", e))),
        }
    }
}

/// SHA-256 of the study's canonical JSON encoding, as lowercase hex.
pub fn study_digest(study: &Study) -> AppResult<String> {
    let json = serde_json::to_vec(study)
        .map_err(|e| AppError::Study(format!("Failed to serialize study: {}", e)))?;
    let mut hasher = Sha256::new();
    hasher.update(&json);
    Ok(format!("{:x}", hasher.finalize()))
}

/// Writes the study to `path` whenever its content changed since the last
/// write (or since the digest it was primed with).
#[derive(Debug, Clone)]
pub struct SaveObserver {
    path: PathBuf,
    last_digest: Option<String>,
}

impl SaveObserver {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            last_digest: None,
        }
    }

    /// Observer that treats `study` as already saved.
    pub fn primed(path: impl Into<PathBuf>, study: &Study) -> AppResult<Self> {
        Ok(Self {
            path: path.into(),
            last_digest: Some(study_digest(study)?),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Save `study` if it differs from the last saved content. Returns whether
    /// a write happened.
    pub fn observe(&mut self, study: &Study) -> AppResult<bool> {
        let digest = study_digest(study)?;
        if self.last_digest.as_deref() == Some(digest.as_str()) {
            debug!(path = %self.path.display(), "study unchanged, skipping save");
            return Ok(false);
        }
        crate::study_service::save_study(&self.path, study)?;
        info!(path = %self.path.display(), digest = &digest[..12], "study persisted");
        self.last_digest = Some(digest);
        Ok(true)
    }

    /// Boxed callback for [`crate::StudySession`].
    pub fn into_observer(mut self) -> crate::session::StudyObserver {
        Box::new(move |study: &Study| self.observe(study).map(|_| ()))
    }
}
