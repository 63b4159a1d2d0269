use super::config::ConfigError;
use crate::core::io::LoadError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Validation failed for {subject}: {reason}")]
    Validation { subject: String, reason: String },

    #[error(
        "Inconsistent sequence for entity '{entity}': first seen as '{first_seen}', dimension {dimension} gives '{conflicting}'"
    )]
    Consistency {
        entity: String,
        first_seen: String,
        conflicting: String,
        dimension: usize,
    },

    #[error("Missing monomer record for entity '{entity}' (expected at {location})")]
    ResourceMissing { entity: String, location: String },

    #[error(
        "Job '{job}' needs {required} role identifiers but only {available} are available"
    )]
    RoleBudgetExceeded {
        job: String,
        required: usize,
        available: usize,
    },

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("Failed to write '{path}': {source}", path = path.display())]
    Output {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl EngineError {
    pub(crate) fn validation(subject: impl Into<String>, reason: impl Into<String>) -> Self {
        EngineError::Validation {
            subject: subject.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn output(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        EngineError::Output {
            path: path.into(),
            source,
        }
    }
}
