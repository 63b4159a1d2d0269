//! Input loaders and output primitives.
//!
//! Everything here is free of run state: the loaders turn files into typed models, the
//! [`compact`] writer renders any serializable value in the diff-friendly job-file layout,
//! and [`link`] makes shared resource stores reachable from output partitions.

pub mod cluster;
pub mod compact;
pub mod dimensions;
pub mod link;
pub mod monomer_store;
pub mod screen;

use std::path::PathBuf;
use thiserror::Error;

/// Failure to read or parse one input file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("File I/O error for '{path}': {source}", path = path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("JSON parsing error for '{path}': {source}", path = path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

pub(crate) fn read_json<T: serde::de::DeserializeOwned>(
    path: &std::path::Path,
) -> Result<T, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|e| LoadError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&content).map_err(|e| LoadError::Json {
        path: path.to_path_buf(),
        source: e,
    })
}
