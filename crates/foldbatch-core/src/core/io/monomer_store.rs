use super::{LoadError, read_json};
use crate::core::models::record::MonomerDocument;
use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;

/// Source of precomputed per-entity monomer documents.
pub trait MonomerStore {
    /// Human-readable location where the record for `entity` is expected.
    fn location(&self, entity: &str) -> String;

    /// Reads the record for `entity`; `Ok(None)` means the record does not exist.
    fn read(&self, entity: &str) -> Result<Option<MonomerDocument>, LoadError>;
}

/// Monomer records laid out as `<root>/<entity>/<entity>_data.json`.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn record_path(&self, entity: &str) -> PathBuf {
        self.root
            .join(entity)
            .join(format!("{}_data.json", entity))
    }
}

impl MonomerStore for DirectoryStore {
    fn location(&self, entity: &str) -> String {
        self.record_path(entity).display().to_string()
    }

    fn read(&self, entity: &str) -> Result<Option<MonomerDocument>, LoadError> {
        let path = self.record_path(entity);
        if !path.is_file() {
            return Ok(None);
        }
        read_json(&path).map(Some)
    }
}

/// A store backed by in-memory JSON documents.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    documents: HashMap<String, Value>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, entity: impl Into<String>, document: Value) {
        self.documents.insert(entity.into(), document);
    }

    /// Adds a minimal record holding a single protein chain with `sequence`.
    pub fn insert_sequence(&mut self, entity: impl Into<String>, sequence: &str) {
        let entity = entity.into();
        let document = serde_json::json!({
            "name": entity.clone(),
            "sequences": [{ "protein": { "id": "A", "sequence": sequence } }]
        });
        self.documents.insert(entity, document);
    }
}

impl MonomerStore for InMemoryStore {
    fn location(&self, entity: &str) -> String {
        format!("memory://{}", entity)
    }

    fn read(&self, entity: &str) -> Result<Option<MonomerDocument>, LoadError> {
        match self.documents.get(entity) {
            None => Ok(None),
            Some(value) => serde_json::from_value(value.clone())
                .map(Some)
                .map_err(|e| LoadError::Json {
                    path: PathBuf::from(self.location(entity)),
                    source: e,
                }),
        }
    }
}
