use std::collections::HashMap;
use thiserror::Error;

/// Raised when an entity name is registered twice with different sequences.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("entity '{entity}' was first seen with sequence '{first_seen}' but is now given '{conflicting}'")]
pub struct SequenceConflict {
    pub entity: String,
    pub first_seen: String,
    pub conflicting: String,
}

/// Global map from entity name to its canonical sequence.
///
/// Names are remembered in order of first appearance, which is the "input" ordering used
/// when every distinct entity has to be enumerated (for instance when preparing
/// data-pipeline inputs).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityRegistry {
    order: Vec<String>,
    sequences: HashMap<String, String>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `name` with `sequence`.
    ///
    /// Returns `Ok(true)` when the name is new, `Ok(false)` when it was already known with
    /// the identical sequence, and a [`SequenceConflict`] otherwise. A conflicting call
    /// leaves the registry unchanged.
    pub fn register(&mut self, name: &str, sequence: &str) -> Result<bool, SequenceConflict> {
        match self.sequences.get(name) {
            Some(existing) if existing == sequence => Ok(false),
            Some(existing) => Err(SequenceConflict {
                entity: name.to_string(),
                first_seen: existing.clone(),
                conflicting: sequence.to_string(),
            }),
            None => {
                self.order.push(name.to_string());
                self.sequences
                    .insert(name.to_string(), sequence.to_string());
                Ok(true)
            }
        }
    }

    pub fn sequence(&self, name: &str) -> Option<&str> {
        self.sequences.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Entity names in order of first appearance.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Entity names sorted alphabetically.
    pub fn sorted_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.names().collect();
        names.sort_unstable();
        names
    }
}
