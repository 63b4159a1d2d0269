use super::combinations::Combination;
use super::error::EngineError;
use crate::core::io::LoadError;
use crate::core::io::monomer_store::MonomerStore;
use crate::core::models::record::MonomerRecord;
use crate::core::models::registry::EntityRegistry;
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, info, warn};

/// Loads monomer records on demand and keeps them for the rest of the run.
pub struct MonomerResolver<'s> {
    store: &'s dyn MonomerStore,
    records: HashMap<String, MonomerRecord>,
    loads: usize,
}

impl<'s> MonomerResolver<'s> {
    pub fn new(store: &'s dyn MonomerStore) -> Self {
        Self {
            store,
            records: HashMap::new(),
            loads: 0,
        }
    }

    /// Returns the record for `entity`, reading it from the store on first use.
    pub fn resolve(&mut self, entity: &str) -> Result<&MonomerRecord, EngineError> {
        if !self.records.contains_key(entity) {
            let record = self.load(entity)?;
            self.records.insert(entity.to_string(), record);
        }
        self.records
            .get(entity)
            .ok_or_else(|| EngineError::ResourceMissing {
                entity: entity.to_string(),
                location: self.store.location(entity),
            })
    }

    /// Loads every distinct entity referenced by `combinations`, in sorted order.
    ///
    /// When a registry is given, records whose sequence differs from the input sequence
    /// are reported with a warning.
    pub fn resolve_all(
        &mut self,
        combinations: &[Combination],
        registry: Option<&EntityRegistry>,
    ) -> Result<(), EngineError> {
        let entities: BTreeSet<&str> = combinations
            .iter()
            .flat_map(|c| c.members().iter().map(String::as_str))
            .collect();
        for entity in &entities {
            let record = self.resolve(entity)?;
            if let Some(expected) = registry.and_then(|r| r.sequence(entity)) {
                if record.sequence() != expected {
                    warn!(
                        entity = %entity,
                        "Monomer record sequence differs from the input sequence."
                    );
                }
            }
        }
        info!(entities = entities.len(), "Monomer records resolved.");
        Ok(())
    }

    pub fn get(&self, entity: &str) -> Option<&MonomerRecord> {
        self.records.get(entity)
    }

    /// Number of store reads performed so far.
    pub fn loads(&self) -> usize {
        self.loads
    }

    fn load(&mut self, entity: &str) -> Result<MonomerRecord, EngineError> {
        debug!("Reading monomer record for '{}'", entity);
        self.loads += 1;
        let document = match self.store.read(entity) {
            Ok(Some(document)) => document,
            Ok(None) => {
                return Err(EngineError::ResourceMissing {
                    entity: entity.to_string(),
                    location: self.store.location(entity),
                });
            }
            Err(LoadError::Json { source, .. }) => {
                return Err(EngineError::validation(
                    format!("monomer record of '{}'", entity),
                    source.to_string(),
                ));
            }
            Err(e) => return Err(e.into()),
        };
        MonomerRecord::from_document(entity, document).map_err(|e| {
            EngineError::validation(format!("monomer record of '{}'", entity), e.to_string())
        })
    }
}
