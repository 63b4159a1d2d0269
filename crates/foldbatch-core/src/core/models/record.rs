use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// A protein chain block as found in monomer records and job documents.
///
/// Only `id` and `sequence` are interpreted. Everything else (alignments, templates,
/// modifications, path references) is carried verbatim in `extra`, in source order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProteinChain {
    #[serde(default)]
    pub id: String,
    pub sequence: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProteinChain {
    /// Number of residues, which is the chain's contribution to a job's token cost.
    pub fn residue_count(&self) -> u64 {
        self.sequence.chars().count() as u64
    }
}

/// A compound block attached to a job by the secondary compound axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LigandEntry {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub smiles: String,
}

/// One element of a job's `sequences` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SequenceBlock {
    Protein(ProteinChain),
    Ligand(LigandEntry),
}

/// The persisted per-entity document produced by the monomer data pipeline.
///
/// Top-level fields other than `name` and `sequences` are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MonomerDocument {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub sequences: Vec<Value>,
}

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("record has no sequence blocks")]
    NoSequences,
    #[error("first sequence block is malformed: {0}")]
    MalformedBlock(#[source] serde_json::Error),
    #[error("first sequence block is a ligand, expected a protein chain")]
    NotAProtein,
}

/// The resolved monomer data of one entity: its first protein chain block.
#[derive(Debug, Clone, PartialEq)]
pub struct MonomerRecord {
    pub entity: String,
    pub chain: ProteinChain,
}

impl MonomerRecord {
    pub fn from_document(entity: &str, document: MonomerDocument) -> Result<Self, RecordError> {
        let first = document
            .sequences
            .into_iter()
            .next()
            .ok_or(RecordError::NoSequences)?;
        let block: SequenceBlock =
            serde_json::from_value(first).map_err(RecordError::MalformedBlock)?;
        match block {
            SequenceBlock::Protein(chain) => Ok(Self {
                entity: entity.to_string(),
                chain,
            }),
            SequenceBlock::Ligand(_) => Err(RecordError::NotAProtein),
        }
    }

    pub fn sequence(&self) -> &str {
        &self.chain.sequence
    }

    /// Copies the chain block and stamps it with a role identifier.
    pub fn stamped(&self, role: char, annotate: bool) -> SequenceBlock {
        let mut chain = self.chain.clone();
        chain.id = role.to_string();
        if annotate {
            chain.description = Some(self.entity.clone());
        }
        SequenceBlock::Protein(chain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document(value: Value) -> MonomerDocument {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn from_document_keeps_auxiliary_fields_in_order() {
        let doc = document(json!({
            "dialect": "alphafold3",
            "name": "P1",
            "sequences": [{
                "protein": {
                    "id": "A",
                    "sequence": "MKV",
                    "unpairedMsaPath": "msas/P1_unpaired.a3m",
                    "templates": []
                }
            }]
        }));
        let record = MonomerRecord::from_document("P1", doc).unwrap();
        assert_eq!(record.sequence(), "MKV");
        let keys: Vec<_> = record.chain.extra.keys().cloned().collect();
        assert_eq!(keys, vec!["unpairedMsaPath", "templates"]);
    }

    #[test]
    fn from_document_rejects_missing_protein_block() {
        let err = MonomerRecord::from_document("P1", document(json!({"sequences": []})))
            .unwrap_err();
        assert!(matches!(err, RecordError::NoSequences));

        let err = MonomerRecord::from_document(
            "P1",
            document(json!({"sequences": [{"protein": {"id": "A"}}]})),
        )
        .unwrap_err();
        assert!(matches!(err, RecordError::MalformedBlock(_)));

        let err = MonomerRecord::from_document(
            "P1",
            document(json!({"sequences": [{"ligand": {"id": "A", "smiles": "CCO"}}]})),
        )
        .unwrap_err();
        assert!(matches!(err, RecordError::NotAProtein));
    }

    #[test]
    fn stamped_overrides_role_and_optionally_annotates() {
        let record = MonomerRecord {
            entity: "P1".to_string(),
            chain: ProteinChain {
                id: "A".to_string(),
                sequence: "MKV".to_string(),
                description: None,
                extra: Map::new(),
            },
        };
        let plain = serde_json::to_value(record.stamped('C', false)).unwrap();
        assert_eq!(plain, json!({"protein": {"id": "C", "sequence": "MKV"}}));

        let annotated = serde_json::to_value(record.stamped('B', true)).unwrap();
        assert_eq!(
            annotated,
            json!({"protein": {"id": "B", "sequence": "MKV", "description": "P1"}})
        );
        assert_eq!(record.chain.id, "A");
    }
}
