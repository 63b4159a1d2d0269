use super::error::EngineError;
use crate::core::models::dimension::{Dimension, RawDimension};
use crate::core::models::registry::EntityRegistry;
use phf::{Set, phf_set};
use serde_json::Value;
use std::collections::HashSet;
use tracing::{debug, info};

/// One-letter protein residue codes accepted under strict validation, including the
/// ambiguity codes and the two non-standard amino acids.
static RESIDUE_ALPHABET: Set<char> = phf_set! {
    'A', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'K', 'L', 'M', 'N', 'P', 'Q', 'R', 'S', 'T',
    'V', 'W', 'Y', 'X', 'B', 'Z', 'J', 'U', 'O',
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedInput {
    pub dimensions: Vec<Dimension>,
    pub registry: EntityRegistry,
}

/// Validates the raw dimension list and builds the entity registry.
///
/// Fails on the first problem found, scanning dimensions in order and entries in source
/// order: a non-object dimension, a duplicate name inside one dimension, a non-string
/// sequence, (under `strict`) an unsafe name, an empty sequence or a residue outside the
/// alphabet, and finally an entity whose sequence differs from its first occurrence.
pub fn validate_dimensions(
    raw: Vec<RawDimension>,
    strict: bool,
) -> Result<ValidatedInput, EngineError> {
    let mut registry = EntityRegistry::new();
    let mut dimensions = Vec::with_capacity(raw.len());

    for (index, raw_dimension) in raw.into_iter().enumerate() {
        let entries = match raw_dimension {
            RawDimension::Entries(entries) => entries,
            RawDimension::Malformed(found) => {
                return Err(EngineError::validation(
                    format!("dimension {}", index),
                    format!("expected an object of entity names to sequences, found {}", found),
                ));
            }
        };

        let mut seen = HashSet::with_capacity(entries.len());
        let mut validated = Vec::with_capacity(entries.len());
        for (name, value) in entries {
            if !seen.insert(name.clone()) {
                return Err(EngineError::validation(
                    format!("entity '{}' in dimension {}", name, index),
                    "name appears more than once in the same dimension",
                ));
            }
            let Value::String(sequence) = value else {
                return Err(EngineError::validation(
                    format!("entity '{}' in dimension {}", name, index),
                    "sequence must be a string",
                ));
            };
            if strict {
                check_name(&name, index)?;
                check_sequence(&name, &sequence, index)?;
            }
            registry
                .register(&name, &sequence)
                .map_err(|conflict| EngineError::Consistency {
                    entity: conflict.entity,
                    first_seen: conflict.first_seen,
                    conflicting: conflict.conflicting,
                    dimension: index,
                })?;
            validated.push((name, sequence));
        }
        debug!(dimension = index, entities = validated.len(), "Dimension validated.");
        dimensions.push(Dimension::from_validated(validated));
    }

    info!(
        dimensions = dimensions.len(),
        entities = registry.len(),
        "Input dimensions validated."
    );
    Ok(ValidatedInput {
        dimensions,
        registry,
    })
}

fn check_name(name: &str, index: usize) -> Result<(), EngineError> {
    let safe = !name.is_empty()
        && name != "."
        && name != ".."
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if !safe {
        return Err(EngineError::validation(
            format!("entity '{}' in dimension {}", name, index),
            "name may only contain ASCII letters, digits, '_', '-' and '.'",
        ));
    }
    Ok(())
}

fn check_sequence(name: &str, sequence: &str, index: usize) -> Result<(), EngineError> {
    if sequence.is_empty() {
        return Err(EngineError::validation(
            format!("entity '{}' in dimension {}", name, index),
            "sequence is empty",
        ));
    }
    if let Some((position, residue)) = sequence
        .chars()
        .enumerate()
        .find(|(_, c)| !RESIDUE_ALPHABET.contains(c))
    {
        return Err(EngineError::validation(
            format!("entity '{}' in dimension {}", name, index),
            format!(
                "residue '{}' at position {} is not a one-letter protein code",
                residue,
                position + 1
            ),
        ));
    }
    Ok(())
}
