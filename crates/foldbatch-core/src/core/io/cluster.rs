use super::{LoadError, read_json};
use crate::core::models::tier::CapacityTier;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::Path;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TierSpec {
    Limit(u64),
    Detailed {
        #[serde(alias = "token_limit", alias = "max_token_size", alias = "limit")]
        max_tokens: u64,
    },
}

/// Reads named capacity tiers from a JSON object.
///
/// Each member is either a bare token limit (`"small": 3072`) or an object carrying
/// `max_tokens` (`"small": {"max_tokens": 3072, "gpu": "a100"}`); other members of such an
/// object are ignored. Tiers are returned in file order.
pub fn read_cluster_config(path: &Path) -> Result<Vec<CapacityTier>, LoadError> {
    let object: Map<String, Value> = read_json(path)?;
    tiers_from_object(object).map_err(|e| LoadError::Json {
        path: path.to_path_buf(),
        source: e,
    })
}

pub fn parse_cluster_config(content: &str) -> Result<Vec<CapacityTier>, serde_json::Error> {
    tiers_from_object(serde_json::from_str(content)?)
}

fn tiers_from_object(object: Map<String, Value>) -> Result<Vec<CapacityTier>, serde_json::Error> {
    object
        .into_iter()
        .map(|(name, value)| {
            let max_tokens = match serde_json::from_value(value)? {
                TierSpec::Limit(n) => n,
                TierSpec::Detailed { max_tokens } => max_tokens,
            };
            Ok(CapacityTier { name, max_tokens })
        })
        .collect()
}
