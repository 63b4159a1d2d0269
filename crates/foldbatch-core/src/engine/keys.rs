use super::config::KeyOrdering;
use crate::core::models::dimension::Dimension;

/// Entity names of one dimension in the requested order.
pub fn key_list(dimension: &Dimension, ordering: KeyOrdering) -> Vec<String> {
    let mut keys: Vec<String> = dimension.names().map(str::to_string).collect();
    if ordering == KeyOrdering::Alpha {
        keys.sort();
    }
    keys
}

pub fn key_lists(dimensions: &[Dimension], ordering: KeyOrdering) -> Vec<Vec<String>> {
    dimensions
        .iter()
        .map(|dimension| key_list(dimension, ordering))
        .collect()
}
