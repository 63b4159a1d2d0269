use super::compound::TokenCost;
use std::collections::HashSet;
use thiserror::Error;

/// A named capacity class with an inclusive token limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapacityTier {
    pub name: String,
    pub max_tokens: u64,
}

impl CapacityTier {
    pub fn new(name: impl Into<String>, max_tokens: u64) -> Self {
        Self {
            name: name.into(),
            max_tokens,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TierSelectionError {
    #[error("unknown capacity tier '{0}'")]
    UnknownTier(String),
    #[error("no capacity tiers selected")]
    Empty,
}

/// Capacity tiers ordered by ascending limit.
///
/// The sort is stable, so tiers sharing a limit keep their configuration order and the
/// first of them wins every selection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TierLadder {
    tiers: Vec<CapacityTier>,
}

impl TierLadder {
    pub fn new(mut tiers: Vec<CapacityTier>) -> Self {
        tiers.sort_by_key(|tier| tier.max_tokens);
        Self { tiers }
    }

    /// Keeps only the named tiers, preserving ascending order.
    pub fn restrict_to(&self, names: &[String]) -> Result<Self, TierSelectionError> {
        if names.is_empty() {
            return Err(TierSelectionError::Empty);
        }
        for name in names {
            if !self.tiers.iter().any(|tier| &tier.name == name) {
                return Err(TierSelectionError::UnknownTier(name.clone()));
            }
        }
        let wanted: HashSet<&str> = names.iter().map(String::as_str).collect();
        Ok(Self {
            tiers: self
                .tiers
                .iter()
                .filter(|tier| wanted.contains(tier.name.as_str()))
                .cloned()
                .collect(),
        })
    }

    /// Position of the lowest tier whose limit accommodates `cost`.
    pub fn select(&self, cost: TokenCost) -> Option<usize> {
        self.tiers
            .iter()
            .position(|tier| cost.fits_within(tier.max_tokens))
    }

    pub fn tiers(&self) -> &[CapacityTier] {
        &self.tiers
    }

    pub fn get(&self, position: usize) -> Option<&CapacityTier> {
        self.tiers.get(position)
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ladder() -> TierLadder {
        TierLadder::new(vec![
            CapacityTier::new("large", 8192),
            CapacityTier::new("small", 3072),
        ])
    }

    #[test]
    fn new_sorts_tiers_by_ascending_limit() {
        let names: Vec<_> = ladder().tiers().iter().map(|t| t.name.clone()).collect();
        assert_eq!(names, vec!["small", "large"]);
    }

    #[test]
    fn select_picks_smallest_sufficient_tier() {
        let ladder = ladder();
        assert_eq!(ladder.select(TokenCost::Finite(3072)), Some(0));
        assert_eq!(ladder.select(TokenCost::Finite(5000)), Some(1));
        assert_eq!(ladder.select(TokenCost::Finite(10000)), None);
        assert_eq!(ladder.select(TokenCost::Unbounded), None);
    }

    #[test]
    fn equal_limits_keep_configuration_order() {
        let ladder = TierLadder::new(vec![
            CapacityTier::new("first", 100),
            CapacityTier::new("second", 100),
        ]);
        assert_eq!(ladder.get(ladder.select(TokenCost::Finite(50)).unwrap()).unwrap().name, "first");
    }

    #[test]
    fn restrict_to_filters_and_rejects_unknown_names() {
        let ladder = ladder();
        let only_large = ladder.restrict_to(&["large".to_string()]).unwrap();
        assert_eq!(only_large.len(), 1);
        assert_eq!(only_large.select(TokenCost::Finite(10)), Some(0));

        assert_eq!(
            ladder.restrict_to(&["medium".to_string()]),
            Err(TierSelectionError::UnknownTier("medium".to_string()))
        );
        assert_eq!(ladder.restrict_to(&[]), Err(TierSelectionError::Empty));
    }
}
