use crate::core::chem::CompoundCostEstimator;
use serde::{Serialize, Serializer};
use std::fmt;
use std::ops::Add;
use tracing::debug;

/// Total number of single-letter role identifiers (A-Z).
pub const ROLE_IDENTIFIER_COUNT: usize = 26;

/// Resource cost of a job in tokens.
///
/// `Unbounded` is produced by compounds whose notation could not be evaluated; it orders
/// above every finite cost, so such jobs never fit a tier and always land in overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TokenCost {
    Finite(u64),
    Unbounded,
}

impl TokenCost {
    pub fn fits_within(self, limit: u64) -> bool {
        matches!(self, TokenCost::Finite(n) if n <= limit)
    }
}

impl Add for TokenCost {
    type Output = TokenCost;

    fn add(self, rhs: TokenCost) -> TokenCost {
        match (self, rhs) {
            (TokenCost::Finite(a), TokenCost::Finite(b)) => a
                .checked_add(b)
                .map(TokenCost::Finite)
                .unwrap_or(TokenCost::Unbounded),
            _ => TokenCost::Unbounded,
        }
    }
}

impl fmt::Display for TokenCost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenCost::Finite(n) => write!(f, "{}", n),
            TokenCost::Unbounded => f.write_str("unbounded"),
        }
    }
}

impl Serialize for TokenCost {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TokenCost::Finite(n) => serializer.serialize_u64(*n),
            TokenCost::Unbounded => serializer.serialize_none(),
        }
    }
}

/// One screen entry: an identifier plus its chemical notation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenEntry {
    pub id: String,
    pub smiles: String,
}

/// A compound admitted to the secondary axis, with its precomputed cost contribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compound {
    pub id: String,
    pub smiles: String,
    pub cost: TokenCost,
}

/// The secondary axis every combination is crossed with.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CompoundAxis {
    /// No screen configured: each combination yields exactly one job without a compound block.
    #[default]
    Absent,
    /// Each combination yields one job per listed compound (possibly none).
    Screen(Vec<Compound>),
}

impl CompoundAxis {
    /// Evaluates every screen entry and keeps those within `max_atoms`.
    ///
    /// Entries whose notation cannot be evaluated stay on the axis with an unbounded cost.
    /// Returns the axis together with the number of entries dropped for exceeding the limit.
    pub fn from_screen(
        entries: Vec<ScreenEntry>,
        estimator: &dyn CompoundCostEstimator,
        max_atoms: Option<u64>,
    ) -> (Self, usize) {
        let mut excluded = 0;
        let mut compounds = Vec::with_capacity(entries.len());
        for entry in entries {
            let cost = match estimator.atom_count(&entry.smiles) {
                Some(n) => TokenCost::Finite(n),
                None => TokenCost::Unbounded,
            };
            if let (TokenCost::Finite(n), Some(limit)) = (cost, max_atoms) {
                if n > limit {
                    debug!(compound = %entry.id, atoms = n, limit, "Compound exceeds atom limit.");
                    excluded += 1;
                    continue;
                }
            }
            compounds.push(Compound {
                id: entry.id,
                smiles: entry.smiles,
                cost,
            });
        }
        (CompoundAxis::Screen(compounds), excluded)
    }

    pub fn is_active(&self) -> bool {
        matches!(self, CompoundAxis::Screen(_))
    }

    /// Number of role identifiers available to protein participants.
    ///
    /// An active axis reserves the last identifier for the compound block.
    pub fn role_budget(&self) -> usize {
        match self {
            CompoundAxis::Absent => ROLE_IDENTIFIER_COUNT,
            CompoundAxis::Screen(_) => ROLE_IDENTIFIER_COUNT - 1,
        }
    }

    /// The compounds to cross with: `None` once when absent, each compound otherwise.
    pub fn variants(&self) -> Vec<Option<&Compound>> {
        match self {
            CompoundAxis::Absent => vec![None],
            CompoundAxis::Screen(compounds) => compounds.iter().map(Some).collect(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            CompoundAxis::Absent => 0,
            CompoundAxis::Screen(compounds) => compounds.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::chem::ExplicitAtomCounter;

    fn entry(id: &str, smiles: &str) -> ScreenEntry {
        ScreenEntry {
            id: id.to_string(),
            smiles: smiles.to_string(),
        }
    }

    #[test]
    fn token_cost_orders_unbounded_last_and_saturates_on_add() {
        assert!(TokenCost::Finite(u64::MAX) < TokenCost::Unbounded);
        assert_eq!(
            TokenCost::Finite(3) + TokenCost::Finite(4),
            TokenCost::Finite(7)
        );
        assert_eq!(
            TokenCost::Finite(3) + TokenCost::Unbounded,
            TokenCost::Unbounded
        );
        assert_eq!(
            TokenCost::Finite(u64::MAX) + TokenCost::Finite(1),
            TokenCost::Unbounded
        );
    }

    #[test]
    fn token_cost_serializes_unbounded_as_null() {
        assert_eq!(serde_json::to_string(&TokenCost::Finite(12)).unwrap(), "12");
        assert_eq!(serde_json::to_string(&TokenCost::Unbounded).unwrap(), "null");
    }

    #[test]
    fn from_screen_drops_oversized_and_keeps_invalid_as_unbounded() {
        let entries = vec![
            entry("ethanol", "CCO"),
            entry("big", "CCCCCCCCCC"),
            entry("broken", "C(C"),
        ];
        let (axis, excluded) = CompoundAxis::from_screen(entries, &ExplicitAtomCounter, Some(5));
        assert_eq!(excluded, 1);
        match axis {
            CompoundAxis::Screen(compounds) => {
                assert_eq!(compounds.len(), 2);
                assert_eq!(compounds[0].cost, TokenCost::Finite(3));
                assert_eq!(compounds[1].id, "broken");
                assert_eq!(compounds[1].cost, TokenCost::Unbounded);
            }
            CompoundAxis::Absent => panic!("expected an active axis"),
        }
    }

    #[test]
    fn role_budget_reserves_one_identifier_for_compounds() {
        assert_eq!(CompoundAxis::Absent.role_budget(), 26);
        assert_eq!(CompoundAxis::Screen(vec![]).role_budget(), 25);
        assert_eq!(CompoundAxis::Absent.variants(), vec![None]);
        assert!(CompoundAxis::Screen(vec![]).variants().is_empty());
    }
}
