use crate::core::chem::CompoundCostEstimator;
use crate::core::io::screen::ScreenFile;
use crate::core::models::compound::TokenCost;
use tracing::{debug, instrument};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScreenSummary {
    /// Entries carrying an identifier and a non-empty notation.
    pub total: usize,
    /// Entries whose atom count is finite and within the limit.
    pub valid: usize,
    pub invalid_notation: usize,
    pub oversized: usize,
}

/// Counts the compounds of `screen` that would take part in a run.
#[instrument(skip_all, name = "screen_workflow")]
pub fn run(
    screen: &ScreenFile,
    estimator: &dyn CompoundCostEstimator,
    max_atoms: Option<u64>,
) -> ScreenSummary {
    let mut summary = ScreenSummary {
        total: screen.entries.len(),
        ..Default::default()
    };
    for entry in &screen.entries {
        let cost = estimator
            .atom_count(&entry.smiles)
            .map_or(TokenCost::Unbounded, TokenCost::Finite);
        match (cost, max_atoms) {
            (TokenCost::Unbounded, _) => {
                debug!(compound = %entry.id, "Notation could not be evaluated.");
                summary.invalid_notation += 1;
            }
            (TokenCost::Finite(n), Some(limit)) if n > limit => summary.oversized += 1,
            _ => summary.valid += 1,
        }
    }
    summary
}
