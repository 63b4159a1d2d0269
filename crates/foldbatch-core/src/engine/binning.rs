use super::context::{OverflowEntry, RunContext};
use crate::core::models::job::JobRecord;
use crate::core::models::tier::TierLadder;
use tracing::debug;

/// Final disposition of one assembled job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assignment {
    /// Placed in the tier at `tier` (ladder position) with sequential `index`.
    Placed { tier: usize, index: usize },
    Overflow,
}

/// Routes jobs into the smallest tier whose limit accommodates their cost.
pub struct CapacityBinner<'a> {
    ladder: &'a TierLadder,
}

impl<'a> CapacityBinner<'a> {
    pub fn new(ladder: &'a TierLadder) -> Self {
        Self { ladder }
    }

    /// Assigns `job`, advancing the chosen tier's counter or recording an overflow entry.
    pub fn assign(&self, ctx: &mut RunContext, job: &JobRecord) -> Assignment {
        match self.ladder.select(job.token_cost()) {
            Some(tier) => {
                let index = ctx.next_index(tier);
                Assignment::Placed { tier, index }
            }
            None => {
                debug!(job = %job.name(), cost = %job.token_cost(), "Job exceeds every tier.");
                ctx.record_overflow(OverflowEntry {
                    name: job.name().to_string(),
                    token_size: job.token_cost(),
                });
                Assignment::Overflow
            }
        }
    }
}
