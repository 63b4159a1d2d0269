use crate::core::models::dimension::RawDimension;
use crate::engine::combinations;
use crate::engine::config::{GenerationMode, KeyOrdering};
use crate::engine::context::RunContext;
use crate::engine::error::EngineError;
use crate::engine::keys;
use crate::engine::validate::validate_dimensions;
use tracing::instrument;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputAnalysis {
    pub unique_entities: usize,
    pub unique_jobs: usize,
    /// Raw candidates before deduplication, saturating.
    pub raw_candidates: u128,
}

/// Counts distinct entities and distinct jobs of `mode` without loading monomer records.
#[instrument(skip_all, name = "analysis_workflow")]
pub fn run(
    raw: Vec<RawDimension>,
    mode: GenerationMode,
    strict: bool,
) -> Result<InputAnalysis, EngineError> {
    let input = validate_dimensions(raw, strict)?;
    let key_lists = keys::key_lists(&input.dimensions, KeyOrdering::Input);
    let mut context = RunContext::default();
    let unique_jobs = combinations::generate(&key_lists, mode, &mut context).count();
    Ok(InputAnalysis {
        unique_entities: input.registry.len(),
        unique_jobs,
        raw_candidates: combinations::raw_candidate_count(&key_lists, mode),
    })
}
