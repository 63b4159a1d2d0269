use crate::core::io::compact::{self, CompactLayout};
use crate::core::models::dimension::RawDimension;
use crate::core::models::job::{JOB_DIALECT, JOB_VERSION};
use crate::core::models::record::{ProteinChain, SequenceBlock};
use crate::engine::config::KeyOrdering;
use crate::engine::error::EngineError;
use crate::engine::validate::validate_dimensions;
use serde::Serialize;
use serde_json::Map;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

pub const DEFAULT_PIPELINE_INPUT_DIR: &str = "data_pipeline_inputs";

/// Single-chain input document for the monomer data pipeline.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PipelineInput<'a> {
    name: &'a str,
    sequences: [SequenceBlock; 1],
    dialect: &'static str,
    version: u32,
    model_seeds: [i64; 1],
}

/// Writes `<out_dir>/<index>_<name>.json` for every distinct entity.
///
/// Entities are numbered in first-appearance order (`Input`) or alphabetically (`Alpha`).
/// Sequences are not checked against the residue alphabet unless `strict` is set, but
/// inconsistent sequences are always fatal.
#[instrument(skip_all, name = "pipeline_inputs_workflow")]
pub fn run(
    raw: Vec<RawDimension>,
    ordering: KeyOrdering,
    strict: bool,
    out_dir: &Path,
) -> Result<Vec<PathBuf>, EngineError> {
    let input = validate_dimensions(raw, strict)?;
    let names: Vec<&str> = match ordering {
        KeyOrdering::Input => input.registry.names().collect(),
        KeyOrdering::Alpha => input.registry.sorted_names(),
    };

    fs::create_dir_all(out_dir).map_err(|e| EngineError::output(out_dir, e))?;
    let mut written = Vec::with_capacity(names.len());
    for (index, name) in names.into_iter().enumerate() {
        let sequence = input.registry.sequence(name).unwrap_or_default();
        let document = PipelineInput {
            name,
            sequences: [SequenceBlock::Protein(ProteinChain {
                id: "A".to_string(),
                sequence: sequence.to_string(),
                description: None,
                extra: Map::new(),
            })],
            dialect: JOB_DIALECT,
            version: JOB_VERSION,
            model_seeds: [0],
        };
        let path = out_dir.join(format!("{}_{}.json", index, name));
        let layout = CompactLayout {
            indent: 4,
            inline_scalar_lists: false,
        };
        let rendered =
            compact::to_string(&document, layout).map_err(|e| EngineError::output(&path, e.into()))?;
        fs::write(&path, rendered).map_err(|e| EngineError::output(&path, e))?;
        written.push(path);
    }
    info!(count = written.len(), "Data pipeline inputs written to {}", out_dir.display());
    Ok(written)
}
