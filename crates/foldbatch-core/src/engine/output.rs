use super::config::{MSA_ALIAS, OutputConfig, TEMPLATE_ALIAS};
use super::context::OverflowEntry;
use super::error::EngineError;
use crate::core::io::compact;
use crate::core::io::link::{LinkOutcome, link_or_copy};
use crate::core::models::job::JobRecord;
use crate::core::models::tier::TierLadder;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File name of the overflow manifest inside the run directory.
pub const OVERFLOW_MANIFEST: &str = "too_big.json";

/// Writes placed jobs into `<root>/<run_id>/<tier>/` partitions.
///
/// A partition is prepared (created, with its resource aliases) right before its first
/// job is written. Indices come from the caller; the writer never renumbers.
pub struct PartitionWriter<'a> {
    output: &'a OutputConfig,
    ladder: &'a TierLadder,
    prepared: Vec<Option<PathBuf>>,
}

impl<'a> PartitionWriter<'a> {
    pub fn new(output: &'a OutputConfig, ladder: &'a TierLadder) -> Self {
        Self {
            output,
            ladder,
            prepared: vec![None; ladder.len()],
        }
    }

    /// Directory of the tier at `position`.
    pub fn partition_dir(&self, position: usize) -> Option<PathBuf> {
        self.ladder
            .get(position)
            .map(|tier| self.output.run_dir().join(&tier.name))
    }

    /// Writes one job to `<partition>/<index>_<name>.<ext>` and returns the path.
    pub fn write_job(
        &mut self,
        tier: usize,
        index: usize,
        job: &JobRecord,
    ) -> Result<PathBuf, EngineError> {
        check_job_name(job.name())?;
        let dir = self.prepare(tier)?;
        let path = dir.join(format!(
            "{}_{}.{}",
            index,
            job.name(),
            self.output.extension
        ));
        self.write_document(&path, &job.document())?;
        Ok(path)
    }

    /// Writes the overflow manifest, if there is anything to list.
    pub fn write_overflow_manifest(
        &self,
        entries: &[OverflowEntry],
    ) -> Result<Option<PathBuf>, EngineError> {
        if entries.is_empty() {
            return Ok(None);
        }
        let run_dir = self.output.run_dir();
        fs::create_dir_all(&run_dir).map_err(|e| EngineError::output(&run_dir, e))?;
        let path = run_dir.join(OVERFLOW_MANIFEST);
        self.write_document(&path, entries)?;
        info!(
            "{} job(s) exceed every tier; listed in {}",
            entries.len(),
            path.display()
        );
        Ok(Some(path))
    }

    fn prepare(&mut self, tier: usize) -> Result<PathBuf, EngineError> {
        if let Some(Some(dir)) = self.prepared.get(tier) {
            return Ok(dir.clone());
        }
        let dir = self.partition_dir(tier).ok_or_else(|| {
            EngineError::validation(format!("tier position {}", tier), "no such tier")
        })?;
        fs::create_dir_all(&dir).map_err(|e| EngineError::output(&dir, e))?;

        for (store, alias) in [
            (&self.output.msa_store, MSA_ALIAS),
            (&self.output.template_store, TEMPLATE_ALIAS),
        ] {
            fs::create_dir_all(store).map_err(|e| EngineError::output(store, e))?;
            let alias_path = dir.join(alias);
            let outcome =
                link_or_copy(store, &alias_path).map_err(|e| EngineError::output(&alias_path, e))?;
            if outcome != LinkOutcome::AlreadyPresent {
                debug!("Aliased {} -> {} ({:?})", alias_path.display(), store.display(), outcome);
            }
        }

        if tier >= self.prepared.len() {
            self.prepared.resize(tier + 1, None);
        }
        self.prepared[tier] = Some(dir.clone());
        Ok(dir)
    }

    fn write_document<T: Serialize + ?Sized>(
        &self,
        path: &Path,
        value: &T,
    ) -> Result<(), EngineError> {
        let mut rendered = compact::to_string(value, self.output.layout)
            .map_err(|e| EngineError::output(path, e.into()))?;
        rendered.push('\n');
        fs::write(path, rendered).map_err(|e| EngineError::output(path, e))
    }
}

/// Rejects job names that would not stay a single file name inside the partition.
pub fn check_job_name(name: &str) -> Result<(), EngineError> {
    let reason = if name.is_empty() {
        "name is empty"
    } else if name.contains(['/', '\\']) {
        "name contains a path separator"
    } else if name.chars().any(char::is_control) {
        "name contains a control character"
    } else {
        return Ok(());
    };
    Err(EngineError::validation(format!("job '{}'", name), reason))
}
