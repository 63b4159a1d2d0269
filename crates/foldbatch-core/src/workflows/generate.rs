use crate::core::io::monomer_store::MonomerStore;
use crate::core::models::dimension::RawDimension;
use crate::core::models::job::JobRecord;
use crate::engine::assembly::JobAssembler;
use crate::engine::binning::{Assignment, CapacityBinner};
use crate::engine::combinations::{self, Combination};
use crate::engine::config::BatchConfig;
use crate::engine::context::{OverflowEntry, RunContext};
use crate::engine::error::EngineError;
use crate::engine::keys;
use crate::engine::output::{PartitionWriter, check_job_name};
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::resolver::MonomerResolver;
use crate::engine::validate::validate_dimensions;
use std::fmt;
use std::path::PathBuf;
use tracing::{info, instrument};

/// An assembled job together with its disposition.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedJob {
    pub job: JobRecord,
    pub assignment: Assignment,
}

/// Everything a run would write, computed without touching the output tree.
#[derive(Debug, Clone)]
pub struct GenerationPlan {
    pub unique_entities: usize,
    pub combinations: Vec<Combination>,
    pub jobs: Vec<PlannedJob>,
    pub context: RunContext,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierSummary {
    pub name: String,
    pub max_tokens: u64,
    pub placed: usize,
}

#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub unique_entities: usize,
    pub unique_combinations: usize,
    /// Placed counts in ascending-limit order.
    pub tiers: Vec<TierSummary>,
    pub overflow: Vec<OverflowEntry>,
    pub manifest: Option<PathBuf>,
    pub written: Vec<PathBuf>,
}

impl GenerationReport {
    pub fn placed_total(&self) -> usize {
        self.tiers.iter().map(|tier| tier.placed).sum()
    }
}

/// `<tier>=<count> ... overflow=<n>`
impl fmt::Display for GenerationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for tier in &self.tiers {
            write!(f, "{}={} ", tier.name, tier.placed)?;
        }
        write!(f, "overflow={}", self.overflow.len())
    }
}

/// Validates, enumerates, resolves, assembles and bins every job of the run.
#[instrument(skip_all, name = "generation_plan")]
pub fn plan(
    raw: Vec<RawDimension>,
    config: &BatchConfig,
    store: &dyn MonomerStore,
    reporter: &ProgressReporter,
) -> Result<GenerationPlan, EngineError> {
    reporter.report(Progress::PhaseStart { name: "Validation" });
    let input = validate_dimensions(raw, config.strict_validation)?;
    reporter.report(Progress::PhaseFinish);

    reporter.report(Progress::PhaseStart {
        name: "Combinations",
    });
    let key_lists = keys::key_lists(&input.dimensions, config.ordering);
    let mut context = RunContext::new(config.tiers.len());
    let raw_count = combinations::raw_candidate_count(&key_lists, config.mode);
    let unique: Vec<Combination> =
        combinations::generate(&key_lists, config.mode, &mut context).collect();
    info!(
        mode = %config.mode,
        raw = %raw_count,
        unique = unique.len(),
        "Combinations enumerated."
    );
    reporter.report(Progress::PhaseFinish);

    reporter.report(Progress::PhaseStart { name: "Resolution" });
    let mut resolver = MonomerResolver::new(store);
    resolver.resolve_all(&unique, Some(&input.registry))?;
    reporter.report(Progress::PhaseFinish);

    reporter.report(Progress::PhaseStart { name: "Assembly" });
    reporter.report(Progress::TaskStart {
        total_steps: unique.len() as u64,
    });
    let assembler = JobAssembler::new(
        &config.model_seeds,
        &config.compounds,
        config.annotate_names,
    );
    let binner = CapacityBinner::new(&config.tiers);
    let mut jobs = Vec::new();
    for combination in &unique {
        for job in assembler.assemble(combination, &mut resolver)? {
            check_job_name(job.name())?;
            let assignment = binner.assign(&mut context, &job);
            jobs.push(PlannedJob { job, assignment });
        }
        reporter.report(Progress::TaskIncrement);
    }
    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);

    Ok(GenerationPlan {
        unique_entities: input.registry.len(),
        combinations: unique,
        jobs,
        context,
    })
}

/// Runs the whole pipeline and writes the partitioned job tree.
///
/// Rerunning into a non-empty run directory does not clear it: indices restart at zero,
/// so files of the same name are replaced and all others accumulate.
#[instrument(skip_all, name = "generation_workflow")]
pub fn run(
    raw: Vec<RawDimension>,
    config: &BatchConfig,
    store: &dyn MonomerStore,
    reporter: &ProgressReporter,
) -> Result<GenerationReport, EngineError> {
    let plan = plan(raw, config, store, reporter)?;

    reporter.report(Progress::PhaseStart { name: "Writing" });
    reporter.report(Progress::TaskStart {
        total_steps: plan.jobs.len() as u64,
    });
    let mut writer = PartitionWriter::new(&config.output, &config.tiers);
    let mut written = Vec::new();
    for planned in &plan.jobs {
        if let Assignment::Placed { tier, index } = planned.assignment {
            let path = writer.write_job(tier, index, &planned.job)?;
            info!("Created {} (token size {})", path.display(), planned.job.token_cost());
            reporter.report(Progress::FileCreated {
                path: path.clone(),
                token_size: planned.job.token_cost(),
            });
            written.push(path);
        }
        reporter.report(Progress::TaskIncrement);
    }
    reporter.report(Progress::TaskFinish);

    let manifest = writer.write_overflow_manifest(plan.context.overflow())?;
    if let Some(path) = &manifest {
        reporter.report(Progress::Message(format!(
            "Jobs too large for every tier are listed in {}",
            path.display()
        )));
    }
    reporter.report(Progress::PhaseFinish);

    let tiers = config
        .tiers
        .tiers()
        .iter()
        .enumerate()
        .map(|(position, tier)| TierSummary {
            name: tier.name.clone(),
            max_tokens: tier.max_tokens,
            placed: plan
                .context
                .placed_counts()
                .get(position)
                .copied()
                .unwrap_or(0),
        })
        .collect();

    Ok(GenerationReport {
        unique_entities: plan.unique_entities,
        unique_combinations: plan.combinations.len(),
        tiers,
        overflow: plan.context.overflow().to_vec(),
        manifest,
        written,
    })
}
