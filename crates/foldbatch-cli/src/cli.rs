use clap::{Args, Parser, Subcommand};
use foldbatch::engine::config::{GenerationMode, KeyOrdering};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Foldbatch Developers",
    version,
    about = "foldbatch - Combinatorial job generation and capacity-aware binning for structure-prediction pipelines.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate partitioned job files from a dimensions file.
    Generate(GenerateArgs),
    /// Count unique entities and unique jobs without writing anything.
    Analyze(AnalyzeArgs),
    /// Write one data-pipeline input document per distinct entity.
    Inputs(InputsArgs),
    /// Count the compounds of a screen file that fit the atom limit.
    Screen(ScreenArgs),
}

/// Arguments for the `generate` subcommand.
#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    // --- Core Arguments ---
    /// Path to the JSON array of dimensions. Overrides `input-file` from the config file.
    #[arg(short, long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Path to a run configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Generation Overrides ---
    /// Comma-separated model seeds attached to every job (e.g. 0,1,2).
    #[arg(long, value_name = "LIST")]
    pub seeds: Option<String>,

    /// Job generation mode: 'cartesian' or 'collapsed'.
    #[arg(short, long, value_name = "MODE")]
    pub mode: Option<GenerationMode>,

    /// Entity ordering within each dimension: 'input' or 'alpha'.
    #[arg(long, value_name = "ORDER")]
    pub sorting: Option<KeyOrdering>,

    /// Skip the entity-name and residue-alphabet checks.
    #[arg(long)]
    pub lenient: bool,

    /// Record each participant's entity name as the block description.
    #[arg(long)]
    pub annotate_names: bool,

    // --- Capacity Overrides ---
    /// JSON file describing the named capacity tiers and their token limits.
    #[arg(long, value_name = "PATH")]
    pub cluster_config: Option<PathBuf>,

    /// Comma-separated subset of tier names to use.
    #[arg(long, value_name = "LIST")]
    pub gpu_profiles: Option<String>,

    // --- Compound Axis ---
    /// JSON array of compounds (`ID`, `SMILES`) to cross every job with.
    #[arg(long, value_name = "PATH")]
    pub screen_file: Option<PathBuf>,

    /// Drop compounds with more explicit atoms than this.
    #[arg(long, value_name = "INT")]
    pub max_compound_atoms: Option<u64>,

    // --- Paths ---
    /// Directory holding `<name>/<name>_data.json` monomer records.
    #[arg(long, value_name = "PATH")]
    pub monomer_root: Option<PathBuf>,

    /// Root of the output tree.
    #[arg(short, long, value_name = "PATH")]
    pub output_root: Option<PathBuf>,

    /// Namespace directory of this run under the output root.
    #[arg(long, alias = "pipeline-run-id", value_name = "ID")]
    pub run_id: Option<String>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S generation.mode=collapsed
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `analyze` subcommand.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Path to the JSON array of dimensions.
    #[arg(required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Job generation mode: 'cartesian' or 'collapsed'.
    #[arg(short, long, required = true, value_name = "MODE")]
    pub mode: GenerationMode,

    /// Apply the entity-name and residue-alphabet checks.
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the `inputs` subcommand.
#[derive(Args, Debug)]
pub struct InputsArgs {
    /// Path to the JSON array of dimensions.
    #[arg(required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Entity numbering: 'input' (first appearance) or 'alpha'.
    #[arg(long, default_value = "input", value_name = "ORDER")]
    pub sorting: KeyOrdering,

    /// Directory the input documents are written to.
    #[arg(short, long, default_value = "data_pipeline_inputs", value_name = "PATH")]
    pub output_dir: PathBuf,

    /// Apply the entity-name and residue-alphabet checks.
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the `screen` subcommand.
#[derive(Args, Debug)]
pub struct ScreenArgs {
    /// JSON array of compounds (`ID`, `SMILES`).
    #[arg(required = true, value_name = "PATH")]
    pub screen_file: PathBuf,

    /// Count only compounds with at most this many explicit atoms.
    #[arg(long, value_name = "INT")]
    pub max_compound_atoms: Option<u64>,
}
