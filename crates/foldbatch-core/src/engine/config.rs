use crate::core::io::compact::CompactLayout;
use crate::core::models::compound::CompoundAxis;
use crate::core::models::tier::{CapacityTier, TierLadder, TierSelectionError};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_OUTPUT_ROOT: &str = "pending_jobs";
pub const DEFAULT_MONOMER_ROOT: &str = "monomer_data";
pub const DEFAULT_RUN_ID: &str = "default";
pub const DEFAULT_EXTENSION: &str = "json";
pub const MSA_ALIAS: &str = "msas";
pub const TEMPLATE_ALIAS: &str = "templates";

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid value for '{parameter}': {reason}")]
    InvalidValue {
        parameter: &'static str,
        reason: String,
    },

    #[error(transparent)]
    TierSelection(#[from] TierSelectionError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationMode {
    /// One job per element of the Cartesian product of all key lists.
    Cartesian,
    /// One job per dimension, holding the dimension's whole key list.
    Collapsed,
}

impl FromStr for GenerationMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cartesian" => Ok(GenerationMode::Cartesian),
            "collapsed" => Ok(GenerationMode::Collapsed),
            other => Err(ConfigError::InvalidValue {
                parameter: "mode",
                reason: format!("expected 'cartesian' or 'collapsed', got '{}'", other),
            }),
        }
    }
}

impl fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GenerationMode::Cartesian => "cartesian",
            GenerationMode::Collapsed => "collapsed",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyOrdering {
    /// Entity names in source order.
    #[default]
    Input,
    /// Entity names sorted alphabetically.
    Alpha,
}

impl FromStr for KeyOrdering {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "input" => Ok(KeyOrdering::Input),
            "alpha" => Ok(KeyOrdering::Alpha),
            other => Err(ConfigError::InvalidValue {
                parameter: "sorting",
                reason: format!("expected 'input' or 'alpha', got '{}'", other),
            }),
        }
    }
}

impl fmt::Display for KeyOrdering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            KeyOrdering::Input => "input",
            KeyOrdering::Alpha => "alpha",
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutputConfig {
    pub root: PathBuf,
    pub run_id: String,
    pub msa_store: PathBuf,
    pub template_store: PathBuf,
    pub extension: String,
    pub layout: CompactLayout,
}

impl OutputConfig {
    /// `<root>/<run_id>`, the namespace holding one directory per tier.
    pub fn run_dir(&self) -> PathBuf {
        self.root.join(&self.run_id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatchConfig {
    pub model_seeds: Vec<i64>,
    pub mode: GenerationMode,
    pub ordering: KeyOrdering,
    pub strict_validation: bool,
    pub annotate_names: bool,
    pub tiers: TierLadder,
    pub compounds: CompoundAxis,
    pub monomer_root: PathBuf,
    pub output: OutputConfig,
}

#[derive(Default)]
pub struct BatchConfigBuilder {
    model_seeds: Option<Vec<i64>>,
    mode: Option<GenerationMode>,
    ordering: Option<KeyOrdering>,
    strict_validation: Option<bool>,
    annotate_names: Option<bool>,
    tiers: Option<Vec<CapacityTier>>,
    tier_selection: Option<Vec<String>>,
    compounds: Option<CompoundAxis>,
    monomer_root: Option<PathBuf>,
    output_root: Option<PathBuf>,
    run_id: Option<String>,
    msa_store: Option<PathBuf>,
    template_store: Option<PathBuf>,
    extension: Option<String>,
}

impl BatchConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn model_seeds(mut self, seeds: Vec<i64>) -> Self {
        self.model_seeds = Some(seeds);
        self
    }
    pub fn mode(mut self, mode: GenerationMode) -> Self {
        self.mode = Some(mode);
        self
    }
    pub fn ordering(mut self, ordering: KeyOrdering) -> Self {
        self.ordering = Some(ordering);
        self
    }
    pub fn strict_validation(mut self, strict: bool) -> Self {
        self.strict_validation = Some(strict);
        self
    }
    pub fn annotate_names(mut self, annotate: bool) -> Self {
        self.annotate_names = Some(annotate);
        self
    }
    pub fn tiers(mut self, tiers: Vec<CapacityTier>) -> Self {
        self.tiers = Some(tiers);
        self
    }
    pub fn tier_selection(mut self, names: Vec<String>) -> Self {
        self.tier_selection = Some(names);
        self
    }
    pub fn compounds(mut self, axis: CompoundAxis) -> Self {
        self.compounds = Some(axis);
        self
    }
    pub fn monomer_root(mut self, path: PathBuf) -> Self {
        self.monomer_root = Some(path);
        self
    }
    pub fn output_root(mut self, path: PathBuf) -> Self {
        self.output_root = Some(path);
        self
    }
    pub fn run_id(mut self, run_id: impl Into<String>) -> Self {
        self.run_id = Some(run_id.into());
        self
    }
    pub fn msa_store(mut self, path: PathBuf) -> Self {
        self.msa_store = Some(path);
        self
    }
    pub fn template_store(mut self, path: PathBuf) -> Self {
        self.template_store = Some(path);
        self
    }
    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = Some(extension.into());
        self
    }

    pub fn build(self) -> Result<BatchConfig, ConfigError> {
        let model_seeds = self
            .model_seeds
            .ok_or(ConfigError::MissingParameter("model_seeds"))?;
        if model_seeds.is_empty() {
            return Err(ConfigError::InvalidValue {
                parameter: "model_seeds",
                reason: "at least one seed is required".to_string(),
            });
        }

        let tiers = self.tiers.ok_or(ConfigError::MissingParameter("tiers"))?;
        if tiers.is_empty() {
            return Err(ConfigError::InvalidValue {
                parameter: "tiers",
                reason: "the cluster configuration defines no tiers".to_string(),
            });
        }
        for tier in &tiers {
            check_path_segment("tiers", &tier.name)?;
        }
        let mut ladder = TierLadder::new(tiers);
        if let Some(names) = &self.tier_selection {
            ladder = ladder.restrict_to(names)?;
        }

        let run_id = self.run_id.unwrap_or_else(|| DEFAULT_RUN_ID.to_string());
        check_path_segment("run_id", &run_id)?;

        let extension = self
            .extension
            .unwrap_or_else(|| DEFAULT_EXTENSION.to_string());
        check_path_segment("extension", &extension)?;
        if extension.contains('.') {
            return Err(ConfigError::InvalidValue {
                parameter: "extension",
                reason: "give the extension without a leading dot".to_string(),
            });
        }

        let output_root = self
            .output_root
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_ROOT));
        let output = OutputConfig {
            msa_store: self
                .msa_store
                .unwrap_or_else(|| output_root.join(MSA_ALIAS)),
            template_store: self
                .template_store
                .unwrap_or_else(|| output_root.join(TEMPLATE_ALIAS)),
            root: output_root,
            run_id,
            extension,
            layout: CompactLayout::default(),
        };

        Ok(BatchConfig {
            model_seeds,
            mode: self.mode.ok_or(ConfigError::MissingParameter("mode"))?,
            ordering: self.ordering.unwrap_or_default(),
            strict_validation: self.strict_validation.unwrap_or(true),
            annotate_names: self.annotate_names.unwrap_or(false),
            tiers: ladder,
            compounds: self.compounds.unwrap_or_default(),
            monomer_root: self
                .monomer_root
                .unwrap_or_else(|| PathBuf::from(DEFAULT_MONOMER_ROOT)),
            output,
        })
    }
}

fn check_path_segment(parameter: &'static str, value: &str) -> Result<(), ConfigError> {
    let invalid = value.is_empty()
        || value == "."
        || value == ".."
        || value.contains(['/', '\\'])
        || value.chars().any(char::is_control);
    if invalid {
        return Err(ConfigError::InvalidValue {
            parameter,
            reason: format!("'{}' is not usable as a directory or file name", value),
        });
    }
    Ok(())
}
