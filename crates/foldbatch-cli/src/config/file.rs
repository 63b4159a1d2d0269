use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Seeds may be written as a TOML array or as a comma-separated string.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum FileSeeds {
    List(Vec<i64>),
    Text(String),
}

/// Tier names may be written as a TOML array or as a comma-separated string.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum FileProfiles {
    List(Vec<String>),
    Text(String),
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileGenerationConfig {
    pub seeds: Option<FileSeeds>,
    pub mode: Option<String>,
    pub sorting: Option<String>,
    pub strict_validation: Option<bool>,
    pub annotate_names: Option<bool>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileClusterConfig {
    pub config: Option<PathBuf>,
    pub profiles: Option<FileProfiles>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileScreenConfig {
    pub file: Option<PathBuf>,
    pub max_compound_atoms: Option<u64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileOutputConfig {
    pub root: Option<PathBuf>,
    pub run_id: Option<String>,
    pub msa_store: Option<PathBuf>,
    pub template_store: Option<PathBuf>,
    pub extension: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileConfig {
    pub input_file: Option<PathBuf>,
    pub monomer_root: Option<PathBuf>,
    pub generation: Option<FileGenerationConfig>,
    pub cluster: Option<FileClusterConfig>,
    pub screen: Option<FileScreenConfig>,
    pub output: Option<FileOutputConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
