use super::compound::TokenCost;
use super::record::SequenceBlock;
use serde::Serialize;

pub const JOB_DIALECT: &str = "alphafold3";
pub const JOB_VERSION: u32 = 3;

/// An assembled, immutable job.
#[derive(Debug, Clone, PartialEq)]
pub struct JobRecord {
    name: String,
    sequences: Vec<SequenceBlock>,
    model_seeds: Vec<i64>,
    token_cost: TokenCost,
}

impl JobRecord {
    pub fn new(
        name: String,
        sequences: Vec<SequenceBlock>,
        model_seeds: Vec<i64>,
        token_cost: TokenCost,
    ) -> Self {
        Self {
            name,
            sequences,
            model_seeds,
            token_cost,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn token_cost(&self) -> TokenCost {
        self.token_cost
    }

    /// The serializable job-file form of this record.
    pub fn document(&self) -> JobDocument<'_> {
        JobDocument {
            dialect: JOB_DIALECT,
            version: JOB_VERSION,
            name: &self.name,
            sequences: &self.sequences,
            model_seeds: &self.model_seeds,
            bonded_atom_pairs: None,
            user_ccd: None,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDocument<'a> {
    pub dialect: &'static str,
    pub version: u32,
    pub name: &'a str,
    pub sequences: &'a [SequenceBlock],
    pub model_seeds: &'a [i64],
    pub bonded_atom_pairs: Option<()>,
    #[serde(rename = "userCCD")]
    pub user_ccd: Option<()>,
}
