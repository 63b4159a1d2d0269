use super::combinations::Combination;
use super::error::EngineError;
use super::resolver::MonomerResolver;
use crate::core::models::compound::{Compound, CompoundAxis, TokenCost};
use crate::core::models::job::JobRecord;
use crate::core::models::record::{LigandEntry, SequenceBlock};

/// Maps a zero-based participant position to its single-letter role identifier.
pub fn role_identifier(position: usize) -> Option<char> {
    if position < 26 {
        Some((b'A' + position as u8) as char)
    } else {
        None
    }
}

/// Builds job records from combinations and resolved monomer records.
pub struct JobAssembler<'a> {
    seeds: &'a [i64],
    compounds: &'a CompoundAxis,
    annotate_names: bool,
}

impl<'a> JobAssembler<'a> {
    pub fn new(seeds: &'a [i64], compounds: &'a CompoundAxis, annotate_names: bool) -> Self {
        Self {
            seeds,
            compounds,
            annotate_names,
        }
    }

    /// Assembles every job of one combination, one per compound axis variant.
    ///
    /// Participants keep the combination's own order for naming and role assignment.
    pub fn assemble(
        &self,
        combination: &Combination,
        resolver: &mut MonomerResolver<'_>,
    ) -> Result<Vec<JobRecord>, EngineError> {
        let base_name = combination.members().join("_");
        let available = self.compounds.role_budget();
        if combination.len() > available {
            return Err(EngineError::RoleBudgetExceeded {
                job: base_name,
                required: combination.len(),
                available,
            });
        }

        let mut blocks = Vec::with_capacity(combination.len() + 1);
        let mut base_cost = 0u64;
        for (position, entity) in combination.members().iter().enumerate() {
            let record = resolver.resolve(entity)?;
            let role = role_identifier(position).ok_or_else(|| {
                EngineError::validation(format!("job '{}'", base_name), "role identifiers exhausted")
            })?;
            base_cost = base_cost.saturating_add(record.chain.residue_count());
            blocks.push(record.stamped(role, self.annotate_names));
        }

        let compound_role = role_identifier(combination.len());
        self.compounds
            .variants()
            .into_iter()
            .map(|variant| match variant {
                None => Ok(JobRecord::new(
                    base_name.clone(),
                    blocks.clone(),
                    self.seeds.to_vec(),
                    TokenCost::Finite(base_cost),
                )),
                Some(compound) => {
                    let role = compound_role.ok_or_else(|| EngineError::RoleBudgetExceeded {
                        job: base_name.clone(),
                        required: combination.len() + 1,
                        available: 26,
                    })?;
                    Ok(self.with_compound(&base_name, &blocks, base_cost, role, compound))
                }
            })
            .collect()
    }

    fn with_compound(
        &self,
        base_name: &str,
        blocks: &[SequenceBlock],
        base_cost: u64,
        role: char,
        compound: &Compound,
    ) -> JobRecord {
        let mut sequences = blocks.to_vec();
        sequences.push(SequenceBlock::Ligand(LigandEntry {
            id: role.to_string(),
            description: Some(compound.id.clone()),
            smiles: compound.smiles.clone(),
        }));
        JobRecord::new(
            format!("{}_{}", base_name, compound.id),
            sequences,
            self.seeds.to_vec(),
            TokenCost::Finite(base_cost) + compound.cost,
        )
    }
}
