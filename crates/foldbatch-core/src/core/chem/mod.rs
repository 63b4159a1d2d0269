//! Cost estimation for compound notation.
//!
//! The engine never interprets chemical notation itself; it only asks a
//! [`CompoundCostEstimator`] how many explicit atoms a compound contributes to a job.

mod smiles;

pub use smiles::ExplicitAtomCounter;

/// Estimates the token contribution of a compound.
pub trait CompoundCostEstimator {
    /// Number of explicit atoms in `notation`, or `None` if the notation is invalid.
    fn atom_count(&self, notation: &str) -> Option<u64>;
}
