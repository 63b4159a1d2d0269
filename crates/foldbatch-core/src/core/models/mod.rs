//! # Core Models Module
//!
//! Data structures describing the combinatorial job space and the jobs produced from it.
//!
//! ## Key Components
//!
//! - [`dimension`] - One axis of the job space: ordered entity/sequence pairs
//! - [`registry`] - The global entity-to-sequence map with cross-dimension consistency checks
//! - [`record`] - Typed schema of precomputed monomer records and sequence blocks
//! - [`compound`] - Secondary compound axis and token cost arithmetic
//! - [`job`] - Assembled job records and their serialized document form
//! - [`tier`] - Capacity tiers, ordered by ascending token limit
//!
//! ## Usage
//!
//! ```ignore
//! use foldbatch::core::models::tier::{CapacityTier, TierLadder};
//! use foldbatch::core::models::compound::TokenCost;
//!
//! let ladder = TierLadder::new(vec![
//!     CapacityTier::new("large", 8192),
//!     CapacityTier::new("small", 3072),
//! ]);
//! assert_eq!(ladder.select(TokenCost::Finite(5000)), Some(1));
//! ```

pub mod compound;
pub mod dimension;
pub mod job;
pub mod record;
pub mod registry;
pub mod tier;
