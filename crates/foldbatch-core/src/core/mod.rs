//! # Core Module
//!
//! Stateless building blocks shared by the engine and the workflows.
//!
//! - **Data Models** ([`models`]) - Dimensions, the entity registry, monomer and job records,
//!   compounds and capacity tiers
//! - **Chemistry** ([`chem`]) - Cost estimation for compound notation
//! - **File I/O** ([`io`]) - Input loaders, the monomer store, the compact job-file writer and
//!   filesystem aliasing

pub mod chem;
pub mod io;
pub mod models;
