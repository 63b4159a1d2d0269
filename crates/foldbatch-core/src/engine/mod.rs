//! # Engine Module
//!
//! The stateful side of a run: everything between validated input and written job files.
//!
//! ## Architecture
//!
//! Data flows strictly through the submodules in this order:
//!
//! - **Validation** ([`validate`]) - Dimension shape checks and the entity registry
//! - **Key Lists** ([`keys`]) - Per-dimension entity ordering
//! - **Combinations** ([`combinations`]) - Cartesian or collapsed enumeration with
//!   order-invariant deduplication
//! - **Resolution** ([`resolver`]) - Cached loading of monomer records
//! - **Assembly** ([`assembly`]) - Role identifiers, compound crossing and token costs
//! - **Binning** ([`binning`]) - Smallest-sufficient tier selection and overflow
//! - **Output** ([`output`]) - Partition directories, job files and the overflow manifest
//!
//! Run-scoped mutable state (seen canonical forms, per-tier counters, overflow list) is
//! owned by a single [`context::RunContext`]; configuration is an immutable
//! [`config::BatchConfig`] built once at startup.

pub mod assembly;
pub mod binning;
pub mod combinations;
pub mod config;
pub mod context;
pub mod error;
pub mod keys;
pub mod output;
pub mod progress;
pub mod resolver;
pub mod validate;
