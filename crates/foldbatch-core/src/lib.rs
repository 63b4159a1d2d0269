//! # foldbatch Core Library
//!
//! Prepares structure-prediction jobs from a list of sequence "dimensions": every distinct
//! combination of entities becomes exactly one job, enriched with precomputed monomer data
//! and routed into the smallest capacity tier that can hold it.
//!
//! ## Architectural Philosophy
//!
//! The library keeps the same three-layer separation throughout:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Dimension`, `EntityRegistry`,
//!   `MonomerRecord`, `JobRecord`, `TierLadder`), compound-notation helpers, and I/O
//!   (dimension loading, the monomer store, the compact job-file writer, link-or-copy aliasing).
//!
//! - **[`engine`]: The Logic Core.** The stateful run: validation, key lists, combination
//!   generation with order-invariant deduplication, monomer resolution, job assembly,
//!   capacity binning and the output partitions. All mutable state of a run lives in a
//!   single `RunContext`.
//!
//! - **[`workflows`]: The Public API.** End-to-end procedures built on the two layers below:
//!   job generation, a counting-only analysis, data-pipeline input preparation and compound
//!   screen validation.

pub mod core;
pub mod engine;
pub mod workflows;
