//! # Workflows Module
//!
//! Top-level entry points of the library. Each workflow takes already-loaded inputs and
//! an immutable configuration, drives the engine from start to finish and returns a
//! report; none of them reads process state.
//!
//! - **Generation** ([`generate`]) - Validation, combination, resolution, assembly,
//!   binning and partitioned output. All jobs are planned in memory before the first file
//!   is written, so fatal errors leave no partial output behind.
//! - **Analysis** ([`analyze`]) - Counts unique entities and unique jobs without reading
//!   monomer records or touching the filesystem.
//! - **Pipeline inputs** ([`pipeline_inputs`]) - One single-chain input document per
//!   distinct entity for the upstream monomer data pipeline.
//! - **Screen check** ([`screen`]) - Counts compounds usable on the secondary axis.

pub mod analyze;
pub mod generate;
pub mod pipeline_inputs;
pub mod screen;
