//! Run configuration: TOML file, `--set` overrides and command-line flags, merged into
//! the core [`BatchConfig`](foldbatch::engine::config::BatchConfig).
//!
//! Precedence, highest first: command-line flag, `--set`, config file, built-in default.

mod builder;
mod defaults;
mod file;
mod models;

pub use builder::build_config;
pub use models::AppConfig;
