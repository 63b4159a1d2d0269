use foldbatch::engine::config::BatchConfig;
use std::path::PathBuf;

pub struct AppConfig {
    pub input_path: PathBuf,
    pub core_config: BatchConfig,
    /// Screen entries dropped because they exceed the atom limit.
    pub excluded_compounds: usize,
}
