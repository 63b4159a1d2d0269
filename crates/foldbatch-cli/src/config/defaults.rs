use foldbatch::engine::config::{
    DEFAULT_MONOMER_ROOT, DEFAULT_OUTPUT_ROOT, DEFAULT_RUN_ID, KeyOrdering,
};

pub struct DefaultsConfig {
    pub sorting: KeyOrdering,
    pub strict_validation: bool,
    pub annotate_names: bool,
    pub monomer_root: String,
    pub output_root: String,
    pub run_id: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            sorting: KeyOrdering::Input,
            strict_validation: true,
            annotate_names: false,
            monomer_root: DEFAULT_MONOMER_ROOT.to_string(),
            output_root: DEFAULT_OUTPUT_ROOT.to_string(),
            run_id: DEFAULT_RUN_ID.to_string(),
        }
    }
}
