use crate::cli::GenerateArgs;
use crate::config::build_config;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use foldbatch::{
    core::io::{dimensions::read_dimensions, monomer_store::DirectoryStore},
    engine::progress::ProgressReporter,
    workflows,
};
use tracing::info;

pub fn run(args: GenerateArgs, quiet: bool) -> Result<()> {
    info!("Merging configuration from file and CLI arguments...");
    let app = build_config(&args)?;
    let config = &app.core_config;
    if app.excluded_compounds > 0 {
        info!(
            "{} compound(s) exceed the atom limit and were dropped.",
            app.excluded_compounds
        );
    }

    info!("Loading dimensions from {:?}", &app.input_path);
    let dimensions = read_dimensions(&app.input_path)?;
    let store = DirectoryStore::new(&config.monomer_root);

    let progress_handler = CliProgressHandler::new(!quiet);
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!("Invoking the core generation workflow...");
    let report = workflows::generate::run(dimensions, config, &store, &reporter)?;

    info!(
        entities = report.unique_entities,
        combinations = report.unique_combinations,
        placed = report.placed_total(),
        overflow = report.overflow.len(),
        "Generation finished."
    );
    println!("{}", report);
    Ok(())
}
