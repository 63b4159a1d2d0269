use crate::cli::AnalyzeArgs;
use crate::error::Result;
use foldbatch::core::io::dimensions::read_dimensions;
use foldbatch::workflows;
use tracing::info;

pub fn run(args: AnalyzeArgs) -> Result<()> {
    info!("Loading dimensions from {:?}", &args.input);
    let dimensions = read_dimensions(&args.input)?;
    let analysis = workflows::analyze::run(dimensions, args.mode, args.strict)?;
    info!(
        raw = %analysis.raw_candidates,
        "Candidates before deduplication."
    );
    println!("{} {}", analysis.unique_entities, analysis.unique_jobs);
    Ok(())
}
