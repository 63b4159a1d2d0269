use crate::cli::InputsArgs;
use crate::error::Result;
use foldbatch::core::io::dimensions::read_dimensions;
use foldbatch::workflows;
use tracing::info;

pub fn run(args: InputsArgs) -> Result<()> {
    info!("Loading dimensions from {:?}", &args.input);
    let dimensions = read_dimensions(&args.input)?;
    let written =
        workflows::pipeline_inputs::run(dimensions, args.sorting, args.strict, &args.output_dir)?;
    for path in &written {
        info!("Created {}", path.display());
    }
    println!("{}", written.len());
    Ok(())
}
