use crate::cli::ScreenArgs;
use crate::error::{CliError, Result};
use foldbatch::core::chem::ExplicitAtomCounter;
use foldbatch::core::io::screen::read_screen;
use foldbatch::workflows;
use tracing::info;

pub fn run(args: ScreenArgs) -> Result<()> {
    if !args.screen_file.is_file() {
        return Err(CliError::Argument(format!(
            "Screen file '{}' not found.",
            args.screen_file.display()
        )));
    }
    let screen = read_screen(&args.screen_file)?;
    let summary = workflows::screen::run(&screen, &ExplicitAtomCounter, args.max_compound_atoms);
    info!(
        skipped = screen.skipped.len(),
        invalid = summary.invalid_notation,
        oversized = summary.oversized,
        "Screen checked."
    );
    println!("{} {}", summary.total, summary.valid);
    Ok(())
}
