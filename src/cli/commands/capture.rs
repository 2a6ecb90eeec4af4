use crate::cli::parser::Cli;
use crate::config::CaptureConfig;
use crate::core::{session, transcript};
use crate::utils::Result;

/// Runs one capture end to end: drive the shell, parse what it rendered,
/// print the candidates one per line in transcript order. On any error
/// nothing is printed to stdout; the caller reports it and exits non-zero.
pub fn execute(config: CaptureConfig, cli: Cli) -> Result<()> {
    let captured = session::capture(&config, &cli.line)?;

    if cli.show_transcript {
        eprintln!("comprobe: captured transcript: {:?}", captured);
    }

    let candidates = transcript::parse_transcript(&config.markers, &captured, &cli.line)?;

    for candidate in candidates {
        println!("{}", candidate);
    }

    Ok(())
}
