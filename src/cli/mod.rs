pub mod commands;
pub mod parser;

pub use parser::Cli;

use crate::config::CaptureConfig;
use crate::utils::{ProbeError, Result};

pub fn execute_command(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli)?;
    commands::capture::execute(config, cli)
}

/// Configuration precedence: defaults, then the optional config file, then
/// individual CLI flags.
fn resolve_config(cli: &Cli) -> Result<CaptureConfig> {
    let mut config = match &cli.config {
        Some(path) => CaptureConfig::load(path)?,
        None => CaptureConfig::default(),
    };

    if let Some(shell) = &cli.shell {
        config.shell.program = shell.clone();
    }
    if let Some(dotfile_dir) = &cli.dotfile_dir {
        config.shell.dotfile_dir = Some(dotfile_dir.clone());
    }
    if let Some(cwd) = &cli.cwd {
        config.working_dir = Some(cwd.clone());
    }
    if let Some(term) = &cli.term {
        config.terminal.term = term.clone();
    }
    if let Some(columns) = cli.columns {
        config.terminal.columns = columns;
    }
    if let Some(prompt_marker) = &cli.prompt_marker {
        config.markers.prompt = prompt_marker.clone();
    }
    if let Some(settle_ms) = cli.settle_ms {
        config.timing.settle_ms = settle_ms;
    }
    if let Some(prompt_timeout_ms) = cli.prompt_timeout_ms {
        config.timing.prompt_timeout_ms = prompt_timeout_ms;
    }

    for entry in &cli.env {
        let (key, value) = entry.split_once('=').ok_or_else(|| {
            ProbeError::invalid_args(format!("--env expects KEY=VALUE, got {:?}", entry))
        })?;
        config.env.insert(key.to_string(), value.to_string());
    }

    Ok(config)
}
