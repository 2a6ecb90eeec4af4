use super::{CaptureConfig, MarkerConfig, ShellConfig, TerminalConfig, TimingConfig};
use std::collections::BTreeMap;

pub fn default_config() -> CaptureConfig {
    CaptureConfig {
        shell: default_shell_config(),
        terminal: default_terminal_config(),
        markers: default_marker_config(),
        timing: default_timing_config(),
        env: default_env(),
        working_dir: None,
    }
}

pub fn default_shell_config() -> ShellConfig {
    ShellConfig {
        program: "zsh".to_string(),
        args: vec!["-i".to_string()],
        dotfile_dir: None,
    }
}

pub fn default_terminal_config() -> TerminalConfig {
    TerminalConfig {
        term: "dumb".to_string(),
        columns: 250,
        rows: 40,
    }
}

pub fn default_marker_config() -> MarkerConfig {
    MarkerConfig {
        prompt: "@comprobe@".to_string(),
        edit_open: "\u{1b}[?2004h".to_string(),
        edit_close: "\u{1b}[?2004l".to_string(),
    }
}

pub fn default_timing_config() -> TimingConfig {
    TimingConfig {
        prompt_timeout_ms: 10_000,
        settle_ms: 500,
        drain_timeout_ms: 5_000,
    }
}

/// The shell starts from a cleared environment. Only PATH and HOME carry over
/// by default: PATH so the command under completion and its completion script
/// resolve, HOME so zsh can locate its history and compdump files.
pub fn default_env() -> BTreeMap<String, String> {
    let mut env = BTreeMap::new();

    for key in ["PATH", "HOME"] {
        if let Ok(value) = std::env::var(key) {
            env.insert(key.to_string(), value);
        }
    }

    env
}
