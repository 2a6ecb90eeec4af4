use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub mod defaults;

use crate::utils::{ProbeError, Result};

/// Everything one capture needs to know about the shell session it drives.
/// Passed explicitly into the session driver; nothing is read from ambient
/// process state at capture time.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct CaptureConfig {
    pub shell: ShellConfig,
    pub terminal: TerminalConfig,
    pub markers: MarkerConfig,
    pub timing: TimingConfig,
    /// Environment handed to the shell after clearing the inherited one.
    pub env: BTreeMap<String, String>,
    pub working_dir: Option<PathBuf>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct ShellConfig {
    pub program: String,
    pub args: Vec<String>,
    /// Exported as ZDOTDIR so an external dotfile directory can configure the
    /// prompt marker and completion bindings.
    pub dotfile_dir: Option<PathBuf>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct TerminalConfig {
    pub term: String,
    /// Wide enough that completion menus never line-wrap, which would corrupt
    /// line-based transcript parsing.
    pub columns: u16,
    pub rows: u16,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct MarkerConfig {
    /// Sentinel the external dotfiles embed in the prompt. The rendered prompt
    /// is `<prompt>> `, so `"> "` doubles as the prompt-continuation token.
    pub prompt: String,
    /// Control sequences zsh emits around an in-place redraw of the command
    /// line (bracketed-paste toggles).
    pub edit_open: String,
    pub edit_close: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct TimingConfig {
    pub prompt_timeout_ms: u64,
    /// Fixed settle delay after sending the tab. The shell gives no completion
    /// signal, so a blocking sleep is the only synchronization available.
    pub settle_ms: u64,
    pub drain_timeout_ms: u64,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        defaults::default_config()
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        defaults::default_shell_config()
    }
}

impl Default for TerminalConfig {
    fn default() -> Self {
        defaults::default_terminal_config()
    }
}

impl Default for MarkerConfig {
    fn default() -> Self {
        defaults::default_marker_config()
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        defaults::default_timing_config()
    }
}

impl TimingConfig {
    pub fn prompt_timeout(&self) -> Duration {
        Duration::from_millis(self.prompt_timeout_ms)
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    pub fn drain_timeout(&self) -> Duration {
        Duration::from_millis(self.drain_timeout_ms)
    }
}

impl CaptureConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ProbeError::config_error(format!("Failed to read {}: {}", path.display(), e))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            ProbeError::config_error(format!("Failed to parse {}: {}", path.display(), e))
        })
    }
}
