use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "comprobe")]
#[command(about = "Capture the completion candidates an interactive zsh would offer")]
#[command(
    version,
    long_about = "Drives an interactive zsh inside a pseudo-terminal, sends the given command \
line followed by a tab, and prints the completion candidates the shell offered, one per line. \
Intended for automated testing of completion scripts, which have no programmatic API."
)]
pub struct Cli {
    /// Command line as typed so far; keep the trailing space if completion
    /// should apply to a new empty argument
    pub line: String,

    /// Load capture settings from a JSON file (CLI flags override it)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Shell program to drive
    #[arg(long, value_name = "PROGRAM")]
    pub shell: Option<String>,

    /// Directory exported as ZDOTDIR; its dotfiles must configure the prompt
    /// marker and the completion script under test
    #[arg(long, value_name = "DIR")]
    pub dotfile_dir: Option<PathBuf>,

    /// Working directory for the shell
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Terminal type advertised to the shell
    #[arg(long, value_name = "TERM")]
    pub term: Option<String>,

    /// Terminal width in columns
    #[arg(long, value_name = "COLS")]
    pub columns: Option<u16>,

    /// Sentinel literal the shell prompt embeds
    #[arg(long, value_name = "MARKER")]
    pub prompt_marker: Option<String>,

    /// Fixed delay after sending the tab, in milliseconds
    #[arg(long, value_name = "MS")]
    pub settle_ms: Option<u64>,

    /// How long to wait for the first prompt, in milliseconds
    #[arg(long, value_name = "MS")]
    pub prompt_timeout_ms: Option<u64>,

    /// Extra environment variable for the shell (repeatable)
    #[arg(long, value_name = "KEY=VALUE")]
    pub env: Vec<String>,

    /// Dump the raw captured transcript to stderr for diagnosis
    #[arg(long)]
    pub show_transcript: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_bare_input_line() {
        let cli = Cli::try_parse_from(["comprobe", "ls -"]).unwrap();

        assert_eq!(cli.line, "ls -");
        assert!(cli.config.is_none());
        assert!(cli.env.is_empty());
        assert!(!cli.show_transcript);
    }

    #[test]
    fn test_trailing_space_in_line_survives() {
        let cli = Cli::try_parse_from(["comprobe", "./batect --wrapper-script-path "]).unwrap();

        assert_eq!(cli.line, "./batect --wrapper-script-path ");
    }

    #[test]
    fn test_parses_overrides() {
        let cli = Cli::try_parse_from([
            "comprobe",
            "--shell",
            "/bin/zsh",
            "--dotfile-dir",
            "/tmp/dotfiles",
            "--settle-ms",
            "1200",
            "--env",
            "FOO=bar",
            "--env",
            "BAZ=qux",
            "--show-transcript",
            "md5sum --h",
        ])
        .unwrap();

        assert_eq!(cli.line, "md5sum --h");
        assert_eq!(cli.shell.as_deref(), Some("/bin/zsh"));
        assert_eq!(cli.dotfile_dir, Some(PathBuf::from("/tmp/dotfiles")));
        assert_eq!(cli.settle_ms, Some(1200));
        assert_eq!(cli.env, vec!["FOO=bar".to_string(), "BAZ=qux".to_string()]);
        assert!(cli.show_transcript);
    }

    #[test]
    fn test_input_line_is_required() {
        assert!(Cli::try_parse_from(["comprobe"]).is_err());
    }
}
