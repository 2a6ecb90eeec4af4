//! End-to-end captures against a real interactive zsh. Ignored by default:
//! they need zsh on PATH and a host that allows pseudo-terminal allocation.
//! Run with `cargo test -- --ignored`.

use comprobe::{capture, parse_transcript, CaptureConfig};
use std::fs;
use tempfile::TempDir;

/// A minimal dotfile directory that configures the prompt marker and the
/// completion system the way the engine expects its collaborator to.
fn dotfile_dir() -> TempDir {
    let dir = TempDir::new().expect("Failed to create dotfile dir");

    fs::write(
        dir.path().join(".zshrc"),
        "PS1='@comprobe@> '\n\
         unsetopt zle_bracketed_paste 2>/dev/null\n\
         setopt no_always_last_prompt\n\
         autoload -Uz compinit\n\
         compinit -u\n",
    )
    .expect("Failed to write .zshrc");

    dir
}

fn config_with(dir: &TempDir) -> CaptureConfig {
    let mut config = CaptureConfig::default();
    config.shell.dotfile_dir = Some(dir.path().to_path_buf());
    config
}

#[test]
#[ignore = "requires an interactive zsh on the host"]
fn capturing_twice_is_idempotent() {
    let dir = dotfile_dir();
    let config = config_with(&dir);

    let first = capture(&config, "md5sum --h").unwrap();
    let first = parse_transcript(&config.markers, &first, "md5sum --h").unwrap();

    let second = capture(&config, "md5sum --h").unwrap();
    let second = parse_transcript(&config.markers, &second, "md5sum --h").unwrap();

    assert_eq!(first, second);
}

#[test]
#[ignore = "requires an interactive zsh on the host"]
fn unambiguous_flag_completes_to_single_candidate() {
    let dir = dotfile_dir();
    let config = config_with(&dir);

    let transcript = capture(&config, "md5sum --vers").unwrap();
    let candidates = parse_transcript(&config.markers, &transcript, "md5sum --vers").unwrap();

    assert_eq!(candidates, vec!["--version"]);
}

#[test]
#[ignore = "requires an interactive zsh on the host"]
fn session_always_terminates_even_on_empty_completion() {
    let dir = dotfile_dir();
    let config = config_with(&dir);

    // No completions registered for a nonexistent local program; the capture
    // must still come back with a parseable transcript.
    let transcript = capture(&config, "./no-such-program-here -").unwrap();
    let candidates =
        parse_transcript(&config.markers, &transcript, "./no-such-program-here -").unwrap();

    assert!(candidates.is_empty());
}
