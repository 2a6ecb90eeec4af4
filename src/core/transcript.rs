use crate::config::MarkerConfig;
use crate::utils::{ProbeError, Result};

/// The prompt renders as `<marker>> `, so this token marks where the shell
/// finished drawing its first prompt and the echoed input begins.
const PROMPT_CONTINUATION: &str = "> ";

/// Separator zsh places between a candidate and its help text in menu lines.
const HELP_SEPARATOR: &str = " -- ";

/// Scanner position while walking one capture's transcript.
enum ParseState<'a> {
    /// Skipping the startup banner up to the end of the first prompt.
    AwaitingPromptContinuation,
    /// Trimming off the shell's next prompt render, which delimits the output
    /// of this completion attempt.
    AwaitingPromptMarker { remainder: &'a str },
    /// Deciding between the in-place-edit and menu renderings by looking at
    /// how the shell re-drew the input line.
    ClassifyPromptLine { region: &'a str },
    /// Collecting candidates from the menu printed below the prompt line.
    ExtractingMenuLines { lines: std::str::Lines<'a> },
}

/// Extracts the ordered completion candidates from the raw output of one
/// shell completion attempt.
///
/// zsh renders a completion result in one of two shapes, distinguished only by
/// markers embedded in the character stream:
///
/// - resolved to zero or one candidate: the command line is redrawn in place,
///   wrapped in the edit markers, and no menu appears;
/// - several candidates: the input line is echoed unchanged and the candidates
///   are printed as a menu below it, one candidate (or short-flag alias group)
///   per line, with optional `" -- "`-delimited help text.
///
/// Candidates are returned in transcript order, without deduplication. An
/// empty result is meaningful: the shell had nothing to offer.
///
/// Known limitation: when several candidates share a common prefix, zsh edits
/// that prefix into the line in place. That rendering is indistinguishable
/// from a genuine single-candidate resolution, so the prefix is reported as
/// the only candidate.
pub fn parse_transcript(
    markers: &MarkerConfig,
    transcript: &str,
    input_line: &str,
) -> Result<Vec<String>> {
    let mut state = ParseState::AwaitingPromptContinuation;

    loop {
        state = match state {
            ParseState::AwaitingPromptContinuation => {
                let start = transcript.find(PROMPT_CONTINUATION).ok_or_else(|| {
                    ProbeError::parse(
                        format!(
                            "prompt continuation token {:?} not found; the shell never presented a prompt in the expected format",
                            PROMPT_CONTINUATION
                        ),
                        transcript,
                    )
                })?;

                ParseState::AwaitingPromptMarker {
                    remainder: &transcript[start + PROMPT_CONTINUATION.len()..],
                }
            }

            ParseState::AwaitingPromptMarker { remainder } => {
                // Everything from the next prompt render onward belongs to the
                // shell winding down, not to this completion attempt.
                let region = match remainder.find(&markers.prompt) {
                    Some(next_prompt) => &remainder[..next_prompt],
                    None => remainder,
                };

                ParseState::ClassifyPromptLine { region }
            }

            ParseState::ClassifyPromptLine { region } => {
                let mut lines = region.lines();
                let prompt_line = lines.next().unwrap_or("");

                if prompt_line.ends_with(&markers.edit_close) {
                    return Ok(edited_line_candidates(markers, prompt_line, input_line));
                }

                ParseState::ExtractingMenuLines { lines }
            }

            ParseState::ExtractingMenuLines { lines } => {
                let mut candidates = Vec::new();
                for line in lines {
                    candidates.extend(menu_line_candidates(line));
                }

                return Ok(candidates);
            }
        };
    }
}

/// The shell resolved the completion by redrawing the command line in place.
/// Zero candidates if the redraw reproduced the input unchanged, otherwise
/// exactly one: the last token of the edited line.
fn edited_line_candidates(
    markers: &MarkerConfig,
    prompt_line: &str,
    input_line: &str,
) -> Vec<String> {
    let body = &prompt_line[..prompt_line.len() - markers.edit_close.len()];

    let edited = match body.rfind(&markers.edit_open) {
        Some(open) => &body[open + markers.edit_open.len()..],
        None => body,
    };
    let edited = edited.trim_end();

    if edited == input_line {
        return Vec::new();
    }

    match edited.split_whitespace().next_back() {
        Some(token) => vec![token.to_string()],
        None => Vec::new(),
    }
}

/// One menu line holds one candidate, or several short-flag aliases for the
/// same option, followed by optional help text.
fn menu_line_candidates(line: &str) -> Vec<String> {
    let line = line.trim();
    let line = match line.find(HELP_SEPARATOR) {
        Some(help) => &line[..help],
        None => line,
    };

    line.split_whitespace().map(str::to_string).collect()
}
