use crate::config::CaptureConfig;
use crate::utils::{ProbeError, Result};
use portable_pty::{native_pty_system, Child, CommandBuilder, PtySize};
use std::io::{Read, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

/// Interrupt byte sent before exiting, to unwedge whatever input mode the
/// completion attempt left the line editor in.
const ETX: u8 = 0x03;

/// Drives one interactive shell inside a pseudo-terminal through a single
/// completion attempt and returns the decoded transcript of everything the
/// shell emitted.
///
/// The session is strictly scoped to this call: exactly one process and one
/// pseudo-terminal are created, and the process is terminated before the call
/// returns on every path, success or failure. Failing to terminate it is a
/// fatal error, since a lingering pseudo-terminal process is a resource leak.
pub fn capture(config: &CaptureConfig, input_line: &str) -> Result<String> {
    let pty_system = native_pty_system();
    let pair = pty_system
        .openpty(PtySize {
            rows: config.terminal.rows,
            cols: config.terminal.columns,
            pixel_width: 0,
            pixel_height: 0,
        })
        .map_err(|e| ProbeError::session(format!("Failed to open pseudo-terminal: {}", e)))?;

    let child = pair
        .slave
        .spawn_command(build_command(config))
        .map_err(|e| {
            ProbeError::session(format!("Failed to spawn {}: {}", config.shell.program, e))
        })?;
    let mut shell = ShellGuard { child };

    // The child holds its own slave handle; keeping ours open would delay EOF.
    drop(pair.slave);

    let reader = pair
        .master
        .try_clone_reader()
        .map_err(|e| ProbeError::session(format!("Failed to open pseudo-terminal reader: {}", e)))?;
    let mut writer = pair
        .master
        .take_writer()
        .map_err(|e| ProbeError::session(format!("Failed to open pseudo-terminal writer: {}", e)))?;

    let output = spawn_reader(reader);
    let mut raw = Vec::new();

    wait_for_prompt(
        &output,
        &mut raw,
        &config.markers.prompt,
        config.timing.prompt_timeout(),
    )?;

    // The input line as typed, no newline, then the completion trigger.
    write_all(&mut writer, input_line.as_bytes())?;
    write_all(&mut writer, b"\t")?;

    // The shell gives no signal when completion has finished rendering, so a
    // fixed settle delay is the only synchronization available.
    thread::sleep(config.timing.settle());

    // Interrupt, blank line, exit: returns the shell to a clean state and ends
    // the session even if completion left it in an unusual input mode.
    write_all(&mut writer, &[ETX])?;
    write_all(&mut writer, b"\n")?;
    write_all(&mut writer, b"exit\n")?;
    drop(writer);

    drain_output(&output, &mut raw, config.timing.drain_timeout());

    shell.terminate()?;

    Ok(String::from_utf8_lossy(&raw).into_owned())
}

/// Assembles the shell invocation: configured program and arguments, cleared
/// environment with only the configured variables applied, and an explicit
/// working directory when one is set.
fn build_command(config: &CaptureConfig) -> CommandBuilder {
    let mut cmd = CommandBuilder::new(&config.shell.program);
    for arg in &config.shell.args {
        cmd.arg(arg);
    }

    cmd.env_clear();
    cmd.env("TERM", &config.terminal.term);
    if let Some(dotfile_dir) = &config.shell.dotfile_dir {
        cmd.env("ZDOTDIR", dotfile_dir);
    }
    for (key, value) in &config.env {
        cmd.env(key, value);
    }

    if let Some(working_dir) = &config.working_dir {
        cmd.cwd(working_dir);
    }

    cmd
}

/// Forwards pseudo-terminal output to a channel until EOF. The thread ends on
/// its own once the shell exits and the last slave handle closes.
fn spawn_reader(mut reader: Box<dyn Read + Send>) -> Receiver<Vec<u8>> {
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let mut buf = [0u8; 4096];
        loop {
            match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => {
                    if tx.send(buf[..n].to_vec()).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        }
    });

    rx
}

fn write_all(writer: &mut Box<dyn Write + Send>, bytes: &[u8]) -> Result<()> {
    writer
        .write_all(bytes)
        .and_then(|_| writer.flush())
        .map_err(|e| ProbeError::session(format!("Failed to write to shell: {}", e)))
}

/// Accumulates output until the prompt marker appears. A timeout means the
/// shell is unresponsive or its dotfiles never configured the marker.
fn wait_for_prompt(
    output: &Receiver<Vec<u8>>,
    raw: &mut Vec<u8>,
    marker: &str,
    timeout: Duration,
) -> Result<()> {
    let deadline = Instant::now() + timeout;

    loop {
        if String::from_utf8_lossy(raw).contains(marker) {
            return Ok(());
        }

        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return Err(ProbeError::session(format!(
                "Shell did not present the prompt marker {:?} within {}ms",
                marker,
                timeout.as_millis()
            )));
        }

        match output.recv_timeout(remaining) {
            Ok(chunk) => raw.extend_from_slice(&chunk),
            Err(RecvTimeoutError::Timeout) => {
                return Err(ProbeError::session(format!(
                    "Shell did not present the prompt marker {:?} within {}ms",
                    marker,
                    timeout.as_millis()
                )));
            }
            Err(RecvTimeoutError::Disconnected) => {
                return Err(ProbeError::session(
                    "Shell exited before presenting a prompt",
                ));
            }
        }
    }
}

/// Collects the rest of the session's output until the reader reaches EOF, or
/// until the bound expires for a shell that ignores `exit`.
fn drain_output(output: &Receiver<Vec<u8>>, raw: &mut Vec<u8>, timeout: Duration) {
    let deadline = Instant::now() + timeout;

    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return;
        }

        match output.recv_timeout(remaining) {
            Ok(chunk) => raw.extend_from_slice(&chunk),
            Err(_) => return,
        }
    }
}

/// Owns the shell process for the duration of one capture. `terminate` is the
/// deliberate shutdown with error reporting; the drop impl covers early-error
/// paths so no pseudo-terminal process outlives the capture.
struct ShellGuard {
    child: Box<dyn Child + Send>,
}

impl ShellGuard {
    fn terminate(&mut self) -> Result<()> {
        if let Ok(Some(_)) = self.child.try_wait() {
            return Ok(());
        }

        self.child.kill().map_err(|e| {
            ProbeError::session(format!("Failed to terminate shell process: {}", e))
        })?;
        let _ = self.child.wait();

        Ok(())
    }
}

impl Drop for ShellGuard {
    fn drop(&mut self) {
        if let Ok(None) = self.child.try_wait() {
            let _ = self.child.kill();
            let _ = self.child.wait();
        }
    }
}
