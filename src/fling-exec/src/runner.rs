//! Process launching.
//!
//! [`SystemRunner`] is the real implementation. Handlers are written against
//! [`ProcessRunner`] so they can be driven by a recording double in tests.

use std::io::{self, BufRead, BufReader, PipeReader};
use std::process::{Child, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

use fling_common::{FlingError, Result};

use crate::request::ExecutionRequest;
use crate::result::ExecutionResult;

/// Interval between exit polls while a deadline is armed.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Quiet period after the child exited before giving up on a pipe held
/// open by a grandchild. Restarts with every line received.
const DRAIN_GRACE: Duration = Duration::from_secs(1);

/// Launches external programs.
pub trait ProcessRunner {
    /// Spawn `request` and return immediately without capturing output.
    ///
    /// Only a launch failure (e.g. program not found) is reported.
    fn start_detached(&self, request: &ExecutionRequest) -> Result<()>;

    /// Spawn `request`, wait for it to exit and return its exit code with
    /// stdout and stderr merged into one list of lines.
    ///
    /// Without a timeout this blocks for as long as the child runs.
    fn run_blocking(&self, request: &ExecutionRequest) -> Result<ExecutionResult>;
}

/// [`ProcessRunner`] backed by `std::process`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn start_detached(&self, request: &ExecutionRequest) -> Result<()> {
        tracing::debug!("Starting detached: {request}");

        let mut command = request.to_command();
        command.stdin(Stdio::null());
        let child = command
            .spawn()
            .map_err(|e| FlingError::io(&request.program, e))?;

        tracing::debug!("Detached {} as pid {}", request.program, child.id());
        Ok(())
    }

    fn run_blocking(&self, request: &ExecutionRequest) -> Result<ExecutionResult> {
        tracing::debug!("Running: {request}");
        let launch_err = |e: io::Error| FlingError::io(&request.program, e);

        let (reader, writer) = io::pipe().map_err(launch_err)?;
        let mut command = request.to_command();
        command
            .stdout(writer.try_clone().map_err(launch_err)?)
            .stderr(writer);

        let mut child = command.spawn().map_err(launch_err)?;
        // The command still owns our copies of the write end; the reader only
        // sees EOF once they are gone.
        drop(command);

        let (tx, rx) = mpsc::channel();
        let collector = thread::spawn(move || read_lines(reader, tx));

        let status = match request.timeout {
            None => child.wait().map_err(launch_err)?,
            Some(timeout) => match wait_with_deadline(&mut child, timeout).map_err(launch_err)? {
                Some(status) => status,
                None => {
                    tracing::warn!(
                        "{} exceeded {:?}, killed",
                        request.program,
                        timeout
                    );
                    return Err(FlingError::Timeout {
                        program: request.program.clone(),
                        timeout,
                    });
                }
            },
        };

        let output_lines = drain(rx, &request.program);
        if collector.is_finished() {
            let _ = collector.join();
        }

        let exit_code = status.code().unwrap_or(-1);
        tracing::debug!(
            "{} exited with {} ({} lines)",
            request.program,
            exit_code,
            output_lines.len()
        );
        Ok(ExecutionResult::new(exit_code, output_lines))
    }
}

/// Poll `child` until it exits or `timeout` elapses.
///
/// Returns `None` after killing and reaping a child that overran.
fn wait_with_deadline(child: &mut Child, timeout: Duration) -> io::Result<Option<ExitStatus>> {
    let start = Instant::now();

    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if start.elapsed() > timeout {
            let _ = child.kill();
            let _ = child.wait();
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

fn read_lines(reader: PipeReader, tx: Sender<String>) {
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();

    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {
                if buf.last() == Some(&b'\n') {
                    buf.pop();
                    if buf.last() == Some(&b'\r') {
                        buf.pop();
                    }
                }
                if tx.send(String::from_utf8_lossy(&buf).into_owned()).is_err() {
                    break;
                }
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                tracing::warn!("Failed reading child output: {e}");
                break;
            }
        }
    }
}

/// Collect the output of an exited child.
///
/// Reads until the writer side is gone. When a grandchild keeps the pipe
/// open, stops after [`DRAIN_GRACE`] without a new line.
fn drain(rx: Receiver<String>, program: &str) -> Vec<String> {
    let mut lines = Vec::new();
    loop {
        match rx.recv_timeout(DRAIN_GRACE) {
            Ok(line) => lines.push(line),
            Err(RecvTimeoutError::Disconnected) => break,
            Err(RecvTimeoutError::Timeout) => {
                // Anything queued before the deadline still counts.
                lines.extend(rx.try_iter());
                tracing::warn!(
                    "{program} exited but its output pipe is still open, stopped reading after {} lines",
                    lines.len()
                );
                break;
            }
        }
    }
    lines
}
