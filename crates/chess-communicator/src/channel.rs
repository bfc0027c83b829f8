//! One engine subprocess and its three pipes.
//!
//! The engine's stdin is written through [`Channel::write_line`], its stdout
//! is handed out once as a [`LineReader`] for the protocol thread, and its
//! stderr is drained by a background thread into `tracing` so the engine can
//! never stall on a full pipe.

use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::process::{Child, ChildStdin, ChildStdout, Command, ExitStatus, Stdio};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crate::error::ChannelError;

const EXIT_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Owns a running engine process. Dropping it terminates the process.
pub struct Channel {
    label: String,
    pid: u32,
    child: Mutex<Child>,
    stdin: Mutex<Option<ChildStdin>>,
    stdout: Mutex<Option<ChildStdout>>,
    stderr_drain: Mutex<Option<JoinHandle<()>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Channel {
    /// Starts `path` with `args`, capturing all three standard streams.
    ///
    /// `label` prefixes every log line about this process.
    pub fn spawn(
        path: impl AsRef<Path>,
        args: &[String],
        label: impl Into<String>,
    ) -> Result<Self, ChannelError> {
        let path = path.as_ref();
        let label = label.into();
        let mut child = Command::new(path)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| ChannelError::Spawn {
                path: path.to_path_buf(),
                source,
            })?;

        let pipes = (child.stdin.take(), child.stdout.take(), child.stderr.take());
        let (Some(stdin), Some(stdout), Some(stderr)) = pipes else {
            let _ = child.kill();
            let _ = child.wait();
            return Err(ChannelError::MissingPipe("standard stream"));
        };

        let drain_label = label.clone();
        let drain = std::thread::Builder::new()
            .name(format!("{}-stderr", label))
            .spawn(move || {
                for line in BufReader::new(stderr).lines() {
                    match line {
                        Ok(line) if line.trim().is_empty() => {}
                        Ok(line) => tracing::warn!(engine = %drain_label, "stderr: {}", line),
                        Err(_) => break,
                    }
                }
            });
        let drain = match drain {
            Ok(handle) => Some(handle),
            Err(e) => {
                // Without a drain the stream is simply closed.
                tracing::warn!(engine = %label, "no stderr drain: {}", e);
                None
            }
        };

        let pid = child.id();
        tracing::debug!(engine = %label, pid, "spawned {:?}", path);

        Ok(Channel {
            label,
            pid,
            child: Mutex::new(child),
            stdin: Mutex::new(Some(stdin)),
            stdout: Mutex::new(Some(stdout)),
            stderr_drain: Mutex::new(drain),
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Process id of the engine.
    pub fn pid(&self) -> u32 {
        self.pid
    }

    /// Hands out the stdout reader. Only the first call returns it.
    pub fn take_reader(&self) -> Result<LineReader, ChannelError> {
        lock(&self.stdout)
            .take()
            .map(|stdout| LineReader {
                inner: BufReader::new(stdout),
            })
            .ok_or(ChannelError::MissingPipe("stdout"))
    }

    /// Writes `text` and a newline to the engine, then flushes.
    pub fn write_line(&self, text: &str) -> Result<(), ChannelError> {
        let mut stdin = lock(&self.stdin);
        let pipe = stdin.as_mut().ok_or(ChannelError::Closed)?;
        writeln!(pipe, "{}", text).map_err(ChannelError::Write)?;
        pipe.flush().map_err(ChannelError::Write)?;
        tracing::debug!(engine = %self.label, "> {}", text);
        Ok(())
    }

    /// Returns true while the process has not exited.
    pub fn is_alive(&self) -> bool {
        matches!(lock(&self.child).try_wait(), Ok(None))
    }

    /// Closes stdin, kills the process if it is still running and reaps it.
    ///
    /// Safe to call more than once.
    pub fn terminate(&self) {
        self.terminate_within(Duration::ZERO);
    }

    /// Closes stdin and gives the process up to `grace` to exit on its own
    /// before killing it. Returns the exit status once reaped.
    pub fn terminate_within(&self, grace: Duration) -> Option<ExitStatus> {
        drop(lock(&self.stdin).take());
        let status = {
            let mut child = lock(&self.child);
            let deadline = Instant::now() + grace;
            loop {
                match child.try_wait() {
                    Ok(None) if Instant::now() < deadline => {
                        std::thread::sleep(EXIT_POLL_INTERVAL)
                    }
                    Ok(None) => {
                        tracing::debug!(
                            engine = %self.label,
                            "still running after {:?}, killing", grace
                        );
                        let _ = child.kill();
                        break;
                    }
                    _ => break,
                }
            }
            match child.wait() {
                Ok(status) => {
                    tracing::debug!(engine = %self.label, "exited with {}", status);
                    Some(status)
                }
                Err(e) => {
                    tracing::warn!(engine = %self.label, "wait failed: {}", e);
                    None
                }
            }
        };
        if let Some(handle) = lock(&self.stderr_drain).take() {
            let _ = handle.join();
        }
        status
    }
}

impl Drop for Channel {
    fn drop(&mut self) {
        self.terminate();
    }
}

/// Blocking line reader over the engine's stdout.
pub struct LineReader {
    inner: BufReader<ChildStdout>,
}

impl LineReader {
    /// Reads one line without its terminator. `Ok(None)` means end of output.
    pub fn read_line(&mut self) -> Result<Option<String>, ChannelError> {
        let mut line = String::new();
        let n = self.inner.read_line(&mut line).map_err(ChannelError::Read)?;
        if n == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}
