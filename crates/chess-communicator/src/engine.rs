//! One running engine: its channel plus the protocol reader thread.
//!
//! The reader thread owns the engine's stdout and turns every line into an
//! [`EngineMessage`]. `readyok` and `bestmove` are published through two
//! independent [`Signal`]s, scored `info` lines are stored by multipv index.
//! When stdout ends both signals are closed so no caller waits forever on an
//! engine that is gone.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::JoinHandle;
use std::time::Duration;

use uci::{EngineMessage, GuiCommand};

use crate::channel::{Channel, LineReader};
use crate::config::EngineConfig;
use crate::error::CommError;
use crate::line::Line;
use crate::signal::{Signal, WaitOutcome};

/// Handle of an engine in a [`Communicator`](crate::Communicator).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EngineId(u32);

impl EngineId {
    pub const fn new(raw: u32) -> Self {
        EngineId(raw)
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for EngineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The answer to a `go` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BestMove {
    pub mv: String,
    pub ponder: Option<String>,
}

impl BestMove {
    /// True when the engine reported that it has no move to play.
    pub fn is_none(&self) -> bool {
        matches!(self.mv.as_str(), "(none)" | "0000")
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Highest multipv index kept. Lines beyond it are dropped.
pub const MAX_MULTIPV: u32 = 256;

/// How long an engine may take to exit after `quit` before it is killed.
const QUIT_GRACE: Duration = Duration::from_millis(500);

/// State written by the reader thread and read by callers.
#[derive(Default)]
struct Shared {
    lines: Mutex<Vec<Option<Line>>>,
    /// `isready`s sent and not yet answered.
    ready_pending: Mutex<u32>,
    name: Mutex<Option<String>>,
    ready: Signal<()>,
    bestmove: Signal<BestMove>,
}

impl Shared {
    fn publish(&self, id: EngineId, line: Line) {
        if line.multipv > MAX_MULTIPV {
            tracing::warn!(engine = %id, "dropped line with multipv {}", line.multipv);
            return;
        }
        let index = line.multipv as usize - 1;
        let mut lines = lock(&self.lines);
        if lines.len() <= index {
            lines.resize(index + 1, None);
        }
        lines[index] = Some(line);
    }

    fn expect_ready(&self) {
        let mut pending = lock(&self.ready_pending);
        *pending = pending.saturating_add(1);
    }

    /// Only the answer to the latest `isready` completes a wait. Answers to
    /// earlier, abandoned requests are swallowed.
    fn answer_ready(&self, id: EngineId) {
        let mut pending = lock(&self.ready_pending);
        match *pending {
            0 | 1 => {
                *pending = 0;
                self.ready.set(());
            }
            n => {
                *pending = n - 1;
                tracing::debug!(engine = %id, "late readyok, {} still pending", n - 1);
            }
        }
    }

    fn handle(&self, id: EngineId, text: &str) {
        match EngineMessage::parse(text) {
            EngineMessage::ReadyOk => self.answer_ready(id),
            EngineMessage::BestMove { mv, ponder } => self.bestmove.set(BestMove { mv, ponder }),
            EngineMessage::Info(info) => {
                if let Some(line) = Line::from_info(&info) {
                    self.publish(id, line);
                }
            }
            EngineMessage::Id {
                name: Some(name), ..
            } => *lock(&self.name) = Some(name),
            EngineMessage::Id { .. } | EngineMessage::UciOk | EngineMessage::Option(_) => {
                tracing::trace!(engine = %id, "dropped: {}", text);
            }
            EngineMessage::Unknown(text) => {
                if !text.is_empty() {
                    tracing::warn!(engine = %id, "unrecognized output: {}", text);
                }
            }
        }
    }
}

fn read_loop(id: EngineId, shared: Arc<Shared>, mut reader: LineReader) {
    loop {
        match reader.read_line() {
            Ok(Some(text)) => {
                tracing::debug!(engine = %id, "< {}", text);
                shared.handle(id, &text);
            }
            Ok(None) => {
                tracing::info!(engine = %id, "engine output closed");
                break;
            }
            Err(e) => {
                tracing::warn!(engine = %id, "{}", e);
                break;
            }
        }
    }
    shared.ready.close();
    shared.bestmove.close();
}

/// A live engine process and the thread parsing its output.
pub struct Engine {
    id: EngineId,
    channel: Channel,
    shared: Arc<Shared>,
    reader: Mutex<Option<JoinHandle<()>>>,
    ready_timeout: Duration,
}

impl Engine {
    /// Spawns the engine, starts its reader thread, and sends `uci` followed
    /// by the configured options. Does not wait for any reply.
    pub fn start(
        id: EngineId,
        config: &EngineConfig,
        ready_timeout: Duration,
    ) -> Result<Engine, CommError> {
        let channel = Channel::spawn(&config.path, &config.args, id.to_string())?;
        let reader = channel.take_reader()?;
        let shared = Arc::new(Shared::default());

        let thread_shared = Arc::clone(&shared);
        let handle = std::thread::Builder::new()
            .name(format!("engine-{}", id.get()))
            .spawn(move || read_loop(id, thread_shared, reader))
            .map_err(CommError::Thread)?;

        let engine = Engine {
            id,
            channel,
            shared,
            reader: Mutex::new(Some(handle)),
            ready_timeout,
        };

        engine.send_command(&GuiCommand::Uci)?;
        for (name, value) in config.uci_options() {
            engine.send_command(&GuiCommand::SetOption {
                name,
                value: Some(value),
            })?;
        }
        tracing::info!(engine = %id, pid = engine.channel.pid(), "started {:?}", config.path);
        Ok(engine)
    }

    pub fn id(&self) -> EngineId {
        self.id
    }

    /// Name from the engine's `id name` line, once it has been received.
    pub fn name(&self) -> Option<String> {
        lock(&self.shared.name).clone()
    }

    pub fn send(&self, text: &str) -> Result<(), CommError> {
        if text.trim() == "isready" {
            self.shared.expect_ready();
        }
        Ok(self.channel.write_line(text)?)
    }

    pub fn send_command(&self, command: &GuiCommand) -> Result<(), CommError> {
        self.send(&command.to_uci())
    }

    /// Waits up to `timeout` for a `readyok` that has not been consumed yet.
    pub fn wait_ready(&self, timeout: Duration) -> Result<(), CommError> {
        match self.shared.ready.wait_timeout(timeout) {
            WaitOutcome::Ready(()) => Ok(()),
            WaitOutcome::TimedOut => {
                tracing::warn!(engine = %self.id, "no readyok after {:?}", timeout);
                Err(CommError::ProtocolTimeout {
                    id: self.id,
                    waited_ms: timeout.as_millis(),
                })
            }
            WaitOutcome::Closed => Err(CommError::Disconnected(self.id)),
        }
    }

    /// Sends `isready` and waits for the answer within the configured timeout.
    pub fn sync(&self) -> Result<(), CommError> {
        self.shared.ready.reset();
        self.send_command(&GuiCommand::IsReady)?;
        self.wait_ready(self.ready_timeout)
    }

    /// Clears the previous search's results, sends `command` and blocks until
    /// the engine answers with `bestmove`.
    ///
    /// There is no timeout: `command` should bound the search itself. Only
    /// one search per engine may be in flight.
    pub fn send_and_wait_bestmove(&self, command: &str) -> Result<BestMove, CommError> {
        lock(&self.shared.lines).clear();
        self.shared.bestmove.reset();
        self.send(command)?;
        self.wait_bestmove()
    }

    /// Blocks until a `bestmove` arrives that has not been consumed yet.
    pub fn wait_bestmove(&self) -> Result<BestMove, CommError> {
        self.shared
            .bestmove
            .wait()
            .ok_or(CommError::Disconnected(self.id))
    }

    /// Snapshot of the current lines, ordered by multipv.
    pub fn lines(&self) -> Vec<Line> {
        lock(&self.shared.lines).iter().flatten().cloned().collect()
    }

    /// True until the engine's output has ended.
    pub fn is_connected(&self) -> bool {
        !self.shared.bestmove.is_closed()
    }

    /// Asks the engine to quit, waits briefly for it to exit, kills it if it
    /// has not, then joins the reader.
    ///
    /// The process is gone before the join, so the reader always sees end of
    /// output. Safe to call more than once.
    pub fn shutdown(&self) {
        let _ = self.channel.write_line("quit");
        if let Some(status) = self.channel.terminate_within(QUIT_GRACE) {
            tracing::debug!(engine = %self.id, "exit status {}", status);
        }
        if let Some(handle) = lock(&self.reader).take() {
            if handle.join().is_err() {
                tracing::warn!(engine = %self.id, "reader thread panicked");
            }
            tracing::info!(engine = %self.id, "stopped");
        }
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.shutdown();
    }
}
