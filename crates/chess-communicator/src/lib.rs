//! Driving external UCI chess engines as subprocesses.
//!
//! A [`Communicator`] owns any number of engines, each addressed by an
//! [`EngineId`]. Every engine runs as a child process behind a [`Channel`],
//! with one reader thread parsing its output into [`Line`]s and `bestmove`s.
//! Callers block on those results from their own threads.
//!
//! ```no_run
//! use chess_communicator::{Communicator, CommunicatorConfig, EngineConfig};
//!
//! let comm = Communicator::new(CommunicatorConfig::default());
//! let id = comm.create(&EngineConfig::new("stockfish")).unwrap();
//! assert!(comm.is_ready(id));
//! comm.send(id, "position startpos moves e2e4").unwrap();
//! let best = comm.send_and_wait_bestmove(id, "go movetime 100").unwrap();
//! println!("{} {:?}", best.mv, comm.result_lines(id));
//! ```

pub mod channel;
pub mod config;
mod engine;
mod error;
mod line;
mod registry;
pub mod signal;

pub use channel::Channel;
pub use config::{CommunicatorConfig, ConfigError, EngineConfig, EngineKind, OptionValue};
pub use engine::{BestMove, Engine, EngineId, MAX_MULTIPV};
pub use error::{ChannelError, CommError};
pub use line::Line;
pub use registry::Communicator;

/// Installs a `tracing` subscriber that writes to stderr, filtered by `RUST_LOG`.
///
/// Does nothing if a global subscriber is already set.
pub fn init_tracing(default_filter: &str) {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
