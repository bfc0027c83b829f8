//! Error types for engine processes and the registry.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;
use crate::EngineId;

/// Failures of one engine subprocess and its pipes.
#[derive(Error, Debug)]
pub enum ChannelError {
    /// The executable could not be started.
    #[error("Failed to spawn engine {path:?}: {source}")]
    Spawn {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A standard stream of the child was not captured.
    #[error("Engine {0} pipe is not available")]
    MissingPipe(&'static str),
    /// Writing to the engine's stdin failed (short write or broken pipe).
    #[error("Failed to write to engine: {0}")]
    Write(#[source] std::io::Error),
    /// Reading from the engine's stdout failed.
    #[error("Failed to read from engine: {0}")]
    Read(#[source] std::io::Error),
    /// The channel has been terminated.
    #[error("Engine channel is closed")]
    Closed,
}

/// Errors reported by [`Communicator`](crate::Communicator) operations.
#[derive(Error, Debug)]
pub enum CommError {
    #[error(transparent)]
    Channel(#[from] ChannelError),
    /// The engine did not answer `isready` in time.
    #[error("Engine {id} did not answer within {waited_ms} ms")]
    ProtocolTimeout { id: EngineId, waited_ms: u128 },
    /// No engine is registered under this id.
    #[error("Unknown engine handle {0}")]
    UnknownHandle(EngineId),
    /// The engine's output ended while a caller was waiting.
    #[error("Engine {0} disconnected")]
    Disconnected(EngineId),
    /// The protocol reader thread could not be started.
    #[error("Failed to start reader thread: {0}")]
    Thread(#[source] std::io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
