//! Thread-safe registry of running engines addressed by [`EngineId`].

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use uci::GuiCommand;

use crate::config::{CommunicatorConfig, EngineConfig};
use crate::engine::{BestMove, Engine, EngineId};
use crate::error::CommError;
use crate::line::Line;

/// Owns every engine it creates and tears them all down on drop.
///
/// Each call looks the engine up, clones its `Arc` and releases the registry
/// lock before talking to it, so a slow engine never blocks the others.
pub struct Communicator {
    config: CommunicatorConfig,
    next_id: AtomicU32,
    engines: Mutex<HashMap<EngineId, Arc<Engine>>>,
}

impl Communicator {
    pub fn new(config: CommunicatorConfig) -> Self {
        Communicator {
            config,
            next_id: AtomicU32::new(1),
            engines: Mutex::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &CommunicatorConfig {
        &self.config
    }

    fn engines(&self) -> MutexGuard<'_, HashMap<EngineId, Arc<Engine>>> {
        self.engines.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn engine(&self, id: EngineId) -> Result<Arc<Engine>, CommError> {
        self.engines()
            .get(&id)
            .cloned()
            .ok_or(CommError::UnknownHandle(id))
    }

    /// Starts an engine and registers it under a fresh id.
    pub fn create(&self, config: &EngineConfig) -> Result<EngineId, CommError> {
        let id = EngineId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        let engine = Engine::start(id, config, self.config.ready_timeout())?;
        self.engines().insert(id, Arc::new(engine));
        Ok(id)
    }

    /// Starts the engine configured under `[engines.<name>]`.
    pub fn create_named(&self, name: &str) -> Result<EngineId, CommError> {
        let config = self.config.get_engine(name)?.clone();
        self.create(&config)
    }

    pub fn send(&self, id: EngineId, text: &str) -> Result<(), CommError> {
        self.engine(id)?.send(text)
    }

    pub fn send_command(&self, id: EngineId, command: &GuiCommand) -> Result<(), CommError> {
        self.engine(id)?.send_command(command)
    }

    /// Round-trips `isready` within the configured timeout.
    pub fn wait_ready(&self, id: EngineId) -> Result<(), CommError> {
        self.engine(id)?.sync()
    }

    /// Like [`wait_ready`](Self::wait_ready), with every failure reported as `false`.
    pub fn is_ready(&self, id: EngineId) -> bool {
        match self.wait_ready(id) {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!("is_ready {}: {}", id, e);
                false
            }
        }
    }

    /// Sends `command` (normally a `go`) and blocks until the best move arrives.
    pub fn send_and_wait_bestmove(&self, id: EngineId, command: &str) -> Result<BestMove, CommError> {
        self.engine(id)?.send_and_wait_bestmove(command)
    }

    /// Lines of the last search, empty for unknown ids.
    pub fn result_lines(&self, id: EngineId) -> Vec<Line> {
        self.engine(id).map(|e| e.lines()).unwrap_or_default()
    }

    pub fn engine_name(&self, id: EngineId) -> Option<String> {
        self.engine(id).ok().and_then(|e| e.name())
    }

    /// Registered ids in ascending order.
    pub fn ids(&self) -> Vec<EngineId> {
        let mut ids: Vec<EngineId> = self.engines().keys().copied().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.engines().len()
    }

    pub fn is_empty(&self) -> bool {
        self.engines().is_empty()
    }

    /// Unregisters and stops one engine. Returns false for unknown ids.
    pub fn destroy(&self, id: EngineId) -> bool {
        let removed = self.engines().remove(&id);
        match removed {
            Some(engine) => {
                engine.shutdown();
                true
            }
            None => false,
        }
    }

    /// Stops every engine. Idempotent.
    pub fn destroy_all(&self) {
        let drained: Vec<Arc<Engine>> = self.engines().drain().map(|(_, e)| e).collect();
        for engine in drained {
            engine.shutdown();
        }
    }

    /// Logs `error`, stops every engine and exits the process with status 1.
    pub fn fatal(&self, error: impl std::fmt::Display) -> ! {
        tracing::error!("fatal: {}", error);
        self.destroy_all();
        std::process::exit(1)
    }
}

impl Default for Communicator {
    fn default() -> Self {
        Communicator::new(CommunicatorConfig::default())
    }
}

impl Drop for Communicator {
    fn drop(&mut self) {
        self.destroy_all();
    }
}
