//! Session runtime integration.
//!
//! Bridges the sync terminal loop with the async session task: the runtime
//! lives here, and the terminal thread only touches channels.

use anyhow::{Context, Result};
use tokio::runtime::Runtime;
use tokio::task::JoinHandle;

use crate::config::SessionConfig;
use crate::core::{GameSnapshot, GameState, SimpleRng};
use crate::event_log::EventLog;
use crate::high_score::open_store;
use crate::session::{Session, SessionHandle, SessionSummary};
use crate::types::GameAction;

/// Running session instance.
pub struct SessionRuntime {
    rt: Runtime,
    handle: SessionHandle,
    log_task: Option<JoinHandle<()>>,
    seed: u32,
}

impl SessionRuntime {
    /// Start a session described by environment variables.
    pub fn start_from_env() -> Result<Self> {
        Self::start(SessionConfig::from_env())
    }

    pub fn start(config: SessionConfig) -> Result<Self> {
        let rt = Runtime::new().context("failed to create tokio runtime")?;
        let seed = config.resolve_seed();

        let (handle, log_task) = {
            let _guard = rt.enter();
            let (log, log_task) = match config.log_path.clone() {
                Some(path) => {
                    let (log, task) = EventLog::spawn_file_writer(path);
                    (log, Some(task))
                }
                None => (EventLog::disabled(), None),
            };

            let game = GameState::with_gravity(SimpleRng::new(seed), config.gravity);
            let store = open_store(config.high_score_path.as_deref());
            let handle = Session::new(game, store, log).spawn(config.max_pending_commands);
            (handle, log_task)
        };

        Ok(Self {
            rt,
            handle,
            log_task,
            seed,
        })
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn send(&self, action: GameAction) -> bool {
        self.handle.send(action)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.handle.snapshot()
    }

    pub fn changed_snapshot(&mut self) -> Option<GameSnapshot> {
        self.handle.changed_snapshot()
    }

    /// The session task has stopped (after a Quit).
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Stop the session, persist the high score and flush the event log.
    pub fn shutdown(self) -> Result<SessionSummary> {
        let Self {
            rt,
            handle,
            log_task,
            ..
        } = self;

        rt.block_on(async move {
            let summary = handle.shutdown().await?;
            if let Some(task) = log_task {
                let _ = task.await;
            }
            Ok(summary)
        })
    }
}
