//! Per-game driver task.
//!
//! One tokio task owns one [`GameState`]. Commands and gravity ticks are
//! multiplexed with `select!`, so they are applied strictly one at a time.
//! After every step the task publishes a fresh [`GameSnapshot`] on a watch
//! channel and re-reads the gravity interval, recreating the timer when a
//! level change altered it.

use std::time::Duration;

use anyhow::{Context, Result};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

use crate::core::{record_high_score, GameSnapshot, GameState, HighScoreStore, PieceSource};
use crate::event_log::{EventLog, LogRecord};
use crate::types::{GameAction, StepOutcome};

/// Final numbers of a finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub high_score: u32,
    /// A new record was written during this session.
    pub new_record: bool,
}

/// A game plus everything its driver needs, ready to be spawned.
pub struct Session<R, S> {
    game: GameState<R>,
    store: S,
    log: EventLog,
    high_score: u32,
    new_record: bool,
}

impl<R, S> Session<R, S>
where
    R: PieceSource + Send + 'static,
    S: HighScoreStore + Send + 'static,
{
    pub fn new(game: GameState<R>, store: S, log: EventLog) -> Self {
        let high_score = store.load();
        Self {
            game,
            store,
            log,
            high_score,
            new_record: false,
        }
    }

    /// Spawn the driver task. Must be called from within a tokio runtime.
    pub fn spawn(self, max_pending: usize) -> SessionHandle {
        let (cmd_tx, cmd_rx) = mpsc::channel(max_pending.max(1));
        let (snap_tx, snap_rx) = watch::channel(self.snapshot());
        let task = tokio::spawn(self.run(cmd_rx, snap_tx));
        SessionHandle {
            cmd_tx,
            snap_rx,
            task,
        }
    }

    fn snapshot(&self) -> GameSnapshot {
        let mut snap = self.game.snapshot();
        snap.high_score = self.high_score;
        snap
    }

    fn emit(&self, event: &'static str) {
        self.log.record(LogRecord::new(event, &self.snapshot()));
    }

    async fn run(
        mut self,
        mut cmd_rx: mpsc::Receiver<GameAction>,
        snap_tx: watch::Sender<GameSnapshot>,
    ) -> SessionSummary {
        self.game.start();
        self.emit("started");
        self.drain_events();
        snap_tx.send_replace(self.snapshot());

        let mut interval_ms = self.game.drop_interval_ms();
        let mut gravity = gravity_timer(interval_ms);

        loop {
            // Resumed or restarted games get a full period before the next fall.
            let restart_timer = tokio::select! {
                cmd = cmd_rx.recv() => match cmd {
                    None | Some(GameAction::Quit) => break,
                    Some(action) => self.handle_action(action),
                },
                _ = gravity.tick() => {
                    self.handle_tick();
                    false
                }
            };

            let ms = self.game.drop_interval_ms();
            if restart_timer || ms != interval_ms {
                interval_ms = ms;
                gravity = gravity_timer(ms);
            }
            snap_tx.send_replace(self.snapshot());
        }

        self.offer_high_score();
        self.emit("quit");
        snap_tx.send_replace(self.snapshot());

        SessionSummary {
            score: self.game.score(),
            level: self.game.level(),
            lines: self.game.lines(),
            high_score: self.high_score,
            new_record: self.new_record,
        }
    }

    /// Apply one command; returns true when the gravity timer should restart.
    fn handle_action(&mut self, action: GameAction) -> bool {
        let restart_timer = match action {
            GameAction::Restart => {
                self.offer_high_score();
                self.game.restart();
                self.emit("restarted");
                true
            }
            GameAction::Pause => {
                let toggled = self.game.apply_action(action);
                if toggled {
                    self.emit(if self.game.paused() { "paused" } else { "resumed" });
                }
                toggled && !self.game.paused()
            }
            _ => {
                self.game.apply_action(action);
                false
            }
        };
        self.drain_events();
        restart_timer
    }

    fn handle_tick(&mut self) {
        if let StepOutcome::Locked { .. } | StepOutcome::GameOver = self.game.tick() {
            self.drain_events();
        }
    }

    fn drain_events(&mut self) {
        while let Some(event) = self.game.take_last_event() {
            match event {
                StepOutcome::Locked { lines } => {
                    self.log
                        .record(LogRecord::new("locked", &self.snapshot()).with_lines(lines));
                }
                StepOutcome::GameOver => {
                    self.emit("game_over");
                    self.offer_high_score();
                }
                StepOutcome::Idle | StepOutcome::Fell => {}
            }
        }
    }

    fn offer_high_score(&mut self) {
        let score = self.game.score();
        if record_high_score(&mut self.store, score) {
            self.high_score = score;
            self.new_record = true;
            self.emit("high_score");
        }
    }
}

/// Gravity timer whose first tick is one full period away.
fn gravity_timer(ms: u32) -> Interval {
    let period = Duration::from_millis(u64::from(ms.max(1)));
    let mut timer = interval_at(Instant::now() + period, period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    timer
}

/// Control side of a running session.
pub struct SessionHandle {
    cmd_tx: mpsc::Sender<GameAction>,
    snap_rx: watch::Receiver<GameSnapshot>,
    task: JoinHandle<SessionSummary>,
}

impl SessionHandle {
    /// Queue an action without blocking; returns false when the queue is full
    /// or the session has ended.
    pub fn send(&self, action: GameAction) -> bool {
        self.cmd_tx.try_send(action).is_ok()
    }

    /// Queue an action, waiting for room in the queue.
    pub async fn send_wait(&self, action: GameAction) -> Result<()> {
        self.cmd_tx
            .send(action)
            .await
            .context("session has ended")
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> GameSnapshot {
        *self.snap_rx.borrow()
    }

    /// Latest snapshot if it changed since the last call.
    pub fn changed_snapshot(&mut self) -> Option<GameSnapshot> {
        match self.snap_rx.has_changed() {
            Ok(true) => Some(*self.snap_rx.borrow_and_update()),
            _ => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Ask the session to quit and wait for its summary.
    pub async fn shutdown(self) -> Result<SessionSummary> {
        // The task may already have stopped on its own Quit.
        let _ = self.cmd_tx.send(GameAction::Quit).await;
        self.task.await.context("session task failed")
    }
}
