//! Structured event log.
//!
//! Records are serialized as JSON lines by a dedicated writer task fed
//! through an unbounded channel, so the game task never waits on disk.
//! Any write failure stops the writer; the game carries on without a log.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::core::GameSnapshot;

/// One line of the event log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogRecord {
    pub ts_ms: u64,
    pub event: &'static str,
    pub episode_id: u32,
    /// Rows removed by this lock (only on `locked`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lines: Option<u32>,
    pub score: u32,
    pub level: u32,
    pub total_lines: u32,
}

impl LogRecord {
    pub fn new(event: &'static str, snap: &GameSnapshot) -> Self {
        Self {
            ts_ms: current_timestamp_ms(),
            event,
            episode_id: snap.episode_id,
            lines: None,
            score: snap.score,
            level: snap.level,
            total_lines: snap.lines,
        }
    }

    pub fn with_lines(mut self, lines: u32) -> Self {
        self.lines = Some(lines);
        self
    }
}

/// Cheap handle for emitting log records; disabled handles drop everything.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    tx: Option<mpsc::UnboundedSender<LogRecord>>,
}

impl EventLog {
    pub fn disabled() -> Self {
        Self { tx: None }
    }

    /// A log whose records are delivered to the returned receiver.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<LogRecord>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx: Some(tx) }, rx)
    }

    /// Start the file writer task. Must be called from within a tokio runtime.
    ///
    /// The task ends (after flushing) once every `EventLog` clone is dropped.
    pub fn spawn_file_writer(path: String) -> (Self, JoinHandle<()>) {
        let (log, rx) = Self::channel();
        let task = tokio::spawn(write_records(path, rx));
        (log, task)
    }

    pub fn is_enabled(&self) -> bool {
        self.tx.is_some()
    }

    pub fn record(&self, record: LogRecord) {
        if let Some(tx) = self.tx.as_ref() {
            let _ = tx.send(record);
        }
    }
}

async fn write_records(path: String, mut rx: mpsc::UnboundedReceiver<LogRecord>) {
    use tokio::fs::OpenOptions;
    use tokio::io::AsyncWriteExt;

    let mut file = match OpenOptions::new().create(true).append(true).open(&path).await {
        Ok(f) => f,
        Err(_) => return,
    };

    let mut buf: Vec<u8> = Vec::with_capacity(256);
    while let Some(rec) = rx.recv().await {
        buf.clear();
        if serde_json::to_writer(&mut buf, &rec).is_err() {
            continue;
        }
        buf.push(b'\n');
        if file.write_all(&buf).await.is_err() {
            break;
        }
    }

    let _ = file.flush().await;
}

/// Get current timestamp in milliseconds
fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_shape() {
        let mut snap = GameSnapshot::default();
        snap.score = 300;
        snap.lines = 12;
        snap.level = 2;

        let rec = LogRecord::new("locked", &snap).with_lines(2);
        let v = serde_json::to_value(&rec).unwrap();
        assert_eq!(v["event"], "locked");
        assert_eq!(v["lines"], 2);
        assert_eq!(v["score"], 300);
        assert_eq!(v["level"], 2);
        assert_eq!(v["total_lines"], 12);

        let v = serde_json::to_value(LogRecord::new("paused", &snap)).unwrap();
        assert!(v.get("lines").is_none());
    }

    #[test]
    fn test_disabled_log_drops_records() {
        let log = EventLog::disabled();
        assert!(!log.is_enabled());
        log.record(LogRecord::new("started", &GameSnapshot::default()));
    }

    #[tokio::test]
    async fn test_file_writer_appends_json_lines() {
        let path = std::env::temp_dir().join(format!("term-tetris-log-{}.jsonl", std::process::id()));
        let _ = std::fs::remove_file(&path);

        let (log, task) = EventLog::spawn_file_writer(path.to_string_lossy().into_owned());
        let snap = GameSnapshot::default();
        log.record(LogRecord::new("started", &snap));
        log.record(LogRecord::new("quit", &snap));
        drop(log);
        task.await.unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let events: Vec<String> = text
            .lines()
            .map(|l| serde_json::from_str::<serde_json::Value>(l).unwrap()["event"]
                .as_str()
                .unwrap()
                .to_string())
            .collect();
        assert_eq!(events, vec!["started", "quit"]);
    }
}
