//! JSONL session journal.
//!
//! Records are handed to a writer task over an unbounded channel so the game
//! loop never waits on disk. Each record is one JSON object per line.

use std::path::PathBuf;

use serde::Serialize;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::runtime::FinalScore;
use crate::types::{Command, LockEvent};

/// Milliseconds since the Unix epoch
pub fn current_timestamp_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum JournalRecord {
    Command {
        ts: u64,
        session_id: u32,
        command: &'static str,
    },
    Lock {
        ts: u64,
        session_id: u32,
        #[serde(flatten)]
        event: LockEvent,
        score: u32,
        level: u32,
        lines: u32,
    },
    GameOver {
        ts: u64,
        session_id: u32,
        #[serde(flatten)]
        result: FinalScore,
    },
}

impl JournalRecord {
    pub fn command(session_id: u32, command: Command) -> Self {
        JournalRecord::Command {
            ts: current_timestamp_ms(),
            session_id,
            command: command.as_str(),
        }
    }
}

/// Sending half of the journal; cheap to clone.
#[derive(Debug, Clone)]
pub struct Journal {
    tx: mpsc::UnboundedSender<JournalRecord>,
}

impl Journal {
    /// Spawn the writer task. Must be called inside a tokio runtime.
    ///
    /// The task ends once every `Journal` clone is dropped and the backlog
    /// has been flushed.
    pub fn spawn(path: impl Into<PathBuf>) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::unbounded_channel::<JournalRecord>();
        let task = tokio::spawn(write_records(path.into(), rx));
        (Self { tx }, task)
    }

    pub fn record(&self, record: JournalRecord) {
        let _ = self.tx.send(record);
    }
}

async fn write_records(path: PathBuf, mut rx: mpsc::UnboundedReceiver<JournalRecord>) {
    use tokio::fs::OpenOptions;
    use tokio::io::AsyncWriteExt;

    let mut file = match OpenOptions::new().create(true).append(true).open(&path).await {
        Ok(f) => f,
        Err(e) => {
            eprintln!("[Engine] Journal disabled, cannot open {}: {}", path.display(), e);
            return;
        }
    };

    let mut buf: Vec<u8> = Vec::with_capacity(512);

    while let Some(record) = rx.recv().await {
        buf.clear();
        if serde_json::to_writer(&mut buf, &record).is_err() {
            continue;
        }
        buf.push(b'\n');
        if let Err(e) = file.write_all(&buf).await {
            eprintln!("[Engine] Journal write failed: {}", e);
            return;
        }
    }

    let _ = file.flush().await;
}
