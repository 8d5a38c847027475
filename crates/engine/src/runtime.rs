//! Engine actor: one task owns the session.
//!
//! User commands and fall ticks are funneled through a single `select!` loop,
//! so exactly one of them is applied at a time. Everything outside the task
//! talks to it through an [`EngineHandle`].

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};

use crate::clock::{Cadence, FallClock};
use crate::config::{ConfigError, EngineConfig};
use crate::core::{GameSnapshot, GameState, PieceSource, UniformPicker};
use crate::journal::{current_timestamp_ms, Journal, JournalRecord};
use crate::types::{Command, LockEvent, MoveOutcome, Phase};

const EVENT_CAPACITY: usize = 64;

/// Final tally of a finished session, for whoever keeps high scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalScore {
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub timestamp_ms: u64,
}

/// Discrete notifications published by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EngineEvent {
    Locked(LockEvent),
    GameOver(FinalScore),
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("engine has shut down")]
pub struct EngineClosed;

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum TrySendError {
    #[error("command queue is full")]
    Full,
    #[error("engine has shut down")]
    Closed,
}

/// Cloneable front door to a running engine.
///
/// The engine stops once every handle has been dropped.
#[derive(Debug, Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<Command>,
    snapshot_rx: watch::Receiver<GameSnapshot>,
    events_tx: broadcast::Sender<EngineEvent>,
}

impl EngineHandle {
    /// Queue a command, waiting for room if the queue is full.
    pub async fn send(&self, command: Command) -> Result<(), EngineClosed> {
        self.cmd_tx.send(command).await.map_err(|_| EngineClosed)
    }

    pub fn try_send(&self, command: Command) -> Result<(), TrySendError> {
        self.cmd_tx.try_send(command).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => TrySendError::Full,
            mpsc::error::TrySendError::Closed(_) => TrySendError::Closed,
        })
    }

    /// Latest published state
    pub fn snapshot(&self) -> GameSnapshot {
        self.snapshot_rx.borrow().clone()
    }

    pub fn subscribe_snapshots(&self) -> watch::Receiver<GameSnapshot> {
        self.snapshot_rx.clone()
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<EngineEvent> {
        self.events_tx.subscribe()
    }
}

/// Spawn an engine with a uniform piece source seeded from `config`.
///
/// Must be called inside a tokio runtime.
pub fn spawn_engine(
    config: &EngineConfig,
) -> Result<(EngineHandle, JoinHandle<GameState<UniformPicker>>), ConfigError> {
    let source = UniformPicker::new(config.resolve_seed());
    spawn_with_source(config, source)
}

/// Spawn an engine drawing pieces from `source`.
pub fn spawn_with_source<S>(
    config: &EngineConfig,
    source: S,
) -> Result<(EngineHandle, JoinHandle<GameState<S>>), ConfigError>
where
    S: PieceSource + Send + 'static,
{
    config.validate()?;

    let state = GameState::with_source(config.board_width, config.board_height, source);
    let (cmd_tx, cmd_rx) = mpsc::channel::<Command>(config.max_pending_commands.max(1));
    let (snapshot_tx, snapshot_rx) = watch::channel(state.snapshot());
    let (events_tx, _) = broadcast::channel::<EngineEvent>(EVENT_CAPACITY);

    let journal = config.log_path.as_ref().map(Journal::spawn);

    eprintln!(
        "[Engine] Started {}x{} board, queue capacity {}",
        config.board_width,
        config.board_height,
        config.max_pending_commands.max(1)
    );

    let task = tokio::spawn(run(state, cmd_rx, snapshot_tx, events_tx.clone(), journal));

    let handle = EngineHandle {
        cmd_tx,
        snapshot_rx,
        events_tx,
    };
    Ok((handle, task))
}

async fn fall_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(at) => sleep_until(at).await,
        None => std::future::pending::<()>().await,
    }
}

fn cadence_of<S: PieceSource>(state: &GameState<S>) -> Cadence {
    Cadence {
        session_id: state.session_id(),
        piece_id: state.piece_id(),
        level: state.level(),
        interval_ms: state.fall_interval_ms(),
    }
}

/// Drives the session until every handle is gone, then drains the journal.
async fn run<S: PieceSource>(
    mut state: GameState<S>,
    mut cmd_rx: mpsc::Receiver<Command>,
    snapshot_tx: watch::Sender<GameSnapshot>,
    events_tx: broadcast::Sender<EngineEvent>,
    journal: Option<(Journal, JoinHandle<()>)>,
) -> GameState<S> {
    let (journal, journal_task) = journal.unzip();
    let mut clock = FallClock::new();
    clock.sync(state.phase(), cadence_of(&state), Instant::now());

    loop {
        let phase_before = state.phase();

        let changed = tokio::select! {
            biased;

            _ = fall_deadline(clock.deadline()) => {
                clock.fired(Instant::now());
                state.tick() != MoveOutcome::Rejected
            }
            cmd = cmd_rx.recv() => match cmd {
                Some(command) => {
                    let changed = state.apply(command);
                    // A piece that moved waits a whole interval before falling.
                    if changed {
                        clock.restart(Instant::now());
                    }
                    if let Some(journal) = journal.as_ref() {
                        journal.record(JournalRecord::command(state.session_id(), command));
                    }
                    changed
                }
                None => break,
            },
        };

        if let Some(event) = state.take_last_event() {
            if let Some(journal) = journal.as_ref() {
                journal.record(JournalRecord::Lock {
                    ts: current_timestamp_ms(),
                    session_id: state.session_id(),
                    event,
                    score: state.score(),
                    level: state.level(),
                    lines: state.lines(),
                });
            }
            let _ = events_tx.send(EngineEvent::Locked(event));
        }

        if phase_before != Phase::GameOver && state.phase() == Phase::GameOver {
            let summary = state.summary();
            let result = FinalScore {
                score: summary.score,
                level: summary.level,
                lines: summary.lines,
                timestamp_ms: current_timestamp_ms(),
            };
            eprintln!(
                "[Engine] Game over: score {}, level {}, lines {}",
                result.score, result.level, result.lines
            );
            if let Some(journal) = journal.as_ref() {
                journal.record(JournalRecord::GameOver {
                    ts: result.timestamp_ms,
                    session_id: state.session_id(),
                    result,
                });
            }
            let _ = events_tx.send(EngineEvent::GameOver(result));
        }

        clock.sync(state.phase(), cadence_of(&state), Instant::now());

        if changed {
            snapshot_tx.send_modify(|snap| state.snapshot_into(snap));
        }
    }

    eprintln!("[Engine] All handles dropped, stopping");

    drop(journal);
    if let Some(task) = journal_task {
        if let Err(e) = task.await {
            eprintln!("[Engine] Journal writer failed: {}", e);
        }
    }
    state
}
