//! Pieces of the `blockfall` binary that are worth testing on their own:
//! argument parsing, stdin line parsing and the JSON line output stream.

use anyhow::{anyhow, Result};
use serde::Serialize;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::{broadcast, watch};

use crate::core::GameSnapshot;
use crate::engine::{EngineEvent, FinalScore};
use crate::types::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostMode {
    /// Command names on stdin, one per line
    Lines,
    /// Raw terminal key events
    Keys,
    Help,
}

pub const USAGE: &str = "\
usage: blockfall [lines|keys]

  lines   read commands from stdin (default)
          start, pause, left, right, down, rotate, drop, quit
  keys    play with the keyboard in raw terminal mode
          arrows/hjkl/wasd move and rotate, space drops,
          p pauses, enter or n starts, q quits

Output: one JSON object per line on stdout. A \"snapshot\" line carries
the latest state whenever it changed; changes that land between two writes
are merged into one line. A \"game_over\" line is written once per
finished session.

Configuration: BLOCKFALL_WIDTH, BLOCKFALL_HEIGHT, BLOCKFALL_SEED,
BLOCKFALL_MAX_PENDING, BLOCKFALL_LOG_PATH";

pub fn parse_host_args(args: &[String]) -> Result<HostMode> {
    match args {
        [] => Ok(HostMode::Lines),
        [mode] => match mode.as_str() {
            "lines" => Ok(HostMode::Lines),
            "keys" => Ok(HostMode::Keys),
            "-h" | "--help" | "help" => Ok(HostMode::Help),
            other => Err(anyhow!("unknown mode: {}", other)),
        },
        [_, extra, ..] => Err(anyhow!("unexpected argument: {}", extra)),
    }
}

/// One line read from stdin in line mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputLine {
    Command(Command),
    Quit,
    Blank,
    Unknown,
}

pub fn parse_input_line(line: &str) -> InputLine {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return InputLine::Blank;
    }
    if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
        return InputLine::Quit;
    }
    match Command::from_str(line) {
        Some(command) => InputLine::Command(command),
        None => InputLine::Unknown,
    }
}

/// A record on the host's stdout.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutputLine<'a> {
    Snapshot(&'a GameSnapshot),
    GameOver(&'a FinalScore),
}

/// Serialize `line` into `buf` followed by `line_end`.
pub fn encode_line(buf: &mut Vec<u8>, line: &OutputLine<'_>, line_end: &str) -> Result<()> {
    serde_json::to_writer(&mut *buf, line)?;
    buf.extend_from_slice(line_end.as_bytes());
    Ok(())
}

/// Stream engine output to `out` until the engine has stopped.
///
/// Snapshots carry latest-value semantics. Events are read until their
/// channel closes, so a game over published just before shutdown is still
/// written.
pub async fn pump_output<W>(
    mut snapshots: watch::Receiver<GameSnapshot>,
    mut events: broadcast::Receiver<EngineEvent>,
    mut out: W,
    line_end: &'static str,
) -> Result<W>
where
    W: AsyncWrite + Unpin,
{
    let mut buf: Vec<u8> = Vec::with_capacity(4096);

    // Initial state, so consumers see the idle board before any command.
    {
        let snap = snapshots.borrow_and_update().clone();
        encode_line(&mut buf, &OutputLine::Snapshot(&snap), line_end)?;
    }

    let mut snapshots_open = true;
    let mut events_open = true;

    while snapshots_open || events_open {
        if !buf.is_empty() {
            out.write_all(&buf).await?;
            out.flush().await?;
            buf.clear();
        }

        tokio::select! {
            biased;

            changed = snapshots.changed(), if snapshots_open => match changed {
                Ok(()) => {
                    let snap = snapshots.borrow_and_update().clone();
                    encode_line(&mut buf, &OutputLine::Snapshot(&snap), line_end)?;
                }
                Err(_) => snapshots_open = false,
            },
            event = events.recv(), if events_open => match event {
                Ok(EngineEvent::GameOver(result)) => {
                    encode_line(&mut buf, &OutputLine::GameOver(&result), line_end)?;
                }
                Ok(EngineEvent::Locked(_)) => {}
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    eprintln!("[Host] Output fell behind, skipped {} events", n);
                }
                Err(broadcast::error::RecvError::Closed) => events_open = false,
            },
        }
    }

    if !buf.is_empty() {
        out.write_all(&buf).await?;
        out.flush().await?;
    }
    Ok(out)
}
