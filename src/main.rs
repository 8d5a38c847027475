//! Blockfall host binary.
//!
//! Runs the engine and streams its state as JSON lines on stdout. Commands
//! come either from stdin (`blockfall lines`, the default) or from the
//! keyboard in raw terminal mode (`blockfall keys`). Diagnostics go to stderr.

use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use crossterm::terminal;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::runtime::Runtime;

use blockfall::engine::{spawn_engine, EngineConfig, EngineHandle, TrySendError};
use blockfall::host::{parse_host_args, parse_input_line, pump_output, HostMode, InputLine, USAGE};
use blockfall::input::{map_key_in, should_quit};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mode = parse_host_args(&args)?;
    if mode == HostMode::Help {
        println!("{}", USAGE);
        return Ok(());
    }

    let config = EngineConfig::from_env();
    let rt = Runtime::new().context("failed to create tokio runtime")?;

    match mode {
        HostMode::Keys => {
            terminal::enable_raw_mode().context("failed to enable raw mode")?;
            let result = rt.block_on(run(config, mode));
            // Always try to restore terminal state.
            let _ = terminal::disable_raw_mode();
            result
        }
        _ => rt.block_on(run(config, mode)),
    }
}

async fn run(config: EngineConfig, mode: HostMode) -> Result<()> {
    let (engine, task) = spawn_engine(&config).context("invalid engine configuration")?;

    // Raw mode disables the terminal's newline translation.
    let line_end = if mode == HostMode::Keys { "\r\n" } else { "\n" };
    let output = tokio::spawn(pump_output(
        engine.subscribe_snapshots(),
        engine.subscribe_events(),
        tokio::io::stdout(),
        line_end,
    ));

    match mode {
        HostMode::Keys => {
            let keys_engine = engine.clone();
            tokio::task::spawn_blocking(move || read_keys(keys_engine))
                .await
                .context("key reader panicked")??;
        }
        _ => read_lines(&engine).await?,
    }

    drop(engine);
    let state = task.await.context("engine task failed")?;
    output.await.context("output task failed")??;

    eprintln!(
        "[Host] Session ended: score {}, level {}, lines {}",
        state.score(),
        state.level(),
        state.lines()
    );
    Ok(())
}

async fn read_lines(engine: &EngineHandle) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        match parse_input_line(&line) {
            InputLine::Command(command) => {
                if engine.send(command).await.is_err() {
                    break;
                }
            }
            InputLine::Quit => break,
            InputLine::Blank => {}
            InputLine::Unknown => eprintln!("[Host] Unknown command: {}", line.trim()),
        }
    }
    Ok(())
}

fn read_keys(engine: EngineHandle) -> Result<()> {
    loop {
        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if should_quit(key) {
            return Ok(());
        }

        let phase = engine.snapshot().phase;
        let Some(command) = map_key_in(key, phase) else {
            continue;
        };
        match engine.try_send(command) {
            Ok(()) => {}
            Err(TrySendError::Full) => {
                eprintln!("[Host] Command queue full, dropped {}\r", command.as_str());
            }
            Err(TrySendError::Closed) => return Ok(()),
        }
    }
}
