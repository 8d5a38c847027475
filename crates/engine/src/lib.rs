//! Game loop controller.
//!
//! Hosts a [`GameState`](blockfall_core::GameState) inside a tokio task and
//! drives its automatic fall. Presentation layers interact only through an
//! [`EngineHandle`]: commands in, snapshots and events out.
//!
//! ```no_run
//! use blockfall_engine::{spawn_engine, EngineConfig};
//! use blockfall_types::Command;
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let (engine, _task) = spawn_engine(&EngineConfig::from_env())?;
//! engine.send(Command::StartGame).await?;
//! println!("{}", engine.snapshot().score);
//! # Ok(())
//! # }
//! ```

pub mod clock;
pub mod config;
pub mod journal;
pub mod runtime;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use clock::FallClock;
pub use config::{ConfigError, EngineConfig};
pub use journal::{Journal, JournalRecord};
pub use runtime::{
    spawn_engine, spawn_with_source, EngineClosed, EngineEvent, EngineHandle, FinalScore,
    TrySendError,
};
