//! Blockfall (workspace facade crate).
//!
//! Re-exports the member crates under one roof so hosts and integration tests
//! can write `blockfall::{core,engine,input,types}`.

pub mod host;

pub use blockfall_core as core;
pub use blockfall_engine as engine;
pub use blockfall_input as input;
pub use blockfall_types as types;
