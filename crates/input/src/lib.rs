//! Terminal input mapping.
//!
//! Translates `crossterm` key events into engine [`Command`](crate::types::Command)s.
//! Nothing here touches engine state; the host forwards the result.

pub mod map;

pub use blockfall_types as types;

pub use map::{map_key, map_key_in, should_quit};
