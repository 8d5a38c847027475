//! Engine configuration, read from `BLOCKFALL_*` environment variables.

use thiserror::Error;

use crate::types::{
    DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, MAX_BOARD_DIM, MIN_BOARD_HEIGHT, MIN_BOARD_WIDTH,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error(
        "board width {0} is outside {min}..={max}",
        min = MIN_BOARD_WIDTH,
        max = MAX_BOARD_DIM
    )]
    Width(u8),
    #[error(
        "board height {0} is outside {min}..={max}",
        min = MIN_BOARD_HEIGHT,
        max = MAX_BOARD_DIM
    )]
    Height(u8),
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub board_width: u8,
    pub board_height: u8,
    /// Piece RNG seed; `None` derives one from the wall clock
    pub seed: Option<u32>,
    /// Capacity of the inbound command queue
    pub max_pending_commands: usize,
    /// JSONL journal destination
    pub log_path: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            board_width: DEFAULT_BOARD_WIDTH,
            board_height: DEFAULT_BOARD_HEIGHT,
            seed: None,
            max_pending_commands: 32,
            log_path: None,
        }
    }
}

impl EngineConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unparsable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let board_width = lookup("BLOCKFALL_WIDTH")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.board_width);

        let board_height = lookup("BLOCKFALL_HEIGHT")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.board_height);

        let seed = lookup("BLOCKFALL_SEED").and_then(|s| s.trim().parse().ok());

        let max_pending_commands = lookup("BLOCKFALL_MAX_PENDING")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.max_pending_commands)
            .max(1);

        let log_path = lookup("BLOCKFALL_LOG_PATH")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        Self {
            board_width,
            board_height,
            seed,
            max_pending_commands,
            log_path,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_BOARD_WIDTH..=MAX_BOARD_DIM).contains(&self.board_width) {
            return Err(ConfigError::Width(self.board_width));
        }
        if !(MIN_BOARD_HEIGHT..=MAX_BOARD_DIM).contains(&self.board_height) {
            return Err(ConfigError::Height(self.board_height));
        }
        Ok(())
    }

    /// Configured seed, or one derived from the current time
    pub fn resolve_seed(&self) -> u32 {
        self.seed.unwrap_or_else(|| {
            use std::time::{SystemTime, UNIX_EPOCH};
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
                .unwrap_or(1)
        })
    }
}
