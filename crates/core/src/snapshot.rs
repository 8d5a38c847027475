//! Read-only views of a session for presentation layers.
//!
//! Snapshots are owned copies; nothing a renderer does to one can reach back
//! into the engine.

use serde::{Deserialize, Serialize};

use crate::game_state::ActivePiece;
use crate::pieces::definition;
use crate::types::{Cell, Color, PieceKind, Phase};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub color: Color,
    pub x: i16,
    pub y: i16,
    /// Current orientation, rows top to bottom
    pub shape: Vec<Vec<u8>>,
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.kind,
            color: value.color,
            x: value.x,
            y: value.y,
            shape: value.shape.to_rows(),
        }
    }
}

/// Upcoming piece in its canonical orientation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PreviewSnapshot {
    pub kind: PieceKind,
    pub color: Color,
    pub shape: Vec<Vec<u8>>,
}

impl From<PieceKind> for PreviewSnapshot {
    fn from(kind: PieceKind) -> Self {
        let def = definition(kind);
        Self {
            kind,
            color: def.color,
            shape: def.shape.to_rows(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub width: u8,
    pub height: u8,
    /// Settled cells only, rows top to bottom
    pub board: Vec<Vec<Cell>>,
    pub active: Option<ActiveSnapshot>,
    pub next: Option<PreviewSnapshot>,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub phase: Phase,
    pub paused: bool,
    pub game_over: bool,
    pub is_playing: bool,
    pub session_id: u32,
    pub piece_id: u32,
    pub fall_interval_ms: u32,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        self.phase == Phase::Running
    }

    /// Board with the active piece drawn over it, clipped to the grid.
    pub fn composed_rows(&self) -> Vec<Vec<Cell>> {
        let mut rows = self.board.clone();
        let Some(active) = &self.active else {
            return rows;
        };

        for (dy, shape_row) in active.shape.iter().enumerate() {
            for (dx, &filled) in shape_row.iter().enumerate() {
                if filled == 0 {
                    continue;
                }
                let x = active.x + dx as i16;
                let y = active.y + dy as i16;
                if x < 0 || y < 0 {
                    continue;
                }
                if let Some(cell) = rows
                    .get_mut(y as usize)
                    .and_then(|row| row.get_mut(x as usize))
                {
                    *cell = Some(active.color);
                }
            }
        }
        rows
    }
}
