//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain values with no I/O, so they can be used by the engine,
//! by presentation layers, and by anything that serializes snapshots.
//!
//! # Board Dimensions
//!
//! The default playfield is 10 columns by 20 rows. Both dimensions are chosen
//! when a board is created and never change afterwards.
//!
//! - **Width**: columns indexed `0..width` (left to right)
//! - **Height**: rows indexed `0..height` (top to bottom)
//! - **Spawn anchor**: `(width / 2 - 1, 0)`
//!
//! # Fall Cadence
//!
//! The automatic fall interval shrinks by [`FALL_STEP_MS`] for every level above 1
//! and never drops below [`FALL_FLOOR_MS`]:
//!
//! | Level | Interval |
//! |-------|----------|
//! | 1 | 1000ms |
//! | 2 | 900ms |
//! | 5 | 600ms |
//! | 10+ | 100ms |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Command, Direction, PieceKind, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH};
//!
//! let piece = PieceKind::T;
//! assert_eq!(PieceKind::from_str("t"), Some(piece));
//!
//! let command = Command::from_str("left").unwrap();
//! assert_eq!(command, Command::Move(Direction::Left));
//!
//! assert_eq!(DEFAULT_BOARD_WIDTH, 10);
//! assert_eq!(DEFAULT_BOARD_HEIGHT, 20);
//! ```

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Default board width in cells (10 columns)
pub const DEFAULT_BOARD_WIDTH: u8 = 10;

/// Default board height in cells (20 rows)
pub const DEFAULT_BOARD_HEIGHT: u8 = 20;

/// Narrowest board on which every catalog piece fits at its spawn anchor
pub const MIN_BOARD_WIDTH: u8 = 5;

/// Shortest supported board
pub const MIN_BOARD_HEIGHT: u8 = 4;

/// Upper bound for either board dimension
pub const MAX_BOARD_DIM: u8 = 64;

/// Fall interval at level 1 (1000ms = 1 second per row)
pub const BASE_FALL_MS: u32 = 1000;

/// Amount the fall interval shrinks per level above 1
pub const FALL_STEP_MS: u32 = 100;

/// Fastest possible fall interval
pub const FALL_FLOOR_MS: u32 = 100;

/// Points per cleared line, multiplied by the level at lock time
pub const LINE_CLEAR_POINTS: u32 = 100;

/// Points per row a hard-dropped piece actually descends
pub const HARD_DROP_POINTS_PER_ROW: u32 = 2;

/// Cumulative lines needed per level step (`level * LINES_PER_LEVEL`)
pub const LINES_PER_LEVEL: u32 = 10;

/// Level every session starts at
pub const STARTING_LEVEL: u32 = 1;

/// The seven piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// Every kind, in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::T => "T",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::J => "J",
            PieceKind::L => "L",
        }
    }
}

/// Opaque color identifier of a settled cell.
///
/// Stored as a packed `0xRRGGBB` value and rendered as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(u32);

impl Color {
    pub const fn rgb(value: u32) -> Self {
        Self(value & 0x00ff_ffff)
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    /// Parse `#rrggbb` (the leading `#` is optional).
    pub fn from_hex(s: &str) -> Option<Self> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        u32::from_str_radix(digits, 16).ok().map(Self::rgb)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::from_hex(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid color {s:?}")))
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(Color)`: Cell settled by a piece of that color
pub type Cell = Option<Color>;

/// Directions accepted by `move`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    Down,
}

impl Direction {
    /// Board offset `(dx, dy)` for one step in this direction.
    pub fn offset(&self) -> (i16, i16) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
        }
    }
}

/// Commands accepted by the engine
///
/// Both user input and the fall timer are expressed as commands so that a
/// single dispatcher can apply them one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Command {
    /// Reset the session and spawn the first piece
    StartGame,
    /// Toggle between running and paused
    TogglePause,
    /// Shift the active piece one cell
    Move(Direction),
    /// Rotate the active piece 90° clockwise
    Rotate,
    /// Drop the active piece until it locks
    HardDrop,
}

impl Command {
    /// Parse a command name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::{Command, Direction};
    ///
    /// assert_eq!(Command::from_str("down"), Some(Command::Move(Direction::Down)));
    /// assert_eq!(Command::from_str("hardDrop"), Some(Command::HardDrop));
    /// assert_eq!(Command::from_str(" Pause "), Some(Command::TogglePause));
    /// assert_eq!(Command::from_str("hold"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "start" | "startgame" | "restart" => Some(Command::StartGame),
            "pause" | "togglepause" | "resume" => Some(Command::TogglePause),
            "left" | "moveleft" => Some(Command::Move(Direction::Left)),
            "right" | "moveright" => Some(Command::Move(Direction::Right)),
            "down" | "movedown" => Some(Command::Move(Direction::Down)),
            "rotate" => Some(Command::Rotate),
            "drop" | "harddrop" => Some(Command::HardDrop),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Command::StartGame => "start",
            Command::TogglePause => "pause",
            Command::Move(Direction::Left) => "left",
            Command::Move(Direction::Right) => "right",
            Command::Move(Direction::Down) => "down",
            Command::Rotate => "rotate",
            Command::HardDrop => "drop",
        }
    }

    /// Whether this command is accepted outside the running phase.
    pub fn is_session_control(&self) -> bool {
        matches!(self, Command::StartGame | Command::TogglePause)
    }
}

/// Session lifecycle
///
/// `Idle` → `Running` ⇄ `Paused`, `Running` → `GameOver`; only a new
/// start leaves `GameOver`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    #[default]
    Idle,
    Running,
    Paused,
    GameOver,
}

impl Phase {
    /// True from a start until game over, including while paused.
    pub fn is_playing(&self) -> bool {
        matches!(self, Phase::Running | Phase::Paused)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Running => "running",
            Phase::Paused => "paused",
            Phase::GameOver => "gameOver",
        }
    }
}

/// Result of a single move attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The piece shifted by one cell
    Moved,
    /// The piece could not descend and was written into the board
    Locked,
    /// The command had no effect
    Rejected,
}

/// Core-side event emitted after a piece locks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockEvent {
    pub lines_cleared: u32,
    pub line_clear_score: u32,
    pub level_up: bool,
    pub game_over: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_offsets() {
        assert_eq!(Direction::Left.offset(), (-1, 0));
        assert_eq!(Direction::Right.offset(), (1, 0));
        assert_eq!(Direction::Down.offset(), (0, 1));
    }

    #[test]
    fn test_command_names_roundtrip() {
        let all = [
            Command::StartGame,
            Command::TogglePause,
            Command::Move(Direction::Left),
            Command::Move(Direction::Right),
            Command::Move(Direction::Down),
            Command::Rotate,
            Command::HardDrop,
        ];
        for command in all {
            assert_eq!(Command::from_str(command.as_str()), Some(command));
        }
    }

    #[test]
    fn test_session_control_commands() {
        assert!(Command::StartGame.is_session_control());
        assert!(Command::TogglePause.is_session_control());
        assert!(!Command::Rotate.is_session_control());
        assert!(!Command::Move(Direction::Down).is_session_control());
    }

    #[test]
    fn test_phase_is_playing() {
        assert!(!Phase::Idle.is_playing());
        assert!(Phase::Running.is_playing());
        assert!(Phase::Paused.is_playing());
        assert!(!Phase::GameOver.is_playing());
    }

    #[test]
    fn test_color_hex() {
        let color = Color::rgb(0x0EA5E9);
        assert_eq!(color.to_string(), "#0ea5e9");
        assert_eq!(Color::from_hex("#0EA5E9"), Some(color));
        assert_eq!(Color::from_hex("0ea5e9"), Some(color));
        assert_eq!(Color::from_hex("#fff"), None);
        assert_eq!(Color::from_hex("#zzzzzz"), None);
    }

    #[test]
    fn test_color_serializes_as_hex_string() {
        let json = serde_json::to_string(&Some(Color::rgb(0xF97316))).unwrap();
        assert_eq!(json, "\"#f97316\"");

        let back: Cell = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Some(Color::rgb(0xF97316)));

        let empty: Cell = serde_json::from_str("null").unwrap();
        assert_eq!(empty, None);
    }

    #[test]
    fn test_command_serde_shape() {
        assert_eq!(
            serde_json::to_string(&Command::Move(Direction::Left)).unwrap(),
            "{\"move\":\"left\"}"
        );
        assert_eq!(
            serde_json::to_string(&Command::HardDrop).unwrap(),
            "\"hardDrop\""
        );
    }
}
