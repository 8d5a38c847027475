//! Game state module - owns the complete session
//!
//! This module ties together all core components: board, catalog, piece source,
//! and scoring. It handles the active-piece lifecycle, movement, rotation, the
//! lock sequence (merge, clear, score, spawn) and the session phase machine.
//!
//! Every mutation goes through the command methods below; illegal commands are
//! silent no-ops rather than errors.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::collision::{collides, merge_into_board};
use crate::pieces::{definition, rotate_shape, spawn_position, Shape};
use crate::rng::{PieceSource, UniformPicker};
use crate::scoring::{fall_interval_ms, hard_drop_score, line_clear_score, should_level_up};
use crate::snapshot::{ActiveSnapshot, GameSnapshot, PreviewSnapshot};
use crate::types::*;

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    /// Current orientation; differs from the catalog after rotation
    pub shape: Shape,
    pub color: Color,
    /// Top-left anchor of `shape` in board coordinates
    pub x: i16,
    pub y: i16,
}

impl ActivePiece {
    /// Create a piece of `kind` at the spawn anchor of a board `board_width` wide
    pub fn spawn(kind: PieceKind, board_width: u8) -> Self {
        let def = definition(kind);
        let (x, y) = spawn_position(board_width);
        Self {
            kind,
            shape: def.shape,
            color: def.color,
            x,
            y,
        }
    }

    pub fn shifted(&self, dx: i16, dy: i16) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    pub fn with_shape(&self, shape: Shape) -> Self {
        Self { shape, ..*self }
    }
}

/// Final counters of a session, handed to whoever keeps high scores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub score: u32,
    pub level: u32,
    pub lines: u32,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState<S = UniformPicker> {
    board: Board,
    active: Option<ActivePiece>,
    /// Buffered kind that becomes active after the next lock
    next: Option<PieceKind>,
    source: S,
    phase: Phase,
    score: u32,
    level: u32,
    lines: u32,
    /// Monotonic session id (increments on every start).
    session_id: u32,
    /// Pieces spawned in this session.
    piece_id: u32,
    /// Last lock event (consumed by observers).
    last_event: Option<LockEvent>,
}

impl GameState<UniformPicker> {
    /// Create an idle 10x20 game with a uniform piece source
    pub fn new(seed: u32) -> Self {
        Self::with_source(
            DEFAULT_BOARD_WIDTH,
            DEFAULT_BOARD_HEIGHT,
            UniformPicker::new(seed),
        )
    }
}

impl Default for GameState<UniformPicker> {
    fn default() -> Self {
        Self::new(1)
    }
}

impl<S: PieceSource> GameState<S> {
    /// Create an idle game on a `width x height` board
    pub fn with_source(width: u8, height: u8, source: S) -> Self {
        Self {
            board: Board::new(width, height),
            active: None,
            next: None,
            source,
            phase: Phase::Idle,
            score: 0,
            level: STARTING_LEVEL,
            lines: 0,
            session_id: 0,
            piece_id: 0,
            last_event: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn is_playing(&self) -> bool {
        self.phase.is_playing()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn session_id(&self) -> u32 {
        self.session_id
    }

    pub fn piece_id(&self) -> u32 {
        self.piece_id
    }

    pub fn next_piece(&self) -> Option<PieceKind> {
        self.next
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            score: self.score,
            level: self.level,
            lines: self.lines,
        }
    }

    /// Automatic fall interval for the current level
    pub fn fall_interval_ms(&self) -> u32 {
        fall_interval_ms(self.level)
    }

    /// Reset everything and start a session on an empty board of the same size
    pub fn start_game(&mut self) {
        let board = Board::new(self.board.width(), self.board.height());
        self.start_game_on(board);
    }

    /// Start a session on a prepared board (practice layouts, scenarios)
    pub fn start_game_on(&mut self, board: Board) {
        self.board = board;
        self.active = None;
        self.score = 0;
        self.level = STARTING_LEVEL;
        self.lines = 0;
        self.piece_id = 0;
        self.last_event = None;
        self.session_id = self.session_id.wrapping_add(1);
        self.phase = Phase::Running;

        let first = self.source.pick_next_type();
        let second = self.source.pick_next_type();
        self.next = Some(second);
        self.spawn_piece(first);
    }

    /// Toggle `Running` ⇄ `Paused`; no-op in any other phase
    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            Phase::Running => {
                self.phase = Phase::Paused;
                true
            }
            Phase::Paused => {
                self.phase = Phase::Running;
                true
            }
            Phase::Idle | Phase::GameOver => false,
        }
    }

    /// Place a fresh piece of `kind` at the spawn anchor.
    ///
    /// If it would overlap the board the session ends instead.
    fn spawn_piece(&mut self, kind: PieceKind) -> bool {
        let piece = ActivePiece::spawn(kind, self.board.width());

        if collides(&piece, &self.board, (0, 0)) {
            self.active = None;
            self.phase = Phase::GameOver;
            return false;
        }

        self.active = Some(piece);
        self.piece_id = self.piece_id.wrapping_add(1);
        true
    }

    /// Shift the active piece one cell, locking it when it cannot descend
    pub fn attempt_move(&mut self, direction: Direction) -> MoveOutcome {
        if self.phase != Phase::Running {
            return MoveOutcome::Rejected;
        }
        let Some(active) = self.active else {
            return MoveOutcome::Rejected;
        };

        let (dx, dy) = direction.offset();
        if !collides(&active, &self.board, (dx, dy)) {
            self.active = Some(active.shifted(dx, dy));
            return MoveOutcome::Moved;
        }

        if direction == Direction::Down {
            self.lock_piece(active);
            return MoveOutcome::Locked;
        }

        MoveOutcome::Rejected
    }

    /// One automatic fall step
    pub fn tick(&mut self) -> MoveOutcome {
        self.attempt_move(Direction::Down)
    }

    /// Rotate the active piece clockwise in place; no kicks.
    ///
    /// Returns false when the turn is blocked or leaves the shape as it was.
    pub fn rotate(&mut self) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let rotated = active.with_shape(rotate_shape(&active.shape));
        if rotated.shape == active.shape || collides(&rotated, &self.board, (0, 0)) {
            return false;
        }

        self.active = Some(rotated);
        true
    }

    /// Drop the active piece until it locks; returns the rows descended
    pub fn hard_drop(&mut self) -> u32 {
        let mut rows: u32 = 0;
        while self.attempt_move(Direction::Down) == MoveOutcome::Moved {
            rows += 1;
            self.score = self.score.saturating_add(hard_drop_score(1));
        }
        rows
    }

    /// Merge, clear, score and spawn the buffered piece
    fn lock_piece(&mut self, piece: ActivePiece) {
        let merged = merge_into_board(&piece, &self.board);
        let (board, lines_cleared) = merged.clear_full_lines();
        self.board = board;
        self.active = None;

        let gained = line_clear_score(lines_cleared, self.level);
        self.score = self.score.saturating_add(gained);
        self.lines = self.lines.saturating_add(lines_cleared);

        let level_up = should_level_up(lines_cleared, self.lines, self.level);
        if level_up {
            self.level += 1;
        }

        let kind = match self.next.take() {
            Some(kind) => kind,
            None => self.source.pick_next_type(),
        };
        let spawned = self.spawn_piece(kind);
        self.next = if spawned {
            Some(self.source.pick_next_type())
        } else {
            Some(kind)
        };

        self.last_event = Some(LockEvent {
            lines_cleared,
            line_clear_score: gained,
            level_up,
            game_over: !spawned,
        });
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Apply a command; returns whether anything changed
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::StartGame => {
                self.start_game();
                true
            }
            Command::TogglePause => self.toggle_pause(),
            Command::Move(direction) => self.attempt_move(direction) != MoveOutcome::Rejected,
            Command::Rotate => self.rotate(),
            Command::HardDrop => {
                let accepted = self.phase == Phase::Running && self.active.is_some();
                if accepted {
                    self.hard_drop();
                }
                accepted
            }
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.board.width();
        out.height = self.board.height();
        out.board = self.board.to_rows();
        out.active = self.active.map(ActiveSnapshot::from);
        out.next = self.next.map(PreviewSnapshot::from);
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.phase = self.phase;
        out.paused = self.paused();
        out.game_over = self.game_over();
        out.is_playing = self.is_playing();
        out.session_id = self.session_id;
        out.piece_id = self.piece_id;
        out.fall_interval_ms = self.fall_interval_ms();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
