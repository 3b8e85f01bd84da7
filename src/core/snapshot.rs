//! Plain-data snapshot of the game for the render sink.
//!
//! Observers read these instead of the live state, so the rule engine keeps
//! zero dependency on any drawing API. `GameState::snapshot_into` fills an
//! existing snapshot without allocating.

use crate::core::game::ActivePiece;
use crate::core::pieces::Shape;
use crate::types::{ColorId, BOARD_COLS, BOARD_ROWS};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveSnapshot {
    pub shape: Shape,
    pub color: ColorId,
    pub row: i8,
    pub col: i8,
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            shape: value.shape,
            color: value.color,
            row: value.row,
            col: value.col,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameSnapshot {
    /// Locked cells: 0 = empty, 1..=7 = color code.
    pub board: [[u8; BOARD_COLS as usize]; BOARD_ROWS as usize],
    pub active: Option<ActiveSnapshot>,
    pub score: u32,
    pub game_over: bool,
    pub seed: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[0u8; BOARD_COLS as usize]; BOARD_ROWS as usize];
        self.active = None;
        self.score = 0;
        self.game_over = false;
        self.seed = 0;
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_COLS as usize]; BOARD_ROWS as usize],
            active: None,
            score: 0,
            game_over: false,
            seed: 0,
        }
    }
}
