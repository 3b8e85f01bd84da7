//! Game state module - the collision engine and turn controller.
//!
//! Ties together the board, the piece catalog, and the dealer. All game
//! state lives in one exclusively-owned aggregate; mutations surface a
//! consumable [`LockEvent`] so observers need no hook into the internals.

use crate::core::pieces::Shape;
use crate::core::{Board, PieceDealer};
use crate::types::{ColorId, Command, BOARD_COLS, POINTS_PER_ROW};

/// The currently falling piece.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActivePiece {
    pub shape: Shape,
    pub color: ColorId,
    /// Grid row of the shape's top-left matrix cell.
    pub row: i8,
    /// Grid column of the shape's top-left matrix cell.
    pub col: i8,
}

impl ActivePiece {
    /// Place a new piece at the spawn position: row 0, horizontally centered.
    ///
    /// Centering uses integer floor division and may sit one column left of
    /// true center for odd width differences.
    fn at_spawn(shape: Shape, color: ColorId) -> Self {
        Self {
            shape,
            color,
            row: 0,
            col: ((BOARD_COLS - shape.cols()) / 2) as i8,
        }
    }
}

/// Outcome of a lock/clear/spawn sequence (consumed by observers).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    /// Rows cleared by this lock.
    pub rows_cleared: usize,
    /// Points awarded for those rows.
    pub score_delta: u32,
    /// Total score after the lock.
    pub score: u32,
    /// Whether the follow-up spawn collided and ended the game.
    pub game_over: bool,
}

/// Complete game state.
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    active: Option<ActivePiece>,
    dealer: PieceDealer,
    score: u32,
    game_over: bool,
    started: bool,
    /// Last lock/clear outcome (consumed by observers).
    last_event: Option<LockEvent>,
}

impl GameState {
    /// Create a new game with the given RNG seed.
    pub fn new(seed: u32) -> Self {
        Self {
            board: Board::new(),
            active: None,
            dealer: PieceDealer::new(seed),
            score: 0,
            game_over: false,
            started: false,
            last_event: None,
        }
    }

    /// Start the game and spawn the first piece.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.spawn_piece();
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct grid access, for scenario setup and tests.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Take and clear the last lock/clear event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    pub fn snapshot_into(&self, out: &mut crate::core::snapshot::GameSnapshot) {
        use crate::core::snapshot::ActiveSnapshot;

        self.board.write_u8_grid(&mut out.board);
        out.active = self.active.map(ActiveSnapshot::from);
        out.score = self.score;
        out.game_over = self.game_over;
        out.seed = self.dealer.seed();
    }

    pub fn snapshot(&self) -> crate::core::snapshot::GameSnapshot {
        let mut s = crate::core::snapshot::GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Spawn a new piece with uniform-random shape and color.
    ///
    /// Spawning itself never collision-checks; the spawn position is
    /// validated immediately afterwards and a collision ends the game.
    /// Returns false on game over.
    pub fn spawn_piece(&mut self) -> bool {
        let shape = self.dealer.draw_kind().template();
        let color = self.dealer.draw_color();
        let piece = ActivePiece::at_spawn(shape, color);

        self.active = Some(piece);

        if !self.can_place(&piece.shape, piece.row, piece.col) {
            // The overlapping piece stays visible; only restart recovers.
            self.game_over = true;
            return false;
        }

        true
    }

    /// Check whether a shape fits at the given anchor.
    fn can_place(&self, shape: &Shape, row: i8, col: i8) -> bool {
        shape
            .cells()
            .all(|(dr, dc)| self.board.is_open(row + dr, col + dc))
    }

    /// Check whether the active piece can move by the given offset.
    pub fn can_move(&self, drow: i8, dcol: i8) -> bool {
        match self.active {
            Some(active) => self.can_place(&active.shape, active.row + drow, active.col + dcol),
            None => false,
        }
    }

    /// Check whether an alternate shape fits at the active piece's position,
    /// offset by (drow, dcol). Used to validate rotations at offset (0, 0).
    pub fn can_move_shape(&self, drow: i8, dcol: i8, shape: &Shape) -> bool {
        match self.active {
            Some(active) => self.can_place(shape, active.row + drow, active.col + dcol),
            None => false,
        }
    }

    /// Try to move the active piece. Rejected moves leave it unchanged.
    pub(crate) fn try_move(&mut self, drow: i8, dcol: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        if !self.can_move(drow, dcol) {
            return false;
        }

        self.active = Some(ActivePiece {
            row: active.row + drow,
            col: active.col + dcol,
            ..active
        });
        true
    }

    /// Try to rotate the active piece clockwise.
    ///
    /// The rotated matrix is validated in place; on collision the piece
    /// keeps its prior shape.
    pub(crate) fn try_rotate(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let rotated = active.shape.rotated_cw();
        if !self.can_move_shape(0, 0, &rotated) {
            return false;
        }

        self.active = Some(ActivePiece {
            shape: rotated,
            ..active
        });
        true
    }

    /// One gravity step: descend if possible, otherwise lock.
    fn step_down(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        if self.try_move(1, 0) {
            return true;
        }

        self.lock_active(active);
        true
    }

    /// Lock the active piece, clear full rows, score, and spawn the next
    /// piece. A blocked spawn flips the game into game-over.
    fn lock_active(&mut self, piece: ActivePiece) {
        self.board
            .lock_shape(&piece.shape, piece.row, piece.col, piece.color);
        self.active = None;

        let rows_cleared = self.board.clear_full_rows();
        let score_delta = POINTS_PER_ROW * rows_cleared as u32;
        self.score += score_delta;

        let spawned = self.spawn_piece();

        self.last_event = Some(LockEvent {
            rows_cleared,
            score_delta,
            score: self.score,
            game_over: !spawned,
        });
    }

    /// One externally-scheduled gravity tick.
    ///
    /// The host owns the cadence; this method never re-arms a timer. Returns
    /// false when the tick was ignored (not started or game over).
    pub fn tick(&mut self) -> bool {
        if !self.started || self.game_over {
            return false;
        }
        self.step_down()
    }

    /// Apply a player command. Everything except restart is rejected while
    /// game over; rejected moves and rotations are silent no-ops.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::Restart => {
                self.restart();
                true
            }
            _ if !self.started || self.game_over => false,
            Command::MoveLeft => self.try_move(0, -1),
            Command::MoveRight => self.try_move(0, 1),
            Command::SoftDrop => self.step_down(),
            Command::Rotate => self.try_rotate(),
        }
    }

    /// Reset to a fresh game: empty grid, zero score, new spawn.
    ///
    /// The dealer keeps its stream position, so consecutive games differ.
    pub fn restart(&mut self) {
        self.board.reset();
        self.active = None;
        self.score = 0;
        self.game_over = false;
        self.started = true;
        self.last_event = None;
        self.spawn_piece();
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pieces::Shape;
    use crate::types::{PieceKind, BOARD_ROWS};

    fn started(seed: u32) -> GameState {
        let mut state = GameState::new(seed);
        state.start();
        state
    }

    /// Force a specific active piece, bypassing the dealer.
    fn force_active(state: &mut GameState, shape: Shape, row: i8, col: i8) {
        state.active = Some(ActivePiece {
            shape,
            color: ColorId::Red,
            row,
            col,
        });
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(12345);

        assert!(!state.started());
        assert!(!state.game_over());
        assert_eq!(state.score(), 0);
        assert!(state.active().is_none());
    }

    #[test]
    fn test_start_spawns_at_top_centered() {
        let state = started(12345);

        let active = state.active().unwrap();
        assert_eq!(active.row, 0);
        assert_eq!(
            active.col,
            ((BOARD_COLS - active.shape.cols()) / 2) as i8
        );
    }

    #[test]
    fn test_spawn_columns_per_width() {
        // floor((10 - w) / 2) for each catalog width.
        for (kind, expected_col) in [
            (PieceKind::I, 3), // width 4
            (PieceKind::O, 4), // width 2
            (PieceKind::T, 3), // width 3
        ] {
            let piece = ActivePiece::at_spawn(kind.template(), ColorId::Red);
            assert_eq!(piece.col, expected_col, "{}", kind.as_str());
            assert_eq!(piece.row, 0);
        }
    }

    #[test]
    fn test_move_left_right_until_wall() {
        let mut state = started(12345);

        let mut moved = 0;
        while state.apply(Command::MoveLeft) {
            moved += 1;
        }
        assert!(moved <= BOARD_COLS, "piece escaped the left wall");
        assert_eq!(state.active().unwrap().col, 0);

        // Next left is rejected and the piece is unchanged.
        let before = state.active().unwrap();
        assert!(!state.apply(Command::MoveLeft));
        assert_eq!(state.active().unwrap(), before);
    }

    #[test]
    fn test_move_into_occupied_cell_rejected() {
        let mut state = started(12345);
        force_active(&mut state, PieceKind::O.template(), 5, 4);

        // Occupy the cell just right of the piece footprint.
        state.board_mut().set(5, 6, Some(ColorId::Blue));

        let before = state.active().unwrap();
        assert!(!state.apply(Command::MoveRight));
        assert_eq!(state.active().unwrap(), before);

        // Left is still fine.
        assert!(state.apply(Command::MoveLeft));
    }

    #[test]
    fn test_rotate_swaps_shape_dimensions() {
        let mut state = started(12345);
        force_active(&mut state, PieceKind::I.template(), 5, 3);

        assert!(state.apply(Command::Rotate));
        let shape = state.active().unwrap().shape;
        assert_eq!((shape.rows(), shape.cols()), (4, 1));
    }

    #[test]
    fn test_rotate_rejected_keeps_prior_shape() {
        let mut state = started(12345);

        // A horizontal I whose vertical footprint would land on occupied
        // cells: rotation targets rows 10..=13 at column 3.
        force_active(&mut state, PieceKind::I.template(), 10, 3);
        for row in 11..=13 {
            state.board_mut().set(row, 3, Some(ColorId::Green));
        }

        let before = state.active().unwrap().shape;
        assert!(!state.apply(Command::Rotate));
        assert_eq!(state.active().unwrap().shape, before);
    }

    #[test]
    fn test_soft_drop_descends_one_row() {
        let mut state = started(12345);
        let before = state.active().unwrap().row;

        assert!(state.apply(Command::SoftDrop));
        assert_eq!(state.active().unwrap().row, before + 1);
    }

    #[test]
    fn test_blocked_descent_locks_and_spawns() {
        let mut state = started(12345);
        force_active(&mut state, PieceKind::O.template(), 18, 4);

        // On the floor: the next descent locks instead of moving.
        assert!(state.tick());
        let event = state.take_last_event().unwrap();
        assert_eq!(event.rows_cleared, 0);
        assert_eq!(event.score_delta, 0);
        assert!(!event.game_over);

        // Locked cells are on the board and a fresh piece spawned at row 0.
        assert_eq!(state.board().get(19, 4), Some(Some(ColorId::Red)));
        assert_eq!(state.active().unwrap().row, 0);
    }

    #[test]
    fn test_lock_clearing_row_scores() {
        let mut state = started(12345);

        // Row 19 full except the two columns an O piece will fill.
        for col in 0..BOARD_COLS as i8 {
            if col != 4 && col != 5 {
                state.board_mut().set(19, col, Some(ColorId::Cyan));
            }
        }

        // A 1x2 bar locking into the gap completes exactly row 19.
        let bar = Shape::from_rows(&[&[true, true]]);
        force_active(&mut state, bar, 19, 4);

        assert!(state.tick());
        let event = state.take_last_event().unwrap();
        assert_eq!(event.rows_cleared, 1);
        assert_eq!(event.score_delta, POINTS_PER_ROW);
        assert_eq!(state.score(), POINTS_PER_ROW);

        // The cleared row shifted out; row 19 is empty again.
        for col in 0..BOARD_COLS as i8 {
            assert_eq!(state.board().get(19, col), Some(None));
        }
    }

    #[test]
    fn test_blocked_spawn_ends_game() {
        let mut state = started(12345);

        // Wall off the top rows so any spawn collides.
        for col in 0..BOARD_COLS as i8 {
            for row in 0..2 {
                state.board_mut().set(row, col, Some(ColorId::White));
            }
        }

        assert!(!state.spawn_piece());
        assert!(state.game_over());
    }

    #[test]
    fn test_commands_rejected_while_game_over() {
        let mut state = started(12345);
        state.game_over = true;

        assert!(!state.apply(Command::MoveLeft));
        assert!(!state.apply(Command::MoveRight));
        assert!(!state.apply(Command::SoftDrop));
        assert!(!state.apply(Command::Rotate));
        assert!(!state.tick());
    }

    #[test]
    fn test_score_preserved_until_restart() {
        let mut state = started(12345);
        state.score = 300;
        state.game_over = true;

        assert_eq!(state.score(), 300);

        state.apply(Command::Restart);
        assert_eq!(state.score(), 0);
        assert!(!state.game_over());
        assert!(state.active().is_some());
        assert!(state.board().cells().iter().all(|cell| cell.is_none()));
    }

    #[test]
    fn test_restart_empties_board() {
        let mut state = started(12345);
        state.board_mut().set(10, 3, Some(ColorId::Magenta));
        state.game_over = true;

        state.restart();

        let active = state.active().unwrap();
        assert_eq!(active.row, 0);
        for row in 0..BOARD_ROWS as i8 {
            for col in 0..BOARD_COLS as i8 {
                assert_eq!(state.board().get(row, col), Some(None));
            }
        }
    }

    #[test]
    fn test_tick_before_start_is_ignored() {
        let mut state = GameState::new(12345);
        assert!(!state.tick());
        assert!(!state.apply(Command::SoftDrop));
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut state = started(12345);
        state.board_mut().set(19, 0, Some(ColorId::Blue));
        state.score = 200;

        let snap = state.snapshot();
        assert_eq!(snap.board[19][0], ColorId::Blue.code());
        assert_eq!(snap.score, 200);
        assert!(!snap.game_over);
        assert!(snap.active.is_some());
    }
}
