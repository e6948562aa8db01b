//! Game state module - manages the complete game state
//!
//! This module ties together all core components: board, pieces, piece source
//! and scoring. It owns the spawn → fall → lock → line-clear → respawn cycle.
//! Nothing here schedules time: drivers call [`GameState::tick`] at the
//! interval reported by [`GameState::drop_interval_ms`].

use crate::board::Board;
use crate::pieces::{base_shape, spawn_column, try_rotate, Shape};
use crate::rng::{PieceSource, SimpleRng};
use crate::scoring::{calculate_level, line_clear_score, GravityConfig};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::*;

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub shape: Shape,
    pub col: i8,
    pub row: i8,
}

impl Tetromino {
    /// Create a new tetromino centered on the top row
    pub fn new(kind: PieceKind) -> Self {
        let shape = base_shape(kind);
        Self {
            kind,
            shape,
            col: spawn_column(&shape),
            row: 0,
        }
    }

    /// Absolute (col, row) of every occupied cell
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .offsets()
            .map(move |(dc, dr)| (self.col + dc, self.row + dr))
    }

    /// Check if all minos are at valid positions on the board
    pub fn is_valid(&self, board: &Board) -> bool {
        board.is_valid_position(&self.shape, self.col, self.row)
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState<R = SimpleRng> {
    board: Board,
    active: Option<Tetromino>,
    next: PieceKind,
    source: R,
    gravity: GravityConfig,
    /// Monotonic episode id (increments on restart).
    episode_id: u32,
    /// Count of successful spawns in this episode.
    piece_id: u32,
    /// Last lock/game-over outcome (consumed by drivers).
    last_event: Option<StepOutcome>,
    score: u32,
    level: u32,
    lines: u32,
    paused: bool,
    game_over: bool,
    started: bool,
}

impl<R: PieceSource> GameState<R> {
    /// Create a new game drawing pieces from `source`
    pub fn new(source: R) -> Self {
        Self::with_gravity(source, GravityConfig::default())
    }

    pub fn with_gravity(source: R, gravity: GravityConfig) -> Self {
        Self::from_board(Board::new(), source, gravity)
    }

    /// Create a game on top of a pre-filled board (puzzle or garbage starts).
    pub fn from_board(board: Board, mut source: R, gravity: GravityConfig) -> Self {
        let next = source.next_kind();
        Self {
            board,
            active: None,
            next,
            source,
            gravity,
            episode_id: 0,
            piece_id: 0,
            last_event: None,
            score: 0,
            level: 1,
            lines: 0,
            paused: false,
            game_over: false,
            started: false,
        }
    }

    /// Start the game and spawn the first piece
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        if !self.spawn_piece() {
            self.last_event = Some(StepOutcome::GameOver);
        }
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// Started, not paused and not over.
    pub fn running(&self) -> bool {
        self.started && !self.paused && !self.game_over
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn piece_id(&self) -> u32 {
        self.piece_id
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

    pub fn next_kind(&self) -> PieceKind {
        self.next
    }

    pub fn active(&self) -> Option<Tetromino> {
        self.active
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn gravity(&self) -> GravityConfig {
        self.gravity
    }

    #[cfg(test)]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);

        out.active = self
            .active
            .zip(self.active_cells())
            .map(|(piece, cells)| ActiveSnapshot {
                kind: piece.kind,
                col: piece.col,
                row: piece.row,
                cells,
            });
        out.ghost_row = self.ghost_row();
        out.next = Some(self.next);
        out.started = self.started;
        out.paused = self.paused;
        out.game_over = self.game_over;
        out.episode_id = self.episode_id;
        out.piece_id = self.piece_id;
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.drop_interval_ms = self.drop_interval_ms();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Check whether `shape` fits with its top-left corner at (col, row)
    pub fn is_valid_position(&self, shape: &Shape, col: i8, row: i8) -> bool {
        self.board.is_valid_position(shape, col, row)
    }

    /// Promote the next kind to the active piece and draw a new next kind.
    ///
    /// Returns false (and ends the game) when the centered spawn position
    /// overlaps the stack. The board is never touched in that case.
    pub fn spawn_piece(&mut self) -> bool {
        let kind = self.next;
        self.next = self.source.next_kind();

        let piece = Tetromino::new(kind);
        if !piece.is_valid(&self.board) {
            self.active = None;
            self.game_over = true;
            return false;
        }

        self.active = Some(piece);
        self.piece_id = self.piece_id.wrapping_add(1);
        true
    }

    /// Get current drop interval based on level
    pub fn drop_interval_ms(&self) -> u32 {
        self.gravity.interval_ms(self.level)
    }

    /// Try to move the active piece
    pub fn try_move(&mut self, dcol: i8, drow: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let col = active.col + dcol;
        let row = active.row + drow;
        if !self.board.is_valid_position(&active.shape, col, row) {
            return false;
        }

        self.active = Some(Tetromino { col, row, ..active });
        true
    }

    /// Try to rotate the active piece clockwise with wall kicks
    pub fn rotate(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let result = try_rotate(&active.shape, active.col, active.row, |shape, c, r| {
            self.board.is_valid_position(shape, c, r)
        });

        match result {
            Some((shape, col)) => {
                self.active = Some(Tetromino { shape, col, ..active });
                true
            }
            None => false,
        }
    }

    /// Drop the active piece as far as it goes and lock it
    pub fn hard_drop(&mut self) -> StepOutcome {
        if self.active.is_none() {
            return StepOutcome::Idle;
        }
        while self.try_move(0, 1) {}
        self.settle()
    }

    /// Write the active piece into the board.
    ///
    /// Cells above the top edge are discarded.
    pub fn lock_piece(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };
        self.board
            .lock_shape(&active.shape, active.col, active.row, active.kind);
    }

    /// Remove full rows and return how many were removed
    pub fn clear_lines(&mut self) -> u32 {
        self.board.clear_full_rows().len() as u32
    }

    /// Award points for a clear at the current level, then advance lines and level
    pub fn apply_score(&mut self, lines_cleared: u32) {
        self.score = self
            .score
            .saturating_add(line_clear_score(lines_cleared, self.level));
        self.lines = self.lines.saturating_add(lines_cleared);
        self.level = calculate_level(self.lines);
    }

    /// Lock, clear, score and spawn the next piece.
    fn settle(&mut self) -> StepOutcome {
        self.lock_piece();
        let lines = self.clear_lines();
        self.apply_score(lines);

        let outcome = if self.spawn_piece() {
            StepOutcome::Locked { lines }
        } else {
            StepOutcome::GameOver
        };
        self.last_event = Some(outcome);
        outcome
    }

    /// Take and clear the last lock/game-over event.
    pub fn take_last_event(&mut self) -> Option<StepOutcome> {
        self.last_event.take()
    }

    /// Absolute (col, row) of the active piece's cells.
    pub fn active_cells(&self) -> Option<[(i8, i8); 4]> {
        let piece = self.active?;
        let mut cells = [(0i8, 0i8); 4];
        for (slot, cell) in cells.iter_mut().zip(piece.cells()) {
            *slot = cell;
        }
        Some(cells)
    }

    /// Row the active piece would land on
    pub fn ghost_row(&self) -> Option<i8> {
        let active = self.active?;
        let mut row = active.row;
        while self
            .board
            .is_valid_position(&active.shape, active.col, row + 1)
        {
            row += 1;
        }
        Some(row)
    }

    /// Gravity step: fall one row, or lock and continue with the next piece
    pub fn tick(&mut self) -> StepOutcome {
        if !self.running() || self.active.is_none() {
            return StepOutcome::Idle;
        }

        if self.try_move(0, 1) {
            return StepOutcome::Fell;
        }

        self.settle()
    }

    /// Apply a game action
    ///
    /// Returns whether the action changed anything. Movement is ignored while
    /// paused; after game over only `Restart` does anything.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Restart => {
                self.restart();
                return true;
            }
            GameAction::Quit => return false,
            _ => {}
        }

        if self.game_over || !self.started {
            return false;
        }

        if action == GameAction::Pause {
            self.paused = !self.paused;
            return true;
        }

        if self.paused {
            return false;
        }

        match action {
            GameAction::MoveLeft => self.try_move(-1, 0),
            GameAction::MoveRight => self.try_move(1, 0),
            GameAction::SoftDrop => self.try_move(0, 1),
            GameAction::RotateCw => self.rotate(),
            GameAction::HardDrop => self.hard_drop() != StepOutcome::Idle,
            GameAction::Pause | GameAction::Restart | GameAction::Quit => false,
        }
    }

    /// Reset to a fresh game with the same piece source and start it
    pub fn restart(&mut self) {
        let next_episode = self.episode_id.wrapping_add(1);
        self.board.clear();
        self.active = None;
        self.next = self.source.next_kind();
        self.episode_id = next_episode;
        self.piece_id = 0;
        self.last_event = None;
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.paused = false;
        self.game_over = false;
        self.started = false;
        self.start();
    }
}

impl Default for GameState<SimpleRng> {
    fn default() -> Self {
        Self::new(SimpleRng::new(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SequenceSource;
    use std::collections::BTreeSet;

    fn game_with(kinds: &[PieceKind]) -> GameState<SequenceSource> {
        let mut state = GameState::new(SequenceSource::new(kinds.iter().copied()));
        state.start();
        state
    }

    fn normalized(cells: impl Iterator<Item = (i8, i8)>) -> BTreeSet<(i8, i8)> {
        let v: Vec<_> = cells.collect();
        let min_c = v.iter().map(|c| c.0).min().unwrap();
        let min_r = v.iter().map(|c| c.1).min().unwrap();
        v.into_iter().map(|(c, r)| (c - min_c, r - min_r)).collect()
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(SimpleRng::new(12345));

        assert!(!state.started);
        assert!(!state.game_over);
        assert!(!state.paused);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.lines, 0);
        assert_eq!(state.episode_id, 0);
        assert!(state.active.is_none());
        assert_eq!(state.board.filled_count(), 0);
    }

    #[test]
    fn test_game_start_promotes_next() {
        let mut state = GameState::new(SequenceSource::new([PieceKind::T, PieceKind::O]));
        assert_eq!(state.next_kind(), PieceKind::T);

        state.start();
        assert!(state.started);
        assert_eq!(state.active.unwrap().kind, PieceKind::T);
        assert_eq!(state.next_kind(), PieceKind::O);
        assert_eq!(state.piece_id, 1);
    }

    #[test]
    fn test_start_twice_is_noop() {
        let mut state = game_with(&[PieceKind::T, PieceKind::O]);
        let active = state.active;
        state.start();
        assert_eq!(state.active, active);
        assert_eq!(state.piece_id, 1);
    }

    #[test]
    fn test_tetromino_new_centered() {
        let piece = Tetromino::new(PieceKind::I);
        assert_eq!(piece.col, 3);
        assert_eq!(piece.row, 0);

        let piece = Tetromino::new(PieceKind::O);
        assert_eq!(piece.col, 4);
    }

    #[test]
    fn test_try_move() {
        let mut state = game_with(&[PieceKind::T]);
        let initial_col = state.active.unwrap().col;

        assert!(state.try_move(1, 0));
        assert_eq!(state.active.unwrap().col, initial_col + 1);

        assert!(state.try_move(-1, 0));
        assert_eq!(state.active.unwrap().col, initial_col);
    }

    #[test]
    fn test_try_move_into_wall_is_rejected() {
        let mut state = game_with(&[PieceKind::O]);
        let mut moved = 0;
        for _ in 0..10 {
            if state.try_move(-1, 0) {
                moved += 1;
            }
        }
        // O spawns at column 4.
        assert_eq!(moved, 4);
        assert_eq!(state.active.unwrap().col, 0);
        assert!(!state.try_move(-1, 0));
    }

    #[test]
    fn test_move_up_above_board_is_allowed() {
        // Negative rows are free space.
        let mut state = game_with(&[PieceKind::T]);
        assert!(state.try_move(0, -1));
        assert_eq!(state.active.unwrap().row, -1);
    }

    #[test]
    fn test_rotate_in_open_space() {
        let mut state = game_with(&[PieceKind::T]);
        let before = state.active.unwrap();

        assert!(state.rotate());
        let after = state.active.unwrap();
        assert_eq!(after.shape, before.shape.rotate_cw());
        assert_eq!(after.col, before.col);
        assert_eq!(after.row, before.row);
    }

    #[test]
    fn test_rotate_kicks_off_right_wall() {
        let mut state = game_with(&[PieceKind::I]);
        // Vertical I against the right wall.
        assert!(state.rotate());
        while state.try_move(1, 0) {}
        let vertical = state.active.unwrap();
        assert_eq!(vertical.col, 9);

        // Columns 9, 8, 10, 7 and 11 are all too far right for a 4-wide bar.
        state.try_move(0, 2);
        assert!(!state.rotate());
        assert_eq!(state.active.unwrap().shape, vertical.shape);
    }

    #[test]
    fn test_rotate_kick_succeeds_one_left() {
        let mut state = game_with(&[PieceKind::T]);
        // T rotated to vertical (2 wide) then pushed to the right wall.
        assert!(state.rotate());
        while state.try_move(1, 0) {}
        let pos = state.active.unwrap();
        assert_eq!(pos.col, 8);
        // Rotating back to 3-wide needs column 7.
        assert!(state.rotate());
        assert_eq!(state.active.unwrap().col, 7);
    }

    #[test]
    fn test_rotate_failure_is_silent() {
        let mut state = game_with(&[PieceKind::I]);
        let before = state.active.unwrap();
        // Wall everything below the bar so the vertical shape cannot fit anywhere.
        for row in 1..BOARD_HEIGHT as i8 {
            state.board_mut().fill_row(row, PieceKind::Z, &[]);
        }
        assert!(!state.rotate());
        assert_eq!(state.active.unwrap(), before);
    }

    #[test]
    fn test_rotate_four_times_restores_cells() {
        for kind in PieceKind::ALL {
            let mut state = game_with(&[kind]);
            state.try_move(0, 5);
            let before = normalized(state.active.unwrap().cells());
            for _ in 0..4 {
                assert!(state.rotate(), "{:?} failed to rotate", kind);
            }
            let after = normalized(state.active.unwrap().cells());
            assert_eq!(before, after, "{:?}", kind);
        }
    }

    #[test]
    fn test_lock_piece_writes_board() {
        let mut state = game_with(&[PieceKind::O]);
        while state.try_move(0, 1) {}
        state.lock_piece();

        assert!(state.active.is_none());
        assert_eq!(state.board.get(4, 19), Some(Some(PieceKind::O)));
        assert_eq!(state.board.get(5, 18), Some(Some(PieceKind::O)));
        assert_eq!(state.board.filled_count(), 4);
    }

    #[test]
    fn test_lock_piece_drops_cells_above_top() {
        let mut state = game_with(&[PieceKind::O]);
        state.try_move(0, -1);
        state.lock_piece();
        assert_eq!(state.board.filled_count(), 2);
    }

    #[test]
    fn test_clear_four_middle_rows() {
        let mut state = game_with(&[PieceKind::I]);
        for row in 5..=8 {
            state.board_mut().fill_row(row, PieceKind::L, &[]);
        }
        state.board_mut().set(2, 4, Some(PieceKind::T));
        state.board_mut().set(7, 9, Some(PieceKind::S));

        assert_eq!(state.clear_lines(), 4);

        // The cell above the cleared block moved down by four rows.
        assert_eq!(state.board.get(2, 8), Some(Some(PieceKind::T)));
        assert_eq!(state.board.get(2, 4), Some(None));
        // The cell below did not move.
        assert_eq!(state.board.get(7, 9), Some(Some(PieceKind::S)));
        assert_eq!(state.board.filled_count(), 2);

        let level = state.level;
        state.apply_score(4);
        assert_eq!(state.score, 1000 * level);
    }

    #[test]
    fn test_apply_score_uses_level_before_clear() {
        let mut state = game_with(&[PieceKind::I]);
        state.apply_score(4);
        state.apply_score(4);
        assert_eq!(state.lines, 8);
        assert_eq!(state.level, 1);
        assert_eq!(state.score, 2000);

        state.apply_score(3);
        assert_eq!(state.score, 2600);
        assert_eq!(state.level, 2);

        state.apply_score(1);
        assert_eq!(state.score, 2800);
    }

    #[test]
    fn test_apply_zero_lines_scores_nothing() {
        let mut state = game_with(&[PieceKind::I]);
        state.apply_score(0);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
    }

    #[test]
    fn test_level_depends_only_on_total_lines() {
        let mut singles = game_with(&[PieceKind::I]);
        for _ in 0..12 {
            singles.apply_score(1);
        }

        let mut tetrises = game_with(&[PieceKind::I]);
        for _ in 0..3 {
            tetrises.apply_score(4);
        }

        assert_eq!(singles.lines, tetrises.lines);
        assert_eq!(singles.level, tetrises.level);
        assert_eq!(singles.level, 2);
        assert_ne!(singles.score, tetrises.score);
    }

    #[test]
    fn test_tick_falls_then_locks_once() {
        let mut state = game_with(&[PieceKind::O, PieceKind::T]);

        let mut fell = 0;
        loop {
            match state.tick() {
                StepOutcome::Fell => fell += 1,
                StepOutcome::Locked { lines } => {
                    assert_eq!(lines, 0);
                    break;
                }
                other => panic!("unexpected outcome {:?}", other),
            }
        }

        // O is 2 tall: rows 0..=1 down to 18..=19.
        assert_eq!(fell, 18);
        assert!(!state.game_over);
        assert_eq!(state.active.unwrap().kind, PieceKind::T);
        assert_eq!(state.take_last_event(), Some(StepOutcome::Locked { lines: 0 }));
        assert_eq!(state.take_last_event(), None);
    }

    #[test]
    fn test_tick_clears_line_and_scores() {
        let mut state = game_with(&[PieceKind::I]);
        state.board_mut().fill_row(19, PieceKind::Z, &[3, 4, 5, 6]);

        let outcome = state.hard_drop();
        assert_eq!(outcome, StepOutcome::Locked { lines: 1 });
        assert_eq!(state.score, 100);
        assert_eq!(state.lines, 1);
        assert_eq!(state.board.filled_count(), 0);
    }

    #[test]
    fn test_spawn_overlap_is_game_over() {
        let mut state = GameState::new(SequenceSource::new([PieceKind::T]));
        state.board_mut().fill_row(0, PieceKind::J, &[0]);
        let before = state.board.clone();

        state.start();

        assert!(state.game_over);
        assert!(state.active.is_none());
        assert_eq!(state.board, before);
        assert_eq!(state.take_last_event(), Some(StepOutcome::GameOver));
    }

    #[test]
    fn test_stack_to_top_ends_game() {
        let mut state = game_with(&[PieceKind::O]);
        let mut outcome = StepOutcome::Idle;
        for _ in 0..20 {
            outcome = state.hard_drop();
            if outcome == StepOutcome::GameOver {
                break;
            }
        }
        assert_eq!(outcome, StepOutcome::GameOver);
        assert!(state.game_over);
        // Ten O pieces fill the centre columns.
        assert_eq!(state.board.filled_count(), 40);
        assert_eq!(state.tick(), StepOutcome::Idle);
    }

    #[test]
    fn test_ghost_row() {
        let mut state = game_with(&[PieceKind::I]);
        assert_eq!(state.ghost_row(), Some(19));
        state.board_mut().set(4, 10, Some(PieceKind::T));
        assert_eq!(state.ghost_row(), Some(9));
    }

    #[test]
    fn test_apply_action_move_and_rotate() {
        let mut state = game_with(&[PieceKind::T]);
        let col = state.active.unwrap().col;

        assert!(state.apply_action(GameAction::MoveLeft));
        assert_eq!(state.active.unwrap().col, col - 1);
        assert!(state.apply_action(GameAction::MoveRight));
        assert!(state.apply_action(GameAction::SoftDrop));
        assert_eq!(state.active.unwrap().row, 1);
        assert!(state.apply_action(GameAction::RotateCw));
        assert!(state.apply_action(GameAction::HardDrop));
        assert_eq!(state.board.filled_count(), 4);
    }

    #[test]
    fn test_pause_blocks_movement_and_gravity() {
        let mut state = game_with(&[PieceKind::T]);
        assert!(state.apply_action(GameAction::Pause));
        assert!(state.paused);

        let before = state.active;
        assert!(!state.apply_action(GameAction::MoveLeft));
        assert!(!state.apply_action(GameAction::HardDrop));
        assert_eq!(state.tick(), StepOutcome::Idle);
        assert_eq!(state.active, before);

        assert!(state.apply_action(GameAction::Pause));
        assert!(!state.paused);
        assert_eq!(state.tick(), StepOutcome::Fell);
    }

    #[test]
    fn test_game_over_only_accepts_restart() {
        let mut state = GameState::new(SequenceSource::new([PieceKind::T]));
        state.board_mut().fill_row(1, PieceKind::J, &[0]);
        state.start();
        assert!(state.game_over);

        assert!(!state.apply_action(GameAction::MoveLeft));
        assert!(!state.apply_action(GameAction::Pause));
        assert!(!state.apply_action(GameAction::Quit));

        assert!(state.apply_action(GameAction::Restart));
        assert!(!state.game_over);
        assert_eq!(state.board.filled_count(), 0);
        assert!(state.active.is_some());
    }

    #[test]
    fn test_restart_resets_progress() {
        let mut state = game_with(&[PieceKind::I]);
        state.apply_score(12);
        state.hard_drop();
        assert!(state.score > 0);

        assert!(state.apply_action(GameAction::Restart));
        assert_eq!(state.score, 0);
        assert_eq!(state.lines, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.episode_id, 1);
        assert_eq!(state.piece_id, 1);
        assert!(state.started);
        assert_eq!(state.board.filled_count(), 0);
    }

    #[test]
    fn test_drop_interval_follows_level() {
        let mut state = game_with(&[PieceKind::I]);
        assert_eq!(state.drop_interval_ms(), INITIAL_SPEED_MS);
        state.apply_score(4);
        state.apply_score(4);
        state.apply_score(2);
        assert_eq!(state.level, 2);
        assert_eq!(state.drop_interval_ms(), INITIAL_SPEED_MS - LEVEL_SPEED_STEP_MS);
    }

    #[test]
    fn test_active_cells_follow_moves() {
        let mut state = game_with(&[PieceKind::O]);
        assert_eq!(state.active_cells(), Some([(4, 0), (5, 0), (4, 1), (5, 1)]));
        state.try_move(-1, 2);
        assert_eq!(state.active_cells(), Some([(3, 2), (4, 2), (3, 3), (4, 3)]));

        state.lock_piece();
        assert_eq!(state.active_cells(), None);
    }

    #[test]
    fn test_snapshot_reports_active_cells() {
        let state = game_with(&[PieceKind::I, PieceKind::O]);
        let snap = state.snapshot();

        let active = snap.active.unwrap();
        assert_eq!(active.kind, PieceKind::I);
        assert_eq!(active.cells, [(3, 0), (4, 0), (5, 0), (6, 0)]);
        assert_eq!(snap.ghost_row, Some(19));
        assert_eq!(active.ghost_cells(19)[0], (3, 19));
        assert_eq!(snap.next, Some(PieceKind::O));
        assert_eq!(snap.level, 1);
        assert!(snap.playable());
    }
}
