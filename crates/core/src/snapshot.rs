use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Active piece as seen by a renderer: absolute cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub col: i8,
    pub row: i8,
    pub cells: [(i8, i8); 4],
}

impl ActiveSnapshot {
    /// Cells shifted down to the landing row.
    pub fn ghost_cells(&self, ghost_row: i8) -> [(i8, i8); 4] {
        let dy = ghost_row - self.row;
        self.cells.map(|(c, r)| (c, r + dy))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    pub ghost_row: Option<i8>,
    pub next: Option<PieceKind>,
    pub started: bool,
    pub paused: bool,
    pub game_over: bool,
    pub episode_id: u32,
    pub piece_id: u32,
    pub score: u32,
    pub high_score: u32,
    pub level: u32,
    pub lines: u32,
    pub drop_interval_ms: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn playable(&self) -> bool {
        self.started && !self.game_over && !self.paused
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            ghost_row: None,
            next: None,
            started: false,
            paused: false,
            game_over: false,
            episode_id: 0,
            piece_id: 0,
            score: 0,
            high_score: 0,
            level: 1,
            lines: 0,
            drop_interval_ms: 0,
        }
    }
}
