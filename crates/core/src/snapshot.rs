//! Read-only copies of the game state for renderers and tests.

use arrayvec::ArrayVec;

use crate::game_state::Tetromino;
use crate::target::Target;
use crate::types::{Cell, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH, MAX_TARGETS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl From<Tetromino> for ActiveSnapshot {
    fn from(value: Tetromino) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetSnapshot {
    pub x: u8,
    pub y: u8,
    pub hit: bool,
}

impl From<Target> for TargetSnapshot {
    fn from(value: Target) -> Self {
        Self {
            x: value.x,
            y: value.y,
            hit: value.hit,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub width: u8,
    pub height: u8,
    /// Locked cells, row-major. The active piece is not included.
    pub board: Vec<Cell>,
    pub active: Option<ActiveSnapshot>,
    pub ghost_y: Option<i8>,
    pub next: PieceKind,
    pub score: u32,
    pub lines: u32,
    pub targets: ArrayVec<TargetSnapshot, { MAX_TARGETS as usize }>,
    pub target_episode: Option<u32>,
    pub game_over: bool,
}

impl GameSnapshot {
    /// Locked cell at (x, y); None when empty or out of range.
    pub fn cell(&self, x: u8, y: u8) -> Cell {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.board[y as usize * self.width as usize + x as usize]
    }

    pub fn playable(&self) -> bool {
        !self.game_over
    }

    pub fn in_target_mode(&self) -> bool {
        self.target_episode.is_some()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            board: vec![None; BOARD_WIDTH as usize * BOARD_HEIGHT as usize],
            active: None,
            ghost_y: None,
            next: PieceKind::I,
            score: 0,
            lines: 0,
            targets: ArrayVec::new(),
            target_episode: None,
            game_over: false,
        }
    }
}
