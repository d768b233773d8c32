//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, timers, input mapping, rendering).
//!
//! # Board Dimensions
//!
//! Default playfield dimensions (configurable per game):
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//! - **Spawn row**: -1, pieces enter from above the visible board
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FRAME_MS` | 16 | Render/input poll interval (~60 FPS) |
//! | `DROP_INTERVAL_MS` | 200 | Fixed gravity period |
//! | `TARGET_TIMEOUT_MS` | 4000 | Time allowed to hit every target |
//!
//! # Examples
//!
//! ```
//! use target_tetris_types::{GameAction, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let piece = PieceKind::T;
//! assert_eq!(PieceKind::from_index(piece.color_id()), Some(piece));
//!
//! assert_eq!(Rotation::North.rotate_ccw(), Rotation::West);
//! assert_eq!(GameAction::Swap.as_str(), "swap");
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Default board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Default board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Row at which new pieces spawn. Negative rows are above the visible board.
pub const SPAWN_ROW: i8 = -1;

/// Render/input poll interval in milliseconds (16ms ≈ 60 FPS)
pub const FRAME_MS: u32 = 16;

/// Gravity period: one automatic `moveDown` every 200ms.
pub const DROP_INTERVAL_MS: u32 = 200;

/// Wall-clock window for hitting every target once target mode is entered.
pub const TARGET_TIMEOUT_MS: u32 = 4000;

/// Fewest targets a target-mode episode asks for.
pub const MIN_TARGETS: u8 = 2;

/// Most targets a target-mode episode asks for.
pub const MAX_TARGETS: u8 = 5;

/// Hitbox radius around a target's cell center, in cell units.
pub const TARGET_HIT_RADIUS: f32 = 0.5;

/// Points per committed row returned by a line-clear pass.
pub const LINE_CLEAR_SCORE: u32 = 100;

/// Bonus awarded when every target of an episode is hit in time.
pub const TARGET_BONUS_SCORE: u32 = 100;

/// Number of piece kinds in the catalog.
pub const PIECE_KIND_COUNT: usize = 7;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_mode_defaults() {
        assert_eq!(DROP_INTERVAL_MS, 200);
        assert_eq!(TARGET_TIMEOUT_MS, 4000);
        assert_eq!(MIN_TARGETS, 2);
        assert_eq!(MAX_TARGETS, 5);
        assert!(SPAWN_ROW < 0);
    }

    #[test]
    fn piece_kind_index_roundtrip() {
        for (i, kind) in PieceKind::ALL.iter().enumerate() {
            assert_eq!(kind.color_id() as usize, i);
            assert_eq!(PieceKind::from_index(i as u8), Some(*kind));
        }
        assert_eq!(PieceKind::from_index(PIECE_KIND_COUNT as u8), None);
    }

    #[test]
    fn rotation_full_turn() {
        let mut r = Rotation::North;
        for _ in 0..4 {
            r = r.rotate_ccw();
        }
        assert_eq!(r, Rotation::North);
        assert_eq!(Rotation::West.index(), 1);
        assert_eq!(Rotation::East.index(), 3);
    }
}

/// The seven tetromino piece kinds
///
/// The catalog index doubles as the color id handed to renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
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
    /// Every kind in catalog order.
    pub const ALL: [PieceKind; PIECE_KIND_COUNT] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Catalog index of this kind, used as its color id.
    pub fn color_id(&self) -> u8 {
        match self {
            PieceKind::I => 0,
            PieceKind::O => 1,
            PieceKind::T => 2,
            PieceKind::S => 3,
            PieceKind::Z => 4,
            PieceKind::J => 5,
            PieceKind::L => 6,
        }
    }

    /// Look up a kind by catalog index.
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }
}

/// Rotation states, each a quarter turn counter-clockwise from the previous one
///
/// - **North**: Spawn orientation (0° rotation)
/// - **West**: Rotated 90° counter-clockwise
/// - **South**: Rotated 180°
/// - **East**: Rotated 270° counter-clockwise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    West,
    South,
    East,
}

impl Rotation {
    /// Rotate counter-clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use target_tetris_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_ccw(), Rotation::West);
    /// assert_eq!(Rotation::East.rotate_ccw(), Rotation::North);
    /// ```
    pub fn rotate_ccw(&self) -> Self {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }

    /// Number of counter-clockwise quarter turns from North.
    pub fn index(&self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::West => 1,
            Rotation::South => 2,
            Rotation::East => 3,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Rotation::North => "north",
            Rotation::East => "east",
            Rotation::South => "south",
            Rotation::West => "west",
        }
    }
}

/// Game actions that can be applied to modify game state
///
/// Produced by the input layer; every action maps to one controller command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Drop piece one cell down (locks it when blocked)
    SoftDrop,
    /// Instantly drop piece to lowest valid position and lock it
    HardDrop,
    /// Rotate piece 90° counter-clockwise
    Rotate,
    /// Exchange the active piece with the lookahead piece
    Swap,
    /// Start a fresh game (the only action accepted after game over)
    Restart,
}

impl GameAction {
    /// Convert to camelCase string (log output)
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::Rotate => "rotate",
            GameAction::Swap => "swap",
            GameAction::Restart => "restart",
        }
    }
}

/// A logical event consumed by the game controller.
///
/// Timer sources and the input layer never touch game state directly; they
/// post one of these and the controller processes it to completion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Periodic gravity tick.
    DropTick,
    /// One-shot deadline of the target-mode episode with this id.
    TargetTimeout { episode: u32 },
    /// A discrete player command.
    Action(GameAction),
    /// A pointer press resolved to board space (cell units, `(0.0, 0.0)` is
    /// the top-left corner of the board).
    PointerHit { x: f32, y: f32 },
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled, colored by the piece kind
pub type Cell = Option<PieceKind>;
