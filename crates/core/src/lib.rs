//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the rules of target-mode Tetris: the grid, the piece
//! catalog, the target mini-game that gates line clears, and the controller
//! that ties them together. It performs no I/O and owns no clocks; time enters
//! only as [`GameEvent`](types::GameEvent)s posted by the engine.
//!
//! # Module Structure
//!
//! - [`board`]: arena grid of locked cells, collision and row shifting
//! - [`pieces`]: tetromino bitmaps and the static rotation table
//! - [`target`]: target-mode episode state machine
//! - [`game_state`]: the controller (active piece, lookahead, score, lifecycle)
//! - [`snapshot`]: read-only copies for renderers
//! - [`config`]: board size, timings and mode switches
//!
//! # Game Rules
//!
//! - Pieces are drawn uniformly from the seven kinds by an injected RNG
//! - Rotation is counter-clockwise only, with no wall kicks
//! - Only a blocked spawn ends the game; cells locked above row 0 are dropped
//! - The lookahead piece can be swapped in place of the active one
//! - A full row starts a target episode instead of clearing: hit every target
//!   before the deadline and the row clears with a bonus, otherwise only the
//!   target cells are emptied
//!
//! # Example
//!
//! ```
//! use target_tetris_core::GameState;
//! use target_tetris_types::GameAction;
//!
//! let mut game = GameState::new(12345);
//! game.start();
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert_eq!(game.piece_id(), 2);
//! assert!(game.board().filled_count() > 0);
//! ```

pub mod board;
pub mod config;
pub mod game_state;
pub mod pieces;
pub mod snapshot;
pub mod target;

pub use target_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use config::GameConfig;
pub use game_state::{GamePhase, GameState, Tetromino};
pub use pieces::{get_shape, spawn_column, Shape};
pub use snapshot::{ActiveSnapshot, GameSnapshot, TargetSnapshot};
pub use target::{Target, TargetMode, TargetOutcome, TargetPhase};
