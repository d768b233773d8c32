//! Terminal "game renderer" module.
//!
//! This is a small, game-oriented rendering layer for terminal gameplay.
//! It avoids widget/layout libraries and instead renders into a simple
//! framebuffer that can be flushed to a terminal backend.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Allow precise control over aspect ratio (e.g. 2 chars wide per cell)
//! - Report where the board sits on screen so clicks can be mapped back

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use target_tetris_core as core;
pub use target_tetris_types as types;

pub use fb::{CellStyle, Emphasis, FrameBuffer, Glyph, Rgb};
pub use game_view::{BoardLayout, GameView, Viewport};
pub use renderer::TerminalRenderer;
