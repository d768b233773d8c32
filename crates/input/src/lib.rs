//! Terminal input module (engine-facing).
//!
//! This module is intentionally independent of any UI framework. It maps
//! `crossterm` key events into [`crate::types::GameAction`] and mouse clicks
//! into board-space [`crate::types::GameEvent::PointerHit`]s. No game rules
//! live here.

pub mod map;
pub mod pointer;

pub use target_tetris_types as types;

pub use map::{handle_key_event, should_quit};
pub use pointer::PointerMap;
