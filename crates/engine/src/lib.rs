//! Engine layer: timers and the event loop around a [`GameState`](core::GameState).
//!
//! The core is clock-free. This crate owns the drop tick and the target-mode
//! deadline and feeds them, together with player input, through a single
//! event queue.

pub mod clock;
pub mod session;

pub use target_tetris_core as core;
pub use target_tetris_types as types;

pub use clock::Clock;
pub use session::Session;
