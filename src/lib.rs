//! Target Tetris (workspace facade crate).
//!
//! Re-exports the workspace crates as `target_tetris::{core,engine,input,term,types}`
//! and hosts runtime configuration loading for the binary.

pub mod settings;

pub use target_tetris_core as core;
pub use target_tetris_engine as engine;
pub use target_tetris_input as input;
pub use target_tetris_term as term;
pub use target_tetris_types as types;
