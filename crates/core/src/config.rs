//! Game configuration
//!
//! Plain data with serde defaults so partial JSON documents work. Loading
//! (files, environment) lives outside the core.

use serde::{Deserialize, Serialize};

use crate::types::{BOARD_HEIGHT, BOARD_WIDTH, DROP_INTERVAL_MS, MAX_TARGETS, TARGET_TIMEOUT_MS};

/// Narrowest supported board. A full row must be able to host every target.
pub const MIN_BOARD_WIDTH: u8 = MAX_TARGETS;
pub const MAX_BOARD_WIDTH: u8 = 40;
pub const MIN_BOARD_HEIGHT: u8 = 4;
pub const MAX_BOARD_HEIGHT: u8 = 40;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub board_width: u8,
    pub board_height: u8,
    /// Gravity period in milliseconds.
    pub drop_interval_ms: u32,
    /// Window for hitting every target of an episode.
    pub target_timeout_ms: u32,
    /// When false, full rows clear immediately without the mini-game.
    pub target_mode: bool,
    /// RNG seed; `None` seeds from the operating system.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_width: BOARD_WIDTH,
            board_height: BOARD_HEIGHT,
            drop_interval_ms: DROP_INTERVAL_MS,
            target_timeout_ms: TARGET_TIMEOUT_MS,
            target_mode: true,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Check value ranges. Returns a human readable reason on failure.
    pub fn validate(&self) -> Result<(), String> {
        if !(MIN_BOARD_WIDTH..=MAX_BOARD_WIDTH).contains(&self.board_width) {
            return Err(format!(
                "board_width {} outside {MIN_BOARD_WIDTH}..={MAX_BOARD_WIDTH}",
                self.board_width
            ));
        }
        if !(MIN_BOARD_HEIGHT..=MAX_BOARD_HEIGHT).contains(&self.board_height) {
            return Err(format!(
                "board_height {} outside {MIN_BOARD_HEIGHT}..={MAX_BOARD_HEIGHT}",
                self.board_height
            ));
        }
        if self.drop_interval_ms == 0 {
            return Err("drop_interval_ms must be positive".to_string());
        }
        if self.target_timeout_ms == 0 {
            return Err("target_timeout_ms must be positive".to_string());
        }
        Ok(())
    }

    /// Copy with every field forced into its supported range.
    ///
    /// Games always run on a clamped config, so a board never grows past
    /// what signed cell coordinates can address.
    pub fn clamped(&self) -> Self {
        Self {
            board_width: self.board_width.clamp(MIN_BOARD_WIDTH, MAX_BOARD_WIDTH),
            board_height: self.board_height.clamp(MIN_BOARD_HEIGHT, MAX_BOARD_HEIGHT),
            drop_interval_ms: self.drop_interval_ms.max(1),
            target_timeout_ms: self.target_timeout_ms.max(1),
            ..self.clone()
        }
    }
}
