//! Game state module - the game controller
//!
//! This module ties together the board, the piece catalog, the RNG and target
//! mode. It owns the falling piece, the lookahead piece and the score, and it
//! is the only writer of the board.
//!
//! All mutation goes through [`GameState::handle_event`] (or the individual
//! commands it dispatches to). Each call runs to completion, so a drop tick,
//! a pointer hit and a target timeout can never interleave mid-update.

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::board::Board;
use crate::config::GameConfig;
use crate::pieces::{get_shape, spawn_column, Shape};
use crate::snapshot::{ActiveSnapshot, GameSnapshot, TargetSnapshot};
use crate::target::{Begin, HitResult, Resolution, Target, TargetMode, TargetOutcome, TargetPhase};
use crate::types::*;

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl Tetromino {
    /// Create a new tetromino, horizontally centered at the spawn row
    pub fn spawn(kind: PieceKind, board_width: u8) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            x: spawn_column(kind, board_width),
            y: SPAWN_ROW,
        }
    }

    /// Get the shape for the current rotation
    pub fn shape(&self) -> &'static Shape {
        get_shape(self.kind, self.rotation)
    }

    /// Check if the piece overlaps a wall, the floor or a locked cell
    pub fn collides(&self, board: &Board) -> bool {
        board.check_collision(self.shape(), self.x, self.y)
    }
}

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Created, first piece not spawned yet.
    Ready,
    Playing,
    /// Terminal until an explicit restart.
    GameOver,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState<R = StdRng> {
    config: GameConfig,
    board: Board,
    active: Option<Tetromino>,
    next: PieceKind,
    rng: R,
    target: TargetMode,
    phase: GamePhase,
    score: u32,
    lines: u32,
    /// Monotonic count of successful spawns in this game.
    piece_id: u32,
    /// Monotonic game counter (increments on restart).
    episode_id: u32,
}

impl GameState<StdRng> {
    /// Create a new default-sized game with the given RNG seed
    pub fn new(seed: u64) -> Self {
        Self::with_rng(GameConfig::default(), StdRng::seed_from_u64(seed))
    }

    /// Create a game from configuration, seeding from the OS when no seed is set
    pub fn from_config(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> GameState<R> {
    /// Create a game drawing all randomness from `rng`
    ///
    /// Out-of-range config values are clamped (see [`GameConfig::clamped`]).
    pub fn with_rng(config: GameConfig, mut rng: R) -> Self {
        let clamped = config.clamped();
        if clamped != config {
            warn!("config out of range, using {clamped:?}");
        }
        let config = clamped;
        let next = random_piece(&mut rng);
        Self {
            board: Board::with_size(config.board_width, config.board_height),
            config,
            active: None,
            next,
            rng,
            target: TargetMode::new(),
            phase: GamePhase::Ready,
            score: 0,
            lines: 0,
            piece_id: 0,
            episode_id: 0,
        }
    }

    /// Replace the board before the game starts (scenario setup).
    ///
    /// The configured dimensions follow the board.
    pub fn with_board(mut self, board: Board) -> Self {
        self.config.board_width = board.width();
        self.config.board_height = board.height();
        self.board = board;
        self
    }

    /// Start the game and spawn the first piece
    pub fn start(&mut self) {
        if self.phase != GamePhase::Ready {
            return;
        }
        self.phase = GamePhase::Playing;
        self.spawn_new_piece();
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    pub fn game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn piece_id(&self) -> u32 {
        self.piece_id
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn next_piece(&self) -> PieceKind {
        self.next
    }

    pub fn active(&self) -> Option<Tetromino> {
        self.active
    }

    /// Get the shape of the active piece (for rendering)
    pub fn active_shape(&self) -> Option<&'static Shape> {
        self.active.map(|p| p.shape())
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn target_phase(&self) -> TargetPhase {
        self.target.phase()
    }

    /// Live and already-hit targets of the running episode
    pub fn targets(&self) -> &[Target] {
        self.target.targets()
    }

    /// Id of the running target-mode episode, if any
    pub fn target_episode(&self) -> Option<u32> {
        self.target.active_episode()
    }

    /// Calculate the ghost piece Y position (where piece would land)
    pub fn ghost_y(&self) -> Option<i8> {
        let active = self.active?;
        let distance = self.board.drop_distance(active.shape(), active.x, active.y);
        Some(active.y + distance as i8)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.board.width();
        out.height = self.board.height();
        out.board.clear();
        out.board.extend_from_slice(self.board.cells());
        out.active = self.active.map(ActiveSnapshot::from);
        out.ghost_y = self.ghost_y();
        out.next = self.next;
        out.score = self.score;
        out.lines = self.lines;
        out.targets.clear();
        out.targets
            .extend(self.target.targets().iter().map(|t| TargetSnapshot::from(*t)));
        out.target_episode = self.target.active_episode();
        out.game_over = self.game_over();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Process one event to completion.
    ///
    /// Returns whether the event was accepted. Drop ticks and input are
    /// ignored outside of play; a timeout for an episode that already resolved
    /// is a no-op.
    pub fn handle_event(&mut self, event: GameEvent) -> bool {
        match event {
            GameEvent::DropTick => {
                if !self.is_playing() {
                    return false;
                }
                self.move_down();
                true
            }
            GameEvent::TargetTimeout { episode } => self.target_timeout(episode),
            GameEvent::Action(action) => self.apply_action(action),
            GameEvent::PointerHit { x, y } => self.hit_target(x, y),
        }
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Restart => {
                self.restart();
                true
            }
            _ if !self.is_playing() => false,
            GameAction::MoveLeft => self.try_move(-1),
            GameAction::MoveRight => self.try_move(1),
            GameAction::SoftDrop => {
                self.move_down();
                true
            }
            GameAction::HardDrop => {
                self.hard_drop();
                true
            }
            GameAction::Rotate => self.rotate(),
            GameAction::Swap => self.swap_with_next(),
        }
    }

    /// Promote the lookahead piece and draw a new one.
    ///
    /// A spawn collision ends the game.
    pub fn spawn_new_piece(&mut self) -> bool {
        let kind = std::mem::replace(&mut self.next, random_piece(&mut self.rng));
        let piece = Tetromino::spawn(kind, self.board.width());

        if piece.collides(&self.board) {
            self.active = None;
            self.enter_game_over("spawn blocked");
            return false;
        }

        self.active = Some(piece);
        self.piece_id = self.piece_id.wrapping_add(1);
        true
    }

    /// Try to move the active piece horizontally
    pub fn try_move(&mut self, dx: i8) -> bool {
        if !self.is_playing() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let moved = Tetromino {
            x: active.x + dx,
            ..active
        };
        if moved.collides(&self.board) {
            return false;
        }
        self.active = Some(moved);
        true
    }

    /// Gravity step: move down one row, or lock the piece when blocked.
    ///
    /// Returns true if the piece moved.
    pub fn move_down(&mut self) -> bool {
        if !self.is_playing() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let lowered = Tetromino {
            y: active.y + 1,
            ..active
        };
        if !lowered.collides(&self.board) {
            self.active = Some(lowered);
            return true;
        }

        self.lock_piece();
        false
    }

    /// Hard drop the active piece to the bottom and lock it
    ///
    /// Returns the number of rows dropped.
    pub fn hard_drop(&mut self) -> u32 {
        if !self.is_playing() {
            return 0;
        }
        let Some(active) = self.active else {
            return 0;
        };

        let distance = self.board.drop_distance(active.shape(), active.x, active.y);
        self.active = Some(Tetromino {
            y: active.y + distance as i8,
            ..active
        });
        self.lock_piece();

        distance as u32
    }

    /// Rotate the active piece 90° counter-clockwise in place.
    ///
    /// No wall kicks: a blocked rotation leaves the piece unchanged.
    pub fn rotate(&mut self) -> bool {
        if !self.is_playing() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let rotated = Tetromino {
            rotation: active.rotation.rotate_ccw(),
            ..active
        };
        if rotated.collides(&self.board) {
            return false;
        }
        self.active = Some(rotated);
        true
    }

    /// Exchange the active and lookahead pieces, keeping the current origin.
    ///
    /// The incoming piece uses its spawn orientation. If it does not fit,
    /// nothing changes.
    pub fn swap_with_next(&mut self) -> bool {
        if !self.is_playing() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let swapped = Tetromino {
            kind: self.next,
            rotation: Rotation::North,
            ..active
        };
        if swapped.collides(&self.board) {
            return false;
        }
        self.next = active.kind;
        self.active = Some(swapped);
        true
    }

    /// Lock the active piece onto the board, handle line clears, spawn next.
    ///
    /// Cells still above row 0 are dropped by `place_shape`; only a blocked
    /// spawn ends the game. Returns the number of rows committed by this lock.
    fn lock_piece(&mut self) -> u32 {
        let Some(active) = self.active.take() else {
            return 0;
        };

        self.board
            .place_shape(active.shape(), active.x, active.y, active.kind);

        let lines = self.check_and_clear_lines();
        self.score = self.score.saturating_add(LINE_CLEAR_SCORE * lines);
        self.spawn_new_piece();
        lines
    }

    /// Find the lowest full row and hand it to target mode.
    ///
    /// Returns the number of rows whose clear was committed during this call.
    /// An episode that is still running commits nothing yet; its outcome is
    /// applied when the last target is hit or the deadline passes. With target
    /// mode disabled every full row is cleared right away.
    pub fn check_and_clear_lines(&mut self) -> u32 {
        if !self.config.target_mode {
            let mut cleared = 0;
            while let Some(row) = self.board.first_full_row() {
                self.board.clear_row(row);
                cleared += 1;
            }
            if cleared > 0 {
                self.lines += cleared;
                self.settle_active();
            }
            return cleared;
        }

        let Some(row) = self.board.first_full_row() else {
            return 0;
        };
        let filled = self.board.filled_columns(row);
        match self.target.begin(row as u8, &filled, &mut self.rng) {
            Begin::Started { .. } | Begin::Busy => 0,
            Begin::Resolved(resolution) => self.apply_resolution(resolution),
        }
    }

    /// Register a pointer hit at board-space `(x, y)`.
    pub fn hit_target(&mut self, x: f32, y: f32) -> bool {
        if !self.is_playing() {
            return false;
        }
        match self.target.hit(x, y) {
            HitResult::Miss => false,
            HitResult::Hit { remaining } => {
                debug!("target hit, {remaining} left");
                true
            }
            HitResult::Completed(resolution) => {
                self.apply_resolution(resolution);
                true
            }
        }
    }

    /// Deadline of `episode` passed. Ignored unless that episode is running.
    pub fn target_timeout(&mut self, episode: u32) -> bool {
        match self.target.timeout(episode) {
            Some(resolution) => {
                self.apply_resolution(resolution);
                true
            }
            None => false,
        }
    }

    /// Apply an episode outcome to the board and return target mode to idle.
    fn apply_resolution(&mut self, resolution: Resolution) -> u32 {
        let row = resolution.row as usize;
        let committed = match resolution.outcome {
            TargetOutcome::Success => {
                self.board.clear_row(row);
                self.lines += 1;
                self.score = self.score.saturating_add(TARGET_BONUS_SCORE);
                self.settle_active();
                1
            }
            TargetOutcome::Failure => {
                for &(x, y) in &resolution.cells {
                    self.board.set(x as i8, y as i8, None);
                }
                0
            }
        };
        self.target.finish();
        info!(
            "episode {} resolved: {:?} on row {row}, score {}",
            resolution.episode, resolution.outcome, self.score
        );

        // An under-populated row stays full; rescanning would fail it again.
        let row_left_full =
            resolution.outcome == TargetOutcome::Failure && resolution.cells.is_empty();
        if row_left_full {
            return committed;
        }
        committed + self.check_and_clear_lines()
    }

    /// After rows shift down the falling piece may overlap locked cells; lift it.
    fn settle_active(&mut self) {
        let Some(mut piece) = self.active else {
            return;
        };
        while piece.collides(&self.board) {
            piece.y -= 1;
        }
        self.active = Some(piece);
    }

    fn enter_game_over(&mut self, reason: &str) {
        self.phase = GamePhase::GameOver;
        info!(
            "game over ({reason}): score {}, lines {}, pieces {}",
            self.score, self.lines, self.piece_id
        );
    }

    /// Reset board, pieces, score and target mode, then start again.
    ///
    /// The RNG keeps running and episode ids stay monotonic, so timers armed
    /// by the previous game can never match.
    pub fn restart(&mut self) {
        self.board = Board::with_size(self.config.board_width, self.config.board_height);
        self.active = None;
        self.next = random_piece(&mut self.rng);
        self.target.finish();
        self.score = 0;
        self.lines = 0;
        self.piece_id = 0;
        self.episode_id = self.episode_id.wrapping_add(1);
        self.phase = GamePhase::Ready;
        info!("restart (game {})", self.episode_id);
        self.start();
    }
}

impl Default for GameState<StdRng> {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Uniform draw over the piece catalog
fn random_piece<R: Rng + ?Sized>(rng: &mut R) -> PieceKind {
    PieceKind::ALL[rng.random_range(0..PIECE_KIND_COUNT)]
}
