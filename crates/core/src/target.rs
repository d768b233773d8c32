//! Target mode - the bonus mini-game gating line clears
//!
//! When a full row is detected the controller opens an *episode*: between
//! [`MIN_TARGETS`] and [`MAX_TARGETS`] filled cells of that row become targets
//! and the player has a fixed window to hit all of them.
//!
//! ```text
//!            begin (enough cells)          hits == required
//!   Idle ─────────────────────────► Active ─────────────────► Resolving(Success)
//!     ▲          │ begin (too few cells)   │ timeout(episode)         │
//!     │          ▼                         ▼                          │
//!     │   Resolving(Failure) ◄─────────────┘                          │
//!     └───────────────────────── finish ◄─────────────────────────────┘
//! ```
//!
//! This module only decides the outcome. Applying it to the board (clearing
//! the row or unmarking the target cells) is the controller's job, after which
//! it calls [`TargetMode::finish`].

use arrayvec::ArrayVec;
use log::debug;
use rand::seq::index;
use rand::Rng;

use crate::types::{MAX_TARGETS, MIN_TARGETS, TARGET_HIT_RADIUS};

/// A filled cell on the pending row that the player must hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    pub x: u8,
    pub y: u8,
    pub hit: bool,
}

impl Target {
    fn new(x: u8, y: u8) -> Self {
        Self { x, y, hit: false }
    }

    /// Center of the target's cell in board space.
    pub fn center(&self) -> (f32, f32) {
        (self.x as f32 + 0.5, self.y as f32 + 0.5)
    }

    /// Whether a pointer at board-space `(px, py)` lands inside the hitbox.
    pub fn contains(&self, px: f32, py: f32) -> bool {
        let (cx, cy) = self.center();
        let (dx, dy) = (px - cx, py - cy);
        dx * dx + dy * dy <= TARGET_HIT_RADIUS * TARGET_HIT_RADIUS
    }
}

/// How an episode ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetOutcome {
    /// Every target was hit in time; the row clear is committed.
    Success,
    /// Timed out or the row had too few cells; only the target cells are unmarked.
    Failure,
}

/// Phase of the mini-game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetPhase {
    Idle,
    Active,
    Resolving(TargetOutcome),
}

/// Everything the controller needs to apply an outcome to the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub episode: u32,
    pub row: u8,
    pub outcome: TargetOutcome,
    /// Cells chosen as targets, hit or not.
    pub cells: ArrayVec<(u8, u8), { MAX_TARGETS as usize }>,
}

/// Result of asking for a new episode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Begin {
    /// Targets are live; the timeout for `episode` should be armed.
    Started { episode: u32, required: u8 },
    /// The episode failed immediately (row under-populated).
    Resolved(Resolution),
    /// Another episode is still running; nothing changed.
    Busy,
}

/// Result of a pointer hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HitResult {
    /// Not in target mode, or the pointer missed every live target.
    Miss,
    /// A target was hit and `remaining` live targets are left.
    Hit { remaining: u8 },
    /// The last target was hit.
    Completed(Resolution),
}

#[derive(Debug, Clone)]
pub struct TargetMode {
    phase: TargetPhase,
    /// Id of the current (or most recent) episode. Monotonic for the lifetime
    /// of the value, so a stale timeout never matches a newer episode.
    episode: u32,
    row: u8,
    targets: ArrayVec<Target, { MAX_TARGETS as usize }>,
    required: u8,
    hits: u8,
}

impl TargetMode {
    pub fn new() -> Self {
        Self {
            phase: TargetPhase::Idle,
            episode: 0,
            row: 0,
            targets: ArrayVec::new(),
            required: 0,
            hits: 0,
        }
    }

    pub fn phase(&self) -> TargetPhase {
        self.phase
    }

    pub fn is_idle(&self) -> bool {
        self.phase == TargetPhase::Idle
    }

    pub fn is_active(&self) -> bool {
        self.phase == TargetPhase::Active
    }

    /// Id of the running episode, if one is active.
    pub fn active_episode(&self) -> Option<u32> {
        self.is_active().then_some(self.episode)
    }

    /// Row the current episode is about.
    pub fn row(&self) -> Option<u8> {
        (!self.is_idle()).then_some(self.row)
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn required(&self) -> u8 {
        self.required
    }

    pub fn hits(&self) -> u8 {
        self.hits
    }

    /// Open an episode for full row `row` whose filled columns are `filled`.
    ///
    /// Draws the target count uniformly from `MIN_TARGETS..=MAX_TARGETS`, then
    /// that many distinct columns uniformly without replacement.
    pub fn begin<R: Rng + ?Sized>(&mut self, row: u8, filled: &[u8], rng: &mut R) -> Begin {
        if !self.is_idle() {
            debug!("target mode busy, row {row} left pending");
            return Begin::Busy;
        }

        self.episode = self.episode.wrapping_add(1);
        self.row = row;
        self.targets.clear();
        self.hits = 0;
        self.required = rng.random_range(MIN_TARGETS..=MAX_TARGETS);

        if filled.len() < self.required as usize {
            debug!(
                "episode {}: row {row} has {} filled cells, {} required",
                self.episode,
                filled.len(),
                self.required
            );
            self.phase = TargetPhase::Resolving(TargetOutcome::Failure);
            return Begin::Resolved(self.resolution(TargetOutcome::Failure));
        }

        for i in index::sample(rng, filled.len(), self.required as usize) {
            self.targets.push(Target::new(filled[i], row));
        }
        self.phase = TargetPhase::Active;
        debug!(
            "episode {}: {} targets on row {row}",
            self.episode, self.required
        );

        Begin::Started {
            episode: self.episode,
            required: self.required,
        }
    }

    /// Test a pointer position against the live targets.
    ///
    /// Targets are checked newest first; only one target is taken per hit.
    pub fn hit(&mut self, px: f32, py: f32) -> HitResult {
        if !self.is_active() {
            return HitResult::Miss;
        }

        let Some(target) = self
            .targets
            .iter_mut()
            .rev()
            .find(|t| !t.hit && t.contains(px, py))
        else {
            return HitResult::Miss;
        };

        target.hit = true;
        self.hits += 1;

        if self.hits >= self.required {
            self.phase = TargetPhase::Resolving(TargetOutcome::Success);
            return HitResult::Completed(self.resolution(TargetOutcome::Success));
        }

        HitResult::Hit {
            remaining: self.required - self.hits,
        }
    }

    /// Deadline for `episode` expired.
    ///
    /// Returns None (and changes nothing) when that episode already resolved.
    pub fn timeout(&mut self, episode: u32) -> Option<Resolution> {
        if !self.is_active() || episode != self.episode {
            return None;
        }
        debug!(
            "episode {episode}: timed out with {}/{} hits",
            self.hits, self.required
        );
        self.phase = TargetPhase::Resolving(TargetOutcome::Failure);
        Some(self.resolution(TargetOutcome::Failure))
    }

    /// Destroy the targets and return to idle once the outcome is applied.
    pub fn finish(&mut self) {
        self.phase = TargetPhase::Idle;
        self.targets.clear();
        self.required = 0;
        self.hits = 0;
    }

    fn resolution(&self, outcome: TargetOutcome) -> Resolution {
        Resolution {
            episode: self.episode,
            row: self.row,
            outcome,
            cells: self.targets.iter().map(|t| (t.x, t.y)).collect(),
        }
    }
}

impl Default for TargetMode {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const FULL_ROW: [u8; 10] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9];

    fn started(mode: &mut TargetMode, seed: u64) -> (u32, u8) {
        let mut rng = StdRng::seed_from_u64(seed);
        match mode.begin(19, &FULL_ROW, &mut rng) {
            Begin::Started { episode, required } => (episode, required),
            other => panic!("expected Started, got {other:?}"),
        }
    }

    #[test]
    fn test_begin_picks_distinct_columns() {
        for seed in 0..50 {
            let mut mode = TargetMode::new();
            let (_, required) = started(&mut mode, seed);
            assert!((MIN_TARGETS..=MAX_TARGETS).contains(&required));
            assert_eq!(mode.targets().len(), required as usize);

            let mut xs: Vec<u8> = mode.targets().iter().map(|t| t.x).collect();
            xs.sort_unstable();
            xs.dedup();
            assert_eq!(xs.len(), required as usize);
            assert!(mode.targets().iter().all(|t| t.y == 19 && !t.hit));
        }
    }

    #[test]
    fn test_begin_underpopulated_fails_immediately() {
        let mut mode = TargetMode::new();
        let mut rng = StdRng::seed_from_u64(3);
        match mode.begin(4, &[7], &mut rng) {
            Begin::Resolved(res) => {
                assert_eq!(res.outcome, TargetOutcome::Failure);
                assert_eq!(res.row, 4);
                assert!(res.cells.is_empty());
            }
            other => panic!("expected Resolved, got {other:?}"),
        }
        assert_eq!(mode.phase(), TargetPhase::Resolving(TargetOutcome::Failure));
    }

    #[test]
    fn test_begin_while_active_is_busy() {
        let mut mode = TargetMode::new();
        let (episode, _) = started(&mut mode, 1);
        let mut rng = StdRng::seed_from_u64(2);
        assert_eq!(mode.begin(18, &FULL_ROW, &mut rng), Begin::Busy);
        assert_eq!(mode.active_episode(), Some(episode));
        assert_eq!(mode.row(), Some(19));
    }

    #[test]
    fn test_hit_all_targets_succeeds() {
        let mut mode = TargetMode::new();
        let (episode, required) = started(&mut mode, 7);
        let centers: Vec<(f32, f32)> = mode.targets().iter().map(|t| t.center()).collect();

        for (i, (x, y)) in centers.iter().enumerate() {
            let result = mode.hit(*x, *y);
            if i + 1 < required as usize {
                assert_eq!(
                    result,
                    HitResult::Hit {
                        remaining: required - i as u8 - 1
                    }
                );
            } else {
                match result {
                    HitResult::Completed(res) => {
                        assert_eq!(res.episode, episode);
                        assert_eq!(res.outcome, TargetOutcome::Success);
                        assert_eq!(res.cells.len(), required as usize);
                    }
                    other => panic!("expected Completed, got {other:?}"),
                }
            }
        }
        assert_eq!(mode.phase(), TargetPhase::Resolving(TargetOutcome::Success));
    }

    #[test]
    fn test_hit_same_target_twice_counts_once() {
        let mut mode = TargetMode::new();
        started(&mut mode, 11);
        let (x, y) = mode.targets()[0].center();
        assert!(matches!(mode.hit(x, y), HitResult::Hit { .. }));
        assert_eq!(mode.hit(x, y), HitResult::Miss);
        assert_eq!(mode.hits(), 1);
    }

    #[test]
    fn test_hit_outside_hitbox_misses() {
        let mut mode = TargetMode::new();
        started(&mut mode, 5);
        // Row 0 never holds targets in this episode.
        assert_eq!(mode.hit(4.5, 0.5), HitResult::Miss);
        assert_eq!(mode.hits(), 0);
    }

    #[test]
    fn test_timeout_stale_episode_is_noop() {
        let mut mode = TargetMode::new();
        let (episode, _) = started(&mut mode, 9);
        assert_eq!(mode.timeout(episode + 1), None);
        assert!(mode.is_active());

        let res = mode.timeout(episode).unwrap();
        assert_eq!(res.outcome, TargetOutcome::Failure);
        mode.finish();

        // Fires again after resolution: ignored.
        assert_eq!(mode.timeout(episode), None);
        assert!(mode.is_idle());
        assert!(mode.targets().is_empty());
    }

    #[test]
    fn test_episode_ids_increase() {
        let mut mode = TargetMode::new();
        let (first, _) = started(&mut mode, 1);
        mode.timeout(first);
        mode.finish();
        let (second, _) = started(&mut mode, 2);
        assert!(second > first);
    }
}
