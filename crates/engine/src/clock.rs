//! Timer sources for a session.
//!
//! Two timers feed the game: a periodic drop tick and a one-shot deadline for
//! the running target-mode episode. Neither touches game state; the clock only
//! turns elapsed time into [`GameEvent`]s, earliest first.

use crate::types::GameEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TargetTimer {
    episode: u32,
    remaining_ms: u32,
}

#[derive(Debug, Clone)]
pub struct Clock {
    drop_period_ms: u32,
    drop_running: bool,
    /// Time since the last drop tick (or since the drop timer started).
    drop_elapsed_ms: u32,
    target: Option<TargetTimer>,
}

impl Clock {
    pub fn new(drop_period_ms: u32) -> Self {
        Self {
            drop_period_ms: drop_period_ms.max(1),
            drop_running: false,
            drop_elapsed_ms: 0,
            target: None,
        }
    }

    pub fn drop_period_ms(&self) -> u32 {
        self.drop_period_ms
    }

    /// Start the periodic drop tick. The first tick is one full period away.
    pub fn start_drop(&mut self) {
        self.drop_running = true;
        self.drop_elapsed_ms = 0;
    }

    pub fn stop_drop(&mut self) {
        self.drop_running = false;
        self.drop_elapsed_ms = 0;
    }

    pub fn is_drop_running(&self) -> bool {
        self.drop_running
    }

    /// Arm the one-shot deadline for `episode`, replacing any previous one.
    pub fn arm_target(&mut self, episode: u32, timeout_ms: u32) {
        self.target = Some(TargetTimer {
            episode,
            remaining_ms: timeout_ms,
        });
    }

    pub fn cancel_target(&mut self) {
        self.target = None;
    }

    pub fn armed_episode(&self) -> Option<u32> {
        self.target.map(|t| t.episode)
    }

    /// Milliseconds until the armed deadline fires.
    pub fn target_remaining_ms(&self) -> Option<u32> {
        self.target.map(|t| t.remaining_ms)
    }

    /// Consume up to `budget` milliseconds and return the first event due.
    ///
    /// On return `budget` holds the time left after that event. Returns None
    /// (with the whole budget consumed) when nothing fires in the window.
    /// A drop tick and a deadline due at the same instant fire drop first.
    pub fn next_event(&mut self, budget: &mut u32) -> Option<GameEvent> {
        let until_drop = self
            .drop_running
            .then(|| self.drop_period_ms - self.drop_elapsed_ms);
        let until_target = self.target.map(|t| t.remaining_ms);

        let due = match (until_drop, until_target) {
            (Some(d), Some(t)) => d.min(t),
            (Some(d), None) => d,
            (None, Some(t)) => t,
            (None, None) => {
                *budget = 0;
                return None;
            }
        };

        if due > *budget {
            self.elapse(*budget);
            *budget = 0;
            return None;
        }

        self.elapse(due);
        *budget -= due;

        if until_drop == Some(due) {
            self.drop_elapsed_ms = 0;
            return Some(GameEvent::DropTick);
        }

        let timer = self.target.take()?;
        Some(GameEvent::TargetTimeout {
            episode: timer.episode,
        })
    }

    fn elapse(&mut self, ms: u32) {
        if self.drop_running {
            self.drop_elapsed_ms += ms;
        }
        if let Some(timer) = &mut self.target {
            timer.remaining_ms = timer.remaining_ms.saturating_sub(ms);
        }
    }
}
