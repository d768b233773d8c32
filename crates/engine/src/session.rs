//! Session: one game, its timers and a FIFO of pending events.
//!
//! Everything that changes game state is posted as a [`GameEvent`] and
//! processed by [`Session::pump`] one at a time. After each event the timers
//! are re-synchronised with the game: the drop tick runs only while playing,
//! and the target deadline follows whichever episode is live.

use std::collections::VecDeque;

use log::trace;
use rand::rngs::StdRng;
use rand::Rng;

use crate::clock::Clock;
use crate::core::{GameConfig, GameState};
use crate::types::GameEvent;

#[derive(Debug)]
pub struct Session<R = StdRng> {
    state: GameState<R>,
    clock: Clock,
    queue: VecDeque<GameEvent>,
}

impl Session<StdRng> {
    /// Build and start a game from configuration. Out-of-range values are
    /// clamped by [`GameState::with_rng`].
    pub fn from_config(config: GameConfig) -> Self {
        let mut state = GameState::from_config(config);
        state.start();
        Self::new(state)
    }
}

impl<R: Rng> Session<R> {
    /// Wrap an existing game. Timers are synchronised immediately.
    pub fn new(state: GameState<R>) -> Self {
        let clock = Clock::new(state.config().drop_interval_ms);
        let mut session = Self {
            state,
            clock,
            queue: VecDeque::new(),
        };
        session.sync_timers();
        session
    }

    pub fn state(&self) -> &GameState<R> {
        &self.state
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Queue an event for the next [`Session::pump`].
    pub fn post(&mut self, event: GameEvent) {
        self.queue.push_back(event);
    }

    /// Process every queued event in order. Returns how many were accepted.
    pub fn pump(&mut self) -> usize {
        let mut accepted = 0;
        while let Some(event) = self.queue.pop_front() {
            let ok = self.state.handle_event(event);
            trace!("event {event:?} accepted={ok}");
            if ok {
                accepted += 1;
            }
            self.sync_timers();
        }
        accepted
    }

    /// Let `elapsed_ms` of wall time pass.
    ///
    /// Pending input is processed first. Timer events are then delivered one
    /// by one in chronological order, so an episode started by a drop tick
    /// has its deadline armed before the rest of the window is consumed.
    pub fn advance(&mut self, elapsed_ms: u32) {
        self.pump();
        let mut budget = elapsed_ms;
        while let Some(event) = self.clock.next_event(&mut budget) {
            self.post(event);
            self.pump();
        }
    }

    /// Bring the timers in line with the game state.
    pub fn sync_timers(&mut self) {
        if self.state.is_playing() {
            if !self.clock.is_drop_running() {
                self.clock.start_drop();
            }
        } else if self.clock.is_drop_running() {
            trace!("drop timer stopped");
            self.clock.stop_drop();
        }

        match (self.state.target_episode(), self.clock.armed_episode()) {
            (Some(live), Some(armed)) if live == armed => {}
            (Some(live), _) => {
                trace!("target deadline armed for episode {live}");
                self.clock
                    .arm_target(live, self.state.config().target_timeout_ms);
            }
            (None, Some(_)) => self.clock.cancel_target(),
            (None, None) => {}
        }
    }
}
