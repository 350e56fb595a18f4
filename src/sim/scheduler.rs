//! Whack-a-mole scheduler
//!
//! A two-phase oscillator: while running, exactly one slot alternates between
//! visible (~1.2s) and hidden (~0.5s). Instead of a self-re-arming timer
//! callback, each phase holds an absolute millisecond deadline checked once
//! per tick. Every firing begins with the `active` guard so a deadline left
//! dangling after a stop does nothing.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::{MOLE_HIDE_MS, MOLE_SHOW_MS, SLOT_RESAMPLE_TRIES, TIER_COUNT};
use crate::sim::slots::SlotRegistry;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoleScheduler {
    active: bool,
    /// Index of the visible mole's slot; None while hidden or stopped
    visible_slot: Option<usize>,
    /// Slot shown by the previous appearance, to avoid immediate repeats
    last_slot: Option<usize>,
    /// Next transition deadline on the caller's millisecond clock
    next_fire_ms: Option<u64>,
    pub show_ms: u64,
    pub hide_ms: u64,
}

impl Default for MoleScheduler {
    fn default() -> Self {
        Self {
            active: false,
            visible_slot: None,
            last_slot: None,
            next_fire_ms: None,
            show_ms: MOLE_SHOW_MS,
            hide_ms: MOLE_HIDE_MS,
        }
    }
}

impl MoleScheduler {
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The currently visible mole's slot index, if any.
    pub fn visible_slot(&self) -> Option<usize> {
        self.visible_slot
    }

    /// Begin scheduling. No-op when already active or when there are no
    /// slots to show.
    pub fn start(&mut self, now_ms: u64, registry: &SlotRegistry) {
        if self.active || registry.is_empty() {
            return;
        }
        self.active = true;
        self.visible_slot = None;
        self.last_slot = None;
        // First appearance after one hidden interval.
        self.next_fire_ms = Some(now_ms + self.hide_ms);
        log::debug!("mole scheduler started");
    }

    /// Stop scheduling. No-op when already inactive. Any still-pending
    /// deadline becomes a dead letter via the guard in `fire`.
    pub fn stop(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        self.visible_slot = None;
        self.next_fire_ms = None;
        log::debug!("mole scheduler stopped");
    }

    /// Hide the current mole immediately (it was hit). The pending deadline
    /// is pulled forward so the next appearance comes after a normal gap.
    pub fn hide_now(&mut self, now_ms: u64) {
        if !self.active || self.visible_slot.is_none() {
            return;
        }
        self.visible_slot = None;
        self.next_fire_ms = Some(now_ms + self.hide_ms);
    }

    /// Run any due transition. Call once per tick with the current clock.
    /// Returns the transition that happened, for event reporting.
    pub fn poll<R: Rng>(
        &mut self,
        now_ms: u64,
        registry: &mut SlotRegistry,
        rng: &mut R,
    ) -> Option<Transition> {
        let deadline = self.next_fire_ms?;
        if now_ms < deadline {
            return None;
        }
        self.fire(now_ms, registry, rng)
    }

    fn fire<R: Rng>(
        &mut self,
        now_ms: u64,
        registry: &mut SlotRegistry,
        rng: &mut R,
    ) -> Option<Transition> {
        // Guard required by the cooperative model: a firing queued before a
        // stop must be a no-op.
        if !self.active {
            self.next_fire_ms = None;
            return None;
        }

        match self.visible_slot {
            None => {
                if registry.is_empty() {
                    self.stop();
                    return None;
                }
                let index = self.pick_slot(registry.len(), rng);
                if let Some(slot) = registry.get_mut(index) {
                    slot.clicked = false;
                    slot.kind = rng.random_range(0..TIER_COUNT as u8);
                }
                self.visible_slot = Some(index);
                self.last_slot = Some(index);
                self.next_fire_ms = Some(now_ms + self.show_ms);
                Some(Transition::Shown { slot: index })
            }
            Some(index) => {
                self.visible_slot = None;
                self.next_fire_ms = Some(now_ms + self.hide_ms);
                Some(Transition::Hidden { slot: index })
            }
        }
    }

    /// Uniform slot pick that resamples a bounded number of times to avoid
    /// repeating the previous choice, accepting the repeat if tries run out.
    fn pick_slot<R: Rng>(&self, len: usize, rng: &mut R) -> usize {
        let mut index = rng.random_range(0..len);
        if len > 1 {
            let mut tries = 0;
            while Some(index) == self.last_slot && tries < SLOT_RESAMPLE_TRIES {
                index = rng.random_range(0..len);
                tries += 1;
            }
        }
        index
    }
}

/// A show/hide transition produced by a scheduler firing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Shown { slot: usize },
    Hidden { slot: usize },
}
