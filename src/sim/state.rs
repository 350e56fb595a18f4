//! Aggregate game state
//!
//! One owned state object passed by reference to the update path - nothing
//! here is process-global. The RNG is seeded so whole sessions replay
//! deterministically given the same inputs and clock readings.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::sim::camera::Camera;
use crate::sim::hammer::Hammer;
use crate::sim::round::RoundTimer;
use crate::sim::scheduler::MoleScheduler;
use crate::sim::slots::SlotRegistry;

/// Things that happened during a tick, drained by the embedder each frame
/// (sound, HUD flashes, history appends).
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    MoleShown { slot: usize },
    MoleHidden { slot: usize },
    SwingStarted,
    SwingHit { slot: usize, points: i32 },
    SwingMiss,
    RoundStarted { duration_ms: u64 },
    RoundPaused { remaining_ms: u64 },
    RoundResumed { remaining_ms: u64 },
    /// Natural timeout. The only event that records match history.
    RoundEnded { score: i64 },
    /// User-initiated stop; nothing is recorded.
    RoundStopped,
}

#[derive(Debug, Clone)]
pub struct GameState {
    pub seed: u64,
    pub camera: Camera,
    pub hammer: Hammer,
    pub scheduler: MoleScheduler,
    pub slots: SlotRegistry,
    pub round: RoundTimer,
    pub score: i64,
    pub rng: Pcg32,
    events: Vec<GameEvent>,
}

impl GameState {
    pub fn new(seed: u64, slots: SlotRegistry) -> Self {
        Self {
            seed,
            camera: Camera::default(),
            hammer: Hammer::default(),
            scheduler: MoleScheduler::default(),
            slots,
            round: RoundTimer::default(),
            score: 0,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        }
    }

    /// Replace the slot set wholesale (successful reload). The scheduler is
    /// restarted if it was running so its visible index can't dangle.
    pub fn replace_slots(&mut self, slots: SlotRegistry, now_ms: u64) {
        let was_active = self.scheduler.is_active();
        self.scheduler.stop();
        self.slots = slots;
        if was_active {
            self.scheduler.start(now_ms, &self.slots);
        }
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events produced since the last drain.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::slots::Slot;
    use glam::Vec3;

    #[test]
    fn test_new_state_is_quiescent() {
        let state = GameState::new(42, SlotRegistry::default());
        assert_eq!(state.score, 0);
        assert!(state.hammer.is_idle());
        assert!(!state.scheduler.is_active());
        assert_eq!(state.round, RoundTimer::Idle);
    }

    #[test]
    fn test_replace_slots_restarts_active_scheduler() {
        let slots = SlotRegistry::new(vec![Slot::new(Vec3::ZERO, 0)]);
        let mut state = GameState::new(1, slots);
        state.scheduler.start(0, &state.slots);

        let bigger = SlotRegistry::new(vec![
            Slot::new(Vec3::ZERO, 0),
            Slot::new(Vec3::X, 1),
        ]);
        state.replace_slots(bigger, 100);
        assert!(state.scheduler.is_active());
        assert!(state.scheduler.visible_slot().is_none());
        assert_eq!(state.slots.len(), 2);
    }

    #[test]
    fn test_drain_events_empties() {
        let mut state = GameState::new(1, SlotRegistry::default());
        state.push_event(GameEvent::SwingMiss);
        assert_eq!(state.drain_events(), vec![GameEvent::SwingMiss]);
        assert!(state.drain_events().is_empty());
    }
}
