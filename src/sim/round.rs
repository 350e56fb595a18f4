//! Round countdown timer
//!
//! Exactly one of "counting down toward an absolute end time" or "paused
//! holding a remaining duration" can hold at once, so the timer is an enum
//! rather than a pair of flags.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RoundTimer {
    #[default]
    Idle,
    Running {
        /// Absolute end time on the caller's millisecond clock
        end_ms: u64,
    },
    Paused {
        remaining_ms: u64,
    },
}

impl RoundTimer {
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running { .. })
    }

    pub fn is_paused(&self) -> bool {
        matches!(self, Self::Paused { .. })
    }

    /// Start a round of `duration_ms`. No-op unless idle; a paused round is
    /// continued with `resume`, not restarted. Returns whether it started.
    pub fn start(&mut self, now_ms: u64, duration_ms: u64) -> bool {
        if *self != Self::Idle {
            return false;
        }
        *self = Self::Running {
            end_ms: now_ms + duration_ms,
        };
        true
    }

    /// Pause, preserving the remaining time (floored at zero). Valid only
    /// while running.
    pub fn pause(&mut self, now_ms: u64) -> bool {
        let Self::Running { end_ms } = *self else {
            return false;
        };
        *self = Self::Paused {
            remaining_ms: end_ms.saturating_sub(now_ms),
        };
        true
    }

    /// Resume a paused round: the new end time is now plus the preserved
    /// remainder, not the original duration.
    pub fn resume(&mut self, now_ms: u64) -> bool {
        let Self::Paused { remaining_ms } = *self else {
            return false;
        };
        *self = Self::Running {
            end_ms: now_ms + remaining_ms,
        };
        true
    }

    /// Abandon the round without finalizing.
    pub fn stop(&mut self) {
        *self = Self::Idle;
    }

    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        match *self {
            Self::Idle => 0,
            Self::Running { end_ms } => end_ms.saturating_sub(now_ms),
            Self::Paused { remaining_ms } => remaining_ms,
        }
    }

    /// Returns true exactly once when a running round crosses its end time,
    /// leaving the timer idle. The caller finalizes (records the match,
    /// halts the scheduler).
    pub fn poll_expired(&mut self, now_ms: u64) -> bool {
        if let Self::Running { end_ms } = *self {
            if now_ms >= end_ms {
                *self = Self::Idle;
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_only_from_idle() {
        let mut t = RoundTimer::default();
        assert!(t.start(1_000, 60_000));
        assert!(t.is_running());
        // Re-entrant start: no state change.
        assert!(!t.start(5_000, 30_000));
        assert_eq!(t.remaining_ms(1_000), 60_000);
    }

    #[test]
    fn test_pause_preserves_remainder() {
        let mut t = RoundTimer::default();
        t.start(0, 60_000);
        assert!(t.pause(50_000));
        assert_eq!(t, RoundTimer::Paused { remaining_ms: 10_000 });
        // Pausing again is a no-op.
        assert!(!t.pause(55_000));
    }

    #[test]
    fn test_resume_uses_remainder_not_duration() {
        let mut t = RoundTimer::default();
        t.start(0, 60_000);
        t.pause(50_000);
        assert!(t.resume(200_000));
        assert_eq!(t, RoundTimer::Running { end_ms: 210_000 });
        assert!(!t.resume(200_000));
    }

    #[test]
    fn test_pause_past_end_floors_at_zero() {
        let mut t = RoundTimer::default();
        t.start(0, 1_000);
        t.pause(5_000);
        assert_eq!(t.remaining_ms(5_000), 0);
    }

    #[test]
    fn test_expiry_fires_once() {
        let mut t = RoundTimer::default();
        t.start(0, 60_000);
        assert!(!t.poll_expired(59_999));
        assert!(t.poll_expired(60_000));
        assert!(!t.poll_expired(60_001));
        assert_eq!(t, RoundTimer::Idle);
    }

    #[test]
    fn test_paused_round_never_expires() {
        let mut t = RoundTimer::default();
        t.start(0, 1_000);
        t.pause(500);
        assert!(!t.poll_expired(1_000_000));
        assert!(t.is_paused());
    }
}
