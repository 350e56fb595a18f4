//! Hammer swing state machine
//!
//! Lifecycle: Idle -> MovingToTarget -> SwingingDown -> SwingingUp ->
//! Returning -> Idle, re-entered only from Idle. Position and scale are pure
//! functions of phase and progress, never stored separately, so they can
//! never drift out of sync with the state.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::{
    HAMMER_BASE_SCALE, HAMMER_IDLE_DOWN, HAMMER_IDLE_FORWARD, HAMMER_IDLE_RIGHT,
    HAMMER_MIN_SCALE, HAMMER_SCALE_FALLOFF, REORIENT_GATE, SWING_MAX_DEG, SWING_MIN_DEG,
    SWING_STEP_DEG, TRAVEL_STEP,
};
use crate::planar_distance;
use crate::sim::camera::Camera;
use crate::sim::scheduler::MoleScheduler;
use crate::sim::slots::SlotRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum HammerPhase {
    #[default]
    Idle,
    MovingToTarget,
    SwingingDown,
    SwingingUp,
    Returning,
}

/// Emitted exactly once per swing, on the frame the swing angle reaches its
/// maximum. Carries the world point the hit test runs against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwingImpact {
    pub point: Vec3,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Hammer {
    phase: HammerPhase,
    /// Swing angle in degrees; 0 at rest, SWING_MAX_DEG at impact
    swing_deg: f32,
    /// Travel interpolation parameter in [0, 1]
    travel: f32,
    start_pos: Vec3,
    target_pos: Vec3,
}

impl Hammer {
    pub fn phase(&self) -> HammerPhase {
        self.phase
    }

    pub fn swing_deg(&self) -> f32 {
        self.swing_deg
    }

    pub fn travel(&self) -> f32 {
        self.travel
    }

    pub fn target(&self) -> Vec3 {
        self.target_pos
    }

    pub fn is_idle(&self) -> bool {
        self.phase == HammerPhase::Idle
    }

    /// Current world position, interpolated from travel progress. Only
    /// meaningful outside Idle; the idle camera-follow pose is presentational
    /// and derived in the view layer.
    pub fn position(&self) -> Vec3 {
        self.start_pos.lerp(self.target_pos, self.travel)
    }

    /// Display scale, a clamped affine function of camera distance so the
    /// hammer never shrinks to invisibility at range.
    pub fn scale(&self, camera_pos: Vec3) -> f32 {
        let dist = (self.position() - camera_pos).length();
        (HAMMER_BASE_SCALE - dist * HAMMER_SCALE_FALLOFF).clamp(HAMMER_MIN_SCALE, HAMMER_BASE_SCALE)
    }

    /// Start a swing toward `target`. Only accepted from Idle; a click while
    /// any other phase is active is ignored. Returns whether a swing began.
    pub fn begin_swing(&mut self, camera: &Camera, target: Vec3) -> bool {
        if self.phase != HammerPhase::Idle {
            return false;
        }
        self.start_pos = idle_anchor(camera);
        self.target_pos = target;
        self.travel = 0.0;
        self.swing_deg = 0.0;
        self.phase = HammerPhase::MovingToTarget;
        true
    }

    /// Advance one frame. `reorient_progress` gates the travel start: the
    /// hammer holds at the camera until the forced turn is complete enough.
    ///
    /// Returns `Some(SwingImpact)` on the single frame the swing reaches its
    /// maximum angle.
    pub fn advance(&mut self, reorient_progress: f32) -> Option<SwingImpact> {
        match self.phase {
            HammerPhase::Idle => None,
            HammerPhase::MovingToTarget => {
                if reorient_progress >= REORIENT_GATE {
                    self.travel = (self.travel + TRAVEL_STEP).min(1.0);
                    if self.travel >= 1.0 {
                        self.phase = HammerPhase::SwingingDown;
                    }
                }
                None
            }
            HammerPhase::SwingingDown => {
                self.swing_deg += SWING_STEP_DEG;
                if self.swing_deg >= SWING_MAX_DEG {
                    self.swing_deg = SWING_MAX_DEG;
                    self.phase = HammerPhase::SwingingUp;
                    return Some(SwingImpact {
                        point: self.target_pos,
                    });
                }
                None
            }
            HammerPhase::SwingingUp => {
                self.swing_deg -= SWING_STEP_DEG;
                if self.swing_deg <= SWING_MIN_DEG {
                    self.swing_deg = SWING_MIN_DEG;
                    self.phase = HammerPhase::Returning;
                }
                None
            }
            HammerPhase::Returning => {
                self.travel -= TRAVEL_STEP;
                if self.travel <= 0.0 {
                    self.travel = 0.0;
                    self.swing_deg = 0.0;
                    self.phase = HammerPhase::Idle;
                }
                None
            }
        }
    }
}

/// Camera-relative anchor the hammer rests at and travels from.
pub fn idle_anchor(camera: &Camera) -> Vec3 {
    camera.position + camera.front() * HAMMER_IDLE_FORWARD + camera.right() * HAMMER_IDLE_RIGHT
        - Vec3::Y * HAMMER_IDLE_DOWN
}

/// Resolve a swing impact against the slot registry.
///
/// Eligibility: while the scheduler is active only the currently visible,
/// unclicked slot may score; otherwise every unclicked slot is a candidate.
/// Distance is planar (X/Z) only - the aim plane sits above the slot
/// heights, so only ground-plan distance counts. The nearest candidate
/// within `hit_radius` is credited; at most one slot per swing.
pub fn resolve_hit(
    point: Vec3,
    registry: &mut SlotRegistry,
    scheduler: &MoleScheduler,
    hit_radius: f32,
) -> Option<(usize, u8)> {
    let mut best: Option<(usize, f32)> = None;
    let active_slot = scheduler.is_active().then(|| scheduler.visible_slot());

    for index in 0..registry.len() {
        if let Some(visible) = active_slot {
            if visible != Some(index) {
                continue;
            }
        }
        let Some(slot) = registry.get(index) else {
            continue;
        };
        if slot.clicked {
            continue;
        }
        let dist = planar_distance(slot.position, point);
        if dist <= hit_radius && best.is_none_or(|(_, d)| dist < d) {
            best = Some((index, dist));
        }
    }

    let (index, _) = best?;
    let slot = registry.get_mut(index)?;
    slot.clicked = true;
    Some((index, slot.kind))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::slots::Slot;

    fn swing_to_impact(hammer: &mut Hammer) -> u32 {
        let mut frames = 0;
        loop {
            frames += 1;
            assert!(frames < 10_000, "swing never reached impact");
            if hammer.advance(1.0).is_some() {
                return frames;
            }
        }
    }

    #[test]
    fn test_full_lifecycle() {
        let camera = Camera::default();
        let mut hammer = Hammer::default();
        assert!(hammer.is_idle());

        assert!(hammer.begin_swing(&camera, Vec3::new(0.0, 0.0, -3.0)));
        assert_eq!(hammer.phase(), HammerPhase::MovingToTarget);

        swing_to_impact(&mut hammer);
        assert_eq!(hammer.phase(), HammerPhase::SwingingUp);
        assert!((hammer.swing_deg() - SWING_MAX_DEG).abs() < 1e-6);

        // Retract, return, settle back to idle.
        let mut frames = 0;
        while !hammer.is_idle() {
            frames += 1;
            assert!(frames < 10_000);
            assert!(hammer.advance(1.0).is_none(), "impact fired twice");
        }
        assert_eq!(hammer.travel(), 0.0);
        assert_eq!(hammer.swing_deg(), 0.0);
    }

    #[test]
    fn test_impact_fires_exactly_once() {
        let camera = Camera::default();
        let mut hammer = Hammer::default();
        hammer.begin_swing(&camera, Vec3::ZERO);

        let mut impacts = 0;
        for _ in 0..2_000 {
            if hammer.advance(1.0).is_some() {
                impacts += 1;
            }
        }
        assert_eq!(impacts, 1);
    }

    #[test]
    fn test_click_ignored_while_swinging() {
        let camera = Camera::default();
        let mut hammer = Hammer::default();
        assert!(hammer.begin_swing(&camera, Vec3::new(1.0, 0.0, 0.0)));
        let target = hammer.target();
        assert!(!hammer.begin_swing(&camera, Vec3::new(9.0, 0.0, 9.0)));
        assert_eq!(hammer.target(), target);
    }

    #[test]
    fn test_travel_gated_by_reorient_progress() {
        let camera = Camera::default();
        let mut hammer = Hammer::default();
        hammer.begin_swing(&camera, Vec3::new(0.0, 0.0, -3.0));

        for _ in 0..50 {
            hammer.advance(0.5);
        }
        assert_eq!(hammer.travel(), 0.0, "hammer moved before the turn landed");

        hammer.advance(REORIENT_GATE);
        assert!(hammer.travel() > 0.0);
    }

    #[test]
    fn test_position_interpolates_between_start_and_target() {
        let camera = Camera::new(Vec3::ZERO);
        let mut hammer = Hammer::default();
        let target = Vec3::new(0.0, 0.0, -10.0);
        hammer.begin_swing(&camera, target);

        let start = hammer.position();
        while hammer.phase() == HammerPhase::MovingToTarget {
            let before = hammer.position();
            hammer.advance(1.0);
            let after = hammer.position();
            // Monotone progress toward the target.
            assert!((after - target).length() <= (before - target).length() + 1e-6);
        }
        assert!((hammer.position() - target).length() < 1e-4);
        assert!((start - idle_anchor(&camera)).length() < 1e-6);
    }

    #[test]
    fn test_scale_clamped() {
        let camera = Camera::new(Vec3::ZERO);
        let mut hammer = Hammer::default();
        hammer.begin_swing(&camera, Vec3::new(0.0, 0.0, -100.0));
        while hammer.phase() == HammerPhase::MovingToTarget {
            hammer.advance(1.0);
            let s = hammer.scale(camera.position);
            assert!(s >= HAMMER_MIN_SCALE && s <= HAMMER_BASE_SCALE);
        }
        // Far away: clamped at the floor, still visible.
        assert_eq!(hammer.scale(camera.position), HAMMER_MIN_SCALE);
    }

    #[test]
    fn test_resolve_hit_nearest_within_radius() {
        let mut reg = SlotRegistry::new(vec![
            Slot::new(Vec3::new(0.0, 0.0, 0.0), 0),
            Slot::new(Vec3::new(0.3, 5.0, 0.0), 1), // closer in plan, far in Y
            Slot::new(Vec3::new(2.0, 0.0, 0.0), 2),
        ]);
        let sched = MoleScheduler::default(); // inactive: all unclicked eligible

        let hit = resolve_hit(Vec3::new(0.25, 0.0, 0.0), &mut reg, &sched, 0.6);
        assert_eq!(hit, Some((1, 1)));
        assert!(reg.get(1).unwrap().clicked);
        // Others untouched.
        assert!(!reg.get(0).unwrap().clicked);
    }

    #[test]
    fn test_resolve_hit_respects_active_scheduler() {
        let mut reg = SlotRegistry::new(vec![
            Slot::new(Vec3::new(0.0, 0.0, 0.0), 0),
            Slot::new(Vec3::new(1.0, 0.0, 0.0), 1),
        ]);
        let mut sched = MoleScheduler::default();
        sched.start(0, &reg);
        // No mole visible yet: nothing is eligible even dead-center.
        assert_eq!(resolve_hit(Vec3::ZERO, &mut reg, &sched, 0.6), None);
    }

    #[test]
    fn test_resolve_hit_skips_clicked() {
        let mut reg = SlotRegistry::new(vec![Slot::new(Vec3::ZERO, 3)]);
        let sched = MoleScheduler::default();
        assert_eq!(resolve_hit(Vec3::ZERO, &mut reg, &sched, 0.6), Some((0, 3)));
        // Same swing point again: already scored, no double credit.
        assert_eq!(resolve_hit(Vec3::ZERO, &mut reg, &sched, 0.6), None);
    }

    #[test]
    fn test_resolve_hit_out_of_radius() {
        let mut reg = SlotRegistry::new(vec![Slot::new(Vec3::ZERO, 0)]);
        let sched = MoleScheduler::default();
        assert_eq!(
            resolve_hit(Vec3::new(5.0, 0.0, 0.0), &mut reg, &sched, 0.6),
            None
        );
    }
}
