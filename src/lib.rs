//! Mole Mallet - a first-person whack-a-mole arena
//!
//! Core modules:
//! - `sim`: Deterministic simulation (camera, hammer swing, mole scheduling)
//! - `history`: Bounded match-record log with text-file persistence
//! - `settings`: Data-driven gameplay/presentation configuration
//! - `assets`: Load bookkeeping for the scene, hammer model and mole texture
//! - `view`: Per-frame draw description consumed by a renderer
//! - `ui`: In-scene navigation menu model

pub mod assets;
pub mod history;
pub mod settings;
pub mod sim;
pub mod ui;
pub mod view;

pub use history::MatchHistory;
pub use settings::Settings;

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    /// Mouse look sensitivity (radians per pixel of raw motion)
    pub const LOOK_SENSITIVITY: f32 = 0.002;
    /// Pitch clamp, just shy of straight up/down to avoid axis flip
    pub const PITCH_LIMIT_DEG: f32 = 89.0;
    /// Camera movement speed (world units per second)
    pub const MOVE_SPEED: f32 = 2.5;

    /// Per-frame interpolation rate of the forced-reorientation turn
    pub const REORIENT_RATE: f32 = 0.12;
    /// Unit-vector distance below which reorientation is considered done
    pub const REORIENT_DONE_DIST: f32 = 0.02;
    /// Reorientation progress required before the hammer starts travelling
    pub const REORIENT_GATE: f32 = 0.95;

    /// Rays flatter than this in |dir.y| cannot hit a horizontal plane
    pub const RAY_EPSILON: f32 = 1e-4;
    /// Height of the click aim plane (head height of the targets)
    pub const AIM_PLANE_Y: f32 = 0.35;

    /// Hammer travel-progress step per frame (both directions)
    pub const TRAVEL_STEP: f32 = 0.04;
    /// Swing angle step per frame, degrees
    pub const SWING_STEP_DEG: f32 = 6.0;
    /// Swing-down limit where the impact happens
    pub const SWING_MAX_DEG: f32 = 90.0;
    /// Retraction limit (small overshoot past rest)
    pub const SWING_MIN_DEG: f32 = -5.0;
    /// Hammer base scale at travel start
    pub const HAMMER_BASE_SCALE: f32 = 1.0;
    /// Scale floor so the hammer stays visible at range
    pub const HAMMER_MIN_SCALE: f32 = 0.35;
    /// Scale shrink per world unit of camera distance
    pub const HAMMER_SCALE_FALLOFF: f32 = 0.08;

    /// Hammer idle pose offsets, camera-relative
    pub const HAMMER_IDLE_FORWARD: f32 = 0.9;
    pub const HAMMER_IDLE_RIGHT: f32 = 0.45;
    pub const HAMMER_IDLE_DOWN: f32 = 0.3;

    /// Maximum planar distance from swing point to slot that still scores
    pub const HIT_RADIUS: f32 = 0.6;

    /// Mole visible duration (milliseconds)
    pub const MOLE_SHOW_MS: u64 = 1200;
    /// Gap between moles (milliseconds)
    pub const MOLE_HIDE_MS: u64 = 500;
    /// Resample attempts to avoid repeating the previous slot
    pub const SLOT_RESAMPLE_TRIES: u32 = 10;

    /// Number of color/score tiers a slot type maps into
    pub const TIER_COUNT: usize = 4;
    /// Slot count required from a fixed-layout slot file
    pub const FIXED_SLOT_COUNT: usize = 8;

    /// Most match records kept before the oldest is evicted
    pub const HISTORY_CAPACITY: usize = 50;

    /// Round duration options the menu cycles through (seconds)
    pub const ROUND_DURATIONS_S: [u32; 3] = [30, 60, 120];
}

/// Planar (X/Z) distance between two world points.
///
/// Vertical distance is deliberately ignored: the click aim plane sits at a
/// fixed height while slot heights come from the slot file, so hit testing
/// compares ground-plan positions only.
#[inline]
pub fn planar_distance(a: Vec3, b: Vec3) -> f32 {
    let dx = a.x - b.x;
    let dz = a.z - b.z;
    (dx * dx + dz * dz).sqrt()
}

/// Normalized direction from `from` to `to`, or None if the points coincide.
#[inline]
pub fn direction_between(from: Vec3, to: Vec3) -> Option<Vec3> {
    let d = to - from;
    if d.length_squared() < 1e-10 {
        None
    } else {
        Some(d.normalize())
    }
}
