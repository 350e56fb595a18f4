//! Per-frame draw description
//!
//! The renderer is an external collaborator; this module answers "what gets
//! drawn this frame, and where" as plain data. Everything here is derived
//! from simulation state - capturing a view mutates nothing.

use glam::Vec3;

use crate::consts::HAMMER_BASE_SCALE;
use crate::settings::Settings;
use crate::sim::hammer::idle_anchor;
use crate::sim::state::GameState;

/// Hammer draw pose for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HammerPose {
    pub position: Vec3,
    /// Swing angle, degrees; 0 at rest
    pub swing_deg: f32,
    /// Orientation matches the camera
    pub yaw: f32,
    pub pitch: f32,
    pub scale: f32,
}

/// The currently visible mole, if any.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoleView {
    pub slot: usize,
    pub position: Vec3,
    /// Color tier index, 0-3
    pub tier: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hud {
    pub score: i64,
    pub remaining_s: u64,
    pub paused: bool,
    pub round_running: bool,
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameView {
    pub eye: Vec3,
    pub center: Vec3,
    pub up: Vec3,
    pub hammer: HammerPose,
    pub mole: Option<MoleView>,
    /// Visual mode toggle; flat colors when false
    pub textured: bool,
    pub hud: Hud,
}

impl FrameView {
    pub fn capture(state: &GameState, settings: &Settings, now_ms: u64) -> Self {
        let camera = &state.camera;

        let hammer = if state.hammer.is_idle() {
            // Idle pose follows the camera at fixed offsets; recomputed every
            // frame, never persisted.
            HammerPose {
                position: idle_anchor(camera),
                swing_deg: 0.0,
                yaw: camera.yaw,
                pitch: camera.pitch,
                scale: HAMMER_BASE_SCALE,
            }
        } else {
            HammerPose {
                position: state.hammer.position(),
                swing_deg: state.hammer.swing_deg(),
                yaw: camera.yaw,
                pitch: camera.pitch,
                scale: state.hammer.scale(camera.position),
            }
        };

        let mole = state.scheduler.visible_slot().and_then(|slot| {
            state.slots.get(slot).map(|s| MoleView {
                slot,
                position: s.position,
                tier: s.kind,
            })
        });

        Self {
            eye: camera.position,
            center: camera.position + camera.front(),
            up: camera.up(),
            hammer,
            mole,
            textured: settings.textured,
            hud: Hud {
                score: state.score,
                remaining_s: state.round.remaining_ms(now_ms).div_ceil(1000),
                paused: state.round.is_paused(),
                round_running: state.round.is_running(),
            },
        }
    }
}
