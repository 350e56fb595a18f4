//! First-person camera
//!
//! Two modes: free look (yaw/pitch driven by raw mouse motion, no button
//! required) and forced reorientation, where the view turns itself toward a
//! clicked target. Reorientation progress gates the hammer's travel start.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::{
    LOOK_SENSITIVITY, MOVE_SPEED, PITCH_LIMIT_DEG, REORIENT_DONE_DIST, REORIENT_RATE,
};

/// In-flight forced reorientation toward a target view direction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Reorient {
    /// Unit direction the view is turning toward
    target: Vec3,
    /// Unit-vector distance between front and target when the turn began
    initial_dist: f32,
    /// Interpolated front vector, renormalized every step
    front: Vec3,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    pub position: Vec3,
    /// Horizontal angle, radians; unrestricted
    pub yaw: f32,
    /// Vertical angle, radians; clamped to avoid axis flip
    pub pitch: f32,
    pub sensitivity: f32,
    reorient: Option<Reorient>,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 1.5, 4.0),
            yaw: 0.0,
            pitch: 0.0,
            sensitivity: LOOK_SENSITIVITY,
            reorient: None,
        }
    }
}

impl Camera {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// View direction. While reorienting this is the interpolated vector,
    /// otherwise it is derived from yaw/pitch.
    ///
    /// Convention: +X right, +Y up, -Z forward at yaw=0 pitch=0.
    pub fn front(&self) -> Vec3 {
        match &self.reorient {
            Some(r) => r.front,
            None => front_from_angles(self.yaw, self.pitch),
        }
    }

    /// Right vector, horizontal.
    pub fn right(&self) -> Vec3 {
        self.front().cross(Vec3::Y).normalize()
    }

    pub fn up(&self) -> Vec3 {
        self.right().cross(self.front()).normalize()
    }

    pub fn is_reorienting(&self) -> bool {
        self.reorient.is_some()
    }

    /// Turn completion in [0, 1]; 1 whenever no turn is in flight.
    pub fn reorient_progress(&self) -> f32 {
        match &self.reorient {
            None => 1.0,
            Some(r) => {
                let dist = (r.target - r.front).length();
                (1.0 - dist / r.initial_dist).clamp(0.0, 1.0)
            }
        }
    }

    /// Apply raw mouse motion (pixels). Ignored while a forced turn is in
    /// flight; the turn owns the view until it lands.
    pub fn apply_mouse_delta(&mut self, dx: f32, dy: f32) {
        if self.reorient.is_some() {
            return;
        }
        self.yaw += dx * self.sensitivity;
        self.pitch -= dy * self.sensitivity;
        let limit = PITCH_LIMIT_DEG.to_radians();
        self.pitch = self.pitch.clamp(-limit, limit);
    }

    /// Move along the view basis. `forward`/`strafe` are -1/0/+1 key axes.
    pub fn move_by(&mut self, forward: f32, strafe: f32, dt: f32) {
        if forward == 0.0 && strafe == 0.0 {
            return;
        }
        let step = (self.front() * forward + self.right() * strafe).normalize_or_zero();
        self.position += step * MOVE_SPEED * dt;
    }

    /// Begin turning the view toward `target_dir` (must be normalized).
    ///
    /// If the view is already close enough no turn starts and progress stays
    /// at 1. A turn already in flight is replaced.
    pub fn begin_reorient(&mut self, target_dir: Vec3) {
        let front = self.front();
        let initial_dist = (target_dir - front).length();
        if initial_dist < REORIENT_DONE_DIST {
            self.set_angles_from(target_dir);
            self.reorient = None;
            return;
        }
        self.reorient = Some(Reorient {
            target: target_dir,
            initial_dist,
            front,
        });
    }

    /// Advance the forced turn by one frame. No-op in free look.
    ///
    /// Completion is tested with the Euclidean distance between unit vectors
    /// rather than an angle; on completion yaw/pitch land exactly on the
    /// target so free look resumes seamlessly.
    pub fn update_reorient(&mut self) {
        let Some(r) = &mut self.reorient else {
            return;
        };
        r.front = (r.front + (r.target - r.front) * REORIENT_RATE).normalize();
        if (r.target - r.front).length() < REORIENT_DONE_DIST {
            let target = r.target;
            self.set_angles_from(target);
            self.reorient = None;
        } else {
            let front = r.front;
            self.set_angles_from(front);
        }
    }

    /// Back-derive yaw/pitch from a unit view direction.
    fn set_angles_from(&mut self, dir: Vec3) {
        self.yaw = dir.x.atan2(-dir.z);
        let limit = PITCH_LIMIT_DEG.to_radians();
        self.pitch = dir.y.clamp(-1.0, 1.0).asin().clamp(-limit, limit);
    }
}

fn front_from_angles(yaw: f32, pitch: f32) -> Vec3 {
    Vec3::new(
        yaw.sin() * pitch.cos(),
        pitch.sin(),
        -yaw.cos() * pitch.cos(),
    )
    .normalize()
}
