//! Click ray construction and plane intersection
//!
//! A pointer click becomes a world-space ray by un-projecting the screen
//! point at near and far clip depth through the inverse of the combined
//! camera/projection transform, then gets intersected with the horizontal
//! aim plane the targets live at.

use glam::{Mat4, Vec2, Vec3, Vec4, Vec4Swizzles};

use crate::consts::RAY_EPSILON;

/// Window-space viewport rectangle, origin top-left, Y down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width,
            height,
        }
    }
}

/// A world-space ray with a normalized direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    /// Build a world-space ray from a screen click.
    ///
    /// `screen` is in window coordinates (pixels, Y down). `view` and `proj`
    /// come from the rendering collaborator; clip-space Z spans [-1, 1].
    ///
    /// Returns `None` when the combined transform is not invertible or a
    /// perspective divide degenerates - the click is then a no-op.
    pub fn from_screen(screen: Vec2, view: Mat4, proj: Mat4, viewport: Viewport) -> Option<Self> {
        if viewport.width <= 0.0 || viewport.height <= 0.0 {
            return None;
        }
        let inv = (proj * view).inverse();
        if !inv.is_finite() {
            return None;
        }

        // Window Y grows downward, NDC Y grows upward.
        let ndc_x = 2.0 * (screen.x - viewport.x) / viewport.width - 1.0;
        let ndc_y = 1.0 - 2.0 * (screen.y - viewport.y) / viewport.height;

        let near = unproject(&inv, Vec3::new(ndc_x, ndc_y, -1.0))?;
        let far = unproject(&inv, Vec3::new(ndc_x, ndc_y, 1.0))?;

        let dir = far - near;
        if dir.length_squared() < 1e-12 {
            return None;
        }
        Some(Self {
            origin: near,
            dir: dir.normalize(),
        })
    }

    /// Intersect with the horizontal plane `y = plane_y`.
    ///
    /// Returns `None` when the ray is near-parallel to the plane or the
    /// intersection lies at or behind the origin.
    pub fn intersect_plane_y(&self, plane_y: f32) -> Option<Vec3> {
        if self.dir.y.abs() < RAY_EPSILON {
            return None;
        }
        let t = (plane_y - self.origin.y) / self.dir.y;
        if t <= 0.0 {
            return None;
        }
        Some(self.origin + self.dir * t)
    }
}

fn unproject(inv: &Mat4, ndc: Vec3) -> Option<Vec3> {
    let p = *inv * Vec4::new(ndc.x, ndc.y, ndc.z, 1.0);
    if p.w.abs() < 1e-9 {
        return None;
    }
    Some(p.xyz() / p.w)
}
