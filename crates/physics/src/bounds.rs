//! Bounding spheres and the point/segment queries collision testing needs.

use crate::math::{Space, Vec3, EPSILON};

/// Sphere approximating a body's silhouette. The centre is re-anchored on
/// the body's location every time the body moves.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoundingSphere {
    pub center: Vec3,
    pub radius: f32,
}

impl BoundingSphere {
    #[must_use]
    pub const fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    pub fn move_to(&mut self, location: Vec3) {
        self.center = location;
    }

    /// True when the spheres touch or overlap, measured the short way
    /// round `space`.
    #[must_use]
    pub fn intersects(&self, other: &Self, space: &Space) -> bool {
        let reach = self.radius + other.radius;
        space.relative_to(self.center, other.center).length_squared() <= reach * reach
    }
}

/// Closest point on the segment `start..end` to `p`.
#[must_use]
pub fn closest_point_on_segment(start: Vec3, end: Vec3, p: Vec3) -> Vec3 {
    let seg = end - start;
    let len_sq = seg.length_squared();
    if len_sq < EPSILON * EPSILON {
        return start;
    }
    let t = ((p - start).dot(seg) / len_sq).clamp(0.0, 1.0);
    start + seg * t
}
