//! # Collision Detection
//!
//! A moving body sweeps the segment from its current location to where one
//! tick of velocity takes it, and checks every other tangible body in
//! registration order against that segment. Work is done in the moving
//! body's own frame: candidates are placed at their wrapped offset, so
//! bodies on opposite faces of the domain still see each other.
//!
//! The first qualifying candidate wins. A body resolves at most one
//! collision per tick; pile-ups sort themselves out over the following
//! ticks.

use crate::body::BodyId;
use crate::bounds::closest_point_on_segment;
use crate::error::PhysicsError;
use crate::math::Vec3;
use crate::world::World;

impl World {
    /// First body hit by `id` travelling `frame_delta` this tick.
    ///
    /// # Errors
    ///
    /// [`PhysicsError::UnknownBody`] if `id` is not registered and
    /// [`PhysicsError::MissingBoundary`] if it has no bounding volume.
    pub fn detect(&self, id: BodyId, frame_delta: Vec3) -> Result<Option<BodyId>, PhysicsError> {
        let factor = self.config.ship_margin_factor;
        let this = self.get(id)?;
        let own_margin = this.collision_margin(factor).ok_or(PhysicsError::MissingBoundary(id))?;

        for that in self.registry.iter() {
            if that.id == id {
                continue;
            }
            let Some(margin) = that.collision_margin(factor) else {
                continue;
            };
            let rel = self.space.relative_to(this.location, that.location);
            let min_dist = own_margin + margin;
            let nearest = closest_point_on_segment(Vec3::ZERO, frame_delta, rel);
            if (rel - nearest).length_squared() <= min_dist * min_dist {
                tracing::debug!(%id, other = %that.id, "collision detected");
                return Ok(Some(that.id));
            }
        }
        Ok(None)
    }
}
