//! # Motion Integration
//!
//! Moves one body by one tick. A moving, tangible body first sweeps its
//! path for collisions; whatever it hits is resolved before the move.
//!
//! The move itself uses the frame delta computed *before* resolution, so a
//! body that bounces this tick still travels its original path and only
//! heads back next tick. This mirrors how the game has always played.

use crate::body::{BodyId, BodyKind};
use crate::error::PhysicsError;
use crate::events::WorldEvent;
use crate::world::World;

/// What happened to a body during its turn.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// Destroyed earlier in the tick.
    Gone,
    Resting,
    /// A projectile that ran out of range.
    Expired,
    Moved { hit: Option<BodyId> },
    /// Destroyed by its own collision before it could move.
    Consumed { hit: BodyId },
}

impl World {
    pub(crate) fn step_body(&mut self, id: BodyId, dt: f32) -> Result<Step, PhysicsError> {
        let limit = self.config.max_speed;
        let Some(body) = self.registry.get_mut(id) else {
            return Ok(Step::Gone);
        };

        if !body.location.is_finite() || !body.velocity.is_finite() {
            return Err(PhysicsError::NonFiniteState(id));
        }
        let speed = body.speed();
        if speed > limit {
            return Err(PhysicsError::SpeedLimitExceeded { id, speed, limit });
        }

        if let BodyKind::Projectile { ttl_ticks, .. } = &mut body.kind {
            if *ttl_ticks == 0 {
                tracing::debug!(%id, "projectile expired");
                self.destruct(id);
                return Ok(Step::Expired);
            }
            *ttl_ticks -= 1;
        }

        if body.velocity.is_zero() {
            return Ok(Step::Resting);
        }

        let frame_delta = body.frame_delta(dt);
        let hit = if body.boundary.is_some() {
            self.detect(id, frame_delta)?
        } else {
            None
        };
        if let Some(other) = hit {
            self.resolve(id, other)?;
        }

        let space = self.space;
        let Some(body) = self.registry.get_mut(id) else {
            // `hit` is always set here: only a resolution can remove the body.
            return Ok(hit.map_or(Step::Gone, |hit| Step::Consumed { hit }));
        };
        body.location += frame_delta;
        space.wrap(&mut body.location);
        body.reanchor();
        let location = body.location;
        self.events.push(WorldEvent::Moved { id, location });
        Ok(Step::Moved { hit })
    }
}
