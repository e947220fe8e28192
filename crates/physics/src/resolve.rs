//! # Collision Response
//!
//! Settling a contact between two bodies happens in three steps:
//!
//! 1.  **Separation.** Overlapping bodies are pushed apart along the line
//!     joining their centres until they just touch. The push is shared in
//!     proportion to the *other* body's radius, so the bigger body moves
//!     less. Mass plays no part here.
//! 2.  **Momentum transfer.** The contact is treated as a one-dimensional
//!     elastic collision along the contact normal; only the velocity
//!     components along that normal change.
//! 3.  **Damage.** Each body hits the other with its impact damage, unless
//!     one of them owns the other (a projectile never hurts its launcher).
//!
//! A contact that carries one body through a linked wormhole skips the
//! first two steps and goes straight to the damage step, which is where
//! transit happens. A mouth with no exit, or one meeting a body it cannot
//! carry, is as solid as anything else.

use crate::body::{BodyId, DamageOutcome, ImpactEffect};
use crate::error::PhysicsError;
use crate::events::WorldEvent;
use crate::world::World;

/// Extra clearance added when separating, so float rounding never leaves
/// the pair still touching.
const SEPARATION_SLOP: f32 = 1e-3;

/// What a call to [`World::resolve`] did.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Resolution {
    pub separated: bool,
    pub momentum_transferred: bool,
    pub damage_suppressed: bool,
    pub outcomes: Vec<(BodyId, DamageOutcome)>,
}

impl World {
    /// Settle a contact between `a` and `b`.
    ///
    /// # Errors
    ///
    /// [`PhysicsError::UnknownBody`] if either body is not registered,
    /// [`PhysicsError::MissingBoundary`] if either has no bounding volume and
    /// [`PhysicsError::InvalidBody`] if `a` and `b` are the same body.
    pub fn resolve(&mut self, a: BodyId, b: BodyId) -> Result<Resolution, PhysicsError> {
        if a == b {
            return Err(PhysicsError::InvalidBody("a body cannot collide with itself"));
        }
        let body_a = self.get(a)?;
        let body_b = self.get(b)?;
        if body_a.boundary.is_none() {
            return Err(PhysicsError::MissingBoundary(a));
        }
        if body_b.boundary.is_none() {
            return Err(PhysicsError::MissingBoundary(b));
        }
        let transit = matches!(body_a.impact_effect(body_b), ImpactEffect::Transport { .. })
            || matches!(body_b.impact_effect(body_a), ImpactEffect::Transport { .. });

        self.events.push(WorldEvent::Collision { a, b });
        let mut resolution = Resolution::default();
        if !transit {
            resolution.separated = self.separate(a, b)?;
            resolution.momentum_transferred = self.transfer_momentum(a, b)?;
        }
        self.exchange_damage(a, b, &mut resolution)?;
        Ok(resolution)
    }

    fn separate(&mut self, a: BodyId, b: BodyId) -> Result<bool, PhysicsError> {
        let (loc_a, size_a) = {
            let body = self.get(a)?;
            (body.location, body.size)
        };
        let (loc_b, size_b) = {
            let body = self.get(b)?;
            (body.location, body.size)
        };

        let reach = size_a + size_b;
        let mut rel = self.space.relative_to(loc_a, loc_b);
        if rel.length() >= reach {
            return Ok(false);
        }
        if rel.try_normalize().is_none() {
            tracing::debug!(%a, %b, "coincident bodies, nudging apart");
            rel = self.random_direction() * SEPARATION_SLOP;
        }
        let dist = rel.length();
        let dir = rel / dist;
        let overlap = reach - dist + SEPARATION_SLOP;

        let space = self.space;
        let body = self.get_mut(a)?;
        body.location = space.offset(body.location, dir * (-overlap * size_b / reach));
        body.reanchor();
        let body = self.get_mut(b)?;
        body.location = space.offset(body.location, dir * (overlap * size_a / reach));
        body.reanchor();
        Ok(true)
    }

    fn transfer_momentum(&mut self, a: BodyId, b: BodyId) -> Result<bool, PhysicsError> {
        let (loc_a, vel_a, m1) = {
            let body = self.get(a)?;
            (body.location, body.velocity, body.mass)
        };
        let (loc_b, vel_b, m2) = {
            let body = self.get(b)?;
            (body.location, body.velocity, body.mass)
        };

        let total = m1 + m2;
        if total <= 0.0 {
            tracing::warn!(%a, %b, "no mass on either side of collision, skipping momentum transfer");
            return Ok(false);
        }
        let Some(d1) = self.space.relative_to(loc_a, loc_b).try_normalize() else {
            tracing::warn!(%a, %b, "no contact normal, skipping momentum transfer");
            return Ok(false);
        };

        let u1 = vel_a.dot(d1);
        let u2 = vel_b.dot(d1);
        let (v1, v2) = elastic_1d(m1, u1, m2, u2);

        self.get_mut(a)?.velocity += d1 * (v1 - u1);
        self.get_mut(b)?.velocity += d1 * (v2 - u2);
        Ok(true)
    }

    fn exchange_damage(&mut self, a: BodyId, b: BodyId, resolution: &mut Resolution) -> Result<(), PhysicsError> {
        let body_a = self.get(a)?;
        let body_b = self.get(b)?;
        if body_a.is_owned_by(b) || body_b.is_owned_by(a) {
            resolution.damage_suppressed = true;
            return Ok(());
        }

        let hits_from_a = body_a.impact_damage();
        let hits_from_b = body_b.impact_damage();
        let effect_a = body_a.impact_effect(body_b);
        let effect_b = body_b.impact_effect(body_a);

        let outcome_b = self.get_mut(b)?.take_damage(hits_from_a, a);
        let outcome_a = self.get_mut(a)?.take_damage(hits_from_b, b);
        self.events.push(WorldEvent::Damaged { target: b, source: a, hits: hits_from_a, outcome: outcome_b });
        self.events.push(WorldEvent::Damaged { target: a, source: b, hits: hits_from_b, outcome: outcome_a });
        resolution.outcomes.push((a, outcome_a));
        resolution.outcomes.push((b, outcome_b));

        self.apply_outcome(b, outcome_b)?;
        self.apply_outcome(a, outcome_a)?;
        self.apply_effect(a, effect_a)?;
        self.apply_effect(b, effect_b)?;
        Ok(())
    }

    fn apply_outcome(&mut self, id: BodyId, outcome: DamageOutcome) -> Result<(), PhysicsError> {
        if !self.registry.contains(id) {
            return Ok(());
        }
        match outcome {
            DamageOutcome::Unharmed | DamageOutcome::Damaged => {}
            DamageOutcome::Destroyed => {
                self.destruct(id);
            }
            DamageOutcome::Respawn => self.respawn(id)?,
            DamageOutcome::Split => {
                self.split_rock(id)?;
            }
        }
        Ok(())
    }

    fn apply_effect(&mut self, id: BodyId, effect: ImpactEffect) -> Result<(), PhysicsError> {
        match effect {
            ImpactEffect::None => {}
            ImpactEffect::Expended => {
                self.destruct(id);
            }
            ImpactEffect::Transport { body, exit } => {
                if !self.registry.contains(body) {
                    return Ok(());
                }
                let Some(destination) = self.registry.get(exit).map(|hole| hole.location) else {
                    tracing::warn!(wormhole = %id, %exit, "wormhole exit is gone");
                    return Ok(());
                };
                self.teleport(body, destination)?;
                self.separate_from(body, exit)?;
            }
        }
        Ok(())
    }
}

/// Velocities after a perfectly elastic head-on collision.
#[must_use]
pub fn elastic_1d(m1: f32, u1: f32, m2: f32, u2: f32) -> (f32, f32) {
    let total = m1 + m2;
    let v1 = ((m1 - m2) / total) * u1 + (2.0 * m2 / total) * u2;
    let v2 = (2.0 * m1 / total) * u1 + ((m2 - m1) / total) * u2;
    (v1, v2)
}
