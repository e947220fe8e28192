//! # Body Lifecycle
//!
//! Builder-style methods for bringing bodies into the world and taking them
//! out again, plus the spawning helpers gameplay builds on them: firing a
//! projectile, breaking a rock into fragments, respawning a ship and moving
//! a body through a wormhole.

use crate::body::{BodyId, BodyKind, BodySpec};
use crate::error::PhysicsError;
use crate::events::WorldEvent;
use crate::math::Vec3;
use crate::world::World;

/// Speed at which rock fragments drift away from the parent's path.
const FRAGMENT_SCATTER_SPEED: f32 = 5.0;

impl World {
    /// Register a new body and announce it to the renderer.
    ///
    /// # Errors
    ///
    /// [`PhysicsError::InvalidBody`] if the spec has non-finite vectors, a
    /// non-positive size or a negative mass.
    pub fn create(&mut self, mut spec: BodySpec) -> Result<BodyId, PhysicsError> {
        spec.validate()?;
        self.space.wrap(&mut spec.location);
        let kind = spec.kind.name();
        let id = self.registry.insert(spec);
        tracing::debug!(%id, kind, "body created");
        if let Some(body) = self.registry.get(id) {
            self.events.push(WorldEvent::Created(body.clone()));
        }
        Ok(id)
    }

    /// Remove a body. Returns `false` if it was already gone.
    pub fn destruct(&mut self, id: BodyId) -> bool {
        match self.registry.remove(id) {
            Some(body) => {
                tracing::debug!(%id, kind = body.kind.name(), "body destroyed");
                self.events.push(WorldEvent::Destroyed(id));
                true
            }
            None => false,
        }
    }

    /// Push a freshly spawned body clear of `parent` so the two do not
    /// collide on the next tick. Gives up with a warning after
    /// `separation_retries` pushes; returns whether the bodies are clear.
    ///
    /// # Errors
    ///
    /// [`PhysicsError::UnknownBody`] or [`PhysicsError::MissingBoundary`]
    /// for either body.
    pub fn separate_from(&mut self, id: BodyId, parent: BodyId) -> Result<bool, PhysicsError> {
        let anchor = self.get(parent)?.boundary.ok_or(PhysicsError::MissingBoundary(parent))?;
        let reach = self.get(id)?.boundary.ok_or(PhysicsError::MissingBoundary(id))?.radius + anchor.radius;

        let space = self.space;
        let mut moved = false;
        for _ in 0..self.config.separation_retries {
            let sphere = self.get(id)?.boundary.ok_or(PhysicsError::MissingBoundary(id))?;
            if !sphere.intersects(&anchor, &space) {
                break;
            }
            let dir = match space.relative_to(anchor.center, sphere.center).try_normalize() {
                Some(dir) => dir,
                None => self.random_direction(),
            };
            let body = self.get_mut(id)?;
            body.location = space.offset(body.location, dir * reach);
            body.reanchor();
            moved = true;
        }

        let body = self.get(id)?;
        let location = body.location;
        let clear = !body.boundary.is_some_and(|sphere| sphere.intersects(&anchor, &space));
        if !clear {
            tracing::warn!(%id, %parent, retries = self.config.separation_retries, "separation did not converge");
        }
        if moved {
            self.events.push(WorldEvent::Moved { id, location });
        }
        Ok(clear)
    }

    /// Fire a projectile from `shooter` along its heading (its direction of
    /// travel, or +x when it is stationary).
    ///
    /// # Errors
    ///
    /// [`PhysicsError::UnknownBody`] if the shooter is not registered, or
    /// any error from creating or separating the projectile.
    pub fn launch_projectile(
        &mut self,
        shooter: BodyId,
        speed: f32,
        damage: f32,
        ttl_ticks: u32,
    ) -> Result<BodyId, PhysicsError> {
        let (location, velocity, size) = {
            let body = self.get(shooter)?;
            (body.location, body.velocity, body.size)
        };
        let heading = velocity.try_normalize().unwrap_or(Vec3::X);
        let spec = BodySpec::projectile(location + heading * size, damage, ttl_ticks)
            .with_velocity(velocity + heading * speed)
            .with_owner(shooter);
        let shot = self.create(spec)?;
        if self.get(shooter)?.boundary.is_some() {
            self.separate_from(shot, shooter)?;
        }
        Ok(shot)
    }

    /// Break a rock into fragments of half its size, or remove it outright
    /// when it is too small to split. Returns the fragments.
    ///
    /// # Errors
    ///
    /// [`PhysicsError::UnknownBody`] if the rock is gone and
    /// [`PhysicsError::InvalidBody`] if `id` is not a rock.
    pub fn split_rock(&mut self, id: BodyId) -> Result<Vec<BodyId>, PhysicsError> {
        let rock = self.get(id)?.clone();
        if rock.kind != BodyKind::Rock {
            return Err(PhysicsError::InvalidBody("only rocks split"));
        }
        if rock.size < self.config.rock_split_min_size {
            self.destruct(id);
            return Ok(Vec::new());
        }

        let count = self.config.rock_fragments;
        #[allow(clippy::cast_precision_loss)]
        let fragment_mass = rock.mass / count as f32;
        let fragment_size = rock.size / 2.0;
        let mut fragments = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let dir = self.random_direction();
            let spec = BodySpec::rock(rock.location + dir * fragment_size, fragment_size)
                .with_mass(fragment_mass)
                .with_velocity(rock.velocity + dir * FRAGMENT_SCATTER_SPEED);
            let fragment = self.create(spec)?;
            if rock.boundary.is_some() {
                self.separate_from(fragment, id)?;
            }
            for &sibling in &fragments {
                self.separate_from(fragment, sibling)?;
            }
            fragments.push(fragment);
        }
        self.destruct(id);
        tracing::debug!(%id, fragments = fragments.len(), "rock split");
        Ok(fragments)
    }

    /// Put a ship back at its home point, stopped and fully repaired.
    ///
    /// # Errors
    ///
    /// [`PhysicsError::UnknownBody`] if the ship is gone and
    /// [`PhysicsError::InvalidBody`] if `id` is not a ship.
    pub fn respawn(&mut self, id: BodyId) -> Result<(), PhysicsError> {
        let space = self.space;
        let body = self.get_mut(id)?;
        let BodyKind::Ship { home } = body.kind else {
            return Err(PhysicsError::InvalidBody("only ships respawn"));
        };
        body.location = space.wrapped(home);
        body.velocity = Vec3::ZERO;
        body.hit_points = body.max_hit_points;
        body.reanchor();
        let location = body.location;
        tracing::debug!(%id, "ship respawned");
        self.events.push(WorldEvent::Respawned(id));
        self.events.push(WorldEvent::Moved { id, location });
        Ok(())
    }

    /// Move a body instantly, keeping its velocity.
    ///
    /// # Errors
    ///
    /// [`PhysicsError::UnknownBody`] if the body is gone and
    /// [`PhysicsError::InvalidBody`] if `to` is not finite.
    pub fn teleport(&mut self, id: BodyId, to: Vec3) -> Result<(), PhysicsError> {
        if !to.is_finite() {
            return Err(PhysicsError::InvalidBody("teleport target must be finite"));
        }
        let space = self.space;
        let body = self.get_mut(id)?;
        let from = body.location;
        body.location = space.wrapped(to);
        body.reanchor();
        let to = body.location;
        self.events.push(WorldEvent::Teleported { id, from, to });
        Ok(())
    }

    /// Join two wormhole endpoints so each leads to the other.
    ///
    /// # Errors
    ///
    /// [`PhysicsError::UnknownBody`] if either is gone and
    /// [`PhysicsError::InvalidBody`] if either is not a wormhole.
    pub fn link_wormholes(&mut self, a: BodyId, b: BodyId) -> Result<(), PhysicsError> {
        for id in [a, b] {
            if !matches!(self.get(id)?.kind, BodyKind::Wormhole { .. }) {
                return Err(PhysicsError::InvalidBody("only wormholes can be linked"));
            }
        }
        self.get_mut(a)?.kind = BodyKind::Wormhole { exit: Some(b) };
        self.get_mut(b)?.kind = BodyKind::Wormhole { exit: Some(a) };
        Ok(())
    }
}
