//! # Simulation World
//!
//! [`World`] owns everything a running simulation needs: the configuration,
//! the toroidal [`Space`], the [`BodyRegistry`], a seeded RNG for the few
//! places that need jitter, and the queue of [`WorldEvent`]s waiting for the
//! renderer. Nothing is global, so independent worlds can run side by side.
//!
//! Behaviour is split across modules the same way the tick flows:
//! [`crate::integrator`] moves bodies, [`crate::detect`] finds what they run
//! into, [`crate::resolve`] settles the impact and [`crate::lifecycle`]
//! creates and removes bodies.

use crate::body::{Body, BodyId, Colour};
use crate::config::WorldConfig;
use crate::error::{ConfigError, PhysicsError};
use crate::events::{self, RenderSink, WorldEvent};
use crate::math::{Space, Vec3};
use crate::registry::BodyRegistry;

/// Summary of one tick, mostly for logging.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    pub tick: u64,
    pub moved: usize,
    pub resting: usize,
    pub expired: usize,
    pub collisions: Vec<(BodyId, BodyId)>,
}

/// A body as seen on someone's radar.
#[derive(Clone, Debug, PartialEq)]
pub struct RadarContact {
    pub id: BodyId,
    /// Wrapped offset from the observer.
    pub offset: Vec3,
    pub distance: f32,
    pub colour: Colour,
}

pub struct World {
    pub(crate) config: WorldConfig,
    pub(crate) space: Space,
    pub(crate) registry: BodyRegistry,
    pub(crate) rng: fastrand::Rng,
    pub(crate) events: Vec<WorldEvent>,
    fault: Option<PhysicsError>,
    tick_count: u64,
}

impl World {
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the config does not validate.
    pub fn new(config: WorldConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: WorldConfig) -> Self {
        Self {
            space: Space::new(config.half_width),
            rng: fastrand::Rng::with_seed(config.seed),
            config,
            registry: BodyRegistry::new(),
            events: Vec::new(),
            fault: None,
            tick_count: 0,
        }
    }

    #[must_use]
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    #[must_use]
    pub fn space(&self) -> &Space {
        &self.space
    }

    #[must_use]
    pub fn registry(&self) -> &BodyRegistry {
        &self.registry
    }

    #[must_use]
    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.registry.get(id)
    }

    /// Direct access for collaborators such as save/load. Callers that move
    /// a body this way should prefer [`World::teleport`], which wraps and
    /// re-anchors for them.
    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.registry.get_mut(id)
    }

    pub fn bodies(&self) -> impl Iterator<Item = &Body> {
        self.registry.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub(crate) fn get(&self, id: BodyId) -> Result<&Body, PhysicsError> {
        self.registry.get(id).ok_or(PhysicsError::UnknownBody(id))
    }

    pub(crate) fn get_mut(&mut self, id: BodyId) -> Result<&mut Body, PhysicsError> {
        self.registry.get_mut(id).ok_or(PhysicsError::UnknownBody(id))
    }

    /// Set a body's velocity (thrust, docking, respawn).
    ///
    /// # Errors
    ///
    /// [`PhysicsError::UnknownBody`] or, for NaN/inf input,
    /// [`PhysicsError::InvalidBody`].
    pub fn set_velocity(&mut self, id: BodyId, velocity: Vec3) -> Result<(), PhysicsError> {
        if !velocity.is_finite() {
            return Err(PhysicsError::InvalidBody("velocity must be finite"));
        }
        self.get_mut(id)?.velocity = velocity;
        Ok(())
    }

    /// Advance the simulation by one fixed tick.
    ///
    /// Bodies are visited in registration order from a snapshot taken at
    /// the start of the tick: bodies destroyed along the way are skipped,
    /// bodies spawned along the way wait for the next tick.
    ///
    /// Events pile up in an unbounded queue until the embedder calls
    /// [`World::drain_events`] or [`World::flush_events`]; a loop that never
    /// drains grows it by roughly one event per moving body per tick.
    ///
    /// # Errors
    ///
    /// An invariant violation aborts the tick and latches the world; every
    /// later call returns [`PhysicsError::Faulted`] until
    /// [`World::acknowledge_fault`] is called.
    pub fn tick(&mut self) -> Result<TickReport, PhysicsError> {
        if self.fault.is_some() {
            return Err(PhysicsError::Faulted);
        }

        let dt = self.config.tick_seconds();
        let mut report = TickReport { tick: self.tick_count + 1, ..TickReport::default() };

        for id in self.registry.snapshot() {
            match self.step_body(id, dt) {
                Ok(step) => report.record(id, step),
                Err(err) => {
                    tracing::error!(tick = report.tick, %id, "tick aborted: {err}");
                    self.fault = Some(err.clone());
                    return Err(err);
                }
            }
        }

        self.tick_count += 1;
        Ok(report)
    }

    #[must_use]
    pub fn fault(&self) -> Option<&PhysicsError> {
        self.fault.as_ref()
    }

    /// Clear the fault latch so ticking can resume. Returns the fault.
    pub fn acknowledge_fault(&mut self) -> Option<PhysicsError> {
        self.fault.take()
    }

    /// Take every event queued since the last drain or flush.
    pub fn drain_events(&mut self) -> Vec<WorldEvent> {
        std::mem::take(&mut self.events)
    }

    /// Hand every queued event to `sink`.
    pub fn flush_events<S: RenderSink + ?Sized>(&mut self, sink: &mut S) {
        events::dispatch(self.drain_events(), sink);
    }

    /// Bodies visible on `observer`'s radar within `range`, nearest first.
    ///
    /// # Errors
    ///
    /// [`PhysicsError::UnknownBody`] if the observer is not registered.
    pub fn radar_contacts(&self, observer: BodyId, range: f32) -> Result<Vec<RadarContact>, PhysicsError> {
        let origin = self.get(observer)?.location;
        let mut contacts: Vec<RadarContact> = self
            .registry
            .iter()
            .filter(|body| body.id != observer)
            .filter_map(|body| {
                let colour = body.radar_colour()?;
                let offset = self.space.relative_to(origin, body.location);
                let distance = offset.length();
                (distance <= range).then_some(RadarContact { id: body.id, offset, distance, colour })
            })
            .collect();
        contacts.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        Ok(contacts)
    }

    /// Random direction of unit length, from the world's seeded RNG.
    pub(crate) fn random_direction(&mut self) -> Vec3 {
        for _ in 0..8 {
            let candidate = Vec3::new(
                self.rng.f32() * 2.0 - 1.0,
                self.rng.f32() * 2.0 - 1.0,
                self.rng.f32() * 2.0 - 1.0,
            );
            if let Some(dir) = candidate.try_normalize() {
                return dir;
            }
        }
        Vec3::X
    }
}

impl Default for World {
    fn default() -> Self {
        Self::with_valid_config(WorldConfig::default())
    }
}

impl TickReport {
    fn record(&mut self, id: BodyId, step: crate::integrator::Step) {
        use crate::integrator::Step;
        match step {
            Step::Gone => {}
            Step::Resting => self.resting += 1,
            Step::Expired => self.expired += 1,
            Step::Moved { hit } => {
                self.moved += 1;
                if let Some(other) = hit {
                    self.collisions.push((id, other));
                }
            }
            Step::Consumed { hit } => self.collisions.push((id, hit)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::BodySpec;

    #[test]
    fn rejects_invalid_config() {
        let config = WorldConfig { half_width: -1.0, ..WorldConfig::default() };
        assert!(World::new(config).is_err());
    }

    #[test]
    fn radar_lists_nearest_first_and_hides_projectiles() {
        let mut world = World::default();
        let me = world.create(BodySpec::ship(Vec3::ZERO)).unwrap();
        let far = world.create(BodySpec::rock(Vec3::new(500.0, 0.0, 0.0), 5.0)).unwrap();
        let near = world.create(BodySpec::station(Vec3::new(0.0, 300.0, 0.0))).unwrap();
        world.create(BodySpec::projectile(Vec3::new(10.0, 0.0, 0.0), 1.0, 5)).unwrap();
        world.create(BodySpec::cargo(Vec3::new(5_000.0, 0.0, 0.0))).unwrap();

        let contacts = world.radar_contacts(me, 1_000.0).unwrap();
        let ids: Vec<_> = contacts.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![near, far]);
        assert_eq!(contacts[0].colour, Colour::BLUE);
    }

    #[test]
    fn random_direction_is_unit_length() {
        let mut world = World::default();
        for _ in 0..32 {
            assert!((world.random_direction().length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn events_accumulate_until_drained() {
        let mut world = World::default();
        let pod = world.create(BodySpec::cargo(Vec3::ZERO).with_velocity(Vec3::new(25.0, 0.0, 0.0))).unwrap();
        for _ in 0..3 {
            world.tick().unwrap();
        }

        let events = world.drain_events();
        assert_eq!(events.len(), 4);
        assert!(matches!(events[0], WorldEvent::Created(ref body) if body.id == pod));
        assert!(events[1..].iter().all(|event| matches!(event, WorldEvent::Moved { id, .. } if *id == pod)));
        assert!(world.drain_events().is_empty());
    }
}
