//! # Render Boundary
//!
//! The core never touches scene-graph types. Instead it queues
//! [`WorldEvent`]s as bodies appear, move, collide and disappear; a renderer
//! (or anything else keyed by body id) drains them through [`RenderSink`].

use crate::body::{Body, BodyId, DamageOutcome};
use crate::math::Vec3;

#[derive(Clone, Debug, PartialEq)]
pub enum WorldEvent {
    Created(Body),
    Destroyed(BodyId),
    Moved { id: BodyId, location: Vec3 },
    Collision { a: BodyId, b: BodyId },
    Damaged { target: BodyId, source: BodyId, hits: f32, outcome: DamageOutcome },
    Respawned(BodyId),
    Teleported { id: BodyId, from: Vec3, to: Vec3 },
}

pub trait RenderSink {
    /// A body was registered and needs a visual.
    fn on_create(&mut self, body: &Body);

    /// A body was removed; drop its visual.
    fn on_destroy(&mut self, id: BodyId);

    /// A body's location changed.
    fn on_move(&mut self, id: BodyId, location: Vec3);

    fn on_collision(&mut self, _a: BodyId, _b: BodyId) {}

    fn on_damage(&mut self, _target: BodyId, _source: BodyId, _hits: f32, _outcome: DamageOutcome) {}
}

/// Feed `events` to `sink` in order.
pub fn dispatch<S: RenderSink + ?Sized>(events: impl IntoIterator<Item = WorldEvent>, sink: &mut S) {
    for event in events {
        match event {
            WorldEvent::Created(body) => sink.on_create(&body),
            WorldEvent::Destroyed(id) => sink.on_destroy(id),
            WorldEvent::Moved { id, location } | WorldEvent::Teleported { id, to: location, .. } => {
                sink.on_move(id, location);
            }
            WorldEvent::Collision { a, b } => sink.on_collision(a, b),
            WorldEvent::Damaged { target, source, hits, outcome } => sink.on_damage(target, source, hits, outcome),
            WorldEvent::Respawned(_) => {}
        }
    }
}
