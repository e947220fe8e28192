//! Registry of every live body, iterated in registration order.

use crate::body::{Body, BodyId, BodySpec};
use std::collections::BTreeMap;

/// Ids grow monotonically, so the `BTreeMap` order is insertion order.
#[derive(Debug, Default)]
pub struct BodyRegistry {
    bodies: BTreeMap<BodyId, Body>,
    next_id: u64,
}

impl BodyRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, spec: BodySpec) -> BodyId {
        self.next_id += 1;
        let id = BodyId(self.next_id);
        self.bodies.insert(id, spec.build(id));
        id
    }

    /// Removing an id that is not present is a no-op.
    pub(crate) fn remove(&mut self, id: BodyId) -> Option<Body> {
        self.bodies.remove(&id)
    }

    #[must_use]
    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(&id)
    }

    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.get_mut(&id)
    }

    #[must_use]
    pub fn contains(&self, id: BodyId) -> bool {
        self.bodies.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Body> {
        self.bodies.values()
    }

    /// Copy of the current ids, safe to walk while bodies come and go.
    #[must_use]
    pub fn snapshot(&self) -> Vec<BodyId> {
        self.bodies.keys().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec3;

    #[test]
    fn iteration_follows_registration_order() {
        let mut registry = BodyRegistry::new();
        let a = registry.insert(BodySpec::cargo(Vec3::ZERO));
        let b = registry.insert(BodySpec::cargo(Vec3::ZERO));
        let c = registry.insert(BodySpec::cargo(Vec3::ZERO));
        registry.remove(b);
        let d = registry.insert(BodySpec::cargo(Vec3::ZERO));
        let order: Vec<_> = registry.iter().map(|body| body.id).collect();
        assert_eq!(order, vec![a, c, d]);
        assert_eq!(registry.snapshot(), order);
    }

    #[test]
    fn removing_twice_is_harmless() {
        let mut registry = BodyRegistry::new();
        let a = registry.insert(BodySpec::cargo(Vec3::ZERO));
        assert!(registry.remove(a).is_some());
        assert!(registry.remove(a).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn ids_are_never_reused() {
        let mut registry = BodyRegistry::new();
        let a = registry.insert(BodySpec::cargo(Vec3::ZERO));
        registry.remove(a);
        let b = registry.insert(BodySpec::cargo(Vec3::ZERO));
        assert_ne!(a, b);
        assert!(b > a);
    }
}
