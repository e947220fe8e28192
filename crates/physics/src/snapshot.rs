//! Packed per-body instance data for renderers that upload the whole world
//! as one buffer each frame.

use crate::body::{Body, BodyKind, Colour};
use crate::math::Vec3;
use crate::world::World;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BodyInstance {
    pub position: Vec3,
    pub radius: f32,
    /// Radar colour as `0x00RRGGBB`, zero when hidden from radar.
    pub colour: u32,
    pub kind: u32,
}

impl BodyInstance {
    #[must_use]
    pub fn from_body(body: &Body) -> Self {
        Self {
            position: body.location,
            radius: body.size,
            colour: body.radar_colour().map_or(0, pack_colour),
            kind: kind_tag(&body.kind),
        }
    }
}

fn pack_colour(colour: Colour) -> u32 {
    (u32::from(colour.r) << 16) | (u32::from(colour.g) << 8) | u32::from(colour.b)
}

fn kind_tag(kind: &BodyKind) -> u32 {
    match kind {
        BodyKind::Ship { .. } => 0,
        BodyKind::Projectile { .. } => 1,
        BodyKind::Rock => 2,
        BodyKind::Cargo => 3,
        BodyKind::Station => 4,
        BodyKind::Wormhole { .. } => 5,
    }
}

/// One instance per registered body, in registration order.
#[must_use]
pub fn pack_instances(world: &World) -> Vec<BodyInstance> {
    world.bodies().map(BodyInstance::from_body).collect()
}

#[must_use]
pub fn as_bytes(instances: &[BodyInstance]) -> &[u8] {
    bytemuck::cast_slice(instances)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::BodySpec;

    #[test]
    fn packs_every_body_in_order() {
        let mut world = World::default();
        world.create(BodySpec::station(Vec3::new(1.0, 2.0, 3.0))).unwrap();
        world.create(BodySpec::projectile(Vec3::ZERO, 1.0, 3)).unwrap();

        let instances = pack_instances(&world);
        assert_eq!(instances.len(), 2);
        assert_eq!(instances[0].position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(instances[0].colour, 0x0040_80ff);
        assert_eq!(instances[0].kind, 4);
        assert_eq!(instances[1].colour, 0);
        assert_eq!(as_bytes(&instances).len(), 2 * std::mem::size_of::<BodyInstance>());
        assert_eq!(std::mem::size_of::<BodyInstance>(), 24);
    }
}
