use starlane_physics::{BodyId, BodySpec, DamageOutcome, PhysicsError, Vec3, World, WorldConfig, WorldEvent};

fn momentum(world: &World, ids: &[BodyId]) -> Vec3 {
    ids.iter()
        .map(|&id| {
            let body = world.body(id).unwrap();
            body.velocity * body.mass
        })
        .fold(Vec3::ZERO, |acc, p| acc + p)
}

fn kinetic_energy(world: &World, ids: &[BodyId]) -> f32 {
    ids.iter()
        .map(|&id| {
            let body = world.body(id).unwrap();
            0.5 * body.mass * body.velocity.length_squared()
        })
        .sum()
}

/// Two inert pods (no impact damage) so only the physics is exercised.
fn pod(world: &mut World, location: Vec3, velocity: Vec3, mass: f32, size: f32) -> BodyId {
    world
        .create(BodySpec::cargo(location).with_velocity(velocity).with_mass(mass).with_size(size))
        .unwrap()
}

#[test]
fn test_momentum_conservation() {
    let mut world = World::default();
    let a = pod(&mut world, Vec3::ZERO, Vec3::new(4.0, 0.0, 0.0), 2.0, 1.0);
    let b = pod(&mut world, Vec3::new(1.5, 0.0, 0.0), Vec3::new(-3.0, 0.0, 0.0), 6.0, 1.0);

    let before = momentum(&world, &[a, b]);
    let resolution = world.resolve(a, b).unwrap();
    let after = momentum(&world, &[a, b]);

    assert!(resolution.momentum_transferred);
    assert!((before - after).length() < 1e-4, "momentum not conserved: {before:?} -> {after:?}");
}

#[test]
fn test_energy_conservation_elastic() {
    let mut world = World::default();
    let a = pod(&mut world, Vec3::ZERO, Vec3::new(7.0, 0.0, 0.0), 3.0, 2.0);
    let b = pod(&mut world, Vec3::new(3.0, 0.0, 0.0), Vec3::new(-1.0, 0.0, 0.0), 5.0, 2.0);

    let before = kinetic_energy(&world, &[a, b]);
    world.resolve(a, b).unwrap();
    let after = kinetic_energy(&world, &[a, b]);

    assert!((before - after).abs() < 1e-3, "energy not conserved: {before:.4} -> {after:.4}");
}

#[test]
fn oblique_contact_only_changes_normal_components() {
    let mut world = World::default();
    let a = pod(&mut world, Vec3::ZERO, Vec3::new(5.0, 3.0, 0.0), 1.0, 1.0);
    let b = pod(&mut world, Vec3::new(2.0, 0.0, 0.0), Vec3::ZERO, 1.0, 1.0);

    world.resolve(a, b).unwrap();

    let va = world.body(a).unwrap().velocity;
    let vb = world.body(b).unwrap().velocity;
    assert!(va.x.abs() < 1e-5 && (va.y - 3.0).abs() < 1e-5, "{va:?}");
    assert!((vb.x - 5.0).abs() < 1e-5 && vb.y.abs() < 1e-5, "{vb:?}");
}

#[test]
fn separation_removes_overlap() {
    let cases = [
        (Vec3::ZERO, Vec3::new(3.0, 0.0, 0.0), 5.0, 5.0),
        (Vec3::new(1.0, 1.0, 1.0), Vec3::new(1.5, 0.5, 1.2), 2.0, 7.0),
        (Vec3::ZERO, Vec3::new(0.0, 0.0, 0.1), 20.0, 1.0),
        // Exactly coincident centres.
        (Vec3::new(4.0, -4.0, 4.0), Vec3::new(4.0, -4.0, 4.0), 3.0, 3.0),
    ];

    for (la, lb, sa, sb) in cases {
        let mut world = World::default();
        let a = pod(&mut world, la, Vec3::ZERO, 1.0, sa);
        let b = pod(&mut world, lb, Vec3::ZERO, 1.0, sb);

        let resolution = world.resolve(a, b).unwrap();
        assert!(resolution.separated);

        let pa = world.body(a).unwrap().location;
        let pb = world.body(b).unwrap().location;
        assert!(pa.is_finite() && pb.is_finite());
        let gap = world.space().distance(pa, pb);
        assert!(gap >= sa + sb - 1e-3, "still overlapping: gap {gap}, reach {}", sa + sb);
    }
}

#[test]
fn larger_body_moves_less() {
    let mut world = World::default();
    let small = pod(&mut world, Vec3::ZERO, Vec3::ZERO, 1.0, 1.0);
    let big = pod(&mut world, Vec3::new(2.0, 0.0, 0.0), Vec3::ZERO, 1.0, 9.0);

    world.resolve(small, big).unwrap();

    let small_shift = world.body(small).unwrap().location.length();
    let big_shift = (world.body(big).unwrap().location - Vec3::new(2.0, 0.0, 0.0)).length();
    assert!(big_shift < small_shift, "big moved {big_shift}, small moved {small_shift}");
}

#[test]
fn separation_works_across_the_wrap() {
    let config = WorldConfig { half_width: 100.0, ..WorldConfig::default() };
    let mut world = World::new(config).unwrap();
    let a = pod(&mut world, Vec3::new(99.0, 0.0, 0.0), Vec3::ZERO, 1.0, 2.0);
    let b = pod(&mut world, Vec3::new(-99.0, 0.0, 0.0), Vec3::ZERO, 1.0, 2.0);

    world.resolve(a, b).unwrap();

    let pa = world.body(a).unwrap().location;
    let pb = world.body(b).unwrap().location;
    assert!(world.space().contains(pa) && world.space().contains(pb));
    assert!(world.space().distance(pa, pb) >= 4.0 - 1e-3);
    assert!(pa.x < 99.0 && pb.x > -99.0, "pushed the long way round: {pa:?} {pb:?}");
}

#[test]
fn zero_total_mass_skips_momentum() {
    let mut world = World::default();
    let a = pod(&mut world, Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), 0.0, 1.0);
    let b = pod(&mut world, Vec3::new(1.0, 0.0, 0.0), Vec3::new(-1.0, 0.0, 0.0), 0.0, 1.0);

    let resolution = world.resolve(a, b).unwrap();

    assert!(resolution.separated);
    assert!(!resolution.momentum_transferred);
    assert_eq!(world.body(a).unwrap().velocity, Vec3::new(1.0, 0.0, 0.0));
    assert_eq!(world.body(b).unwrap().velocity, Vec3::new(-1.0, 0.0, 0.0));
}

#[test]
fn equal_masses_exchange_velocities_and_separate() {
    let mut world = World::default();
    let a = world
        .create(BodySpec::rock(Vec3::ZERO, 5.0).with_mass(10.0).with_velocity(Vec3::new(5.0, 0.0, 0.0)))
        .unwrap();
    let b = world
        .create(
            BodySpec::rock(Vec3::new(3.0, 0.0, 0.0), 5.0)
                .with_mass(10.0)
                .with_velocity(Vec3::new(-5.0, 0.0, 0.0)),
        )
        .unwrap();

    world.resolve(a, b).unwrap();

    let body_a = world.body(a).unwrap();
    let body_b = world.body(b).unwrap();
    assert!((body_a.velocity - Vec3::new(-5.0, 0.0, 0.0)).length() < 1e-5, "{:?}", body_a.velocity);
    assert!((body_b.velocity - Vec3::new(5.0, 0.0, 0.0)).length() < 1e-5, "{:?}", body_b.velocity);
    assert!(world.space().distance(body_a.location, body_b.location) >= 10.0 - 1e-3);
}

#[test]
fn owner_and_projectile_do_not_damage_each_other() {
    for launcher_first in [true, false] {
        let mut world = World::default();
        let ship = world.create(BodySpec::ship(Vec3::ZERO)).unwrap();
        let shot = world
            .create(
                BodySpec::projectile(Vec3::new(1.0, 0.0, 0.0), 50.0, 10)
                    .with_velocity(Vec3::new(-10.0, 0.0, 0.0))
                    .with_owner(ship),
            )
            .unwrap();
        let hull = world.body(ship).unwrap().hit_points;

        let resolution = if launcher_first {
            world.resolve(ship, shot).unwrap()
        } else {
            world.resolve(shot, ship).unwrap()
        };

        assert!(resolution.damage_suppressed);
        assert!(resolution.outcomes.is_empty());
        assert!(resolution.separated && resolution.momentum_transferred);
        assert!(world.body(shot).is_some(), "projectile should not be expended on its owner");
        let ship_body = world.body(ship).unwrap();
        assert!((ship_body.hit_points - hull).abs() < f32::EPSILON);
        assert!(ship_body.velocity.x < 0.0, "momentum should still transfer");
        let gap = world.space().distance(ship_body.location, world.body(shot).unwrap().location);
        assert!(gap >= 11.0 - 1e-3, "gap {gap}");
    }
}

#[test]
fn damage_is_exchanged_once_per_resolution() {
    let mut world = World::default();
    let a = world.create(BodySpec::rock(Vec3::ZERO, 5.0)).unwrap();
    let b = world.create(BodySpec::rock(Vec3::new(4.0, 0.0, 0.0), 5.0)).unwrap();
    world.drain_events();

    let resolution = world.resolve(a, b).unwrap();

    assert_eq!(resolution.outcomes, vec![(a, DamageOutcome::Damaged), (b, DamageOutcome::Damaged)]);
    assert!((world.body(a).unwrap().hit_points - 4.0).abs() < f32::EPSILON);
    assert!((world.body(b).unwrap().hit_points - 4.0).abs() < f32::EPSILON);
    let damage_events = world
        .drain_events()
        .into_iter()
        .filter(|event| matches!(event, WorldEvent::Damaged { .. }))
        .count();
    assert_eq!(damage_events, 2);
}

#[test]
fn projectile_breaks_rock_and_is_used_up() {
    let mut world = World::default();
    let rock = world.create(BodySpec::rock(Vec3::ZERO, 8.0)).unwrap();
    let shot = world
        .create(BodySpec::projectile(Vec3::new(-8.5, 0.0, 0.0), 100.0, 10).with_velocity(Vec3::new(100.0, 0.0, 0.0)))
        .unwrap();

    let resolution = world.resolve(shot, rock).unwrap();

    assert!(resolution.outcomes.contains(&(rock, DamageOutcome::Split)));
    assert!(world.body(shot).is_none());
    assert!(world.body(rock).is_none());
    assert_eq!(world.len(), world.config().rock_fragments as usize);
}

#[test]
fn wormhole_carries_bodies_to_its_exit() {
    let mut world = World::default();
    let mouth = world.create(BodySpec::wormhole(Vec3::ZERO)).unwrap();
    let exit = world.create(BodySpec::wormhole(Vec3::new(2_000.0, 0.0, 0.0))).unwrap();
    world.link_wormholes(mouth, exit).unwrap();
    let ship = world
        .create(BodySpec::ship(Vec3::new(-55.0, 0.0, 0.0)).with_velocity(Vec3::new(40.0, 0.0, 0.0)))
        .unwrap();

    let resolution = world.resolve(ship, mouth).unwrap();

    assert!(!resolution.separated && !resolution.momentum_transferred);
    let body = world.body(ship).unwrap();
    assert_eq!(body.velocity, Vec3::new(40.0, 0.0, 0.0));
    let from_exit = world.space().distance(body.location, Vec3::new(2_000.0, 0.0, 0.0));
    assert!(from_exit >= 60.0 - 1e-3 && from_exit < 200.0, "ship ended {from_exit} from the exit");
}

#[test]
fn unlinked_wormhole_is_solid() {
    let mut world = World::default();
    let mouth = world.create(BodySpec::wormhole(Vec3::ZERO)).unwrap();
    let rock = world.create(BodySpec::rock(Vec3::new(10.0, 0.0, 0.0), 5.0)).unwrap();
    let pod = world.create(BodySpec::cargo(Vec3::new(62.0, 0.0, 0.0))).unwrap();

    let resolution = world.resolve(rock, mouth).unwrap();

    assert!(resolution.separated && resolution.momentum_transferred);
    let gap = world
        .space()
        .distance(world.body(rock).unwrap().location, world.body(mouth).unwrap().location);
    assert!(gap >= 55.0 - 1e-3, "rock left {gap} from the mouth");
    // Clear of the mouth, the rock's next sweep finds what lies ahead.
    assert_eq!(world.detect(rock, Vec3::new(10.0, 0.0, 0.0)).unwrap(), Some(pod));
}

#[test]
fn a_body_cannot_collide_with_itself() {
    let mut world = World::default();
    let rock = world.create(BodySpec::rock(Vec3::ZERO, 5.0)).unwrap();
    world.drain_events();

    assert!(matches!(world.resolve(rock, rock), Err(PhysicsError::InvalidBody(_))));
    assert!(world.drain_events().is_empty());
    assert_eq!(world.body(rock).unwrap().location, Vec3::ZERO);
}
