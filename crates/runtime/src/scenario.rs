//! # Demo Sector
//!
//! A small, busy sector for exercising the physics core without a game
//! server: a trading station, a handful of ships circling it, a rock field
//! and a linked pair of wormholes. Ships fire on a fixed cadence so rocks
//! keep breaking up.

use anyhow::Result;
use starlane_physics::{BodyId, BodySpec, Vec3, World, WorldConfig};

const SHIP_COUNT: usize = 4;
const ROCK_COUNT: usize = 24;
const PROJECTILE_SPEED: f32 = 600.0;
const PROJECTILE_DAMAGE: f32 = 10.0;
const PROJECTILE_TTL: u32 = 40;

pub struct Sector {
    pub world: World,
    pub station: BodyId,
    pub ships: Vec<BodyId>,
    pub wormholes: (BodyId, BodyId),
}

impl Sector {
    /// Build the demo sector. Layout scales with the domain so small
    /// worlds stay crowded.
    ///
    /// # Errors
    ///
    /// Fails if the config is invalid or a body cannot be created.
    pub fn demo(config: WorldConfig) -> Result<Self> {
        let seed = config.seed;
        let span = config.half_width * 0.8;
        let mut world = World::new(config)?;
        let mut rng = scatter(seed);

        let station = world.create(BodySpec::station(Vec3::ZERO).named("Halcyon Exchange"))?;

        let mut ships = Vec::with_capacity(SHIP_COUNT);
        for i in 0..SHIP_COUNT {
            #[allow(clippy::cast_precision_loss)]
            let angle = i as f32 * std::f32::consts::TAU / SHIP_COUNT as f32;
            let (sin, cos) = angle.sin_cos();
            let home = Vec3::new(cos, sin, 0.0) * (span * 0.25).max(250.0);
            let heading = Vec3::new(-sin, cos, 0.0);
            let ship = world.create(
                BodySpec::ship(home)
                    .with_velocity(heading * 120.0)
                    .named(format!("Trader {}", i + 1)),
            )?;
            ships.push(ship);
        }

        for _ in 0..ROCK_COUNT {
            let location = Vec3::new(rng(), rng(), rng()) * span;
            let drift = Vec3::new(rng(), rng(), rng()) * 40.0;
            let size = 3.0 + (rng() + 1.0) * 6.0;
            world.create(BodySpec::rock(location, size).with_velocity(drift))?;
        }

        let mouth = world.create(BodySpec::wormhole(Vec3::new(span * 0.5, 0.0, 0.0)))?;
        let exit = world.create(BodySpec::wormhole(Vec3::new(-span * 0.5, 0.0, span * 0.5)))?;
        world.link_wormholes(mouth, exit)?;

        tracing::info!(bodies = world.len(), ships = ships.len(), "demo sector ready");
        Ok(Self { world, station, ships, wormholes: (mouth, exit) })
    }

    /// Every surviving ship fires once along its heading. Returns the
    /// projectiles launched.
    ///
    /// # Errors
    ///
    /// Propagates any error from launching.
    pub fn volley(&mut self) -> Result<Vec<BodyId>> {
        self.ships.retain(|&ship| self.world.body(ship).is_some());
        let mut shots = Vec::with_capacity(self.ships.len());
        for &ship in &self.ships {
            shots.push(self.world.launch_projectile(ship, PROJECTILE_SPEED, PROJECTILE_DAMAGE, PROJECTILE_TTL)?);
        }
        Ok(shots)
    }
}

/// Uniform samples in `[-1, 1)` from a seeded generator, so the rock field
/// is the same for a given world seed.
fn scatter(seed: u64) -> impl FnMut() -> f32 {
    let mut rng = fastrand::Rng::with_seed(seed ^ 0x0005_7A12);
    move || rng.f32() * 2.0 - 1.0
}
