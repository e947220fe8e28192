#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! # Starlane Physics
//!
//! The real-time physics and collision core of the Starlane space-trading
//! game. Every ship, projectile, rock, cargo pod, station and wormhole mouth
//! is a [`Body`] living in a toroidal cube of space; once per fixed tick the
//! [`World`] moves each of them, sweeps its path for collisions, and settles
//! any contact with an elastic bounce and an exchange of damage.
//!
//! ## Key Components
//!
//! -   **Space math:** [`Vec3`] and the wrap-round rules of [`Space`], in
//!     the [`math`] module.
//! -   **Bodies:** [`Body`], its [`BodyKind`] tag and the [`BodySpec`]
//!     builder, in [`body`]. Per-kind behaviour (damage, radar colour,
//!     wormhole transit) lives here.
//! -   **World:** [`World`] owns the [`BodyRegistry`], the config and the
//!     event queue, and drives [`World::tick`]. Detection, resolution and
//!     lifecycle are `impl World` blocks in [`detect`], [`resolve`] and
//!     [`lifecycle`].
//! -   **Render boundary:** [`WorldEvent`]s and the [`RenderSink`] trait in
//!     [`events`]; packed instance buffers in [`snapshot`].
//!
//! ## Usage
//!
//! ```rust
//! use starlane_physics::{BodySpec, Vec3, World, WorldConfig};
//!
//! let mut world = World::new(WorldConfig::default())?;
//! let ship = world.create(BodySpec::ship(Vec3::ZERO).with_velocity(Vec3::new(50.0, 0.0, 0.0)))?;
//! world.create(BodySpec::rock(Vec3::new(400.0, 0.0, 0.0), 8.0))?;
//!
//! for _ in 0..10 {
//!     world.tick()?;
//! }
//! assert!(world.body(ship).unwrap().location.x > 0.0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod body;
pub mod bounds;
pub mod clock;
pub mod config;
pub mod detect;
pub mod error;
pub mod events;
pub mod integrator;
pub mod lifecycle;
pub mod math;
pub mod registry;
pub mod resolve;
pub mod snapshot;
pub mod world;

pub use body::{Body, BodyId, BodyKind, BodySpec, Colour, DamageOutcome, ImpactEffect};
pub use bounds::{closest_point_on_segment, BoundingSphere};
pub use clock::TickClock;
pub use config::{WorldConfig, TICK_RATE_RANGE};
pub use error::{ConfigError, PhysicsError};
pub use events::{RenderSink, WorldEvent};
pub use integrator::Step;
pub use math::{Space, Vec3};
pub use registry::BodyRegistry;
pub use resolve::{elastic_1d, Resolution};
pub use snapshot::BodyInstance;
pub use world::{RadarContact, TickReport, World};
