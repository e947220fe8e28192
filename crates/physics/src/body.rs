//! # Bodies
//!
//! Every simulated object, from a ship to a stray cargo pod, is a [`Body`].
//! Type-specific behaviour hangs off the [`BodyKind`] tag: how much damage a
//! body deals on impact, what happens when it takes damage, what colour it
//! shows on radar and what it does to whatever it touches.

use crate::bounds::BoundingSphere;
use crate::error::PhysicsError;
use crate::math::Vec3;
use std::fmt;

/// Registry handle. Handles are handed out in increasing order and never
/// reused, so comparing two ids tells which body was registered first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BodyId(pub(crate) u64);

impl BodyId {
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Damage a ship or rock deals when it rams something.
pub const RAM_DAMAGE: f32 = 1.0;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum BodyKind {
    Ship { home: Vec3 },
    Projectile { damage: f32, ttl_ticks: u32 },
    Rock,
    Cargo,
    Station,
    Wormhole { exit: Option<BodyId> },
}

impl BodyKind {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Ship { .. } => "ship",
            Self::Projectile { .. } => "projectile",
            Self::Rock => "rock",
            Self::Cargo => "cargo",
            Self::Station => "station",
            Self::Wormhole { .. } => "wormhole",
        }
    }

    #[must_use]
    pub const fn is_ship(&self) -> bool {
        matches!(self, Self::Ship { .. })
    }

    /// Fixed installations never get carried through a wormhole.
    #[must_use]
    pub const fn is_transportable(&self) -> bool {
        !matches!(self, Self::Station | Self::Wormhole { .. })
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Colour {
    pub const GREEN: Self = Self::rgb(0x30, 0xe0, 0x40);
    pub const GREY: Self = Self::rgb(0xa0, 0xa0, 0xa0);
    pub const YELLOW: Self = Self::rgb(0xf0, 0xd0, 0x20);
    pub const BLUE: Self = Self::rgb(0x40, 0x80, 0xff);
    pub const MAGENTA: Self = Self::rgb(0xe0, 0x30, 0xe0);

    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// What taking a hit did to a body. Acting on the outcome (respawning,
/// splitting, removing) is up to the world.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DamageOutcome {
    Unharmed,
    Damaged,
    Destroyed,
    Respawn,
    Split,
}

/// What a body does to itself or to the body it struck, beyond damage.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ImpactEffect {
    None,
    /// The striking body is used up.
    Expended,
    /// Carry `body` through to the wormhole endpoint `exit`.
    Transport { body: BodyId, exit: BodyId },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    pub id: BodyId,
    pub kind: BodyKind,
    pub location: Vec3,
    pub velocity: Vec3,
    pub mass: f32,
    pub size: f32,
    pub hit_points: f32,
    pub max_hit_points: f32,
    pub owner: Option<BodyId>,
    pub boundary: Option<BoundingSphere>,
    pub name: Option<String>,
}

impl Body {
    #[must_use]
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Location shifted by one tick's worth of velocity.
    #[must_use]
    pub fn frame_delta(&self, dt: f32) -> Vec3 {
        self.velocity * dt
    }

    /// Radius used for collision tests. Ships only register hits that pass
    /// well inside their silhouette.
    #[must_use]
    pub fn collision_margin(&self, ship_margin_factor: f32) -> Option<f32> {
        let boundary = self.boundary?;
        if self.kind.is_ship() {
            Some(boundary.radius * ship_margin_factor)
        } else {
            Some(boundary.radius)
        }
    }

    pub(crate) fn reanchor(&mut self) {
        if let Some(boundary) = self.boundary.as_mut() {
            boundary.move_to(self.location);
        }
    }

    #[must_use]
    pub fn is_owned_by(&self, other: BodyId) -> bool {
        self.owner == Some(other)
    }

    #[must_use]
    pub fn radar_colour(&self) -> Option<Colour> {
        match self.kind {
            BodyKind::Ship { .. } => Some(Colour::GREEN),
            BodyKind::Projectile { .. } => None,
            BodyKind::Rock => Some(Colour::GREY),
            BodyKind::Cargo => Some(Colour::YELLOW),
            BodyKind::Station => Some(Colour::BLUE),
            BodyKind::Wormhole { .. } => Some(Colour::MAGENTA),
        }
    }

    /// Hits this body deals to whatever it runs into.
    #[must_use]
    pub fn impact_damage(&self) -> f32 {
        match self.kind {
            BodyKind::Ship { .. } | BodyKind::Rock => RAM_DAMAGE,
            BodyKind::Projectile { damage, .. } => damage,
            BodyKind::Cargo | BodyKind::Station | BodyKind::Wormhole { .. } => 0.0,
        }
    }

    /// Damage handler. `hits == 0` is a notification only.
    pub fn take_damage(&mut self, hits: f32, source: BodyId) -> DamageOutcome {
        if hits <= 0.0 {
            return DamageOutcome::Unharmed;
        }
        tracing::debug!(body = %self.id, %source, hits, kind = self.kind.name(), "taking damage");
        match self.kind {
            BodyKind::Station | BodyKind::Wormhole { .. } => DamageOutcome::Unharmed,
            BodyKind::Projectile { .. } => DamageOutcome::Destroyed,
            BodyKind::Ship { .. } => {
                self.hit_points -= hits;
                if self.hit_points <= 0.0 {
                    DamageOutcome::Respawn
                } else {
                    DamageOutcome::Damaged
                }
            }
            BodyKind::Rock => {
                self.hit_points -= hits;
                if self.hit_points <= 0.0 {
                    DamageOutcome::Split
                } else {
                    DamageOutcome::Damaged
                }
            }
            BodyKind::Cargo => {
                self.hit_points -= hits;
                if self.hit_points <= 0.0 {
                    DamageOutcome::Destroyed
                } else {
                    DamageOutcome::Damaged
                }
            }
        }
    }

    /// Side effect of this body striking `target`.
    #[must_use]
    pub fn impact_effect(&self, target: &Body) -> ImpactEffect {
        match self.kind {
            BodyKind::Projectile { .. } => ImpactEffect::Expended,
            BodyKind::Wormhole { exit: Some(exit) } if target.kind.is_transportable() && exit != target.id => {
                ImpactEffect::Transport { body: target.id, exit }
            }
            _ => ImpactEffect::None,
        }
    }
}

/// Description of a body to create. The per-kind constructors fill in the
/// usual mass, size and hit points; the `with_*` methods override them.
#[derive(Clone, Debug, PartialEq)]
pub struct BodySpec {
    pub kind: BodyKind,
    pub location: Vec3,
    pub velocity: Vec3,
    pub mass: f32,
    pub size: f32,
    pub hit_points: f32,
    pub owner: Option<BodyId>,
    pub name: Option<String>,
    pub tangible: bool,
}

impl BodySpec {
    fn new(kind: BodyKind, location: Vec3, mass: f32, size: f32, hit_points: f32) -> Self {
        Self {
            kind,
            location,
            velocity: Vec3::ZERO,
            mass,
            size,
            hit_points,
            owner: None,
            name: None,
            tangible: true,
        }
    }

    /// A ship that respawns where it was created.
    #[must_use]
    pub fn ship(location: Vec3) -> Self {
        Self::new(BodyKind::Ship { home: location }, location, 100.0, 10.0, 100.0)
    }

    #[must_use]
    pub fn projectile(location: Vec3, damage: f32, ttl_ticks: u32) -> Self {
        Self::new(BodyKind::Projectile { damage, ttl_ticks }, location, 1.0, 1.0, 1.0)
    }

    /// A rock of the given radius; mass grows with volume.
    #[must_use]
    pub fn rock(location: Vec3, size: f32) -> Self {
        Self::new(BodyKind::Rock, location, size * size * size, size, size)
    }

    #[must_use]
    pub fn cargo(location: Vec3) -> Self {
        Self::new(BodyKind::Cargo, location, 5.0, 2.0, 10.0)
    }

    #[must_use]
    pub fn station(location: Vec3) -> Self {
        Self::new(BodyKind::Station, location, 1.0e6, 100.0, 1.0e4)
    }

    #[must_use]
    pub fn wormhole(location: Vec3) -> Self {
        Self::new(BodyKind::Wormhole { exit: None }, location, 1.0e6, 50.0, 1.0)
    }

    #[must_use]
    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    #[must_use]
    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    #[must_use]
    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    #[must_use]
    pub fn with_hit_points(mut self, hit_points: f32) -> Self {
        self.hit_points = hit_points;
        self
    }

    #[must_use]
    pub fn with_owner(mut self, owner: BodyId) -> Self {
        self.owner = Some(owner);
        self
    }

    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// No bounding volume: the body moves but never collides.
    #[must_use]
    pub fn intangible(mut self) -> Self {
        self.tangible = false;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), PhysicsError> {
        if !self.location.is_finite() || !self.velocity.is_finite() {
            return Err(PhysicsError::InvalidBody("location and velocity must be finite"));
        }
        if !(self.size.is_finite() && self.size > 0.0) {
            return Err(PhysicsError::InvalidBody("size must be positive"));
        }
        if !(self.mass.is_finite() && self.mass >= 0.0) {
            return Err(PhysicsError::InvalidBody("mass must be non-negative"));
        }
        Ok(())
    }

    pub(crate) fn build(self, id: BodyId) -> Body {
        let boundary = self.tangible.then(|| BoundingSphere::new(self.location, self.size));
        Body {
            id,
            kind: self.kind,
            location: self.location,
            velocity: self.velocity,
            mass: self.mass,
            size: self.size,
            hit_points: self.hit_points,
            max_hit_points: self.hit_points,
            owner: self.owner,
            boundary,
            name: self.name,
        }
    }
}
