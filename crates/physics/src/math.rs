//! # Vector and Space Math
//!
//! [`Vec3`] is the plain three-component vector used for locations,
//! velocities and every intermediate geometric quantity. [`Space`] describes
//! the toroidal domain `[-S, S]^3` the simulation lives in: anything that
//! leaves through one face re-enters through the opposite one, independently
//! per axis.

use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// Below this length a vector is treated as having no direction.
pub const EPSILON: f32 = 1e-6;

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const X: Self = Self::new(1.0, 0.0, 0.0);
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);
    pub const Z: Self = Self::new(0.0, 0.0, 1.0);

    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[must_use]
    pub const fn splat(v: f32) -> Self {
        Self::new(v, v, v)
    }

    #[must_use]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[must_use]
    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    #[must_use]
    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Unit vector in the same direction, or `None` for (near) zero vectors.
    #[must_use]
    pub fn try_normalize(self) -> Option<Self> {
        let len = self.length();
        if len > EPSILON && len.is_finite() {
            Some(self / len)
        } else {
            None
        }
    }

    #[must_use]
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0 && self.z == 0.0
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Add for Vec3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl Sub for Vec3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl SubAssign for Vec3 {
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
        self.z -= rhs.z;
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl MulAssign<f32> for Vec3 {
    fn mul_assign(&mut self, rhs: f32) {
        self.x *= rhs;
        self.y *= rhs;
        self.z *= rhs;
    }
}

impl Div<f32> for Vec3 {
    type Output = Self;
    fn div(self, rhs: f32) -> Self {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl DivAssign<f32> for Vec3 {
    fn div_assign(&mut self, rhs: f32) {
        self.x /= rhs;
        self.y /= rhs;
        self.z /= rhs;
    }
}

impl Neg for Vec3 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

/// The toroidal simulation domain, a cube of half-width `S` centred on the
/// origin.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Space {
    half_width: f32,
}

impl Space {
    #[must_use]
    pub const fn new(half_width: f32) -> Self {
        Self { half_width }
    }

    #[must_use]
    pub const fn half_width(&self) -> f32 {
        self.half_width
    }

    /// Wrap a single coordinate. Values exactly on a face are left alone.
    #[must_use]
    pub fn wrap_axis(&self, v: f32) -> f32 {
        let s = self.half_width;
        if v > s {
            v - 2.0 * s
        } else if v < -s {
            v + 2.0 * s
        } else {
            v
        }
    }

    /// Wrap `v` in place so every axis lies back inside the domain.
    pub fn wrap(&self, v: &mut Vec3) {
        v.x = self.wrap_axis(v.x);
        v.y = self.wrap_axis(v.y);
        v.z = self.wrap_axis(v.z);
    }

    #[must_use]
    pub fn wrapped(&self, mut v: Vec3) -> Vec3 {
        self.wrap(&mut v);
        v
    }

    /// Shortest vector from `from` to `to`, taking the wrap-round into
    /// account.
    #[must_use]
    pub fn relative_to(&self, from: Vec3, to: Vec3) -> Vec3 {
        self.wrapped(to - from)
    }

    #[must_use]
    pub fn distance(&self, a: Vec3, b: Vec3) -> f32 {
        self.relative_to(a, b).length()
    }

    /// `origin + delta`, wrapped back into the domain.
    #[must_use]
    pub fn offset(&self, origin: Vec3, delta: Vec3) -> Vec3 {
        self.wrapped(origin + delta)
    }

    #[must_use]
    pub fn contains(&self, v: Vec3) -> bool {
        let s = self.half_width;
        [v.x, v.y, v.z].iter().all(|c| (-s..=s).contains(c))
    }
}
