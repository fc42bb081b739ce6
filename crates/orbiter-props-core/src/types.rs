//! Common types used across orbiter-props
//!
//! Points carry their coordinate basis in the type so a position can only
//! cross from the modeling tool's basis into Orbiter's basis once.

use std::fmt;
use std::marker::PhantomData;
use std::ops::{Neg, Sub};

use serde::{Deserialize, Serialize};

/// Marker for a coordinate basis
pub trait Basis: Copy + fmt::Debug + PartialEq + Default {
    /// Human readable basis name
    const NAME: &'static str;
}

/// The modeling tool's basis: right-handed, Z-up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Authoring;

/// Orbiter's basis: left-handed, Y-up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Orbiter;

impl Basis for Authoring {
    const NAME: &'static str = "authoring";
}

impl Basis for Orbiter {
    const NAME: &'static str = "orbiter";
}

/// A 3D point or direction in basis `B`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Point3<B: Basis> {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    #[serde(skip)]
    basis: PhantomData<B>,
}

/// Point in the modeling tool's basis
pub type AuthoringPoint = Point3<Authoring>;

/// Point in Orbiter's basis
pub type OrbiterPoint = Point3<Orbiter>;

impl<B: Basis> Point3<B> {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            x,
            y,
            z,
            basis: PhantomData,
        }
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Apply `f` to each component, staying in the same basis
    pub fn map(self, mut f: impl FnMut(f64) -> f64) -> Self {
        Self::new(f(self.x), f(self.y), f(self.z))
    }
}

impl<B: Basis> Default for Point3<B> {
    fn default() -> Self {
        Self::ZERO
    }
}

impl<B: Basis> From<[f64; 3]> for Point3<B> {
    fn from(value: [f64; 3]) -> Self {
        Self::new(value[0], value[1], value[2])
    }
}

impl<B: Basis> Neg for Point3<B> {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl<B: Basis> Sub for Point3<B> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl<B: Basis> fmt::Display for Point3<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}) [{}]", self.x, self.y, self.z, B::NAME)
    }
}
