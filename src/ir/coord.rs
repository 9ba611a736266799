//! Image-space coordinates and the small amount of vector math the
//! calibrations need.

use serde::{Deserialize, Serialize};
use std::ops::Sub;

/// A 2D coordinate in image (pixel) space.
///
/// On the wire a coordinate is a two-element array `[x, y]`, which is how
/// the annotation tool stores both point positions and line endpoints.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Coord {
    pub x: f64,
    pub y: f64,
}

impl Coord {
    /// Creates a new coordinate with the given x and y values.
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Dot product, treating both coordinates as vectors from the origin.
    #[inline]
    pub fn dot(&self, other: &Coord) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Squared Euclidean norm.
    #[inline]
    pub fn norm_squared(&self) -> f64 {
        self.dot(self)
    }

    /// Euclidean distance to another coordinate.
    #[inline]
    pub fn distance_to(&self, other: &Coord) -> f64 {
        (*other - *self).norm_squared().sqrt()
    }

    /// Returns true if both coordinates are finite (not NaN or infinite).
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Sub for Coord {
    type Output = Coord;

    #[inline]
    fn sub(self, rhs: Coord) -> Coord {
        Coord::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<[f64; 2]> for Coord {
    fn from([x, y]: [f64; 2]) -> Self {
        Coord::new(x, y)
    }
}

// Serialized as `[x, y]` rather than `{"x": .., "y": ..}`
impl Serialize for Coord {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [self.x, self.y].serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Coord {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let pair = <[f64; 2]>::deserialize(deserializer)?;
        Ok(Coord::from(pair))
    }
}
