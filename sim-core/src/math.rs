// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Fixed-dimension vector math
//!
//! A single `Vector<N>` type backs both world variants: `Vec2` for the
//! platformer worlds and `Vec3` for the open 3D worlds. Components are
//! double-precision, like the rest of the engine.

use std::fmt;
use std::ops::{Add, AddAssign, Index, IndexMut, Mul, Neg, Sub, SubAssign};

/// N-dimensional vector with `f64` components
///
/// # Examples
///
/// ```
/// use sim_core::math::Vec2;
///
/// let v = Vec2::new(3.0, 4.0);
/// assert_eq!(v.magnitude(), 5.0);
/// assert!(v.is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector<const N: usize>([f64; N]);

/// 2D vector
pub type Vec2 = Vector<2>;

/// 3D vector
pub type Vec3 = Vector<3>;

impl<const N: usize> Vector<N> {
    /// Create a vector from its components
    pub const fn from_array(components: [f64; N]) -> Self {
        Vector(components)
    }

    /// The zero vector
    pub const fn zero() -> Self {
        Vector([0.0; N])
    }

    /// A vector with every component set to `value`
    pub const fn splat(value: f64) -> Self {
        Vector([value; N])
    }

    /// Get the components as an array
    pub fn as_array(&self) -> [f64; N] {
        self.0
    }

    /// Check if all components are finite (not NaN or infinite)
    pub fn is_valid(&self) -> bool {
        self.0.iter().all(|c| c.is_finite())
    }

    /// Check if every component is exactly zero
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&c| c == 0.0)
    }

    /// Dot product
    pub fn dot(&self, other: &Self) -> f64 {
        self.0.iter().zip(other.0.iter()).map(|(a, b)| a * b).sum()
    }

    /// Squared Euclidean length
    pub fn magnitude_squared(&self) -> f64 {
        self.dot(self)
    }

    /// Euclidean length
    pub fn magnitude(&self) -> f64 {
        self.magnitude_squared().sqrt()
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: &Self) -> f64 {
        (*other - *self).magnitude()
    }

    /// Unit vector in the same direction
    ///
    /// Returns the zero vector for a zero-length input instead of dividing by zero.
    pub fn normalize(&self) -> Self {
        let mag = self.magnitude();
        if mag == 0.0 || !mag.is_finite() {
            Self::zero()
        } else {
            *self * (1.0 / mag)
        }
    }

    /// Component-wise absolute value
    pub fn abs(&self) -> Self {
        self.map(f64::abs)
    }

    /// Apply `f` to every component
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        let mut out = self.0;
        for c in out.iter_mut() {
            *c = f(*c);
        }
        Vector(out)
    }

    /// Combine two vectors component by component
    pub fn zip_map(&self, other: &Self, f: impl Fn(f64, f64) -> f64) -> Self {
        let mut out = self.0;
        for (c, o) in out.iter_mut().zip(other.0.iter()) {
            *c = f(*c, *o);
        }
        Vector(out)
    }
}

impl Vector<2> {
    /// Create a 2D vector
    pub const fn new(x: f64, y: f64) -> Self {
        Vector([x, y])
    }

    /// Get the x component
    pub fn x(&self) -> f64 {
        self.0[0]
    }

    /// Get the y component
    pub fn y(&self) -> f64 {
        self.0[1]
    }
}

impl Vector<3> {
    /// Create a 3D vector
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Vector([x, y, z])
    }

    /// Get the x component
    pub fn x(&self) -> f64 {
        self.0[0]
    }

    /// Get the y component
    pub fn y(&self) -> f64 {
        self.0[1]
    }

    /// Get the z component
    pub fn z(&self) -> f64 {
        self.0[2]
    }
}

impl<const N: usize> Default for Vector<N> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<const N: usize> From<[f64; N]> for Vector<N> {
    fn from(components: [f64; N]) -> Self {
        Vector(components)
    }
}

impl<const N: usize> Index<usize> for Vector<N> {
    type Output = f64;

    fn index(&self, axis: usize) -> &f64 {
        &self.0[axis]
    }
}

impl<const N: usize> IndexMut<usize> for Vector<N> {
    fn index_mut(&mut self, axis: usize) -> &mut f64 {
        &mut self.0[axis]
    }
}

impl<const N: usize> Add for Vector<N> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.zip_map(&rhs, |a, b| a + b)
    }
}

impl<const N: usize> Sub for Vector<N> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.zip_map(&rhs, |a, b| a - b)
    }
}

impl<const N: usize> Mul<f64> for Vector<N> {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self {
        self.map(|c| c * scalar)
    }
}

impl<const N: usize> Neg for Vector<N> {
    type Output = Self;

    fn neg(self) -> Self {
        self.map(|c| -c)
    }
}

impl<const N: usize> AddAssign for Vector<N> {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<const N: usize> SubAssign for Vector<N> {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<const N: usize> fmt::Display for Vector<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, c) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", c)?;
        }
        write!(f, ")")
    }
}

/// Strict overlap test for two center-anchored boxes
///
/// Boxes that only touch along a face do not overlap.
pub fn boxes_overlap<const N: usize>(
    center_a: &Vector<N>,
    half_a: &Vector<N>,
    center_b: &Vector<N>,
    half_b: &Vector<N>,
) -> bool {
    (0..N).all(|axis| (center_a[axis] - center_b[axis]).abs() < half_a[axis] + half_b[axis])
}
