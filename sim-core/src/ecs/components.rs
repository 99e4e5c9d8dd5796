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
//! Simulation data: dynamic bodies, static platforms and world bounds
//!
//! Every box in the simulation is center-anchored: `position` is the center
//! and `half_extents` reaches from the center to each face. Level layouts
//! written with corner anchors can be converted with
//! [`Platform::from_corner`].

use crate::ecs::BodyId;
use crate::math::{boxes_overlap, Vector};

fn valid_extents<const N: usize>(half_extents: &Vector<N>) -> bool {
    half_extents.is_valid() && half_extents.as_array().iter().all(|&h| h >= 0.0)
}

/// A movable body with an axis-aligned box
///
/// Only `position`, `velocity` and the active flag change at runtime; the
/// box extents are fixed at construction.
///
/// # Examples
///
/// ```
/// use sim_core::ecs::Body;
/// use sim_core::math::Vec2;
///
/// let mut body = Body::new("crate", Vec2::new(0.0, 0.0), Vec2::new(0.5, 0.5));
/// body.set_velocity(Vec2::new(2.0, 0.0));
/// body.integrate(0.5);
/// assert_eq!(body.position(), Vec2::new(1.0, 0.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Body<const N: usize> {
    id: BodyId,
    name: String,
    position: Vector<N>,
    velocity: Vector<N>,
    half_extents: Vector<N>,
    active: bool,
}

impl<const N: usize> Body<N> {
    /// Create an active body at rest
    ///
    /// # Panics
    ///
    /// Panics if any half extent is negative or not finite. For fallible
    /// construction, use `try_new`.
    pub fn new(name: impl Into<String>, position: Vector<N>, half_extents: Vector<N>) -> Self {
        assert!(
            valid_extents(&half_extents),
            "Half extents must be non-negative and finite"
        );
        Body {
            id: BodyId::UNASSIGNED,
            name: name.into(),
            position,
            velocity: Vector::zero(),
            half_extents,
            active: true,
        }
    }

    /// Try to create a body
    ///
    /// Returns `None` if any half extent is negative or not finite.
    pub fn try_new(
        name: impl Into<String>,
        position: Vector<N>,
        half_extents: Vector<N>,
    ) -> Option<Self> {
        if valid_extents(&half_extents) {
            Some(Self::new(name, position, half_extents))
        } else {
            None
        }
    }

    /// Builder-style initial velocity
    pub fn with_velocity(mut self, velocity: Vector<N>) -> Self {
        self.velocity = velocity;
        self
    }

    /// Store-assigned id (`BodyId::UNASSIGNED` before insertion)
    pub fn id(&self) -> BodyId {
        self.id
    }

    pub(crate) fn assign_id(&mut self, id: BodyId) {
        self.id = id;
    }

    /// Diagnostic name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Center of the body
    pub fn position(&self) -> Vector<N> {
        self.position
    }

    /// Current velocity
    pub fn velocity(&self) -> Vector<N> {
        self.velocity
    }

    /// Half of the box size along each axis
    pub fn half_extents(&self) -> Vector<N> {
        self.half_extents
    }

    /// Full box size along each axis
    pub fn size(&self) -> Vector<N> {
        self.half_extents * 2.0
    }

    /// Whether the body takes part in simulation passes
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Set the center position
    pub fn set_position(&mut self, position: Vector<N>) {
        self.position = position;
    }

    /// Set the velocity
    pub fn set_velocity(&mut self, velocity: Vector<N>) {
        self.velocity = velocity;
    }

    /// Mark the body active or inactive
    ///
    /// Inactive bodies are skipped by every pass and removed on the next
    /// compaction.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Translate the body by `offset`
    pub fn translate(&mut self, offset: Vector<N>) {
        self.position += offset;
    }

    /// Add `delta` to the velocity
    pub fn add_velocity(&mut self, delta: Vector<N>) {
        self.velocity += delta;
    }

    /// Advance the position by `velocity * dt`
    ///
    /// Inactive bodies are left untouched.
    pub fn integrate(&mut self, dt: f64) {
        if self.active {
            self.position += self.velocity * dt;
        }
    }

    /// Minimum and maximum corners of the body's box
    pub fn aabb(&self) -> (Vector<N>, Vector<N>) {
        (
            self.position - self.half_extents,
            self.position + self.half_extents,
        )
    }

    /// Strict box overlap with another body
    ///
    /// Inactive bodies never overlap anything.
    pub fn overlaps(&self, other: &Body<N>) -> bool {
        self.active
            && other.active
            && boxes_overlap(
                &self.position,
                &self.half_extents,
                &other.position,
                &other.half_extents,
            )
    }

    /// Whether `point` lies inside the body's box (faces included)
    pub fn contains_point(&self, point: &Vector<N>) -> bool {
        self.active
            && (0..N).all(|axis| (point[axis] - self.position[axis]).abs() <= self.half_extents[axis])
    }

    /// Center-to-center distance
    pub fn distance_to(&self, other: &Body<N>) -> f64 {
        self.position.distance_to(&other.position)
    }

    /// Unit vector pointing from this body's center to the other's
    ///
    /// Zero when the centers coincide.
    pub fn direction_to(&self, other: &Body<N>) -> Vector<N> {
        (other.position - self.position).normalize()
    }

    /// Whether the whole box lies inside `bounds`
    pub fn is_within(&self, bounds: &Bounds<N>) -> bool {
        let (min, max) = self.aabb();
        (0..N).all(|axis| min[axis] >= bounds.min()[axis] && max[axis] <= bounds.max()[axis])
    }
}

/// Static level geometry
///
/// Platforms are never moved by the simulation. Only solid platforms take
/// part in collision resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct Platform<const N: usize> {
    position: Vector<N>,
    half_extents: Vector<N>,
    solid: bool,
}

impl<const N: usize> Platform<N> {
    /// Create a solid platform centered at `position`
    ///
    /// # Panics
    ///
    /// Panics if any half extent is negative or not finite.
    pub fn new(position: Vector<N>, half_extents: Vector<N>) -> Self {
        assert!(
            valid_extents(&half_extents),
            "Half extents must be non-negative and finite"
        );
        Platform {
            position,
            half_extents,
            solid: true,
        }
    }

    /// Create a platform that bodies pass through
    pub fn non_solid(position: Vector<N>, half_extents: Vector<N>) -> Self {
        Platform {
            solid: false,
            ..Self::new(position, half_extents)
        }
    }

    /// Create a solid platform from its minimum corner and full size
    pub fn from_corner(min_corner: Vector<N>, size: Vector<N>) -> Self {
        let half = size * 0.5;
        Self::new(min_corner + half, half)
    }

    /// Center of the platform
    pub fn position(&self) -> Vector<N> {
        self.position
    }

    /// Half of the box size along each axis
    pub fn half_extents(&self) -> Vector<N> {
        self.half_extents
    }

    /// Full box size along each axis
    pub fn size(&self) -> Vector<N> {
        self.half_extents * 2.0
    }

    /// Whether bodies collide with this platform
    pub fn is_solid(&self) -> bool {
        self.solid
    }

    /// Strict overlap between this platform and a box
    pub fn overlaps_box(&self, center: &Vector<N>, half_extents: &Vector<N>) -> bool {
        boxes_overlap(&self.position, &self.half_extents, center, half_extents)
    }
}

/// Axis-aligned world limits
///
/// # Examples
///
/// ```
/// use sim_core::ecs::Bounds;
/// use sim_core::math::Vec2;
///
/// let bounds = Bounds::from_size(Vec2::new(800.0, 600.0));
/// assert!(bounds.contains(&Vec2::new(10.0, 10.0)));
/// assert!(!bounds.contains(&Vec2::new(-1.0, 10.0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds<const N: usize> {
    min: Vector<N>,
    max: Vector<N>,
}

impl<const N: usize> Bounds<N> {
    /// Create bounds from corners
    ///
    /// # Panics
    ///
    /// Panics if a corner is not finite or `min` exceeds `max` on any axis.
    pub fn new(min: Vector<N>, max: Vector<N>) -> Self {
        assert!(
            Self::well_formed(&min, &max),
            "Bounds must be finite with min <= max on every axis"
        );
        Bounds { min, max }
    }

    /// Try to create bounds from corners
    pub fn try_new(min: Vector<N>, max: Vector<N>) -> Option<Self> {
        if Self::well_formed(&min, &max) {
            Some(Bounds { min, max })
        } else {
            None
        }
    }

    /// Bounds anchored at the origin with the given size
    pub fn from_size(size: Vector<N>) -> Self {
        Self::new(Vector::zero(), size)
    }

    fn well_formed(min: &Vector<N>, max: &Vector<N>) -> bool {
        min.is_valid() && max.is_valid() && (0..N).all(|axis| min[axis] <= max[axis])
    }

    /// Minimum corner
    pub fn min(&self) -> Vector<N> {
        self.min
    }

    /// Maximum corner
    pub fn max(&self) -> Vector<N> {
        self.max
    }

    /// Extent along each axis
    pub fn size(&self) -> Vector<N> {
        self.max - self.min
    }

    /// Center point
    pub fn center(&self) -> Vector<N> {
        (self.min + self.max) * 0.5
    }

    /// Whether `point` lies inside the bounds (faces included)
    pub fn contains(&self, point: &Vector<N>) -> bool {
        (0..N).all(|axis| point[axis] >= self.min[axis] && point[axis] <= self.max[axis])
    }

    /// Clamp a box center so the whole box stays inside the bounds
    ///
    /// On an axis where the box is wider than the world, the box is centered
    /// on that axis instead. The result is a fixed point: clamping it again
    /// returns it unchanged.
    pub fn clamp_center(&self, center: Vector<N>, half_extents: Vector<N>) -> Vector<N> {
        let mut out = center;
        for axis in 0..N {
            let lo = self.min[axis] + half_extents[axis];
            let hi = self.max[axis] - half_extents[axis];
            out[axis] = if lo <= hi {
                center[axis].max(lo).min(hi)
            } else {
                (self.min[axis] + self.max[axis]) * 0.5
            };
        }
        out
    }
}
