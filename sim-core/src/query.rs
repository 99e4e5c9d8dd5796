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
//! Read-only scans: pairwise collision detection and proximity queries
//!
//! All scans are linear (radius queries) or pairwise (collision detection)
//! over the body slice. There is no broad-phase structure, so detection is
//! O(n²) and each radius query is O(n). Inactive bodies never appear in any
//! result.

use crate::ecs::{Body, BodyId, Platform};
use crate::math::Vector;

/// Smallest half thickness of the ground probe box
const PROBE_MIN_HALF_THICKNESS: f64 = 0.1;

/// Probe half thickness as a fraction of the body's vertical half extent
const PROBE_THICKNESS_RATIO: f64 = 0.1;

/// Fraction of the body's footprint covered by the ground probe
const PROBE_FOOTPRINT: f64 = 0.8;

/// Test used to decide whether two bodies collide
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum CollisionTest {
    /// Boxes overlap strictly on every axis
    #[default]
    Overlap,
    /// Center distance is at most `threshold`
    Proximity {
        /// Maximum center-to-center distance
        threshold: f64,
    },
}

impl CollisionTest {
    /// Apply the test to a pair of bodies
    pub fn collides<const N: usize>(&self, a: &Body<N>, b: &Body<N>) -> bool {
        match *self {
            CollisionTest::Overlap => a.overlaps(b),
            CollisionTest::Proximity { threshold } => a.distance_to(b) <= threshold,
        }
    }
}

/// Find every colliding pair of active bodies
///
/// Pairs are reported once, in scan order `(bodies[i], bodies[j])` with
/// `i < j`. A body is never paired with itself.
///
/// # Examples
///
/// ```
/// use sim_core::ecs::Body;
/// use sim_core::query::{detect_pairs, CollisionTest};
/// use sim_core::math::Vec2;
///
/// let bodies = vec![
///     Body::new("a", Vec2::new(0.0, 0.0), Vec2::splat(1.0)),
///     Body::new("b", Vec2::new(1.5, 0.0), Vec2::splat(1.0)),
///     Body::new("c", Vec2::new(9.0, 0.0), Vec2::splat(1.0)),
/// ];
/// assert_eq!(detect_pairs(&bodies, CollisionTest::Overlap).len(), 1);
/// assert_eq!(detect_pairs(&bodies, CollisionTest::Proximity { threshold: 10.0 }).len(), 3);
/// ```
pub fn detect_pairs<const N: usize>(bodies: &[Body<N>], test: CollisionTest) -> Vec<(BodyId, BodyId)> {
    let mut pairs = Vec::new();
    for (i, a) in bodies.iter().enumerate() {
        if !a.is_active() {
            continue;
        }
        for b in bodies[i + 1..].iter().filter(|b| b.is_active()) {
            if test.collides(a, b) {
                pairs.push((a.id(), b.id()));
            }
        }
    }
    pairs
}

/// Ids of active bodies whose center lies within `radius` of `center`
///
/// Results are in store order.
pub fn query_radius<const N: usize>(bodies: &[Body<N>], center: &Vector<N>, radius: f64) -> Vec<BodyId> {
    bodies
        .iter()
        .filter(|b| b.is_active() && b.position().distance_to(center) <= radius)
        .map(Body::id)
        .collect()
}

/// Platforms whose center lies within `radius` of `center`
///
/// Solid and non-solid platforms are both reported.
pub fn nearby_platforms<'a, const N: usize>(
    platforms: &'a [Platform<N>],
    center: &Vector<N>,
    radius: f64,
) -> Vec<&'a Platform<N>> {
    platforms
        .iter()
        .filter(|p| p.position().distance_to(center) <= radius)
        .collect()
}

/// Whether a solid platform sits directly under the body
///
/// "Under" follows the sign of gravity on the vertical axis (index 1). A
/// thin probe box is placed against the body's face on that side, covering
/// most of the body's footprint, and tested against every solid platform.
/// The probe's half thickness is a tenth of the body's vertical half extent,
/// and never less than 0.1 world units, so a 32 px sprite tolerates a gap of
/// about 3 px and a 1 m crate a gap of 0.2 m.
/// Returns false for inactive bodies and when gravity has no vertical
/// component.
pub fn is_supported<const N: usize>(body: &Body<N>, platforms: &[Platform<N>], gravity: &Vector<N>) -> bool {
    if N < 2 || !body.is_active() || gravity[1] == 0.0 {
        return false;
    }

    let down = gravity[1].signum();
    let half = body.half_extents();
    let thickness = (half[1] * PROBE_THICKNESS_RATIO).max(PROBE_MIN_HALF_THICKNESS);

    let mut probe_center = body.position();
    probe_center[1] += down * (half[1] + thickness);

    let mut probe_half = half * PROBE_FOOTPRINT;
    probe_half[1] = thickness;

    platforms
        .iter()
        .any(|p| p.is_solid() && p.overlaps_box(&probe_center, &probe_half))
}

/// First solid platform under the body, within `max_distance` of its face
///
/// "Under" follows the sign of gravity on axis 1, as in [`is_supported`].
/// A platform qualifies when its near face lies strictly beyond the body's
/// face on that side, less than `max_distance` away, and the two boxes
/// overlap strictly on every other axis. Platforms are searched in order.
/// Returns `None` for inactive bodies and when gravity has no vertical
/// component.
///
/// # Examples
///
/// ```
/// use sim_core::ecs::{Body, Platform};
/// use sim_core::math::Vec2;
/// use sim_core::query::platform_below;
///
/// let ledge = Platform::from_corner(Vec2::new(0.0, 300.0), Vec2::new(200.0, 20.0));
/// let platforms = [ledge];
/// let player = Body::new("player", Vec2::new(100.0, 250.0), Vec2::splat(16.0));
///
/// // y points down: the ledge top is 34 px under the player's feet
/// let found = platform_below(&player, &platforms, &Vec2::new(0.0, 500.0), 100.0);
/// assert_eq!(found, Some(&platforms[0]));
/// assert!(platform_below(&player, &platforms, &Vec2::new(0.0, 500.0), 30.0).is_none());
/// ```
pub fn platform_below<'a, const N: usize>(
    body: &Body<N>,
    platforms: &'a [Platform<N>],
    gravity: &Vector<N>,
    max_distance: f64,
) -> Option<&'a Platform<N>> {
    if N < 2 || !body.is_active() || gravity[1] == 0.0 {
        return None;
    }

    let down = gravity[1].signum();
    let center = body.position();
    let half = body.half_extents();
    let face = center[1] + down * half[1];

    platforms.iter().filter(|p| p.is_solid()).find(|p| {
        let near_face = p.position()[1] - down * p.half_extents()[1];
        let gap = (near_face - face) * down;
        let beside = (0..N)
            .filter(|&axis| axis != 1)
            .all(|axis| (center[axis] - p.position()[axis]).abs() < half[axis] + p.half_extents()[axis]);
        gap > 0.0 && gap < max_distance && beside
    })
}
