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
//! Body versus platform penetration resolution
//!
//! A body overlapping a solid platform is pushed out along the single axis
//! with the smallest penetration depth, and its velocity along that axis is
//! zeroed so it does not sink back in on the next frame. Only one axis is
//! corrected per contact; fast bodies can still tunnel through thin
//! platforms.
//!
//! For center distance `d` and half extents `h_body`, `h_platform`, the
//! penetration depth on an axis is `h_body + h_platform - |d|`. Ties between
//! axes prefer the vertical axis (index 1), then the lowest index.

use crate::ecs::{Body, Platform};
use crate::math::Vector;
use tracing::trace;

/// How many platforms a body is resolved against per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolutionMode {
    /// Resolve only the first overlapping solid platform, in platform order
    #[default]
    FirstContact,
    /// Resolve every overlapping solid platform in order, re-testing overlap
    /// after each correction
    AllContacts,
}

/// A resolved body/platform contact
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Axis the body was pushed along
    pub axis: usize,
    /// Signed distance the body moved along `axis`
    pub correction: f64,
}

fn min_overlap_axis<const N: usize>(overlap: &Vector<N>) -> usize {
    let mut best = if N > 1 { 1 } else { 0 };
    for axis in 0..N {
        if overlap[axis] < overlap[best] {
            best = axis;
        }
    }
    best
}

/// Push `body` out of `platform` if they overlap
///
/// Returns `None` when the body is inactive, the platform is not solid, the
/// boxes do not overlap, or the two centers coincide exactly (there is no
/// direction to push in, so the contact is left unresolved).
///
/// # Examples
///
/// ```
/// use sim_core::ecs::{Body, Platform};
/// use sim_core::physics::resolve_contact;
/// use sim_core::math::Vec2;
///
/// let ground = Platform::new(Vec2::new(0.0, -1.0), Vec2::new(10.0, 1.0));
/// let mut body = Body::new("crate", Vec2::new(0.0, 0.5), Vec2::splat(1.0))
///     .with_velocity(Vec2::new(2.0, -4.0));
///
/// let contact = resolve_contact(&mut body, &ground).unwrap();
/// assert_eq!(contact.axis, 1);
/// assert_eq!(body.position(), Vec2::new(0.0, 1.0));
/// assert_eq!(body.velocity(), Vec2::new(2.0, 0.0));
/// ```
pub fn resolve_contact<const N: usize>(body: &mut Body<N>, platform: &Platform<N>) -> Option<Contact> {
    if !body.is_active() || !platform.is_solid() {
        return None;
    }

    let center = body.position();
    let half = body.half_extents();
    if !platform.overlaps_box(&center, &half) {
        return None;
    }

    let delta = center - platform.position();
    if delta.is_zero() {
        trace!(body = %body.id(), "skipping platform contact with coincident centers");
        return None;
    }

    let reach = half + platform.half_extents();
    let overlap = reach - delta.abs();
    let axis = min_overlap_axis(&overlap);
    let correction = if delta[axis] > 0.0 {
        overlap[axis]
    } else {
        -overlap[axis]
    };

    let mut position = center;
    position[axis] += correction;
    body.set_position(position);

    let mut velocity = body.velocity();
    velocity[axis] = 0.0;
    body.set_velocity(velocity);

    Some(Contact { axis, correction })
}

/// Resolve every active body against the solid platforms
///
/// Returns the number of contacts resolved.
pub fn resolve_platforms<const N: usize>(
    bodies: &mut [Body<N>],
    platforms: &[Platform<N>],
    mode: ResolutionMode,
) -> usize {
    let mut contacts = 0;
    for body in bodies.iter_mut().filter(|b| b.is_active()) {
        for platform in platforms {
            if resolve_contact(body, platform).is_some() {
                contacts += 1;
                if mode == ResolutionMode::FirstContact {
                    break;
                }
            }
        }
    }
    contacts
}
