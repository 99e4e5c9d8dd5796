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
//! Serial physics pass
//!
//! Runs on the simulation thread after the parallel integration phase has
//! joined. The pass is split into three steps that a frame applies in order:
//!
//! 1. [`apply_gravity`]: `velocity += gravity * dt` for every active body.
//! 2. [`resolve_platforms`]: push bodies out of solid platforms along the
//!    axis of minimum overlap.
//! 3. [`clamp_to_bounds`]: keep every active body's box inside the world.
//!
//! # Gravity convention
//!
//! Gravity is an acceleration in units per second squared and is always
//! scaled by the frame's `dt`, for both 2D and 3D worlds. A frame of length
//! `dt` changes an active body's velocity by exactly `gravity * dt`.

mod resolve;

pub use resolve::{resolve_contact, resolve_platforms, Contact, ResolutionMode};

use crate::ecs::{Body, Bounds};
use crate::math::Vector;

/// Add `gravity * dt` to the velocity of every active body
///
/// Returns the number of bodies affected.
pub fn apply_gravity<const N: usize>(bodies: &mut [Body<N>], gravity: Vector<N>, dt: f64) -> usize {
    if gravity.is_zero() {
        return 0;
    }

    let delta = gravity * dt;
    let mut affected = 0;
    for body in bodies.iter_mut().filter(|b| b.is_active()) {
        body.add_velocity(delta);
        affected += 1;
    }
    affected
}

/// Clamp every active body's box into `bounds`
///
/// Velocity is left unchanged. Returns the number of bodies that moved.
pub fn clamp_to_bounds<const N: usize>(bodies: &mut [Body<N>], bounds: &Bounds<N>) -> usize {
    let mut clamped = 0;
    for body in bodies.iter_mut().filter(|b| b.is_active()) {
        let position = body.position();
        let target = bounds.clamp_center(position, body.half_extents());
        if target != position {
            body.set_position(target);
            clamped += 1;
        }
    }
    clamped
}
