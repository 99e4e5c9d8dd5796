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
//! World configuration
//!
//! A [`WorldConfig`] is built once at world setup and validated by
//! [`World::new`](crate::ecs::World::new). Only gravity can be changed on a
//! live world.

use crate::ecs::scheduler::ExecutionMode;
use crate::ecs::Bounds;
use crate::math::{Vec2, Vec3, Vector};
use crate::physics::ResolutionMode;
use crate::query::CollisionTest;
use thiserror::Error;

/// Gravity used by the 2D platformer preset, in pixels per second squared (y down)
pub const PLATFORMER_GRAVITY: Vec2 = Vec2::new(0.0, 500.0);

/// Gravity used by the 3D open-world preset, in meters per second squared (y up)
pub const EARTH_GRAVITY: Vec3 = Vec3::new(0.0, -9.81, 0.0);

/// Errors reported when validating a [`WorldConfig`]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Gravity has a NaN or infinite component
    #[error("gravity must be finite on every axis")]
    NonFiniteGravity,
    /// Bounds have zero extent on an axis
    #[error("world bounds have zero extent on axis {axis}")]
    EmptyBounds {
        /// First offending axis
        axis: usize,
    },
    /// An explicit worker count of zero was requested
    #[error("worker count must be at least 1")]
    ZeroWorkers,
    /// A proximity threshold is negative or not finite
    #[error("proximity threshold must be non-negative and finite, got {0}")]
    InvalidThreshold(f64),
}

/// Settings for a [`World`](crate::ecs::World)
///
/// # Examples
///
/// ```
/// use sim_core::config::WorldConfig;
/// use sim_core::ecs::Bounds;
/// use sim_core::math::Vec3;
/// use sim_core::physics::ResolutionMode;
///
/// let config = WorldConfig::new(Bounds::from_size(Vec3::new(100.0, 20.0, 100.0)))
///     .with_gravity(Vec3::new(0.0, -9.81, 0.0))
///     .with_workers(4)
///     .with_resolution_mode(ResolutionMode::AllContacts);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct WorldConfig<const N: usize> {
    /// World limits bodies are clamped into
    pub bounds: Bounds<N>,
    /// Constant acceleration applied to every active body
    pub gravity: Vector<N>,
    /// Worker count for the parallel phase; `None` uses the hardware thread count
    pub workers: Option<usize>,
    /// How worker ranges are executed
    pub execution_mode: ExecutionMode,
    /// How many platforms a body is resolved against per frame
    pub resolution_mode: ResolutionMode,
    /// Test used by collision detection
    pub collision_test: CollisionTest,
    /// Whether `tick` runs collision detection and reports the pairs
    pub detect_collisions_in_tick: bool,
    /// Whether `tick` clamps bodies into `bounds`
    pub clamp_to_bounds: bool,
    /// Initial capacity of the body store
    pub initial_capacity: usize,
}

impl<const N: usize> WorldConfig<N> {
    /// Default settings for the given bounds: no gravity, hardware workers,
    /// bounds clamping on
    pub fn new(bounds: Bounds<N>) -> Self {
        WorldConfig {
            bounds,
            gravity: Vector::zero(),
            workers: None,
            execution_mode: ExecutionMode::default(),
            resolution_mode: ResolutionMode::default(),
            collision_test: CollisionTest::default(),
            detect_collisions_in_tick: false,
            clamp_to_bounds: true,
            initial_capacity: 64,
        }
    }

    /// Set the gravity vector
    pub fn with_gravity(mut self, gravity: Vector<N>) -> Self {
        self.gravity = gravity;
        self
    }

    /// Use a fixed number of workers instead of the hardware thread count
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// Set the execution mode of the parallel phase
    pub fn with_execution_mode(mut self, mode: ExecutionMode) -> Self {
        self.execution_mode = mode;
        self
    }

    /// Set the platform resolution mode
    pub fn with_resolution_mode(mut self, mode: ResolutionMode) -> Self {
        self.resolution_mode = mode;
        self
    }

    /// Set the collision test used by detection
    pub fn with_collision_test(mut self, test: CollisionTest) -> Self {
        self.collision_test = test;
        self
    }

    /// Run collision detection as part of every tick
    pub fn with_collisions_in_tick(mut self) -> Self {
        self.detect_collisions_in_tick = true;
        self
    }

    /// Leave bodies unclamped when they leave the bounds
    pub fn without_bounds_clamp(mut self) -> Self {
        self.clamp_to_bounds = false;
        self
    }

    /// Set the initial store capacity
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Check the configuration for values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.gravity.is_valid() {
            return Err(ConfigError::NonFiniteGravity);
        }

        let size = self.bounds.size();
        if let Some(axis) = (0..N).find(|&a| size[a] <= 0.0) {
            return Err(ConfigError::EmptyBounds { axis });
        }

        if self.workers == Some(0) {
            return Err(ConfigError::ZeroWorkers);
        }

        if let CollisionTest::Proximity { threshold } = self.collision_test {
            if !(threshold >= 0.0 && threshold.is_finite()) {
                return Err(ConfigError::InvalidThreshold(threshold));
            }
        }

        Ok(())
    }
}

impl WorldConfig<2> {
    /// Side-scrolling preset: origin-anchored bounds of `size`, y pointing
    /// down, platformer gravity
    pub fn platformer(size: Vec2) -> Self {
        Self::new(Bounds::from_size(size)).with_gravity(PLATFORMER_GRAVITY)
    }

    /// Zero-gravity preset for top-down or space scenes
    pub fn space(size: Vec2) -> Self {
        Self::new(Bounds::from_size(size))
    }
}

impl WorldConfig<3> {
    /// Open-world preset: y up, Earth gravity, proximity collision test
    pub fn open_world(bounds: Bounds<3>) -> Self {
        Self::new(bounds)
            .with_gravity(EARTH_GRAVITY)
            .with_collision_test(CollisionTest::Proximity { threshold: 1.0 })
    }
}
