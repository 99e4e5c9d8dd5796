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
//! World management
//!
//! The World owns the body store, the static platforms and the
//! configuration, and runs the per-frame pipeline:
//!
//! 1. parallel integration over disjoint index ranges,
//! 2. serial physics (gravity, platform resolution, bounds clamp),
//! 3. optional pairwise collision detection,
//! 4. compaction of inactive bodies.
//!
//! The store lock is held for the whole tick, so bodies added from other
//! threads land between frames.

use crate::config::{ConfigError, WorldConfig};
use crate::ecs::scheduler::ParallelUpdater;
use crate::ecs::store::compact;
use crate::ecs::{Body, BodyId, Bounds, EntityStore, Platform};
use crate::math::Vector;
use crate::physics::{apply_gravity, clamp_to_bounds, resolve_platforms};
use crate::query::{self, CollisionTest};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// What happened during one [`World::tick`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Frame number, starting at 1
    pub tick: u64,
    /// Bodies in the store when the frame started
    pub bodies: usize,
    /// Workers used by the parallel phase
    pub workers: usize,
    /// Active bodies integrated by the parallel phase
    pub integrated: usize,
    /// Platform contacts resolved
    pub contacts: usize,
    /// Bodies moved back inside the world bounds
    pub clamped: usize,
    /// Colliding pairs, filled only when detection runs in the tick
    pub collisions: Vec<(BodyId, BodyId)>,
    /// Inactive bodies removed by compaction
    pub removed: usize,
    /// Wall time spent in the tick
    pub elapsed: Duration,
}

/// The simulation world
///
/// `World2D` and `World3D` are the two variants in use.
///
/// # Examples
///
/// ```
/// use sim_core::{World2D, ecs::Body};
/// use sim_core::config::WorldConfig;
/// use sim_core::math::Vec2;
///
/// let world = World2D::new(WorldConfig::space(Vec2::new(100.0, 100.0))).unwrap();
/// let id = world.add_entity(
///     Body::new("ship", Vec2::new(50.0, 50.0), Vec2::splat(1.0))
///         .with_velocity(Vec2::new(10.0, 0.0)),
/// );
///
/// world.tick(0.5);
/// assert_eq!(world.entity(id).unwrap().position(), Vec2::new(55.0, 50.0));
/// ```
pub struct World<const N: usize> {
    store: EntityStore<N>,
    platforms: Vec<Platform<N>>,
    config: WorldConfig<N>,
    updater: ParallelUpdater,
    tick_count: AtomicU64,
}

/// 2D world
pub type World2D = World<2>;

/// 3D world
pub type World3D = World<3>;

impl<const N: usize> World<N> {
    /// Create a world from a validated configuration
    pub fn new(config: WorldConfig<N>) -> Result<Self, ConfigError> {
        config.validate()?;

        let updater = match config.workers {
            Some(workers) => {
                let hardware = crate::ecs::scheduler::hardware_threads();
                if workers > hardware {
                    warn!(workers, hardware, "more workers requested than hardware threads");
                }
                ParallelUpdater::new(workers, config.execution_mode)
            }
            None => ParallelUpdater::from_hardware(config.execution_mode),
        };

        info!(
            dimensions = N,
            workers = updater.workers(),
            mode = ?updater.mode(),
            "world created"
        );

        Ok(World {
            store: EntityStore::with_capacity(config.initial_capacity),
            platforms: Vec::new(),
            config,
            updater,
            tick_count: AtomicU64::new(0),
        })
    }

    /// Create a world with default settings for `bounds`
    pub fn with_bounds(bounds: Bounds<N>) -> Result<Self, ConfigError> {
        Self::new(WorldConfig::new(bounds))
    }

    /// Add a dynamic body and return its id
    pub fn add_entity(&self, body: Body<N>) -> BodyId {
        self.store.add(body)
    }

    /// Add a static platform
    pub fn add_static_geometry(&mut self, platform: Platform<N>) {
        self.platforms.push(platform);
    }

    /// Run one frame of `dt` seconds
    ///
    /// Returns after compaction has finished.
    ///
    /// # Panics
    ///
    /// Panics if `dt` is negative or not finite.
    pub fn tick(&self, dt: f64) -> TickReport {
        assert!(dt >= 0.0 && dt.is_finite(), "Timestep must be non-negative and finite");

        let started = Instant::now();
        let mut bodies = self.store.lock();
        // Numbered under the lock so reports follow execution order
        let tick = self.tick_count.fetch_add(1, Ordering::Relaxed) + 1;
        let count = bodies.len();

        let (workers, integrated) = self.updater.run_counted(bodies.as_mut_slice(), dt);

        apply_gravity(bodies.as_mut_slice(), self.config.gravity, dt);
        let contacts = resolve_platforms(bodies.as_mut_slice(), &self.platforms, self.config.resolution_mode);
        let clamped = if self.config.clamp_to_bounds {
            clamp_to_bounds(bodies.as_mut_slice(), &self.config.bounds)
        } else {
            0
        };

        let collisions = if self.config.detect_collisions_in_tick {
            query::detect_pairs(bodies.as_slice(), self.config.collision_test)
        } else {
            Vec::new()
        };

        let removed = compact(&mut bodies);
        drop(bodies);

        let report = TickReport {
            tick,
            bodies: count,
            workers,
            integrated,
            contacts,
            clamped,
            collisions,
            removed,
            elapsed: started.elapsed(),
        };

        debug!(
            tick,
            bodies = count,
            workers,
            contacts,
            clamped,
            collisions = report.collisions.len(),
            removed,
            elapsed_us = report.elapsed.as_micros() as u64,
            "tick complete"
        );

        report
    }

    /// Colliding pairs using the configured test
    pub fn detect_collisions(&self) -> Vec<(BodyId, BodyId)> {
        self.detect_collisions_with(self.config.collision_test)
    }

    /// Colliding pairs using an explicit test
    pub fn detect_collisions_with(&self, test: CollisionTest) -> Vec<(BodyId, BodyId)> {
        self.store.with_bodies(|bodies| query::detect_pairs(bodies, test))
    }

    /// Ids of active bodies within `radius` of `center`
    pub fn query_radius(&self, center: Vector<N>, radius: f64) -> Vec<BodyId> {
        self.store.with_bodies(|bodies| query::query_radius(bodies, &center, radius))
    }

    /// Platforms whose center lies within `radius` of `center`
    pub fn nearby_platforms(&self, center: Vector<N>, radius: f64) -> Vec<&Platform<N>> {
        query::nearby_platforms(&self.platforms, &center, radius)
    }

    /// Whether the body rests on a solid platform
    ///
    /// Returns false for unknown ids.
    pub fn is_supported(&self, id: BodyId) -> bool {
        self.store
            .get(id)
            .map(|body| query::is_supported(&body, &self.platforms, &self.config.gravity))
            .unwrap_or(false)
    }

    /// First solid platform under the body within `max_distance`
    ///
    /// Returns `None` for unknown ids. See [`query::platform_below`].
    pub fn platform_below(&self, id: BodyId, max_distance: f64) -> Option<&Platform<N>> {
        let body = self.store.get(id)?;
        query::platform_below(&body, &self.platforms, &self.config.gravity, max_distance)
    }

    /// Whether a point lies inside the world bounds
    pub fn is_in_world_bounds(&self, point: Vector<N>) -> bool {
        self.config.bounds.contains(&point)
    }

    /// World bounds
    pub fn world_bounds(&self) -> Bounds<N> {
        self.config.bounds
    }

    /// Current gravity
    pub fn gravity(&self) -> Vector<N> {
        self.config.gravity
    }

    /// Replace the gravity vector
    ///
    /// # Panics
    ///
    /// Panics if any component is not finite.
    pub fn set_gravity(&mut self, gravity: Vector<N>) {
        assert!(gravity.is_valid(), "Gravity must be finite");
        self.config.gravity = gravity;
    }

    /// Active configuration
    pub fn config(&self) -> &WorldConfig<N> {
        &self.config
    }

    /// Static platforms in insertion order
    pub fn platforms(&self) -> &[Platform<N>] {
        &self.platforms
    }

    /// Copy of a body
    pub fn entity(&self, id: BodyId) -> Option<Body<N>> {
        self.store.get(id)
    }

    /// Mark a body inactive; it is removed at the end of the next tick
    ///
    /// Returns false for unknown ids.
    pub fn deactivate(&self, id: BodyId) -> bool {
        self.store.set_active(id, false)
    }

    /// Run `f` on a body while holding the store lock
    ///
    /// The lock is not reentrant: `f` must not call back into this world
    /// (`entity`, `add_entity`, `tick`, ...), or the calling thread deadlocks.
    pub fn with_entity_mut<R>(&self, id: BodyId, f: impl FnOnce(&mut Body<N>) -> R) -> Option<R> {
        self.store.with_body_mut(id, f)
    }

    /// Copy every body, in store order
    pub fn snapshot(&self) -> Vec<Body<N>> {
        self.store.snapshot()
    }

    /// Number of bodies in the store, active or not
    pub fn entity_count(&self) -> usize {
        self.store.len()
    }

    /// Remove inactive bodies now instead of waiting for the next tick
    pub fn compact(&self) -> usize {
        self.store.remove_inactive()
    }

    /// Remove every body and platform
    pub fn clear(&mut self) {
        self.store.clear();
        self.platforms.clear();
    }

    /// Number of ticks run so far
    pub fn tick_count(&self) -> u64 {
        self.tick_count.load(Ordering::Relaxed)
    }

    /// Worker count used by the parallel phase
    pub fn worker_count(&self) -> usize {
        self.updater.workers()
    }
}
