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
//! # Simulation Core
//!
//! The per-frame simulation core shared by 2D and 3D game worlds. It owns
//! the live set of dynamic bodies, advances them every tick across worker
//! threads, applies uniform physics and answers proximity queries.
//!
//! ## Features
//!
//! - **Disjoint-range parallelism**: bodies are integrated by one worker per
//!   contiguous index range, with no per-body locking
//! - **Platform collision**: minimum-overlap-axis push-out against static geometry
//! - **Queries**: pairwise collision detection and radius searches
//! - **Dimension-generic**: one implementation for `World2D` and `World3D`
//! - **Parallelization**: optional Rayon pool execution (`parallel` feature)
//!
//! ## Example
//!
//! ```rust
//! use sim_core::{World3D, ecs::{Body, Bounds, Platform}};
//! use sim_core::config::WorldConfig;
//! use sim_core::math::Vec3;
//!
//! let bounds = Bounds::new(Vec3::new(-50.0, -10.0, -50.0), Vec3::new(50.0, 40.0, 50.0));
//! let mut world = World3D::new(WorldConfig::open_world(bounds)).unwrap();
//! world.add_static_geometry(Platform::new(Vec3::new(0.0, -0.5, 0.0), Vec3::new(50.0, 0.5, 50.0)));
//!
//! let id = world.add_entity(Body::new("player", Vec3::new(0.0, 5.0, 0.0), Vec3::splat(0.5)));
//! for _ in 0..120 {
//!     world.tick(1.0 / 60.0);
//! }
//! assert!(world.is_supported(id));
//! ```

#![warn(missing_docs)]

/// Fixed-dimension vector math
pub mod math;

/// Bodies, storage, scheduling and the world
pub mod ecs;

/// Serial physics pass
pub mod physics;

/// Collision detection and proximity queries
pub mod query;

/// World configuration and errors
pub mod config;

pub use config::{ConfigError, WorldConfig};
pub use ecs::{Body, BodyId, World, World2D, World3D};
