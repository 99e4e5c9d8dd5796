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
//! Simulation core: bodies, storage, scheduling and the world
//!
//! This module provides:
//! - Body identity and data (bodies, platforms, world bounds)
//! - A mutex-guarded body store
//! - Range-partitioned parallel integration
//! - The `World` that runs the per-frame pipeline

mod entity;
mod components;
mod store;
mod world;

pub mod scheduler;

pub use entity::BodyId;
pub use components::{Body, Bounds, Platform};
pub use store::EntityStore;
pub use world::{TickReport, World, World2D, World3D};
