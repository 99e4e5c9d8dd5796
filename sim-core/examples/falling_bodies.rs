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
//! Open-world example: crates dropped onto terrain
//!
//! Builds a 3D world with Earth gravity, a ground slab and a couple of
//! raised ledges, drops a grid of crates and steps it for three seconds.
//! Run with `RUST_LOG=debug` to see the per-tick summaries.

use sim_core::config::WorldConfig;
use sim_core::ecs::{Body, Bounds, Platform};
use sim_core::math::Vec3;
use sim_core::{BodyId, World3D};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("Simulation Core - Falling Bodies");
    println!("================================\n");

    let bounds = Bounds::new(Vec3::new(-50.0, -10.0, -50.0), Vec3::new(50.0, 100.0, 50.0));
    let mut world = match World3D::new(WorldConfig::open_world(bounds)) {
        Ok(world) => world,
        Err(err) => {
            eprintln!("invalid world config: {}", err);
            return;
        }
    };
    println!("Created world with {} workers, gravity {}", world.worker_count(), world.gravity());

    world.add_static_geometry(Platform::new(Vec3::new(0.0, -0.5, 0.0), Vec3::new(50.0, 0.5, 50.0)));
    world.add_static_geometry(Platform::new(Vec3::new(10.0, 4.0, 10.0), Vec3::new(5.0, 1.0, 5.0)));
    world.add_static_geometry(Platform::new(Vec3::new(-12.0, 8.0, -6.0), Vec3::new(3.0, 0.5, 3.0)));
    println!("Added {} platforms", world.platforms().len());

    let mut crates: Vec<BodyId> = Vec::new();
    for ix in -3i32..=3 {
        for iz in -3..=3 {
            let position = Vec3::new(ix as f64 * 4.0, 20.0 + (ix + iz).abs() as f64, iz as f64 * 4.0);
            crates.push(world.add_entity(Body::new(format!("crate_{}_{}", ix, iz), position, Vec3::splat(0.5))));
        }
    }
    println!("Dropped {} crates\n", crates.len());

    let dt = 1.0 / 60.0;
    for second in 1..=3 {
        let mut contacts = 0;
        for _ in 0..60 {
            contacts += world.tick(dt).contacts;
        }
        let grounded = crates.iter().filter(|id| world.is_supported(**id)).count();
        println!("t={}s: {} platform contacts, {}/{} crates supported", second, contacts, grounded, crates.len());
    }

    if let Some(first) = crates.first().and_then(|id| world.entity(*id)) {
        println!("\n{} rests at {}", first.name(), first.position());
    }

    let near_ledge = world.query_radius(Vec3::new(10.0, 5.5, 10.0), 6.0);
    println!("{} crates within 6m of the east ledge", near_ledge.len());

    let touching = world.detect_collisions();
    println!("{} crate pairs within 1m of each other", touching.len());
}
