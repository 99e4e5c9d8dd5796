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
//! Side-scrolling platformer example
//!
//! A player and a few collectibles in a 1200x600 pixel level with y
//! pointing down. Collectibles the player touches are deactivated and
//! removed on the next tick.

use sim_core::config::WorldConfig;
use sim_core::ecs::{Body, Platform};
use sim_core::math::Vec2;
use sim_core::World2D;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("Simulation Core - Platformer");
    println!("============================\n");

    let config = WorldConfig::platformer(Vec2::new(1200.0, 600.0)).with_collisions_in_tick();
    let mut world = match World2D::new(config) {
        Ok(world) => world,
        Err(err) => {
            eprintln!("invalid world config: {}", err);
            return;
        }
    };

    world.add_static_geometry(Platform::from_corner(Vec2::new(0.0, 550.0), Vec2::new(1200.0, 50.0)));
    world.add_static_geometry(Platform::from_corner(Vec2::new(200.0, 450.0), Vec2::new(150.0, 20.0)));
    world.add_static_geometry(Platform::from_corner(Vec2::new(500.0, 350.0), Vec2::new(200.0, 20.0)));
    world.add_static_geometry(Platform::non_solid(Vec2::new(900.0, 300.0), Vec2::new(60.0, 10.0)));

    let player = world.add_entity(
        Body::new("player", Vec2::new(100.0, 400.0), Vec2::splat(16.0)).with_velocity(Vec2::new(180.0, 0.0)),
    );
    let mut coins = Vec::new();
    for i in 0..5 {
        let x = 180.0 + i as f64 * 60.0;
        coins.push(world.add_entity(Body::new(format!("coin_{}", i), Vec2::new(x, 520.0), Vec2::splat(8.0))));
    }
    println!("Level has {} platforms, {} coins\n", world.platforms().len(), coins.len());

    let dt = 1.0 / 60.0;
    let mut collected = 0;
    for frame in 1..=180 {
        let report = world.tick(dt);

        for (a, b) in &report.collisions {
            let coin = if *a == player {
                *b
            } else if *b == player {
                *a
            } else {
                continue;
            };
            if world.deactivate(coin) {
                collected += 1;
                println!("frame {}: collected {}", frame, coin);
            }
        }

        if frame % 60 == 0 {
            if let Some(body) = world.entity(player) {
                println!(
                    "frame {}: player at {}, on ground: {}",
                    frame,
                    body.position(),
                    world.is_supported(player)
                );
            }
        }
    }

    println!("\nCollected {}/{} coins, {} bodies left", collected, coins.len(), world.entity_count());
}
