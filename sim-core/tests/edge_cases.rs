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
//! Edge case tests for the simulation core
//!
//! Tests boundary conditions, extreme values, and unusual scenarios

use sim_core::config::{ConfigError, WorldConfig};
use sim_core::ecs::scheduler::{covers_exactly, partition, ExecutionMode, ParallelUpdater};
use sim_core::ecs::{Body, BodyId, Bounds, Platform};
use sim_core::math::{Vec2, Vec3};
use sim_core::physics::{clamp_to_bounds, resolve_contact};
use sim_core::{World, World2D, World3D};

#[test]
#[should_panic(expected = "Timestep must be non-negative and finite")]
fn test_tick_nan_timestep() {
    let world = World2D::with_bounds(Bounds::from_size(Vec2::new(10.0, 10.0))).unwrap();
    world.tick(f64::NAN);
}

#[test]
#[should_panic(expected = "Timestep must be non-negative and finite")]
fn test_tick_infinite_timestep() {
    let world = World2D::with_bounds(Bounds::from_size(Vec2::new(10.0, 10.0))).unwrap();
    world.tick(f64::INFINITY);
}

#[test]
fn test_zero_timestep_leaves_motion_unchanged() {
    let world = World2D::new(WorldConfig::platformer(Vec2::new(100.0, 100.0))).unwrap();
    let id = world.add_entity(Body::new("still", Vec2::new(50.0, 50.0), Vec2::splat(1.0)).with_velocity(Vec2::new(3.0, 0.0)));
    let report = world.tick(0.0);
    assert_eq!(report.integrated, 1);
    let body = world.entity(id).unwrap();
    assert_eq!(body.position(), Vec2::new(50.0, 50.0));
    assert_eq!(body.velocity(), Vec2::new(3.0, 0.0));
}

#[test]
#[should_panic(expected = "Gravity must be finite")]
fn test_set_gravity_nan() {
    let mut world = World2D::with_bounds(Bounds::from_size(Vec2::new(10.0, 10.0))).unwrap();
    world.set_gravity(Vec2::new(0.0, f64::NAN));
}

#[test]
fn test_invalid_configs() {
    let bounds = Bounds::from_size(Vec3::splat(10.0));
    assert!(matches!(
        World3D::new(WorldConfig::new(bounds).with_gravity(Vec3::new(f64::INFINITY, 0.0, 0.0))),
        Err(ConfigError::NonFiniteGravity)
    ));
    assert!(matches!(
        World3D::new(WorldConfig::new(Bounds::new(Vec3::zero(), Vec3::new(1.0, 1.0, 0.0)))),
        Err(ConfigError::EmptyBounds { axis: 2 })
    ));
}

#[test]
fn test_try_new_bounds() {
    assert!(Bounds::try_new(Vec2::zero(), Vec2::new(1.0, 1.0)).is_some());
    assert!(Bounds::try_new(Vec2::new(2.0, 0.0), Vec2::new(1.0, 1.0)).is_none());
    assert!(Bounds::try_new(Vec2::zero(), Vec2::new(f64::NAN, 1.0)).is_none());
}

#[test]
fn test_single_worker_single_body() {
    let mut bodies = vec![Body::new("solo", Vec3::zero(), Vec3::splat(1.0)).with_velocity(Vec3::new(1.0, 1.0, 1.0))];
    let updater = ParallelUpdater::new(1, ExecutionMode::SpawnPerFrame);
    assert_eq!(updater.run(&mut bodies, 2.0), 1);
    assert_eq!(bodies[0].position(), Vec3::new(2.0, 2.0, 2.0));
}

#[test]
fn test_many_workers_few_bodies() {
    let mut bodies: Vec<Body<2>> = (0..3)
        .map(|i| Body::new("b", Vec2::new(i as f64, 0.0), Vec2::splat(0.5)).with_velocity(Vec2::new(0.0, 1.0)))
        .collect();
    let updater = ParallelUpdater::new(64, ExecutionMode::SpawnPerFrame);
    assert_eq!(updater.run(&mut bodies, 1.0), 3);
    assert!(bodies.iter().all(|b| b.position().y() == 1.0));
}

#[test]
fn test_all_inactive_bodies() {
    let world = World2D::with_bounds(Bounds::from_size(Vec2::new(10.0, 10.0))).unwrap();
    let ids: Vec<BodyId> = (0..5).map(|_| world.add_entity(Body::new("b", Vec2::new(5.0, 5.0), Vec2::splat(1.0)))).collect();
    for id in &ids {
        world.deactivate(*id);
    }
    assert!(world.detect_collisions().is_empty());
    assert!(world.query_radius(Vec2::new(5.0, 5.0), 100.0).is_empty());

    let report = world.tick(0.1);
    assert_eq!(report.integrated, 0);
    assert_eq!(report.removed, 5);
    assert_eq!(world.entity_count(), 0);
}

#[test]
fn test_unknown_ids() {
    let world = World2D::with_bounds(Bounds::from_size(Vec2::new(10.0, 10.0))).unwrap();
    let missing = BodyId::new(12345);
    assert!(world.entity(missing).is_none());
    assert!(!world.deactivate(missing));
    assert!(!world.is_supported(missing));
    assert!(world.with_entity_mut(missing, |b| b.set_active(false)).is_none());
}

#[test]
fn test_body_larger_than_world() {
    let bounds = Bounds::from_size(Vec2::new(10.0, 10.0));
    let mut bodies = vec![Body::new("giant", Vec2::new(-30.0, 4.0), Vec2::new(20.0, 1.0))];
    clamp_to_bounds(&mut bodies, &bounds);
    assert_eq!(bodies[0].position(), Vec2::new(5.0, 4.0));
    assert_eq!(clamp_to_bounds(&mut bodies, &bounds), 0);
}

#[test]
fn test_zero_size_body_and_platform() {
    let platform = Platform::new(Vec2::zero(), Vec2::zero());
    let mut point = Body::new("point", Vec2::zero(), Vec2::zero());
    // Degenerate boxes never strictly overlap
    assert!(resolve_contact(&mut point, &platform).is_none());
}

#[test]
fn test_coincident_centers_in_tick() {
    let mut world = World3D::with_bounds(Bounds::new(Vec3::splat(-10.0), Vec3::splat(10.0))).unwrap();
    world.add_static_geometry(Platform::new(Vec3::new(1.0, 1.0, 1.0), Vec3::splat(2.0)));
    let id = world.add_entity(Body::new("stuck", Vec3::new(1.0, 1.0, 1.0), Vec3::splat(0.5)));

    let report = world.tick(0.1);
    assert_eq!(report.contacts, 0);
    let body = world.entity(id).unwrap();
    assert!(body.position().is_valid());
    assert_eq!(body.position(), Vec3::new(1.0, 1.0, 1.0));
}

#[test]
fn test_large_partition() {
    let ranges = partition(1_000_003, 7);
    assert_eq!(ranges.len(), 7);
    assert!(covers_exactly(&ranges, 1_000_003));
    assert_eq!(ranges[6].end - ranges[6].start, 1_000_003 - 6 * (1_000_003 / 7));
}

#[test]
fn test_gravity_change_between_ticks() {
    let mut world = World::new(WorldConfig::space(Vec2::new(1000.0, 1000.0))).unwrap();
    let id = world.add_entity(Body::new("b", Vec2::new(500.0, 500.0), Vec2::splat(1.0)));
    world.tick(1.0);
    assert_eq!(world.entity(id).unwrap().velocity(), Vec2::zero());

    world.set_gravity(Vec2::new(0.0, 981.0));
    world.tick(0.5);
    assert_eq!(world.entity(id).unwrap().velocity(), Vec2::new(0.0, 490.5));
}
