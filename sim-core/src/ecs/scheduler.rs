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
//! Range-partitioned parallel integration
//!
//! The body slice is cut into contiguous, non-overlapping index ranges, one
//! per worker. Each worker receives its own `&mut` sub-slice, so no body is
//! ever written by two workers and no per-body locking is needed. The caller
//! blocks until every worker has joined.
//!
//! Two execution modes share the same partitioning:
//!
//! - [`ExecutionMode::SpawnPerFrame`] spawns a fresh scoped OS thread per
//!   range on every call.
//! - [`ExecutionMode::ThreadPool`] submits the ranges as tasks to the global
//!   Rayon pool when the `parallel` feature is enabled, and falls back to
//!   spawning threads otherwise.

use crate::ecs::Body;
use std::num::NonZeroUsize;
use std::ops::Range;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

/// Number of hardware threads, never less than one
pub fn hardware_threads() -> usize {
    thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// Split `[0, len)` into at most `workers` contiguous ranges
///
/// Every worker but the last receives `max(1, len / workers)` indices; the
/// last one also takes the remainder. Workers whose start index would be at
/// or past `len` are not given a range, so `len == 0` yields no ranges and
/// `len < workers` yields `len` single-index ranges. A worker count of zero
/// is treated as one.
///
/// # Examples
///
/// ```
/// use sim_core::ecs::scheduler::partition;
///
/// assert_eq!(partition(10, 4), vec![0..2, 2..4, 4..6, 6..10]);
/// assert_eq!(partition(2, 4), vec![0..1, 1..2]);
/// assert!(partition(0, 4).is_empty());
/// ```
pub fn partition(len: usize, workers: usize) -> Vec<Range<usize>> {
    let workers = workers.max(1);
    if len == 0 {
        return Vec::new();
    }

    let chunk = (len / workers).max(1);
    let mut ranges = Vec::with_capacity(workers.min(len));
    for i in 0..workers {
        let start = i * chunk;
        if start >= len {
            break;
        }
        let end = if i == workers - 1 { len } else { start + chunk };
        ranges.push(start..end);
    }

    debug_assert!(covers_exactly(&ranges, len), "partition must cover [0, {}) exactly once", len);
    ranges
}

/// Check that `ranges` tile `[0, len)` with no gap and no overlap
pub fn covers_exactly(ranges: &[Range<usize>], len: usize) -> bool {
    let mut next = 0;
    for range in ranges {
        if range.start != next || range.end <= range.start {
            return false;
        }
        next = range.end;
    }
    next == len
}

/// How the worker ranges are executed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// Spawn and join one scoped OS thread per range, every frame
    #[default]
    SpawnPerFrame,
    /// Run the ranges as tasks on the global Rayon pool
    ThreadPool,
}

/// Integrates body motion across disjoint worker ranges
///
/// # Examples
///
/// ```
/// use sim_core::ecs::Body;
/// use sim_core::ecs::scheduler::{ExecutionMode, ParallelUpdater};
/// use sim_core::math::Vec2;
///
/// let mut bodies: Vec<Body<2>> = (0..8)
///     .map(|i| Body::new("b", Vec2::new(i as f64, 0.0), Vec2::splat(0.5))
///         .with_velocity(Vec2::new(1.0, 0.0)))
///     .collect();
///
/// let updater = ParallelUpdater::new(4, ExecutionMode::SpawnPerFrame);
/// let workers = updater.run(&mut bodies, 0.5);
/// assert_eq!(workers, 4);
/// assert_eq!(bodies[0].position(), Vec2::new(0.5, 0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParallelUpdater {
    workers: usize,
    mode: ExecutionMode,
}

impl ParallelUpdater {
    /// Create an updater with a fixed worker count (zero is treated as one)
    pub fn new(workers: usize, mode: ExecutionMode) -> Self {
        ParallelUpdater {
            workers: workers.max(1),
            mode,
        }
    }

    /// Create an updater sized to the hardware thread count
    pub fn from_hardware(mode: ExecutionMode) -> Self {
        Self::new(hardware_threads(), mode)
    }

    /// Maximum number of workers per call
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Execution mode
    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    /// Integrate every active body by `dt`, returning the number of workers used
    ///
    /// Returns immediately without spawning anything for an empty slice.
    pub fn run<const N: usize>(&self, bodies: &mut [Body<N>], dt: f64) -> usize {
        self.run_counted(bodies, dt).0
    }

    /// Like [`run`](Self::run), also returning how many active bodies were integrated
    pub fn run_counted<const N: usize>(&self, bodies: &mut [Body<N>], dt: f64) -> (usize, usize) {
        let ranges = partition(bodies.len(), self.workers);
        if ranges.is_empty() {
            return (0, 0);
        }

        let chunks = split_ranges(bodies, &ranges);
        let spawned = chunks.len();
        let integrated = AtomicUsize::new(0);

        match self.mode {
            ExecutionMode::SpawnPerFrame => spawn_per_frame(chunks, dt, &integrated),
            ExecutionMode::ThreadPool => run_on_pool(chunks, dt, &integrated),
        }

        (spawned, integrated.into_inner())
    }
}

impl Default for ParallelUpdater {
    fn default() -> Self {
        Self::from_hardware(ExecutionMode::default())
    }
}

/// Cut `slice` into one mutable sub-slice per range
///
/// `ranges` must tile the slice, as produced by [`partition`].
fn split_ranges<'a, T>(mut slice: &'a mut [T], ranges: &[Range<usize>]) -> Vec<&'a mut [T]> {
    let mut chunks = Vec::with_capacity(ranges.len());
    let mut offset = 0;
    for range in ranges {
        debug_assert_eq!(range.start, offset);
        let (head, tail) = std::mem::take(&mut slice).split_at_mut(range.end - offset);
        chunks.push(head);
        slice = tail;
        offset = range.end;
    }
    chunks
}

fn integrate_range<const N: usize>(chunk: &mut [Body<N>], dt: f64, integrated: &AtomicUsize) {
    let mut count = 0;
    for body in chunk.iter_mut().filter(|b| b.is_active()) {
        body.integrate(dt);
        count += 1;
    }
    integrated.fetch_add(count, Ordering::Relaxed);
}

fn spawn_per_frame<const N: usize>(chunks: Vec<&mut [Body<N>]>, dt: f64, integrated: &AtomicUsize) {
    // All scoped threads are joined when the scope ends
    thread::scope(|scope| {
        for chunk in chunks {
            scope.spawn(move || integrate_range(chunk, dt, integrated));
        }
    });
}

#[cfg(feature = "parallel")]
fn run_on_pool<const N: usize>(chunks: Vec<&mut [Body<N>]>, dt: f64, integrated: &AtomicUsize) {
    rayon::scope(|scope| {
        for chunk in chunks {
            scope.spawn(move |_| integrate_range(chunk, dt, integrated));
        }
    });
}

#[cfg(not(feature = "parallel"))]
fn run_on_pool<const N: usize>(chunks: Vec<&mut [Body<N>]>, dt: f64, integrated: &AtomicUsize) {
    spawn_per_frame(chunks, dt, integrated);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec3;

    fn moving_bodies(count: usize) -> Vec<Body<3>> {
        (0..count)
            .map(|i| {
                Body::new(format!("b{}", i), Vec3::new(i as f64, 0.0, 0.0), Vec3::splat(0.5))
                    .with_velocity(Vec3::new(0.0, 2.0, -1.0))
            })
            .collect()
    }

    #[test]
    fn test_partition_empty() {
        assert!(partition(0, 8).is_empty());
    }

    #[test]
    fn test_partition_fewer_items_than_workers() {
        assert_eq!(partition(3, 8), vec![0..1, 1..2, 2..3]);
    }

    #[test]
    fn test_partition_remainder_goes_to_last_worker() {
        assert_eq!(partition(11, 3), vec![0..3, 3..6, 6..11]);
    }

    #[test]
    fn test_partition_zero_workers_is_one() {
        assert_eq!(partition(5, 0), vec![0..5]);
    }

    #[test]
    fn test_partition_coverage_table() {
        for workers in 1..=16 {
            let sizes = [0, 1, workers - 1, workers, workers + 1, 10 * workers];
            for &len in &sizes {
                let ranges = partition(len, workers);
                assert!(covers_exactly(&ranges, len), "len={} workers={}", len, workers);
                assert!(ranges.len() <= workers);
            }
        }
    }

    #[test]
    fn test_covers_exactly_detects_gaps_and_overlaps() {
        assert!(covers_exactly(&[0..2, 2..5], 5));
        assert!(!covers_exactly(&[0..2, 3..5], 5));
        assert!(!covers_exactly(&[0..3, 2..5], 5));
        assert!(!covers_exactly(&[0..2, 2..4], 5));
    }

    #[test]
    fn test_run_empty_spawns_nothing() {
        let mut bodies: Vec<Body<3>> = Vec::new();
        let updater = ParallelUpdater::new(4, ExecutionMode::SpawnPerFrame);
        assert_eq!(updater.run_counted(&mut bodies, 0.1), (0, 0));
    }

    #[test]
    fn test_run_integrates_every_active_body_once() {
        let mut bodies = moving_bodies(37);
        bodies[5].set_active(false);
        let updater = ParallelUpdater::new(6, ExecutionMode::SpawnPerFrame);

        let (workers, integrated) = updater.run_counted(&mut bodies, 0.5);
        assert_eq!(workers, 6);
        assert_eq!(integrated, 36);

        for (i, body) in bodies.iter().enumerate() {
            let expected = if i == 5 {
                Vec3::new(i as f64, 0.0, 0.0)
            } else {
                Vec3::new(i as f64, 1.0, -0.5)
            };
            assert_eq!(body.position(), expected, "body {}", i);
        }
    }

    #[test]
    fn test_thread_pool_matches_spawn_per_frame() {
        let mut a = moving_bodies(100);
        let mut b = moving_bodies(100);
        ParallelUpdater::new(4, ExecutionMode::SpawnPerFrame).run(&mut a, 0.25);
        ParallelUpdater::new(4, ExecutionMode::ThreadPool).run(&mut b, 0.25);
        assert_eq!(a, b);
    }

    #[test]
    fn test_updater_clamps_worker_count() {
        let updater = ParallelUpdater::new(0, ExecutionMode::ThreadPool);
        assert_eq!(updater.workers(), 1);
        assert_eq!(updater.mode(), ExecutionMode::ThreadPool);
        assert!(ParallelUpdater::default().workers() >= 1);
    }
}
