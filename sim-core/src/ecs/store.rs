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
//! Thread-safe body storage
//!
//! The store owns the dynamic bodies of a world behind a single coarse
//! mutex. Structural changes (add, compact, clear) and full scans all take
//! the same lock, so callers on other threads (gameplay adding a body while
//! a render thread copies a snapshot) cannot observe a half-updated
//! collection. The per-frame parallel phase works on a `&mut` slice borrowed
//! out of the held guard, which rules out structural mutation while workers
//! are running.

use crate::ecs::{Body, BodyId};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Mutex-guarded collection of bodies
pub struct EntityStore<const N: usize> {
    bodies: Mutex<Vec<Body<N>>>,
    next_id: AtomicU64,
}

impl<const N: usize> EntityStore<N> {
    /// Create an empty store
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty store with room for `capacity` bodies
    pub fn with_capacity(capacity: usize) -> Self {
        EntityStore {
            bodies: Mutex::new(Vec::with_capacity(capacity)),
            next_id: AtomicU64::new(1),
        }
    }

    /// Acquire the store lock
    ///
    /// A panic on another thread while holding the lock leaves only plain
    /// values behind, so a poisoned lock is recovered rather than propagated.
    pub(crate) fn lock(&self) -> MutexGuard<'_, Vec<Body<N>>> {
        self.bodies.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append a body and return its newly assigned id
    pub fn add(&self, mut body: Body<N>) -> BodyId {
        let id = BodyId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        body.assign_id(id);
        self.lock().push(body);
        id
    }

    /// Erase every inactive body, preserving the order of the rest
    ///
    /// Returns the number of bodies removed.
    pub fn remove_inactive(&self) -> usize {
        let mut bodies = self.lock();
        compact(&mut bodies)
    }

    /// Number of bodies at call time, active or not
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Check if the store holds no bodies
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Copy of the body with the given id
    pub fn get(&self, id: BodyId) -> Option<Body<N>> {
        self.lock().iter().find(|b| b.id() == id).cloned()
    }

    /// Set the active flag of a body
    ///
    /// Returns false if no body has this id.
    pub fn set_active(&self, id: BodyId, active: bool) -> bool {
        self.with_body_mut(id, |body| body.set_active(active)).is_some()
    }

    /// Run `f` on the body with the given id while holding the lock
    ///
    /// The lock is not reentrant; `f` must not call back into the store.
    pub fn with_body_mut<R>(&self, id: BodyId, f: impl FnOnce(&mut Body<N>) -> R) -> Option<R> {
        let mut bodies = self.lock();
        bodies.iter_mut().find(|b| b.id() == id).map(f)
    }

    /// Run `f` over all bodies while holding the lock
    pub fn with_bodies<R>(&self, f: impl FnOnce(&[Body<N>]) -> R) -> R {
        let bodies = self.lock();
        f(bodies.as_slice())
    }

    /// Copy every body out of the store, in store order
    pub fn snapshot(&self) -> Vec<Body<N>> {
        self.lock().clone()
    }

    /// Remove all bodies
    ///
    /// Ids keep counting up; handles from before the clear never resolve to
    /// a new body.
    pub fn clear(&self) {
        self.lock().clear();
    }
}

impl<const N: usize> Default for EntityStore<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Drop inactive bodies from an already locked collection
pub(crate) fn compact<const N: usize>(bodies: &mut Vec<Body<N>>) -> usize {
    let before = bodies.len();
    bodies.retain(Body::is_active);
    before - bodies.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec2;
    use std::sync::Arc;
    use std::thread;

    fn body(name: &str, x: f64) -> Body<2> {
        Body::new(name, Vec2::new(x, 0.0), Vec2::splat(0.5))
    }

    #[test]
    fn test_add_assigns_increasing_ids() {
        let store = EntityStore::new();
        let a = store.add(body("a", 0.0));
        let b = store.add(body("b", 1.0));
        assert!(a.is_assigned());
        assert!(a < b);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(b).map(|body| body.id()), Some(b));
    }

    #[test]
    fn test_remove_inactive_preserves_order() {
        let store = EntityStore::new();
        let ids: Vec<BodyId> = (0..5).map(|i| store.add(body(&format!("b{}", i), i as f64))).collect();
        store.set_active(ids[1], false);
        store.set_active(ids[3], false);

        assert_eq!(store.remove_inactive(), 2);
        let remaining: Vec<BodyId> = store.snapshot().iter().map(|b| b.id()).collect();
        assert_eq!(remaining, vec![ids[0], ids[2], ids[4]]);
    }

    #[test]
    fn test_set_active_unknown_id() {
        let store: EntityStore<2> = EntityStore::new();
        assert!(!store.set_active(BodyId::new(99), false));
    }

    #[test]
    fn test_with_body_mut() {
        let store = EntityStore::new();
        let id = store.add(body("a", 0.0));
        let name = store.with_body_mut(id, |b| {
            b.set_velocity(Vec2::new(1.0, 2.0));
            b.name().to_string()
        });
        assert_eq!(name.as_deref(), Some("a"));
        assert_eq!(store.get(id).map(|b| b.velocity()), Some(Vec2::new(1.0, 2.0)));
    }

    #[test]
    fn test_clear_keeps_id_sequence() {
        let store = EntityStore::new();
        let first = store.add(body("a", 0.0));
        store.clear();
        assert!(store.is_empty());
        let second = store.add(body("b", 0.0));
        assert_ne!(first, second);
        assert!(store.get(first).is_none());
    }

    #[test]
    fn test_concurrent_adds() {
        let store = Arc::new(EntityStore::new());
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for i in 0..100 {
                        store.add(body(&format!("t{}-{}", t, i), i as f64));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.len(), 400);
        let mut ids: Vec<u64> = store.snapshot().iter().map(|b| b.id().raw()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 400);
    }
}
