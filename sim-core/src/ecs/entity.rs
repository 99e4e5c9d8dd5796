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
//! Body identity
//!
//! Bodies are referenced across threads and across compaction passes by a
//! stable numeric handle rather than by index or pointer. Indices shift when
//! the store compacts; ids never do.

use std::fmt;

/// Stable handle for a body in an [`EntityStore`](crate::ecs::EntityStore)
///
/// Ids are handed out by the store in increasing order starting at 1 and are
/// never reused within a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct BodyId(u64);

impl BodyId {
    /// Id carried by a body that has not been added to a store yet
    pub const UNASSIGNED: BodyId = BodyId(0);

    /// Create a BodyId from a raw u64 value
    pub fn new(id: u64) -> Self {
        BodyId(id)
    }

    /// Get the raw u64 value
    pub fn raw(&self) -> u64 {
        self.0
    }

    /// Check whether a store has assigned this id
    pub fn is_assigned(&self) -> bool {
        self.0 != 0
    }
}

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Body({})", self.0)
    }
}
