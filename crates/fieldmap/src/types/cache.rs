// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Memoizing cache of type descriptors.
//!
//! Discovery runs at most once per record type for the lifetime of the
//! cache; entries are never evicted. A single mutex covers the whole
//! check-compute-store sequence, so concurrent misses (for the same type or
//! different ones) serialize instead of racing to build duplicates. Stored
//! descriptors are immutable and handed out as `Arc`s, readable without
//! further locking.

use super::descriptor::TypeDescriptor;
use parking_lot::Mutex;
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

/// Cache hit/miss statistics.
///
/// `misses` counts discovery runs.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LookupStats {
    pub hits: u64,
    pub misses: u64,
    pub last_miss_ns: u64,
}

#[derive(Default)]
struct CacheState {
    entries: HashMap<TypeId, Arc<TypeDescriptor>>,
    stats: LookupStats,
}

/// Append-only map from record type identity to its descriptor.
#[derive(Default)]
pub struct TypeCache {
    inner: Mutex<CacheState>,
}

impl TypeCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached descriptor for `key`, running `build` under the lock on a miss.
    pub fn get_or_build<F>(&self, key: TypeId, build: F) -> Arc<TypeDescriptor>
    where
        F: FnOnce() -> TypeDescriptor,
    {
        let mut state = self.inner.lock();
        let cached = state.entries.get(&key).map(Arc::clone);
        if let Some(hit) = cached {
            state.stats.hits = state.stats.hits.saturating_add(1);
            log::trace!("[fieldmap] cache hit for {}", hit.type_info().name());
            return hit;
        }

        let start = Instant::now();
        let built = Arc::new(build());
        state.entries.insert(key, Arc::clone(&built));
        state.stats.misses = state.stats.misses.saturating_add(1);
        state.stats.last_miss_ns = u64::try_from(start.elapsed().as_nanos()).unwrap_or(u64::MAX);
        built
    }

    /// Cached descriptor for `key`, without building.
    #[must_use]
    pub fn peek(&self, key: TypeId) -> Option<Arc<TypeDescriptor>> {
        self.inner.lock().entries.get(&key).map(Arc::clone)
    }

    #[must_use]
    pub fn stats(&self) -> LookupStats {
        self.inner.lock().stats
    }

    /// Number of memoized types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for TypeCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.lock();
        f.debug_struct("TypeCache")
            .field("entries", &state.entries.len())
            .field("stats", &state.stats)
            .finish()
    }
}
