//! Cache invalidation seam
//!
//! Actions mark rendered routes stale after a successful write. Invalidation is
//! fire-and-forget: it cannot fail and calling it twice is the same as once.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

/// Marks cached content for a path stale
#[async_trait]
pub trait CacheInvalidator: Send + Sync {
    async fn revalidate_path(&self, path: &str);
}

/// Per-path generation counters
///
/// Every invalidation bumps the generation of its path. Readers remember the
/// generation they rendered with and compare later.
#[derive(Debug, Default)]
pub struct RevalidationRegistry {
    generations: RwLock<HashMap<String, u64>>,
}

impl RevalidationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current generation of a path (0 if never invalidated)
    pub fn generation(&self, path: &str) -> u64 {
        match self.generations.read() {
            Ok(generations) => generations.get(path).copied().unwrap_or(0),
            Err(poisoned) => poisoned.into_inner().get(path).copied().unwrap_or(0),
        }
    }

    /// Whether the path was invalidated since `seen` was read
    pub fn is_stale(&self, path: &str, seen: u64) -> bool {
        self.generation(path) > seen
    }
}

#[async_trait]
impl CacheInvalidator for RevalidationRegistry {
    async fn revalidate_path(&self, path: &str) {
        let mut generations = match self.generations.write() {
            Ok(generations) => generations,
            Err(poisoned) => poisoned.into_inner(),
        };
        let generation = generations.entry(path.to_string()).or_insert(0);
        *generation += 1;
        tracing::debug!(path, generation = *generation, "Path revalidated");
    }
}
