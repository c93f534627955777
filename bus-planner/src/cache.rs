//! Caching layer for trip plans.
//!
//! Planning is pure for a fixed dataset, so a plan can be reused for any
//! query that normalises to the same (origin, destination) text. The TTL
//! bounds how stale `planned_at` can be; the capacity bounds memory.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use moka::future::Cache as MokaCache;

use crate::domain::RoutePlan;

/// Cache key: trimmed, lowercased (origin, destination) text.
type PlanKey = (String, String);

/// A plan with the time it was computed.
#[derive(Debug, Clone)]
pub struct CachedPlan {
    pub plan: RoutePlan,
    pub planned_at: DateTime<Utc>,
}

/// Configuration for the plan cache.
#[derive(Debug, Clone)]
pub struct PlanCacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for PlanCacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
            max_capacity: 1000,
        }
    }
}

/// Cache of computed plans.
pub struct PlanCache {
    plans: MokaCache<PlanKey, Arc<CachedPlan>>,
}

impl PlanCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &PlanCacheConfig) -> Self {
        let plans = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { plans }
    }

    fn key(from: &str, to: &str) -> PlanKey {
        (from.trim().to_lowercase(), to.trim().to_lowercase())
    }

    /// Get a cached plan for a query.
    pub async fn get(&self, from: &str, to: &str) -> Option<Arc<CachedPlan>> {
        self.plans.get(&Self::key(from, to)).await
    }

    /// Cache a freshly computed plan, stamped with the current time.
    pub async fn insert(&self, from: &str, to: &str, plan: RoutePlan) -> Arc<CachedPlan> {
        let entry = Arc::new(CachedPlan {
            plan,
            planned_at: Utc::now(),
        });
        self.plans.insert(Self::key(from, to), entry.clone()).await;
        entry
    }

    /// Get cache statistics (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.plans.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.plans.invalidate_all();
    }
}
