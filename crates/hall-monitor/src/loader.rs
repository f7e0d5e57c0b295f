//! Role-filtered specialization loading with an optional TTL cache.
//!
//! # Key invariants
//! - Lookup failures degrade to zero specializations, never to a grant.
//! - Only successful lookups are cached.
//! - A lookup that overlaps an `invalidate` or `clear` never populates the cache.
//! - Expired entries are dropped on read and swept periodically on insert.
//! - Returned names keep backend order with duplicates removed.
use crate::{RoleKind, SourceResult, SpecializationSource, UserId, UserSpecialization};
use dashmap::DashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// Inserts between sweeps of expired cache entries.
const SWEEP_INTERVAL: usize = 256;

#[derive(Clone)]
pub struct SpecializationLoader {
    role: RoleKind,
    source: Arc<dyn SpecializationSource>,
    cache: Arc<DashMap<UserId, CachedSpecializations>>,
    ttl: Duration,
    // Bumped by every invalidate/clear.
    epoch: Arc<AtomicU64>,
    inserts: Arc<AtomicUsize>,
}

#[derive(Clone)]
struct CachedSpecializations {
    specializations: Vec<UserSpecialization>,
    expires_at: Instant,
}

impl SpecializationLoader {
    /// A `ttl` of zero disables caching.
    pub fn new(role: RoleKind, source: Arc<dyn SpecializationSource>, ttl: Duration) -> Self {
        Self {
            role,
            source,
            cache: Arc::new(DashMap::new()),
            ttl,
            epoch: Arc::new(AtomicU64::new(0)),
            inserts: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Load this role's specializations, surfacing backend failures.
    pub async fn try_load(&self, user_id: &UserId) -> SourceResult<Vec<UserSpecialization>> {
        if let Some(cached) = self.cached(user_id) {
            return Ok(cached);
        }
        let epoch = self.epoch.load(Ordering::SeqCst);
        let rows = self.source.user_specializations(user_id).await?;
        let mut specializations: Vec<UserSpecialization> = Vec::with_capacity(rows.len());
        for row in rows {
            // Other roles' rows are expected; skip them before validation.
            if row.role_name.trim() != self.role.as_str() {
                continue;
            }
            let validated = match row.validate() {
                Ok(validated) => validated,
                Err(problem) => {
                    tracing::warn!(
                        user_id = %user_id,
                        backend = self.source.backend_name(),
                        %problem,
                        "dropping invalid specialization row"
                    );
                    continue;
                }
            };
            if specializations.contains(&validated) {
                continue;
            }
            specializations.push(validated);
        }
        if !self.ttl.is_zero() {
            self.store(user_id, &specializations, epoch);
        }
        Ok(specializations)
    }

    /// Load this role's specializations; any failure yields an empty list.
    pub async fn load(&self, user_id: &UserId) -> Vec<UserSpecialization> {
        match self.try_load(user_id).await {
            Ok(specializations) => specializations,
            Err(err) => {
                metrics::counter!(
                    "hall_monitor_specialization_lookup_failures_total",
                    "role" => self.role.as_str()
                )
                .increment(1);
                tracing::warn!(
                    user_id = %user_id,
                    role = %self.role,
                    backend = self.source.backend_name(),
                    error = %err,
                    "specialization lookup failed; treating user as having none"
                );
                Vec::new()
            }
        }
    }

    /// Names only, in load order.
    pub async fn load_names(&self, user_id: &UserId) -> Vec<String> {
        self.load(user_id)
            .await
            .into_iter()
            .map(|specialization| specialization.name)
            .collect()
    }

    pub fn invalidate(&self, user_id: &UserId) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        self.cache.remove(user_id);
    }

    pub fn clear(&self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        self.cache.clear();
    }

    fn cached(&self, user_id: &UserId) -> Option<Vec<UserSpecialization>> {
        let now = Instant::now();
        let fresh = self.cache.get(user_id).and_then(|entry| {
            (entry.expires_at > now).then(|| entry.specializations.clone())
        });
        if fresh.is_none() {
            self.cache.remove_if(user_id, |_, entry| entry.expires_at <= now);
        }
        fresh
    }

    /// Cache a lookup result unless an invalidation ran since `epoch` was read.
    ///
    /// The epoch is checked while holding the entry's shard lock; `invalidate`
    /// bumps the epoch before it removes, so a stale insert is either skipped
    /// here or removed there.
    fn store(&self, user_id: &UserId, specializations: &[UserSpecialization], epoch: u64) {
        if self.inserts.fetch_add(1, Ordering::Relaxed) % SWEEP_INTERVAL == SWEEP_INTERVAL - 1 {
            let now = Instant::now();
            self.cache.retain(|_, entry| entry.expires_at > now);
        }
        let entry = self.cache.entry(user_id.clone());
        if self.epoch.load(Ordering::SeqCst) != epoch {
            return;
        }
        entry.insert(CachedSpecializations {
            specializations: specializations.to_vec(),
            expires_at: Instant::now() + self.ttl,
        });
    }
}
