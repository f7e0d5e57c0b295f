//! In-memory specialization store for tests and local development.
//!
//! Assignments live in a process-local map; nothing survives a restart. The
//! store can be flipped unavailable to exercise fail-closed paths.
use async_trait::async_trait;
use hall_monitor::{
    SourceError, SourceResult, SpecializationRecord, SpecializationSource, UserId,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct InMemorySpecializationStore {
    assignments: Arc<RwLock<HashMap<UserId, Vec<SpecializationRecord>>>>,
    unavailable: Arc<AtomicBool>,
}

impl InMemorySpecializationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign `name` under `role_name`. Re-assigning an existing pair is a no-op.
    pub async fn assign(&self, user_id: &UserId, name: &str, role_name: &str) {
        let mut guard = self.assignments.write().await;
        let rows = guard.entry(user_id.clone()).or_default();
        if !rows
            .iter()
            .any(|row| row.name == name && row.role_name == role_name)
        {
            rows.push(SpecializationRecord::new(name, role_name));
        }
    }

    /// Remove an assignment. Returns whether anything was removed.
    pub async fn revoke(&self, user_id: &UserId, name: &str, role_name: &str) -> bool {
        let mut guard = self.assignments.write().await;
        let Some(rows) = guard.get_mut(user_id) else {
            return false;
        };
        let before = rows.len();
        rows.retain(|row| !(row.name == name && row.role_name == role_name));
        before != rows.len()
    }

    pub async fn clear_user(&self, user_id: &UserId) {
        self.assignments.write().await.remove(user_id);
    }

    /// Make every lookup fail with [`SourceError::Unavailable`] until reset.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }
}

#[async_trait]
impl SpecializationSource for InMemorySpecializationStore {
    async fn user_specializations(
        &self,
        user_id: &UserId,
    ) -> SourceResult<Vec<SpecializationRecord>> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(SourceError::Unavailable(
                "in-memory store marked unavailable".to_string(),
            ));
        }
        let guard = self.assignments.read().await;
        Ok(guard.get(user_id).cloned().unwrap_or_default())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
