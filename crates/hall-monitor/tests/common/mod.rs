#![allow(dead_code)]

use async_trait::async_trait;
use hall_monitor::{
    SourceError, SourceResult, SpecializationRecord, SpecializationSource, UserId,
};
use std::collections::HashMap;
use std::sync::Arc;

/// Fixed specialization rows keyed by user id.
#[derive(Default)]
pub struct StaticSource {
    rows: HashMap<String, Vec<SpecializationRecord>>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, user_id: &str, role: &str, names: &[&str]) -> Self {
        let rows = self.rows.entry(user_id.to_string()).or_default();
        for name in names {
            rows.push(SpecializationRecord::new(*name, role));
        }
        self
    }

    pub fn into_arc(self) -> Arc<dyn SpecializationSource> {
        Arc::new(self)
    }
}

#[async_trait]
impl SpecializationSource for StaticSource {
    async fn user_specializations(
        &self,
        user_id: &UserId,
    ) -> SourceResult<Vec<SpecializationRecord>> {
        Ok(self.rows.get(user_id.as_str()).cloned().unwrap_or_default())
    }

    fn backend_name(&self) -> &'static str {
        "static"
    }
}

/// Backend that is always down.
pub struct DownSource;

#[async_trait]
impl SpecializationSource for DownSource {
    async fn user_specializations(
        &self,
        _user_id: &UserId,
    ) -> SourceResult<Vec<SpecializationRecord>> {
        Err(SourceError::Unavailable("connection refused".to_string()))
    }

    fn backend_name(&self) -> &'static str {
        "down"
    }
}

/// Every subset of `names`, including the empty one.
pub fn subsets(names: &[&str]) -> Vec<Vec<String>> {
    (0..1usize << names.len())
        .map(|mask| {
            names
                .iter()
                .enumerate()
                .filter(|(idx, _)| mask & (1 << idx) != 0)
                .map(|(_, name)| name.to_string())
                .collect()
        })
        .collect()
}
