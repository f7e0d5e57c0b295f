use crate::{SourceResult, SpecializationRecord, UserId};
use async_trait::async_trait;

/// Backend lookup for a user's specializations across all roles.
///
/// Implementations return raw rows; filtering by role and validation happen in
/// [`crate::SpecializationLoader`].
#[async_trait]
pub trait SpecializationSource: Send + Sync {
    async fn user_specializations(
        &self,
        user_id: &UserId,
    ) -> SourceResult<Vec<SpecializationRecord>>;

    fn backend_name(&self) -> &'static str;
}
