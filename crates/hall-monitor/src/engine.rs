//! Per-role access decisions and content configuration.
//!
//! # Purpose
//! [`HallMonitor`] is the callable surface consumed by request handlers. It
//! loads a user's specializations for one role, then either dispatches an
//! access request to the role's rules or derives the role's content config.
//!
//! # Key invariants
//! - `check_access` never returns an error; every failure is a denial with a reason.
//! - Users without specializations for the role are denied everything and
//!   receive the minimal content config.
//! - Permissions in a content config are exactly what `check_access` grants
//!   without request context.
//!
//! # Examples
//! ```rust,no_run
//! use hall_monitor::{HallMonitorConfig, JobCoachHallMonitor, SpecializationSource};
//! use std::sync::Arc;
//!
//! async fn can_edit(source: Arc<dyn SpecializationSource>, user: &str) -> bool {
//!     let monitor = JobCoachHallMonitor::new(source, &HallMonitorConfig::default());
//!     monitor.check_access(user, "content", "update", None).await.has_access
//! }
//! ```
use crate::content::{ContentConfig, NavigationItem};
use crate::rules::{ClientRules, JobCoachRules, RoleRules};
use crate::{
    AccessContext, AccessResult, Action, ErrorCode, HallMonitorConfig, HallMonitorError,
    HallMonitorResult, Resource, RuleRequest, SpecializationLoader, SpecializationSource, UserId,
    UserSpecialization,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

pub type ClientHallMonitor = HallMonitor<ClientRules>;
pub type JobCoachHallMonitor = HallMonitor<JobCoachRules>;

/// One entry of a batched access check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessRequest {
    pub user_id: String,
    pub resource: String,
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<AccessContext>,
}

impl AccessRequest {
    pub fn new(
        user_id: impl Into<String>,
        resource: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            resource: resource.into(),
            action: action.into(),
            context: None,
        }
    }
}

pub struct HallMonitor<R: RoleRules> {
    rules: R,
    loader: SpecializationLoader,
}

impl<R: RoleRules + Default> HallMonitor<R> {
    pub fn new(source: Arc<dyn SpecializationSource>, config: &HallMonitorConfig) -> Self {
        Self::with_rules(R::default(), source, config)
    }
}

impl<R: RoleRules> HallMonitor<R> {
    pub fn with_rules(
        rules: R,
        source: Arc<dyn SpecializationSource>,
        config: &HallMonitorConfig,
    ) -> Self {
        let loader =
            SpecializationLoader::new(rules.role(), source, config.specialization_cache_ttl);
        Self { rules, loader }
    }

    pub fn rules(&self) -> &R {
        &self.rules
    }

    /// Decide whether `user_id` may perform `action` on `resource`.
    ///
    /// # Returns
    /// - Always an [`AccessResult`]; lookup failures, unknown vocabulary and
    ///   internal faults come back as denials.
    pub async fn check_access(
        &self,
        user_id: &str,
        resource: &str,
        action: &str,
        context: Option<&AccessContext>,
    ) -> AccessResult {
        let result = self.decide(user_id, resource, action, context).await;
        let decision = if result.has_access { "allow" } else { "deny" };
        metrics::counter!(
            "hall_monitor_access_checks_total",
            "role" => self.rules.role().as_str(),
            "decision" => decision
        )
        .increment(1);
        tracing::debug!(
            user_id,
            role = %self.rules.role(),
            resource,
            action,
            decision,
            reason = %result.reason,
            "access check"
        );
        result
    }

    async fn decide(
        &self,
        user_id: &str,
        resource: &str,
        action: &str,
        context: Option<&AccessContext>,
    ) -> AccessResult {
        let user = match UserId::parse(user_id) {
            Ok(user) => user,
            Err(err) => return failed(err),
        };

        let names = self.loader.load_names(&user).await;
        if names.is_empty() {
            return AccessResult::deny(format!(
                "User has no {} specializations",
                self.rules.role().display_name()
            ));
        }

        let Ok(resource) = resource.parse::<Resource>() else {
            return AccessResult::unknown_resource(resource);
        };
        let Ok(parsed_action) = action.parse::<Action>() else {
            return AccessResult::unknown_action(resource.as_str(), action);
        };

        let request = RuleRequest {
            user_id: &user,
            specializations: &names,
            action: parsed_action,
            context,
        };
        match std::panic::catch_unwind(AssertUnwindSafe(|| {
            self.rules.evaluate(resource, &request)
        })) {
            Ok(result) => result,
            Err(_) => {
                tracing::error!(user_id = %user, %resource, action, "access rule panicked");
                failed("access rule evaluation panicked")
            }
        }
    }

    /// Run independent checks concurrently; results keep request order.
    pub async fn check_access_many(&self, requests: &[AccessRequest]) -> Vec<AccessResult> {
        futures::future::join_all(requests.iter().map(|request| {
            self.check_access(
                &request.user_id,
                &request.resource,
                &request.action,
                request.context.as_ref(),
            )
        }))
        .await
    }

    /// Derive the user's content configuration.
    ///
    /// # Errors
    /// - [`ErrorCode::InvalidUserId`] for a blank user id.
    /// - [`ErrorCode::ContentConfigFailed`] when the derived config is inconsistent.
    pub async fn get_content_config(&self, user_id: &str) -> HallMonitorResult<ContentConfig> {
        let user = UserId::parse(user_id)?;
        let names = self.loader.load_names(&user).await;
        let permissions = self
            .rules
            .permissions_for(&user, &names)
            .iter()
            .map(|permission| permission.as_string())
            .collect();
        self.rules
            .content_table()
            .build(&names, permissions)
            .map_err(|err| {
                tracing::error!(
                    user_id = %user,
                    role = %self.rules.role(),
                    error = %err,
                    "content config build failed"
                );
                HallMonitorError::new(
                    ErrorCode::ContentConfigFailed,
                    format!("failed to build {} content configuration", self.rules.role()),
                )
                .with_user(user.as_str())
                .with_error(err)
            })
    }

    /// This role's specializations for the user; empty on any failure.
    pub async fn get_specializations(&self, user_id: &str) -> Vec<UserSpecialization> {
        match UserId::parse(user_id) {
            Ok(user) => self.loader.load(&user).await,
            Err(_) => Vec::new(),
        }
    }

    pub async fn has_specialization(&self, user_id: &str, name: &str) -> bool {
        self.get_specializations(user_id)
            .await
            .iter()
            .any(|specialization| specialization.name == name)
    }

    /// Flat `resource:action` grants; empty on any failure.
    pub async fn get_permissions(&self, user_id: &str) -> Vec<String> {
        let Ok(user) = UserId::parse(user_id) else {
            return Vec::new();
        };
        let names = self.loader.load_names(&user).await;
        self.rules
            .permissions_for(&user, &names)
            .iter()
            .map(|permission| permission.as_string())
            .collect()
    }

    pub async fn can_access_feature(&self, user_id: &str, feature: &str) -> bool {
        match self.get_content_config(user_id).await {
            Ok(config) => config.has_feature(feature),
            Err(err) => {
                tracing::warn!(user_id, feature, error = %err, "feature check failed");
                false
            }
        }
    }

    pub async fn get_navigation_items(
        &self,
        user_id: &str,
    ) -> HallMonitorResult<Vec<NavigationItem>> {
        Ok(self.get_content_config(user_id).await?.navigation_items)
    }

    /// Drop any cached specializations for the user.
    pub fn invalidate_specializations(&self, user_id: &str) {
        if let Ok(user) = UserId::parse(user_id) {
            self.loader.invalidate(&user);
        }
    }

    pub fn clear_cache(&self) {
        self.loader.clear();
    }
}

fn failed(error: impl std::fmt::Display) -> AccessResult {
    AccessResult::deny("Access check failed due to error")
        .with_context(json!({ "error": error.to_string() }))
}
