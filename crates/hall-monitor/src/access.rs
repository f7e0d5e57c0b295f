//! Access request and decision shapes.
//!
//! # Key invariants
//! - Every [`AccessResult`] carries a non-empty, human-readable `reason`.
//! - `context` is only present when a rule scopes the decision.
use crate::{Action, UserId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Optional request parameters consulted by individual rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AccessContext {
    pub fn for_target_user(target_user_id: impl Into<String>) -> Self {
        Self {
            target_user_id: Some(target_user_id.into()),
            ..Self::default()
        }
    }

    pub fn for_client(client_id: impl Into<String>) -> Self {
        Self {
            client_id: Some(client_id.into()),
            ..Self::default()
        }
    }
}

/// Outcome of one access check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessResult {
    pub has_access: bool,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
}

impl AccessResult {
    pub fn allow(reason: impl Into<String>) -> Self {
        Self {
            has_access: true,
            reason: reason.into(),
            context: None,
        }
    }

    pub fn deny(reason: impl Into<String>) -> Self {
        Self {
            has_access: false,
            reason: reason.into(),
            context: None,
        }
    }

    pub fn with_context(mut self, context: Value) -> Self {
        self.context = Some(context);
        self
    }

    pub(crate) fn unknown_resource(resource: &str) -> Self {
        Self::deny(format!("Unknown resource: {resource}"))
    }

    pub(crate) fn unknown_action(resource: &str, action: &str) -> Self {
        Self::deny(format!("Unknown {resource} action: {action}"))
    }
}

/// Input handed to a role's rule function after specializations are loaded.
#[derive(Debug, Clone, Copy)]
pub struct RuleRequest<'a> {
    pub user_id: &'a UserId,
    pub specializations: &'a [String],
    pub action: Action,
    pub context: Option<&'a AccessContext>,
}

impl<'a> RuleRequest<'a> {
    pub fn has(&self, specialization: &str) -> bool {
        self.specializations.iter().any(|name| name == specialization)
    }

    pub fn has_any(&self, specializations: &[&str]) -> bool {
        specializations.iter().any(|wanted| self.has(wanted))
    }

    /// True when the context names a user other than the caller.
    pub fn targets_other_user(&self) -> bool {
        self.context
            .and_then(|ctx| ctx.target_user_id.as_deref())
            .is_some_and(|target| target != self.user_id.as_str())
    }

    /// True when the context names a client other than the caller.
    pub fn targets_other_client(&self) -> bool {
        self.context
            .and_then(|ctx| ctx.client_id.as_deref())
            .is_some_and(|client| client != self.user_id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn result_serializes_camel_case_without_empty_context() {
        let allowed = serde_json::to_value(AccessResult::allow("ok")).expect("serialize");
        assert_eq!(allowed, json!({"hasAccess": true, "reason": "ok"}));

        let scoped = AccessResult::allow("limited").with_context(json!({"scope": "limited"}));
        let value = serde_json::to_value(scoped).expect("serialize");
        assert_eq!(value["context"]["scope"], "limited");
    }

    #[test]
    fn context_keeps_unknown_keys() {
        let ctx: AccessContext =
            serde_json::from_value(json!({"targetUserId": "u2", "documentId": "d1"}))
                .expect("decode");
        assert_eq!(ctx.target_user_id.as_deref(), Some("u2"));
        assert_eq!(ctx.extra.get("documentId"), Some(&json!("d1")));
    }

    #[test]
    fn rule_request_helpers() {
        let user = UserId::parse("u1").expect("user");
        let names = vec!["Skills Trainer".to_string()];
        let other = AccessContext::for_target_user("u2");
        let own = AccessContext::for_target_user("u1");

        let request = RuleRequest {
            user_id: &user,
            specializations: &names,
            action: Action::Read,
            context: Some(&other),
        };
        assert!(request.has("Skills Trainer"));
        assert!(request.has_any(&["Career Counselor", "Skills Trainer"]));
        assert!(!request.has_any(&["Career Counselor"]));
        assert!(request.targets_other_user());
        assert!(!request.targets_other_client());

        let request = RuleRequest {
            context: Some(&own),
            ..request
        };
        assert!(!request.targets_other_user());
    }
}
