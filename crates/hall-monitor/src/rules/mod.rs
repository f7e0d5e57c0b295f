//! Role rule tables.
//!
//! # Purpose
//! A role is described by a [`RoleRules`] value: which backend role it reads,
//! how it decides `(resource, action)` requests, and which [`ContentTable`]
//! drives its UI configuration. The engine is generic over this trait, so the
//! client and job coach monitors share one implementation.
//!
//! # Key invariants
//! - `evaluate` is pure: same request, same result.
//! - Resources outside the role deny with `Unknown resource: ...`.
//! - Actions outside a resource's rules deny with `Unknown <resource> action: ...`.
use crate::content::ContentTable;
use crate::{AccessResult, Action, Permission, Resource, RoleKind, RuleRequest, UserId};

pub mod client;
pub mod jobcoach;

pub use client::ClientRules;
pub use jobcoach::JobCoachRules;

pub trait RoleRules: Send + Sync + 'static {
    fn role(&self) -> RoleKind;

    /// Specialization names this role knows about, in precedence order.
    fn specializations(&self) -> &'static [&'static str];

    fn evaluate(&self, resource: Resource, request: &RuleRequest<'_>) -> AccessResult;

    fn content_table(&self) -> &'static ContentTable;

    /// Every permission `evaluate` grants without request context.
    ///
    /// Derived from the rules themselves so the permission list can never
    /// promise something `check_access` would refuse.
    fn permissions_for(&self, user_id: &UserId, specializations: &[String]) -> Vec<Permission> {
        if specializations.is_empty() {
            return Vec::new();
        }
        let mut granted = Vec::new();
        for resource in Resource::ALL {
            for action in Action::ALL {
                let request = RuleRequest {
                    user_id,
                    specializations,
                    action,
                    context: None,
                };
                if self.evaluate(resource, &request).has_access {
                    granted.push(Permission::new(resource, action));
                }
            }
        }
        granted
    }
}

/// Shared deny reason for a requirement on one or more specializations.
pub(crate) fn requires(resource: Resource, action: Action, any_of: &[&str]) -> AccessResult {
    AccessResult::deny(format!(
        "{} {} requires {} specialization",
        resource,
        action,
        any_of.join(" or ")
    ))
}

/// Grant `action` on `resource` when any of `any_of` is held.
pub(crate) fn gate(
    resource: Resource,
    request: &RuleRequest<'_>,
    any_of: &[&str],
) -> AccessResult {
    if request.has_any(any_of) {
        let held: Vec<&str> = any_of
            .iter()
            .copied()
            .filter(|name| request.has(name))
            .collect();
        AccessResult::allow(format!(
            "{} can {} {}",
            held.join(" and "),
            request.action,
            resource
        ))
    } else {
        requires(resource, request.action, any_of)
    }
}

/// Grant for resources every member of the role may use.
pub(crate) fn open(role: RoleKind, resource: Resource, action: Action) -> AccessResult {
    AccessResult::allow(format!(
        "All {} specializations can {} {}",
        role.display_name(),
        action,
        resource
    ))
}
