//! Permission primitives.
//!
//! # Purpose
//! Defines the typed `resource:action` permission used in content
//! configurations and by callers that cache a user's grants.
//!
//! # Key invariants
//! - Permission strings are `resource:action`, both halves from the closed
//!   vocabularies in [`Resource`] and [`Action`].
//!
//! # Examples
//! ```rust
//! use hall_monitor::{Action, Permission, Resource};
//!
//! let permission = Permission::new(Resource::Content, Action::Delete);
//! assert_eq!(permission.as_string(), "content:delete");
//! assert_eq!(Permission::parse("content:delete").unwrap(), permission);
//! ```
use crate::{Action, Resource};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PermissionParseError {
    #[error("permission {0:?} is not in resource:action form")]
    MissingSeparator(String),
    #[error("unknown resource in permission: {0}")]
    UnknownResource(String),
    #[error("unknown action in permission: {0}")]
    UnknownAction(String),
}

/// A grant of one action on one resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Permission {
    pub resource: Resource,
    pub action: Action,
}

impl Permission {
    pub fn new(resource: Resource, action: Action) -> Self {
        Self { resource, action }
    }

    /// Render the permission as a `resource:action` string.
    ///
    /// # Performance
    /// - Allocates a new `String` each call.
    pub fn as_string(&self) -> String {
        format!("{}:{}", self.resource.as_str(), self.action.as_str())
    }

    /// Parse a `resource:action` string.
    ///
    /// # Errors
    /// - [`PermissionParseError::MissingSeparator`] if the colon is missing.
    /// - [`PermissionParseError::UnknownResource`] / [`PermissionParseError::UnknownAction`]
    ///   if either half is outside the vocabulary.
    pub fn parse(value: &str) -> Result<Self, PermissionParseError> {
        value.parse()
    }
}

impl std::str::FromStr for Permission {
    type Err = PermissionParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (resource, action) = value
            .split_once(':')
            .ok_or_else(|| PermissionParseError::MissingSeparator(value.to_string()))?;
        let resource = resource
            .parse::<Resource>()
            .map_err(|_| PermissionParseError::UnknownResource(resource.to_string()))?;
        let action = action
            .parse::<Action>()
            .map_err(|_| PermissionParseError::UnknownAction(action.to_string()))?;
        Ok(Self::new(resource, action))
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.resource, self.action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permission_string_rendering() {
        let permission = Permission::new(Resource::Analytics, Action::Export);
        assert_eq!(permission.as_string(), "analytics:export");
        assert_eq!(permission.to_string(), "analytics:export");
    }

    #[test]
    fn permission_parse_invalid_format() {
        let err = Permission::parse("analytics").expect_err("missing action");
        assert!(matches!(err, PermissionParseError::MissingSeparator(_)));
    }

    #[test]
    fn permission_parse_unknown_halves() {
        let err = Permission::parse("payroll:read").expect_err("bad resource");
        assert_eq!(err, PermissionParseError::UnknownResource("payroll".to_string()));

        let err = Permission::parse("clients:approve").expect_err("bad action");
        assert_eq!(err, PermissionParseError::UnknownAction("approve".to_string()));
    }
}
