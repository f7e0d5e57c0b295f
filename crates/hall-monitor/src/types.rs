//! Strongly typed identifiers and specialization records.
//!
//! # Purpose
//! Wraps raw strings coming from callers and from the specialization RPC so
//! the engine never reasons about unvalidated input.
//!
//! # Key invariants
//! - A [`UserId`] is never empty or whitespace-only.
//! - A [`UserSpecialization`] always carries a trimmed, non-empty name and a
//!   known [`RoleKind`].
//!
//! # Examples
//! ```rust
//! use hall_monitor::{RoleKind, SpecializationRecord};
//!
//! let record = SpecializationRecord::new("  Skills Trainer ", "jobcoach");
//! let validated = record.validate().expect("valid row");
//! assert_eq!(validated.name, "Skills Trainer");
//! assert_eq!(validated.role, RoleKind::JobCoach);
//! ```
//!
//! # Common pitfalls
//! - Comparing specialization names case-insensitively; names are exact tags.
use crate::{ErrorCode, HallMonitorError, HallMonitorResult};
use serde::{Deserialize, Serialize};

/// User identifier wrapper.
///
/// # Invariants
/// - The inner string is the caller's value with surrounding whitespace removed.
///
/// # Example
/// ```rust
/// use hall_monitor::UserId;
///
/// let user = UserId::parse(" 5b1f ").expect("valid id");
/// assert_eq!(user.as_str(), "5b1f");
/// assert!(UserId::parse("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    /// Parse and validate a user identifier.
    ///
    /// # Errors
    /// - [`ErrorCode::InvalidUserId`] when the value is empty after trimming.
    pub fn parse(value: &str) -> HallMonitorResult<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(HallMonitorError::new(
                ErrorCode::InvalidUserId,
                "user id must not be empty",
            )
            .with_user(value));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for UserId {
    type Err = HallMonitorError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

/// Role a specialization belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleKind {
    Client,
    JobCoach,
}

impl RoleKind {
    /// Wire name used by the backend in `role_name`.
    pub fn as_str(self) -> &'static str {
        match self {
            RoleKind::Client => "client",
            RoleKind::JobCoach => "jobcoach",
        }
    }

    /// Human-readable name used in denial reasons.
    pub fn display_name(self) -> &'static str {
        match self {
            RoleKind::Client => "client",
            RoleKind::JobCoach => "job coach",
        }
    }
}

impl std::fmt::Display for RoleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RoleKind {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "client" => Ok(RoleKind::Client),
            "jobcoach" => Ok(RoleKind::JobCoach),
            _ => Err(()),
        }
    }
}

/// One row as returned by `get_user_specializations`.
///
/// # Summary
/// Untrusted transfer shape; call [`SpecializationRecord::validate`] before use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecializationRecord {
    pub name: String,
    pub role_name: String,
}

impl SpecializationRecord {
    pub fn new(name: impl Into<String>, role_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role_name: role_name.into(),
        }
    }

    /// Validate the row at the backend boundary.
    ///
    /// # Returns
    /// - `Ok` with a trimmed name and parsed role.
    /// - `Err` with a short description of the rejected field.
    pub fn validate(&self) -> Result<UserSpecialization, String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("empty specialization name".to_string());
        }
        let role = self
            .role_name
            .trim()
            .parse::<RoleKind>()
            .map_err(|_| format!("unknown role_name {:?}", self.role_name))?;
        Ok(UserSpecialization {
            name: name.to_string(),
            role,
        })
    }
}

/// A validated specialization held by a user within one role.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserSpecialization {
    pub name: String,
    pub role: RoleKind,
}
