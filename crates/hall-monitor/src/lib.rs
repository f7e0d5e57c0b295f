//! Specialization-based access control and content configuration.
//!
//! # Purpose
//! Decides what a client or job coach may do and see, based on the named
//! specializations they hold within their role.
//!
//! # How it fits
//! Request handlers call a per-role [`HallMonitor`] to check single actions
//! ([`HallMonitor::check_access`]) or to build the UI surface for a page load
//! ([`HallMonitor::get_content_config`]). Specializations come from a
//! [`SpecializationSource`] implemented by the backend store crate.
//!
//! # Key invariants
//! - Fail closed: a failed or empty specialization lookup grants nothing.
//! - Permission strings follow the `resource:action` pattern.
//! - Content configs are a pure function of role and specialization names.
//!
//! # Important configuration
//! - `HALL_MONITOR_CACHE_TTL_SECS` enables a short-lived per-user cache of
//!   specialization lookups (off by default).
//!
//! # Examples
//! ```rust
//! use hall_monitor::{Action, Permission, Resource};
//!
//! let perm = Permission::new(Resource::Clients, Action::Create);
//! assert_eq!(perm.as_string(), "clients:create");
//! ```
//!
//! # Common pitfalls
//! - Treating an empty specialization list as an error state; it is a denial.
//! - Caching specializations longer than assignments stay stable; call
//!   [`HallMonitor::invalidate_specializations`] when they change.

mod access;
mod action;
mod config;
pub mod content;
mod engine;
mod errors;
mod loader;
mod permission;
mod resource;
pub mod rules;
mod source;
pub mod telemetry;
mod types;

pub use access::{AccessContext, AccessResult, RuleRequest};
pub use action::Action;
pub use config::{DEFAULT_CACHE_TTL_SECS, HallMonitorConfig};
pub use content::{ContentConfig, DashboardLayout, NavigationItem};
pub use engine::{AccessRequest, ClientHallMonitor, HallMonitor, JobCoachHallMonitor};
pub use errors::{
    ErrorCode, ErrorDetail, HallMonitorError, HallMonitorResult, SourceError, SourceResult,
};
pub use loader::SpecializationLoader;
pub use permission::{Permission, PermissionParseError};
pub use resource::Resource;
pub use rules::{ClientRules, JobCoachRules, RoleRules};
pub use source::SpecializationSource;
pub use types::{RoleKind, SpecializationRecord, UserId, UserSpecialization};
