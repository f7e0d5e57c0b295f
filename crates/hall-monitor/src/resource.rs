//! Closed vocabulary of access-controlled resources.
//!
//! # Key invariants
//! - Wire names are lowercase and stable; they appear in permission strings.
//! - [`Resource::ALL`] fixes the order in which derived permission lists are
//!   rendered, so it must only ever be appended to.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Profile,
    Sessions,
    Applications,
    Resources,
    Courses,
    Dashboard,
    Messages,
    Notifications,
    Clients,
    Content,
    Training,
    Analytics,
}

impl Resource {
    pub const ALL: [Resource; 12] = [
        Resource::Profile,
        Resource::Sessions,
        Resource::Applications,
        Resource::Resources,
        Resource::Courses,
        Resource::Dashboard,
        Resource::Messages,
        Resource::Notifications,
        Resource::Clients,
        Resource::Content,
        Resource::Training,
        Resource::Analytics,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Resource::Profile => "profile",
            Resource::Sessions => "sessions",
            Resource::Applications => "applications",
            Resource::Resources => "resources",
            Resource::Courses => "courses",
            Resource::Dashboard => "dashboard",
            Resource::Messages => "messages",
            Resource::Notifications => "notifications",
            Resource::Clients => "clients",
            Resource::Content => "content",
            Resource::Training => "training",
            Resource::Analytics => "analytics",
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Resource {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Resource::ALL
            .into_iter()
            .find(|resource| resource.as_str() == value)
            .ok_or(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_names_parse_back() {
        for resource in Resource::ALL {
            assert_eq!(resource.as_str().parse::<Resource>(), Ok(resource));
        }
        assert!("not-a-real-resource".parse::<Resource>().is_err());
    }

    #[test]
    fn serde_uses_wire_names() {
        let json = serde_json::to_string(&Resource::Analytics).expect("serialize");
        assert_eq!(json, "\"analytics\"");
    }
}
