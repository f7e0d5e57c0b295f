use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Read,
    Create,
    Update,
    Delete,
    Book,
    Schedule,
    Cancel,
    Enroll,
    Send,
    Export,
    Manage,
}

impl Action {
    /// Declaration order; permission lists are rendered in this order.
    pub const ALL: [Action; 11] = [
        Action::Read,
        Action::Create,
        Action::Update,
        Action::Delete,
        Action::Book,
        Action::Schedule,
        Action::Cancel,
        Action::Enroll,
        Action::Send,
        Action::Export,
        Action::Manage,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Action::Read => "read",
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Book => "book",
            Action::Schedule => "schedule",
            Action::Cancel => "cancel",
            Action::Enroll => "enroll",
            Action::Send => "send",
            Action::Export => "export",
            Action::Manage => "manage",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Action {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|action| action.as_str() == value)
            .ok_or(())
    }
}

#[cfg(test)]
mod tests {
    use super::Action;

    #[test]
    fn action_string_roundtrip() {
        for action in Action::ALL {
            let as_str = action.as_str();
            assert_eq!(as_str.parse::<Action>().ok(), Some(action));
            assert_eq!(action.to_string(), as_str);
        }
    }

    #[test]
    fn action_from_str_invalid() {
        assert!("approve".parse::<Action>().is_err());
        assert!("Read".parse::<Action>().is_err());
    }
}
