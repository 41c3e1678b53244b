use serde::{Deserialize, Serialize};

/// Role that can be assigned through the role modal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[default]
    Normal,
    Admin,
}

impl Role {
    /// Anything other than exactly 1 is a normal user.
    pub fn from_code(code: Option<i64>) -> Self {
        if code == Some(1) {
            Role::Admin
        } else {
            Role::Normal
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "1" | "admin" => Some(Role::Admin),
            "0" | "normal" => Some(Role::Normal),
            _ => None,
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            Role::Normal => 0,
            Role::Admin => 1,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Normal => "Normal user",
            Role::Admin => "Admin",
        }
    }
}
