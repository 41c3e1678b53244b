use serde::{Deserialize, Serialize};

/// Account status filter. `Unset` means "any status".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusFilter {
    #[default]
    Unset,
    Active,
    Disabled,
}

impl StatusFilter {
    /// Accepts the raw select value (`1`, `0`, empty) or a CLI word.
    pub fn from_param(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "1" | "active" => StatusFilter::Active,
            "0" | "disabled" => StatusFilter::Disabled,
            _ => StatusFilter::Unset,
        }
    }

    pub fn as_param(&self) -> &'static str {
        match self {
            StatusFilter::Unset => "",
            StatusFilter::Active => "1",
            StatusFilter::Disabled => "0",
        }
    }
}

/// Role filter. `Unset` means "any role".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoleFilter {
    #[default]
    Unset,
    Admin,
    Normal,
}

impl RoleFilter {
    pub fn from_param(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "1" | "admin" => RoleFilter::Admin,
            "0" | "normal" => RoleFilter::Normal,
            _ => RoleFilter::Unset,
        }
    }

    pub fn as_param(&self) -> &'static str {
        match self {
            RoleFilter::Unset => "",
            RoleFilter::Admin => "1",
            RoleFilter::Normal => "0",
        }
    }
}

/// Search criteria shared by the list and count requests.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    pub username: String,
    pub status: StatusFilter,
    pub role: RoleFilter,
}

impl Filter {
    pub fn new(username: impl Into<String>, status: StatusFilter, role: RoleFilter) -> Self {
        Self {
            username: username.into(),
            status,
            role,
        }
    }

    /// Query parameters in the order the backend documents them.
    /// Unset criteria are still sent, as empty strings.
    pub fn query_params(&self) -> Vec<(String, String)> {
        vec![
            ("username".to_string(), self.username.clone()),
            ("status".to_string(), self.status.as_param().to_string()),
            ("role".to_string(), self.role.as_param().to_string()),
        ]
    }
}
