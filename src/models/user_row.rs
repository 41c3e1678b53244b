use serde::{Deserialize, Serialize};

/// One user account as returned by `/api/user/list`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRow {
    pub id: i64,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub balance: f64,
    #[serde(default)]
    pub status: Option<i64>,
    #[serde(default)]
    pub role: Option<i64>,
    #[serde(default)]
    pub create_time: Option<String>,
}

impl UserRow {
    pub fn is_active(&self) -> bool {
        self.status == Some(1)
    }

    pub fn is_admin(&self) -> bool {
        self.role == Some(1)
    }
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or_default())
}
