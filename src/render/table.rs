use askama::Template;

use crate::models::{Role, UserRow};
use crate::templates::UserTableTemplate;
use crate::utils::{format_balance, format_date_time};

/// Placeholder shown in the table body while a list request is in flight.
pub const LOADING_ROW: &str =
    r#"<tr class="placeholder-row"><td colspan="9" class="text-center">Loading...</td></tr>"#;

/// Display-ready cells of one table row.
#[derive(Clone, Debug)]
pub struct UserRowView {
    pub id: i64,
    pub username: String,
    pub phone: String,
    pub email: String,
    pub balance: String,
    pub active: bool,
    pub admin: bool,
    pub created: String,
    pub edit_href: String,
}

fn or_dash(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "-".to_string(),
    }
}

impl From<&UserRow> for UserRowView {
    fn from(row: &UserRow) -> Self {
        let role = Role::from_code(row.role);
        Self {
            id: row.id,
            username: row.username.clone(),
            phone: or_dash(row.phone.as_deref()),
            email: or_dash(row.email.as_deref()),
            balance: format_balance(row.balance),
            active: row.is_active(),
            admin: row.is_admin(),
            created: format_date_time(row.create_time.as_deref()),
            edit_href: format!("/users/{}/role?role={}", row.id, role.code()),
        }
    }
}

/// Render the `<tbody>` content for a page of users.
pub fn render_user_table(users: &[UserRow]) -> Result<String, askama::Error> {
    let rows: Vec<UserRowView> = users.iter().map(UserRowView::from).collect();
    UserTableTemplate { rows: &rows }.render()
}
