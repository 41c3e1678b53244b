use askama::Template;
use crate::models::Toast;

/// Role-edit dialog contents when the modal is open.
#[derive(Clone, Debug)]
pub struct RoleModalView {
    pub user_id: i64,
    pub role_code: i64,
}

#[derive(Template)]
#[template(path = "users.html")]
pub struct UsersPageTemplate {
    pub api_hostname: String,
    pub toasts: Vec<Toast>,
    pub has_toasts: bool,
    pub username: String,
    pub status: String,
    pub role: String,
    pub table_body: String,
    pub pagination: String,
    pub modal: Option<RoleModalView>,
}
