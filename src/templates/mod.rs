// Page templates
pub mod users_page_template;

// Fragment templates
pub mod user_table_template;
pub mod pagination_template;

// Re-export all templates
pub use users_page_template::{RoleModalView, UsersPageTemplate};
pub use user_table_template::UserTableTemplate;
pub use pagination_template::PaginationTemplate;

// Type aliases for shorter names used by handlers
pub type UsersTemplate = UsersPageTemplate;
