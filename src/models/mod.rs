pub mod app_state;
pub mod filter;
pub mod page_request;
pub mod role;
pub mod toast;
pub mod user_row;

pub use app_state::AppState;
pub use filter::{Filter, RoleFilter, StatusFilter};
pub use page_request::PageRequest;
pub use role::Role;
pub use toast::{Toast, ToastLevel};
pub use user_row::UserRow;
