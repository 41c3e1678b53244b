// Backend API modules
pub mod client;
pub mod users;

// Re-export commonly used items
pub use client::{api_call, set_silent, SUCCESS_CODE};
pub use users::{HttpUserApi, UserApi};
#[cfg(test)]
pub use users::MockUserApi;
