// URL utilities
pub mod url_parser;
pub mod query_string;

// Sessions
pub mod session_id;

// Display formatting
pub mod date_time;

// Re-export all utilities for convenient access
pub use url_parser::hostname_from_url;
pub use query_string::build_query_string;
pub use session_id::random_session_id;
pub use date_time::{format_balance, format_date_time, format_date_time_in};
