//! HTML fragments for the user table and its pagination controls.

pub mod pagination;
pub mod table;

pub use pagination::{page_href, pagination_controls, render_pagination, PageControl, Pagination};
pub use table::{render_user_table, UserRowView, LOADING_ROW};
