use askama::Template;

use crate::models::Filter;
use crate::templates::PaginationTemplate;
use crate::utils::build_query_string;

/// Page links shown on each side of the current page, at most.
const WINDOW_BEFORE: u32 = 2;
const WINDOW_LEN: u32 = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    pub total: u64,
    pub size: u32,
    pub current_page: u32,
    pub total_pages: u32,
}

impl Pagination {
    pub fn new(total: u64, current_page: u32, size: u32) -> Self {
        let total_pages = if size == 0 {
            0
        } else {
            total.div_ceil(u64::from(size)).min(u64::from(u32::MAX)) as u32
        };
        Self {
            total,
            size,
            current_page,
            total_pages,
        }
    }

    /// A single page needs no controls.
    pub fn is_visible(&self) -> bool {
        self.total_pages > 1
    }

    /// Up to five page numbers, two before the current one when possible.
    /// Near the last page the window slides back so it stays five wide.
    pub fn window(&self) -> std::ops::RangeInclusive<u32> {
        let start = self.current_page.saturating_sub(WINDOW_BEFORE).max(1);
        let end = self.total_pages.min(start.saturating_add(WINDOW_LEN - 1));
        let start = start.min(end.saturating_sub(WINDOW_LEN - 1).max(1));
        start..=end
    }

    pub fn prev_disabled(&self) -> bool {
        self.current_page <= 1
    }

    pub fn next_disabled(&self) -> bool {
        self.current_page >= self.total_pages
    }
}

/// One clickable (or inert) pagination control.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageControl {
    pub label: String,
    /// `None` for disabled controls, which render without a link.
    pub href: Option<String>,
    pub active: bool,
}

pub fn page_href(filter: &Filter, page: u32) -> String {
    let mut params = filter.query_params();
    params.push(("page".to_string(), page.to_string()));
    format!("/users?{}", build_query_string(&params))
}

/// Controls in display order: previous, page window, next. Empty when hidden.
pub fn pagination_controls(p: &Pagination, filter: &Filter) -> Vec<PageControl> {
    if !p.is_visible() {
        return vec![];
    }
    let mut controls = Vec::new();
    controls.push(PageControl {
        label: "Previous".to_string(),
        href: (!p.prev_disabled()).then(|| page_href(filter, p.current_page - 1)),
        active: false,
    });
    for page in p.window() {
        controls.push(PageControl {
            label: page.to_string(),
            href: Some(page_href(filter, page)),
            active: page == p.current_page,
        });
    }
    controls.push(PageControl {
        label: "Next".to_string(),
        href: (!p.next_disabled()).then(|| page_href(filter, p.current_page + 1)),
        active: false,
    });
    controls
}

/// Render the pagination container content. Empty string when there is one page or none.
pub fn render_pagination(p: &Pagination, filter: &Filter) -> Result<String, askama::Error> {
    let controls = pagination_controls(p, filter);
    if controls.is_empty() {
        return Ok(String::new());
    }
    PaginationTemplate { controls: &controls }.render()
}
