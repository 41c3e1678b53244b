use askama::Template;
use crate::render::PageControl;

#[derive(Template)]
#[template(path = "partials/pagination.html")]
pub struct PaginationTemplate<'a> {
    pub controls: &'a [PageControl],
}
