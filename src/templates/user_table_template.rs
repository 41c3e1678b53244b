use askama::Template;
use crate::render::UserRowView;

#[derive(Template)]
#[template(path = "partials/user_table_body.html")]
pub struct UserTableTemplate<'a> {
    pub rows: &'a [UserRowView],
}
