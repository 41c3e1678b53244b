use std::sync::Arc;

use axum::response::{Html, IntoResponse, Response};
use axum::http::StatusCode;
use axum_extra::extract::cookie::{Cookie, CookieJar};

use crate::models::{AppState, Toast};
use crate::panel::UserListPanel;
use crate::utils::random_session_id;

pub const SESSION_COOKIE: &str = "session_id";

pub fn session_id_from_jar(jar: &CookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE).map(|c| c.value().to_string())
}

/// The console of the browser behind `jar`. Unknown or missing sessions get a
/// new panel and a fresh cookie.
pub fn session_panel(state: &AppState, jar: CookieJar) -> (CookieJar, Arc<UserListPanel>) {
    if let Some(panel) = session_id_from_jar(&jar).and_then(|sid| state.panel_for(&sid)) {
        return (jar, panel);
    }
    let sid = random_session_id();
    let panel = state.open_panel(sid.clone());
    let mut cookie = Cookie::new(SESSION_COOKIE, sid);
    cookie.set_path("/");
    cookie.set_http_only(true);
    (jar.add(cookie), panel)
}

#[derive(Default)]
pub struct TemplateGlobals {
    pub api_hostname: String,
    pub toasts: Vec<Toast>,
    pub has_toasts: bool,
}

/// Collects the values every page shows and drains the session's pending toasts.
pub fn build_template_globals(state: &AppState, panel: &UserListPanel) -> TemplateGlobals {
    let toasts = panel.take_toasts();
    let has_toasts = !toasts.is_empty();
    TemplateGlobals {
        api_hostname: crate::utils::hostname_from_url(&state.api_base_url),
        toasts,
        has_toasts,
    }
}

pub fn plain_html<S: AsRef<str>>(s: S) -> Response {
    Html(format!("<!DOCTYPE html><html><body><p>{}</p></body></html>", s.as_ref())).into_response()
}

pub fn render_template<T: askama::Template>(t: T) -> Response {
    match t.render() {
        Ok(body) => Html(body).into_response(),
        Err(e) => {
            tracing::error!(%e, "Template render error");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}
