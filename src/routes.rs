use axum::{
    extract::State,
    response::{IntoResponse, Redirect},
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::http::HeaderValue;

use crate::models::AppState;
use crate::handlers;

// Embed the default stylesheet in the binary
pub const DEFAULT_STYLESHEET: &str = include_str!("../static/styles.css");

async fn root_get() -> Redirect {
    Redirect::to("/users")
}

async fn stylesheet(State(state): State<AppState>) -> impl IntoResponse {
    let css = state
        .custom_css
        .clone()
        .unwrap_or_else(|| DEFAULT_STYLESHEET.to_string());
    ([(CONTENT_TYPE, "text/css")], css)
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_get))
        .route("/users", get(handlers::users::users_list))
        .route("/users/reset", get(handlers::users::users_reset))
        .route("/users/role", post(handlers::users::update_role))
        .route("/users/role/dismiss", post(handlers::users::dismiss_role_modal))
        .route("/users/:user_id/role", get(handlers::users::edit_role))
        .route(
            "/static/styles.css",
            get(stylesheet).layer(SetResponseHeaderLayer::if_not_present(
                CACHE_CONTROL,
                HeaderValue::from_static("public, max-age=3600"),
            )),
        )
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}
