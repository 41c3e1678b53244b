use axum::{
    extract::{Form, Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::models::{AppState, Filter, Role, RoleFilter, StatusFilter};
use crate::panel::{RoleModal, UserListPanel};
use crate::render::page_href;
use crate::templates::{RoleModalView, UsersTemplate};

use super::helpers::{build_template_globals, plain_html, render_template, session_panel, TemplateGlobals};

/// Query string of the users page. Every field is optional and lenient:
/// unknown values fall back to "any" / page 1.
#[derive(Deserialize, Default)]
pub struct UsersQuery {
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    page: Option<String>,
}

impl UsersQuery {
    fn filter(&self) -> Filter {
        Filter::new(
            self.username.as_deref().unwrap_or("").trim(),
            StatusFilter::from_param(self.status.as_deref().unwrap_or("")),
            RoleFilter::from_param(self.role.as_deref().unwrap_or("")),
        )
    }

    fn page(&self) -> u32 {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse::<u32>().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(1)
    }
}

fn render_users_page(state: &AppState, panel: &UserListPanel) -> Response {
    let view = panel.snapshot();
    let TemplateGlobals {
        api_hostname,
        toasts,
        has_toasts,
    } = build_template_globals(state, panel);
    let modal = match view.modal {
        RoleModal::Open { user_id, role } => Some(RoleModalView {
            user_id,
            role_code: role.code(),
        }),
        RoleModal::Closed => None,
    };
    render_template(UsersTemplate {
        api_hostname,
        toasts,
        has_toasts,
        username: view.filter.username.clone(),
        status: view.filter.status.as_param().to_string(),
        role: view.filter.role.as_param().to_string(),
        table_body: view.table_body,
        pagination: view.pagination,
        modal,
    })
}

pub async fn users_list(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(q): Query<UsersQuery>,
) -> impl IntoResponse {
    let (jar, panel) = session_panel(&state, jar);
    panel.load_user_list(q.filter(), q.page()).await;
    (jar, render_users_page(&state, &panel))
}

pub async fn users_reset(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let (jar, panel) = session_panel(&state, jar);
    panel.reset_filters().await;
    (jar, render_users_page(&state, &panel))
}

#[derive(Deserialize)]
pub struct EditRoleQuery {
    #[serde(default)]
    role: Option<String>,
}

/// Open the role dialog over the table this session already shows. A session
/// that never loaded the list (e.g. a bookmarked edit link) loads it first.
pub async fn edit_role(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(user_id): Path<i64>,
    Query(q): Query<EditRoleQuery>,
) -> impl IntoResponse {
    let current_role = q
        .role
        .as_deref()
        .and_then(Role::parse)
        .unwrap_or_default();
    let (jar, panel) = session_panel(&state, jar);
    if !panel.has_loaded() {
        panel
            .load_user_list(panel.current_filter(), panel.current_page())
            .await;
    }
    panel.show_update_role_modal(user_id, current_role);
    (jar, render_users_page(&state, &panel))
}

#[derive(Deserialize)]
pub struct UpdateRoleForm {
    pub user_id: i64,
    pub role: String,
}

#[axum::debug_handler]
pub async fn update_role(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<UpdateRoleForm>,
) -> Response {
    let role = match Role::parse(&form.role) {
        Some(r) => r,
        None => return plain_html("Invalid role"),
    };
    let (jar, panel) = session_panel(&state, jar);
    if panel.update_user_role(form.user_id, role).await.is_err() {
        // The panel already queued the error toast and kept the dialog open.
        tracing::debug!(user_id = form.user_id, "Role update failed");
    }
    (jar, render_users_page(&state, &panel)).into_response()
}

pub async fn dismiss_role_modal(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let (jar, panel) = session_panel(&state, jar);
    panel.dismiss_modal();
    let href = page_href(&panel.current_filter(), panel.current_page());
    (jar, Redirect::to(&href))
}
