//! The operator console: loads the user list, renders it and drives the role dialog.

pub mod view;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::api::UserApi;
use crate::config::PAGE_SIZE;
use crate::error::ApiError;
use crate::models::{Filter, PageRequest, Role, Toast};
use crate::render::{render_pagination, render_user_table, Pagination, LOADING_ROW};

pub use view::{PanelView, RoleModal};

/// How a call to [`UserListPanel::load_user_list`] ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Table and pagination were both rendered.
    Complete,
    /// The list request failed; the table still shows the loading row and no pagination.
    ListFailed,
    /// The table was rendered but the count failed, so no pagination is shown.
    CountFailed,
    /// A newer load was started; this one's responses were dropped.
    Superseded,
}

pub struct UserListPanel {
    api: Arc<dyn UserApi>,
    view: Mutex<PanelView>,
    latest_request: AtomicU64,
}

impl UserListPanel {
    pub fn new(api: Arc<dyn UserApi>) -> Self {
        Self {
            api,
            view: Mutex::new(PanelView {
                page: 1,
                ..PanelView::default()
            }),
            latest_request: AtomicU64::new(0),
        }
    }

    fn view(&self) -> MutexGuard<'_, PanelView> {
        self.view.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> PanelView {
        self.view().clone()
    }

    /// Remove and return pending toasts; each toast is shown once.
    pub fn take_toasts(&self) -> Vec<Toast> {
        std::mem::take(&mut self.view().toasts)
    }

    pub fn current_filter(&self) -> Filter {
        self.view().filter.clone()
    }

    pub fn current_page(&self) -> u32 {
        self.view().page
    }

    /// False until the first load of this panel has started.
    pub fn has_loaded(&self) -> bool {
        self.latest_request.load(Ordering::SeqCst) > 0
    }

    fn notify(&self, toast: Toast) {
        if toast.is_error() {
            tracing::warn!(message = %toast.message, "Error notification");
        } else {
            tracing::info!(message = %toast.message, "Notification");
        }
        self.view().toasts.push(toast);
    }

    fn begin_request(&self) -> u64 {
        self.latest_request.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, token: u64) -> bool {
        self.latest_request.load(Ordering::SeqCst) == token
    }

    /// Load one page of users matching `filter`.
    ///
    /// The table is rendered as soon as the list arrives; the count is requested
    /// afterwards and only then are the pagination controls rendered.
    pub async fn load_user_list(&self, filter: Filter, page: u32) -> LoadOutcome {
        let request = PageRequest::new(page);
        let token = self.begin_request();
        {
            let mut view = self.view();
            view.filter = filter.clone();
            view.page = request.page;
            view.table_body = LOADING_ROW.to_string();
            view.pagination.clear();
        }

        let rows = self.api.list_users(&filter, request).await;
        if !self.is_current(token) {
            tracing::debug!(token, "Discarding stale user list response");
            return LoadOutcome::Superseded;
        }
        let rows = match rows {
            Ok(rows) => rows,
            Err(e) => {
                self.notify(Toast::error(format!("Failed to load user list: {}", e)));
                return LoadOutcome::ListFailed;
            }
        };
        match render_user_table(&rows) {
            Ok(html) => self.view().table_body = html,
            Err(e) => {
                tracing::error!(%e, "Failed to render user table");
                self.notify(Toast::error("Failed to render user list"));
                return LoadOutcome::ListFailed;
            }
        }

        let total = self.api.count_users(&filter).await;
        if !self.is_current(token) {
            tracing::debug!(token, "Discarding stale user count response");
            return LoadOutcome::Superseded;
        }
        let total = match total {
            Ok(total) => total,
            Err(e) => {
                self.notify(Toast::error(format!("Failed to load user count: {}", e)));
                return LoadOutcome::CountFailed;
            }
        };
        let pagination = Pagination::new(total, request.page, PAGE_SIZE);
        match render_pagination(&pagination, &filter) {
            Ok(html) => self.view().pagination = html,
            Err(e) => {
                tracing::error!(%e, "Failed to render pagination");
                self.notify(Toast::error("Failed to render pagination"));
                return LoadOutcome::CountFailed;
            }
        }
        tracing::info!(rows = rows.len(), total, page = request.page, "User list loaded");
        LoadOutcome::Complete
    }

    /// Search button: first page of the given filter.
    pub async fn search(&self, filter: Filter) -> LoadOutcome {
        self.load_user_list(filter, 1).await
    }

    /// Reset button: clear every criterion and load the first page.
    pub async fn reset_filters(&self) -> LoadOutcome {
        self.load_user_list(Filter::default(), 1).await
    }

    /// Reload the first page of the last requested filter.
    pub async fn reload(&self) -> LoadOutcome {
        let filter = self.current_filter();
        self.load_user_list(filter, 1).await
    }

    pub fn show_update_role_modal(&self, user_id: i64, current_role: Role) {
        self.view().modal = RoleModal::Open {
            user_id,
            role: current_role,
        };
    }

    pub fn dismiss_modal(&self) {
        self.view().modal = RoleModal::Closed;
    }

    /// Save the role chosen in the dialog.
    ///
    /// On success the dialog closes and the list reloads at page 1. On failure the
    /// dialog stays open with the chosen role so the operator can retry.
    pub async fn update_user_role(&self, user_id: i64, role: Role) -> Result<(), ApiError> {
        match self.api.update_user_role(user_id, role).await {
            Ok(()) => {
                self.dismiss_modal();
                self.notify(Toast::success("Role updated"));
                tracing::info!(user_id, role = role.code(), "User role updated");
                self.reload().await;
                Ok(())
            }
            Err(e) => {
                self.view().modal = RoleModal::Open { user_id, role };
                self.notify(Toast::error(format!("Failed to update role: {}", e)));
                Err(e)
            }
        }
    }
}
