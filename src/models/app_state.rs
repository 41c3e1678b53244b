use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::api::HttpUserApi;
use crate::panel::UserListPanel;

#[derive(Clone)]
pub struct AppState {
    /// One operator console per browser session, keyed by the `session_id` cookie.
    pub panels: Arc<Mutex<HashMap<String, Arc<UserListPanel>>>>,
    /// Direct backend access for the CLI and the configuration check.
    pub api: Arc<HttpUserApi>,
    pub api_base_url: String,
    pub custom_css: Option<String>,
}

impl AppState {
    pub fn new(api: HttpUserApi) -> Self {
        let api = Arc::new(api);
        let api_base_url = api.base_url().to_string();
        Self {
            panels: Arc::new(Mutex::new(HashMap::new())),
            api,
            api_base_url,
            custom_css: None,
        }
    }

    pub fn panel_for(&self, session_id: &str) -> Option<Arc<UserListPanel>> {
        self.panels
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(session_id)
            .cloned()
    }

    /// Start a fresh console for a new session.
    pub fn open_panel(&self, session_id: String) -> Arc<UserListPanel> {
        let panel = Arc::new(UserListPanel::new(self.api.clone()));
        self.panels
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(session_id, panel.clone());
        tracing::debug!(sessions = self.session_count(), "Opened panel session");
        panel
    }

    pub fn session_count(&self) -> usize {
        self.panels.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}
