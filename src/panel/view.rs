use crate::models::{Filter, Role, Toast};

/// Role-edit dialog state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RoleModal {
    #[default]
    Closed,
    Open { user_id: i64, role: Role },
}

impl RoleModal {
    pub fn is_open(&self) -> bool {
        matches!(self, RoleModal::Open { .. })
    }
}

/// Everything the users page shows. Fully derived from the latest responses
/// plus the filter and page they were requested with.
#[derive(Clone, Debug, Default)]
pub struct PanelView {
    pub filter: Filter,
    pub page: u32,
    pub table_body: String,
    pub pagination: String,
    pub modal: RoleModal,
    pub toasts: Vec<Toast>,
}
