use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Notify;

use usradm::api::UserApi;
use usradm::models::{Filter, PageRequest, Role, RoleFilter, StatusFilter, UserRow};
use usradm::panel::{LoadOutcome, UserListPanel};
use usradm::ApiError;

/// Backend whose list call for usernames starting with "slow" blocks until released.
#[derive(Default)]
struct GatedApi {
    entered: Notify,
    release: Notify,
}

fn row(username: &str) -> UserRow {
    UserRow {
        id: 1,
        username: username.to_string(),
        phone: None,
        email: None,
        balance: 0.0,
        status: Some(1),
        role: Some(0),
        create_time: None,
    }
}

#[async_trait]
impl UserApi for GatedApi {
    async fn list_users(&self, filter: &Filter, _page: PageRequest) -> Result<Vec<UserRow>, ApiError> {
        if filter.username.starts_with("slow") {
            self.entered.notify_one();
            self.release.notified().await;
        }
        if filter.username.ends_with("fail") {
            return Err(ApiError::Transport("Gateway Timeout".to_string()));
        }
        Ok(vec![row(&filter.username)])
    }

    async fn count_users(&self, filter: &Filter) -> Result<u64, ApiError> {
        Ok(if filter.username.starts_with("slow") { 500 } else { 30 })
    }

    async fn update_user_role(&self, _user_id: i64, _role: Role) -> Result<(), ApiError> {
        Ok(())
    }

    async fn get_user(&self, _user_id: i64) -> Result<UserRow, ApiError> {
        Err(ApiError::Transport("Not Found".to_string()))
    }
}

fn by_name(name: &str) -> Filter {
    Filter::new(name, StatusFilter::Unset, RoleFilter::Unset)
}

#[tokio::test]
async fn late_response_does_not_overwrite_newer_load() {
    let api = Arc::new(GatedApi::default());
    let panel = Arc::new(UserListPanel::new(api.clone()));

    let slow = {
        let panel = panel.clone();
        tokio::spawn(async move { panel.load_user_list(by_name("slowpoke"), 4).await })
    };
    api.entered.notified().await;

    assert_eq!(panel.load_user_list(by_name("quick"), 2).await, LoadOutcome::Complete);
    api.release.notify_one();
    assert_eq!(slow.await.unwrap(), LoadOutcome::Superseded);

    let view = panel.snapshot();
    assert_eq!(view.filter, by_name("quick"));
    assert_eq!(view.page, 2);
    assert!(view.table_body.contains("quick"));
    assert!(!view.table_body.contains("slowpoke"));
    // 30 users is three pages; the stale count of 500 would have made fifty.
    assert!(view.pagination.contains("page=3"));
    assert!(!view.pagination.contains("page=4"));
}

#[tokio::test]
async fn stale_failure_raises_no_toast() {
    let api = Arc::new(GatedApi::default());
    let panel = Arc::new(UserListPanel::new(api.clone()));

    let slow = {
        let panel = panel.clone();
        tokio::spawn(async move { panel.load_user_list(by_name("slow-fail"), 1).await })
    };
    api.entered.notified().await;

    panel.load_user_list(by_name("quick"), 1).await;
    api.release.notify_one();
    assert_eq!(slow.await.unwrap(), LoadOutcome::Superseded);

    assert!(panel.take_toasts().is_empty());
}
