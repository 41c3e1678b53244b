use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;
use crate::models::{Filter, PageRequest, Role, UserRow};
use super::client::api_call;

/// The user backend as seen by the panel.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserApi: Send + Sync {
    /// `GET /api/user/list`
    async fn list_users(&self, filter: &Filter, page: PageRequest) -> Result<Vec<UserRow>, ApiError>;
    /// `GET /api/user/count`, same criteria as the list without pagination.
    async fn count_users(&self, filter: &Filter) -> Result<u64, ApiError>;
    /// `PUT /api/user/{id}/role`
    async fn update_user_role(&self, user_id: i64, role: Role) -> Result<(), ApiError>;
    /// `GET /api/user/info/{id}`
    async fn get_user(&self, user_id: i64) -> Result<UserRow, ApiError>;
}

/// [`UserApi`] over HTTP with `reqwest`.
#[derive(Clone, Debug)]
pub struct HttpUserApi {
    client: reqwest::Client,
    base_url: String,
    api_token: String,
}

impl HttpUserApi {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_token: api_token.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn call(
        &self,
        method: &str,
        endpoint: &str,
        form: Option<Vec<(String, String)>>,
        params: Option<Vec<(String, String)>>,
    ) -> Result<Value, ApiError> {
        api_call(&self.client, &self.base_url, &self.api_token, method, endpoint, form, params).await
    }
}

/// A `null` payload decodes to the type's empty value.
fn decode_data<T: DeserializeOwned + Default>(data: Value) -> Result<T, ApiError> {
    if data.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(data).map_err(|e| ApiError::Decode(e.to_string()))
}

#[async_trait]
impl UserApi for HttpUserApi {
    async fn list_users(&self, filter: &Filter, page: PageRequest) -> Result<Vec<UserRow>, ApiError> {
        let mut params = filter.query_params();
        params.extend(page.query_params());
        let data = self.call("GET", "/api/user/list", None, Some(params)).await?;
        decode_data(data)
    }

    async fn count_users(&self, filter: &Filter) -> Result<u64, ApiError> {
        let data = self.call("GET", "/api/user/count", None, Some(filter.query_params())).await?;
        decode_data(data)
    }

    async fn update_user_role(&self, user_id: i64, role: Role) -> Result<(), ApiError> {
        let endpoint = format!("/api/user/{}/role", user_id);
        let form = vec![("role".to_string(), role.code().to_string())];
        self.call("PUT", &endpoint, Some(form), None).await?;
        Ok(())
    }

    async fn get_user(&self, user_id: i64) -> Result<UserRow, ApiError> {
        let endpoint = format!("/api/user/info/{}", user_id);
        let data = self.call("GET", &endpoint, None, None).await?;
        if data.is_null() {
            return Err(ApiError::Decode(format!("no user data for id {}", user_id)));
        }
        serde_json::from_value(data).map_err(|e| ApiError::Decode(e.to_string()))
    }
}
