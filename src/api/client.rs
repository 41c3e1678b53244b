use serde::Deserialize;
use serde_json::Value;
use yansi::Paint;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::ApiError;

/// Application-level success sentinel carried in the envelope body.
pub const SUCCESS_CODE: i64 = 200;

static SILENT: AtomicBool = AtomicBool::new(false);

pub fn set_silent(silent: bool) {
    SILENT.store(silent, Ordering::Relaxed);
}

fn log_output(msg: String) {
    if !SILENT.load(Ordering::Relaxed) {
        println!("{}", msg);
    }
}

/// Response envelope used by every backend endpoint.
#[derive(Debug, Deserialize)]
pub struct Envelope {
    pub code: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Value,
}

fn curl_line(
    method: &str,
    url_for_log: &str,
    api_token: &str,
    form: Option<&[(String, String)]>,
) -> String {
    let mut parts = Vec::new();
    parts.push(Paint::new("curl").fg(yansi::Color::Green).bold().to_string());
    parts.push(format!("-X {}", Paint::new(method).fg(yansi::Color::Yellow).bold()));
    parts.push(format!("'{}'", Paint::new(url_for_log).fg(yansi::Color::Cyan)));

    if !api_token.is_empty() {
        parts.push(format!("{} {}",
            Paint::new("-H").fg(yansi::Color::Magenta),
            Paint::new(format!("'API-Token: {}'", api_token)).fg(yansi::Color::Magenta)
        ));
    }

    if let Some(f) = form {
        let encoded = crate::utils::build_query_string(f).replace('\'', "'\\''");
        parts.push(format!("{} {}",
            Paint::new("-d").fg(yansi::Color::Blue),
            Paint::new(format!("'{}'", encoded)).fg(yansi::Color::White)
        ));
    }
    parts.join(" ")
}

/// Core HTTP call against the user backend.
///
/// Returns the envelope's `data` when the envelope code is 200. Anything else is an
/// [`ApiError`]: a non-200 envelope is an application error carrying the backend's
/// message, while connection failures and non-2xx HTTP statuses are transport errors
/// carrying the status text.
pub async fn api_call(
    client: &reqwest::Client,
    api_base_url: &str,
    api_token: &str,
    method: &str,
    endpoint: &str,
    form: Option<Vec<(String, String)>>,
    params: Option<Vec<(String, String)>>,
) -> Result<Value, ApiError> {
    let url = format!("{}{}", api_base_url, endpoint);
    let url_for_log = match params.as_deref() {
        Some(p) if !p.is_empty() => format!("{}?{}", url, crate::utils::build_query_string(p)),
        _ => url.clone(),
    };
    log_output(format!("Request:\n{}", curl_line(method, &url_for_log, api_token, form.as_deref())));
    tracing::info!(method, endpoint, ?params, ?form, "API Request");

    let mut req = match method {
        "GET" => client.get(&url),
        "POST" => client.post(&url),
        "PUT" => client.put(&url),
        "DELETE" => client.delete(&url),
        _ => client.get(&url),
    };

    if !api_token.is_empty() {
        req = req.header("API-Token", api_token);
    }

    if let Some(ref p) = params {
        req = req.query(p);
    }

    if let Some(ref f) = form {
        req = req.form(f);
    }

    let resp = req.send().await.map_err(|e| {
        tracing::error!(%e, endpoint, "API request failed");
        ApiError::from(e)
    })?;

    let status = resp.status();
    if !status.is_success() {
        let reason = status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| status.as_str().to_string());
        tracing::error!(%status, endpoint, "API returned HTTP error status");
        return Err(ApiError::Transport(reason));
    }

    let body = resp.text().await.map_err(ApiError::from)?;
    log_output(format!("Response:\n{}", Paint::new(&body).rgb(100, 100, 100)));

    let envelope: Envelope = serde_json::from_str(&body).map_err(|e| {
        tracing::error!(%e, endpoint, "API response is not a valid envelope");
        ApiError::Decode(e.to_string())
    })?;

    if envelope.code != SUCCESS_CODE {
        tracing::warn!(code = envelope.code, message = %envelope.message, endpoint, "API returned application error");
        return Err(ApiError::Application {
            code: envelope.code,
            message: envelope.message,
        });
    }
    tracing::info!(endpoint, response = ?envelope.data, "API Response");
    Ok(envelope.data)
}
