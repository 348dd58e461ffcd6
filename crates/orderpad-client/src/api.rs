//! # API Client
//!
//! Thin JSON layer over `reqwest` shared by every service.
//!
//! ## Request Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Request Pipeline                               │
//! │                                                                         │
//! │  service ──► endpoint(path) ──► headers ──► send ──► status ──► body   │
//! │                  │                 │                    │          │    │
//! │                  │                 │                    │          ▼    │
//! │        base_url + path     Accept: json          2xx ──────► serde     │
//! │                            X-Request-Id          401 ──► clear session │
//! │                            Bearer <token>        else ──► ClientError  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Status Mapping
//! | Status          | Error                         |
//! |-----------------|-------------------------------|
//! | 401             | `Unauthorized` (session cleared) |
//! | 403             | `Forbidden`                   |
//! | 404             | `NotFound`                    |
//! | 408, 504        | `Timeout`                     |
//! | other 4xx       | `BadRequest`                  |
//! | 5xx             | `Server`                      |

use std::sync::Arc;

use orderpad_core::decode_list;
use reqwest::header::ACCEPT;
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;
use uuid::Uuid;

use crate::config::{parse_base_url, ApiSettings};
use crate::error::{ClientError, ClientResult};
use crate::session::Session;

/// Correlation header echoed in backend logs.
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// HTTP client bound to one backend and one session.
#[derive(Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    session: Arc<Session>,
}

impl ApiClient {
    pub fn new(settings: &ApiSettings, session: Arc<Session>) -> ClientResult<Self> {
        let base_url = parse_base_url(&settings.base_url)?;
        let http = reqwest::Client::builder()
            .timeout(settings.timeout())
            .user_agent(settings.user_agent.as_str())
            .build()
            .map_err(|e| ClientError::InvalidConfig(e.to_string()))?;

        Ok(ApiClient {
            http,
            base_url,
            session,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// GET `path` and deserialize the body.
    pub async fn get_json<T>(&self, path: &str, query: &[(&str, &str)]) -> ClientResult<T>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        let request = self.http.get(url).query(query);
        self.send(request).await
    }

    /// GET `path` and unwrap a list from a bare array or a `data`/`items`
    /// envelope.
    pub async fn get_list<T>(&self, path: &str, query: &[(&str, &str)]) -> ClientResult<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let body: Value = self.get_json(path, query).await?;
        let items = decode_list(body)?;
        debug!(path, count = items.len(), "Fetched list");
        Ok(items)
    }

    /// POST `body` as JSON to `path` and deserialize the response.
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        let request = self.http.post(url).json(body);
        self.send(request).await
    }

    fn endpoint(&self, path: &str) -> ClientResult<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    async fn send<T>(&self, request: RequestBuilder) -> ClientResult<T>
    where
        T: DeserializeOwned,
    {
        let request_id = Uuid::new_v4();
        let mut request = request
            .header(ACCEPT, "application/json")
            .header(REQUEST_ID_HEADER, request_id.to_string());
        if let Some(token) = self.session.token() {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            warn!(%request_id, error = %e, "Request failed");
            ClientError::from(e)
        })?;

        let status = response.status();
        let url = response.url().clone();
        let body = response.bytes().await?;
        debug!(%request_id, %url, status = status.as_u16(), bytes = body.len(), "Response received");

        if !status.is_success() {
            if status == StatusCode::UNAUTHORIZED {
                warn!(%request_id, %url, "Backend rejected the token, clearing session");
                self.session.clear();
            }
            return Err(map_status_error(status, &body));
        }

        serde_json::from_slice(&body).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

// =============================================================================
// Status Mapping
// =============================================================================

fn map_status_error(status: StatusCode, body: &[u8]) -> ClientError {
    let message = server_message(body).unwrap_or_else(|| {
        let preview = body_preview(body);
        if preview.is_empty() {
            status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| format!("status {}", status.as_u16()))
        } else {
            preview
        }
    });

    match status {
        StatusCode::UNAUTHORIZED => ClientError::Unauthorized(message),
        StatusCode::FORBIDDEN => ClientError::Forbidden(message),
        StatusCode::NOT_FOUND => ClientError::NotFound(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => ClientError::Timeout(message),
        _ if status.is_client_error() => ClientError::BadRequest {
            status: status.as_u16(),
            message,
        },
        _ => ClientError::Server {
            status: status.as_u16(),
            message,
        },
    }
}

/// `message`, `title` or `error` from a JSON error body.
fn server_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    ["message", "title", "error"]
        .iter()
        .filter_map(|key| value.get(key).and_then(Value::as_str))
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
