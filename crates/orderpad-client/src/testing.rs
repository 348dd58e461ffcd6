//! Shared helpers for unit tests.

use std::sync::Arc;

use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::Value;

use crate::api::ApiClient;
use crate::config::ApiSettings;
use crate::session::Session;

/// Signs `claims` with a throwaway HS256 key.
pub fn mint_token(claims: Value) -> String {
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"test-secret"),
    )
    .unwrap()
}

/// Client pointed at a mock server.
pub fn client_for(base_url: &str, session: Arc<Session>) -> Arc<ApiClient> {
    let settings = ApiSettings {
        base_url: base_url.to_string(),
        timeout_secs: 5,
        ..ApiSettings::default()
    };
    Arc::new(ApiClient::new(&settings, session).unwrap())
}
