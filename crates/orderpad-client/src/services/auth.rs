//! Login and logout against `/api/auth/login`.

use std::sync::Arc;

use orderpad_core::validation::validate_credentials;
use orderpad_core::{TokenClaims, UserInfo};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::ApiClient;
use crate::error::{ClientError, ClientResult};

const LOGIN_PATH: &str = "api/auth/login";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginRequest<'a> {
    user_name: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(alias = "accessToken")]
    token: String,
}

#[derive(Debug, Clone)]
pub struct AuthService {
    api: Arc<ApiClient>,
}

impl AuthService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        AuthService { api }
    }

    /// Exchanges credentials for a bearer token and stores it in the
    /// session.
    ///
    /// Blank credentials are rejected before any request. A token the
    /// client cannot decode is rejected and the session left untouched.
    pub async fn login(&self, user_name: &str, password: &str) -> ClientResult<UserInfo> {
        validate_credentials(user_name, password)?;

        let request = LoginRequest {
            user_name: user_name.trim(),
            password,
        };
        let response: LoginResponse = self.api.post_json(LOGIN_PATH, &request).await?;

        let claims = TokenClaims::try_decode(&response.token)?;
        let user = claims.identity();

        self.api.session().set_token(response.token);
        info!(
            user = user.user_name.as_deref().unwrap_or("<unknown>"),
            company = user.company_name.as_deref().unwrap_or("<unknown>"),
            "Logged in"
        );
        Ok(user)
    }

    pub fn logout(&self) {
        self.api.session().clear();
        info!("Logged out");
    }

    /// The logged-in user, if the session holds an unexpired token.
    pub fn current_user(&self) -> ClientResult<UserInfo> {
        let session = self.api.session();
        if !session.is_authenticated() {
            return Err(ClientError::NotAuthenticated);
        }
        session.user_info().ok_or(ClientError::NotAuthenticated)
    }
}
