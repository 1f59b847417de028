use crate::errors::{ApiError, ApiResult};
use crate::models::{Credentials, Registration, User};
use crate::transport::{HttpTransport, Method};

use super::{decode_required, ApiClient};

/// What `POST /login` returns instead of a token on bad credentials.
const LOGIN_FAILURE_SENTINEL: &str = "fail";

impl<T: HttpTransport> ApiClient<T> {
    /// Exchanges credentials for a bearer token and starts the session.
    pub async fn login(&self, credentials: &Credentials) -> ApiResult<String> {
        let response = self
            .execute_json(Method::Post, "/login", credentials)
            .await?;

        let token = parse_token(&response.body).ok_or_else(|| {
            tracing::info!(user = %credentials.user_name, "login rejected");
            ApiError::InvalidCredentials
        })?;
        self.session.begin(&token, &credentials.user_name);
        Ok(token)
    }

    pub async fn register(&self, registration: &Registration) -> ApiResult<User> {
        let response = self
            .execute_json(Method::Post, "/register", registration)
            .await?;
        let user: User = decode_required(&response)?;
        tracing::info!(user = %user.user_name, "account registered");
        Ok(user)
    }

    pub fn logout(&self) {
        self.session.end();
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn stored_user_name(&self) -> Option<String> {
        self.session.user_name()
    }
}

/// The token comes back as plain text, or as a JSON string from some
/// proxies; both the sentinel and an empty body mean rejection.
fn parse_token(body: &str) -> Option<String> {
    let trimmed = body.trim();
    let token = if trimmed.starts_with('"') {
        serde_json::from_str::<String>(trimmed).ok()?
    } else {
        trimmed.to_string()
    };
    let token = token.trim();
    if token.is_empty() || token == LOGIN_FAILURE_SENTINEL {
        None
    } else {
        Some(token.to_string())
    }
}
