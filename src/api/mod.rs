//! Typed access to the Extraa backend.
//!
//! Every call goes through [`ApiClient::execute`], which attaches the bearer
//! token, applies the global 401 policy and normalizes failures into
//! [`ApiError`].

mod auth;
mod budget;
mod expense;

use std::fmt;
use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::AppConfig;
use crate::errors::{ApiError, ApiResult};
use crate::session::Session;
use crate::transport::{ApiRequest, GlooTransport, HttpTransport, Method, RawResponse};

pub struct ApiClient<T: HttpTransport = GlooTransport> {
    transport: Rc<T>,
    session: Session,
}

/// The client the running app uses.
pub type BrowserClient = ApiClient<GlooTransport>;

impl BrowserClient {
    pub fn browser(config: AppConfig) -> Self {
        Self::new(GlooTransport::new(config), Session::browser())
    }
}

impl<T: HttpTransport> ApiClient<T> {
    pub fn new(transport: T, session: Session) -> Self {
        Self {
            transport: Rc::new(transport),
            session,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    #[cfg(test)]
    pub(crate) fn transport(&self) -> &T {
        &self.transport
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
    ) -> ApiResult<RawResponse> {
        let mut request = ApiRequest::new(method, path);
        request.bearer = self.session.token();
        request.body = body;

        tracing::debug!(method = method.as_str(), path, "sending request");
        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(method = method.as_str(), path, error = %err, "no response");
                return Err(err.into());
            }
        };
        tracing::debug!(method = method.as_str(), path, status = response.status, "response");

        if response.status == 401 {
            self.session.expire();
        }
        if response.is_success() {
            Ok(response)
        } else {
            Err(ApiError::from_response(response.status, &response.body))
        }
    }

    async fn execute_json<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> ApiResult<RawResponse> {
        let body = serde_json::to_string(body)?;
        self.execute(method, path, Some(body)).await
    }
}

/// The backend answers `200` with no body (or `null`) when the entity
/// does not exist or a write was refused.
fn is_blank(response: &RawResponse) -> bool {
    let body = response.body.trim();
    body.is_empty() || body == "null"
}

/// `None` for a blank body.
fn decode_optional<R: DeserializeOwned>(response: &RawResponse) -> ApiResult<Option<R>> {
    if is_blank(response) {
        return Ok(None);
    }
    decode(response).map(Some)
}

/// A blank body becomes a server error with no message, so callers show
/// their own fallback text.
fn decode_required<R: DeserializeOwned>(response: &RawResponse) -> ApiResult<R> {
    if is_blank(response) {
        tracing::warn!(status = response.status, "empty response body");
        return Err(ApiError::Server {
            status: response.status,
            message: String::new(),
        });
    }
    decode(response)
}

fn decode<R: DeserializeOwned>(response: &RawResponse) -> ApiResult<R> {
    serde_json::from_str(&response.body).map_err(|err| {
        tracing::warn!(error = %err, "unreadable response body");
        ApiError::from(err)
    })
}

impl<T: HttpTransport> Clone for ApiClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            session: self.session.clone(),
        }
    }
}

impl<T: HttpTransport> PartialEq for ApiClient<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.transport, &other.transport) && self.session == other.session
    }
}

impl<T: HttpTransport> fmt::Debug for ApiClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}
