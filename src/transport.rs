use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder};
use web_sys::AbortSignal;

use crate::config::AppConfig;
use crate::errors::TransportError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub bearer: Option<String>,
    pub body: Option<String>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            bearer: None,
            body: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// One HTTP round trip. Implementations only fail when no response arrived;
/// any status code is returned as a `RawResponse`.
#[async_trait(?Send)]
pub trait HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, TransportError>;
}

/// Browser `fetch` through gloo-net, bounded by a fixed timeout.
#[derive(Clone, Debug)]
pub struct GlooTransport {
    config: AppConfig,
}

impl GlooTransport {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    fn builder(&self, method: Method, url: &str) -> RequestBuilder {
        match method {
            Method::Get => Request::get(url),
            Method::Post => Request::post(url),
            Method::Put => Request::put(url),
            Method::Delete => Request::delete(url),
        }
    }
}

#[async_trait(?Send)]
impl HttpTransport for GlooTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, TransportError> {
        let url = self.config.endpoint(&request.path);
        let timeout_ms = self.config.request_timeout_ms;
        let signal = AbortSignal::timeout_with_u32(timeout_ms);

        let mut builder = self
            .builder(request.method, &url)
            .header("Content-Type", "application/json")
            .abort_signal(Some(&signal));
        if let Some(token) = &request.bearer {
            builder = builder.header("Authorization", &format!("Bearer {}", token));
        }

        let prepared = match request.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|err| TransportError::Network(err.to_string()))?;

        let response = match prepared.send().await {
            Ok(response) => response,
            Err(_) if signal.aborted() => return Err(TransportError::Timeout(timeout_ms)),
            Err(err) => return Err(TransportError::Network(err.to_string())),
        };

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| TransportError::Network(err.to_string()))?;
        Ok(RawResponse { status, body })
    }
}
