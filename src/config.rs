const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";
const DEFAULT_REQUEST_TIMEOUT_MS: u32 = 10_000;
const DEFAULT_LOG_FILTER: &str = "info";

/// Runtime settings baked in at build time.
///
/// A browser bundle has no process environment, so overrides are read with
/// `option_env!` when the wasm binary is compiled:
/// `EXTRAA_API_BASE_URL`, `EXTRAA_REQUEST_TIMEOUT_MS` and `EXTRAA_LOG`.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub request_timeout_ms: u32,
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_overrides(
            option_env!("EXTRAA_API_BASE_URL"),
            option_env!("EXTRAA_REQUEST_TIMEOUT_MS"),
            option_env!("EXTRAA_LOG"),
        )
    }

    fn from_overrides(
        base_url: Option<&str>,
        timeout_ms: Option<&str>,
        log_filter: Option<&str>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            api_base_url: base_url
                .map(str::trim)
                .filter(|url| !url.is_empty())
                .map(str::to_string)
                .unwrap_or(defaults.api_base_url),
            request_timeout_ms: timeout_ms
                .and_then(|raw| raw.trim().parse::<u32>().ok())
                .filter(|ms| *ms > 0)
                .unwrap_or(defaults.request_timeout_ms),
            log_filter: log_filter
                .map(str::trim)
                .filter(|filter| !filter.is_empty())
                .map(str::to_string)
                .unwrap_or(defaults.log_filter),
        }
    }

    /// Absolute URL for an API path, joined with exactly one slash.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
