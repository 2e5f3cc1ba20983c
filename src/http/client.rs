//! Low-level HTTP client — `SwapbookHttp`.
//!
//! Generic JSON request machinery with per-request retry policies. Endpoint
//! knowledge lives in the domain sub-clients; this layer only knows about
//! transport, auth, and status mapping.

use crate::error::HttpError;
use crate::http::retry::{RetryConfig, RetryPolicy};

use async_lock::RwLock;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// Low-level HTTP client for the Swapbook REST API.
pub struct SwapbookHttp {
    base_url: String,
    client: Client,
    /// Bearer token for native clients. NEVER exposed publicly.
    auth_token: Arc<RwLock<Option<String>>>,
}

impl SwapbookHttp {
    pub fn new(base_url: &str) -> Self {
        let mut builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        {
            builder = builder
                .timeout(Duration::from_secs(30))
                .pool_max_idle_per_host(10);
        }

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: builder.build().expect("Failed to build HTTP client"),
            auth_token: Arc::new(RwLock::new(None)),
        }
    }

    /// Construct with a pre-set bearer token (builder path, pre-async).
    pub(crate) fn with_initial_token(base_url: &str, token: Option<String>) -> Self {
        let mut http = Self::new(base_url);
        http.auth_token = Arc::new(RwLock::new(token));
        http
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Set the bearer token (native only — on WASM, cookies handle auth).
    pub(crate) async fn set_auth_token(&self, token: Option<String>) {
        *self.auth_token.write().await = token;
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        retry: RetryPolicy,
    ) -> Result<T, HttpError> {
        self.request_with_retry(reqwest::Method::GET, url, None::<&()>, retry)
            .await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        url: &str,
        body: &B,
        retry: RetryPolicy,
    ) -> Result<T, HttpError> {
        self.request_with_retry(reqwest::Method::POST, url, Some(body), retry)
            .await
    }

    async fn request_with_retry<T: DeserializeOwned, B: Serialize>(
        &self,
        method: reqwest::Method,
        url: &str,
        body: Option<&B>,
        retry: RetryPolicy,
    ) -> Result<T, HttpError> {
        let config = match &retry {
            RetryPolicy::None => {
                return self.do_request(&method, url, body).await;
            }
            RetryPolicy::Idempotent => RetryConfig::idempotent(),
            RetryPolicy::Custom(c) => c.clone(),
        };

        let method = &method;
        run_with_retry(&config, url, move || {
            self.do_request::<T, B>(method, url, body)
        })
        .await
    }

    async fn do_request<T: DeserializeOwned, B: Serialize>(
        &self,
        method: &reqwest::Method,
        url: &str,
        body: Option<&B>,
    ) -> Result<T, HttpError> {
        let mut req = self.client.request(method.clone(), url);

        // Inject bearer token on native
        #[cfg(not(target_arch = "wasm32"))]
        {
            if let Some(token) = self.auth_token.read().await.as_ref() {
                req = req.header("Authorization", format!("Bearer {}", token));
            }
        }

        if let Some(b) = body {
            req = req.json(b);
        }

        let resp = req.send().await.map_err(|e| {
            if e.is_timeout() {
                HttpError::Timeout
            } else {
                HttpError::Reqwest(e)
            }
        })?;
        let status = resp.status();

        if status.is_success() {
            let parsed = resp.json::<T>().await?;
            return Ok(parsed);
        }

        let status_code = status.as_u16();
        let body_text = resp.text().await.unwrap_or_default();

        match status_code {
            401 => Err(HttpError::Unauthorized),
            404 => Err(HttpError::NotFound(body_text)),
            429 => Err(HttpError::RateLimited {
                retry_after_ms: None,
            }),
            400..=499 => Err(HttpError::BadRequest(body_text)),
            _ => Err(HttpError::ServerError {
                status: status_code,
                body: body_text,
            }),
        }
    }
}

impl Clone for SwapbookHttp {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            client: self.client.clone(),
            auth_token: self.auth_token.clone(),
        }
    }
}

/// Drive `op` under `config`. Non-retryable errors return immediately;
/// retryable ones back off until the attempt budget is spent, after which
/// the last failure is reported as `MaxRetriesExceeded`.
async fn run_with_retry<T, F, Fut>(
    config: &RetryConfig,
    url: &str,
    mut op: F,
) -> Result<T, HttpError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, HttpError>>,
{
    let mut last_error = None;

    for attempt in 0..=config.max_retries {
        match op().await {
            Ok(resp) => return Ok(resp),
            Err(e) => {
                if !is_retryable(&e, config) {
                    return Err(e);
                }

                // The server's own backoff hint takes precedence.
                if let HttpError::RateLimited {
                    retry_after_ms: Some(ms),
                } = &e
                {
                    futures_timer::Delay::new(Duration::from_millis(*ms)).await;
                }

                if attempt < config.max_retries {
                    let delay = config.delay_for_attempt(attempt);
                    tracing::debug!(
                        attempt = attempt + 1,
                        max = config.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        "Retrying request to {}",
                        url
                    );
                    futures_timer::Delay::new(delay).await;
                }
                last_error = Some(e);
            }
        }
    }

    Err(HttpError::MaxRetriesExceeded {
        attempts: config.max_retries + 1,
        last_error: last_error
            .map(|e| e.to_string())
            .unwrap_or_else(|| "unknown".to_string()),
    })
}

fn is_retryable(error: &HttpError, config: &RetryConfig) -> bool {
    match error {
        HttpError::ServerError { status, .. } => config.retryable_statuses.contains(status),
        HttpError::RateLimited { .. } => true,
        HttpError::Timeout => true,
        HttpError::Reqwest(re) => {
            #[cfg(not(target_arch = "wasm32"))]
            let retryable = re.is_connect() || re.is_timeout() || re.is_request();
            #[cfg(target_arch = "wasm32")]
            let retryable = re.is_timeout() || re.is_request();
            retryable
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn fast_config() -> RetryConfig {
        RetryConfig {
            max_retries: 2,
            initial_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(2),
            backoff_factor: 1.0,
            jitter: false,
            retryable_statuses: vec![502, 503, 504],
        }
    }

    #[tokio::test]
    async fn test_exhausted_retries_report_max_retries_exceeded() {
        let attempts = Cell::new(0u32);
        let result: Result<(), HttpError> = run_with_retry(&fast_config(), "/orders/7", || {
            attempts.set(attempts.get() + 1);
            async { Err(HttpError::Timeout) }
        })
        .await;

        assert_eq!(attempts.get(), 3);
        match result {
            Err(HttpError::MaxRetriesExceeded {
                attempts,
                last_error,
            }) => {
                assert_eq!(attempts, 3);
                assert!(last_error.contains("Timeout"));
            }
            other => panic!("expected MaxRetriesExceeded, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_non_retryable_error_returns_immediately() {
        let attempts = Cell::new(0u32);
        let result: Result<(), HttpError> = run_with_retry(&fast_config(), "/orders/7", || {
            attempts.set(attempts.get() + 1);
            async { Err(HttpError::Unauthorized) }
        })
        .await;

        assert_eq!(attempts.get(), 1);
        assert!(matches!(result, Err(HttpError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_transient_server_error_recovers() {
        let attempts = Cell::new(0u32);
        let result = run_with_retry(&fast_config(), "/orders/7", || {
            let n = attempts.get();
            attempts.set(n + 1);
            async move {
                if n < 2 {
                    Err(HttpError::ServerError {
                        status: 503,
                        body: String::new(),
                    })
                } else {
                    Ok(7)
                }
            }
        })
        .await;

        assert_eq!(result.ok(), Some(7));
        assert_eq!(attempts.get(), 3);
    }

    #[tokio::test]
    async fn test_unlisted_status_is_not_retried() {
        let attempts = Cell::new(0u32);
        let result: Result<(), HttpError> = run_with_retry(&fast_config(), "/orders/7", || {
            attempts.set(attempts.get() + 1);
            async {
                Err(HttpError::ServerError {
                    status: 500,
                    body: String::new(),
                })
            }
        })
        .await;

        assert_eq!(attempts.get(), 1);
        assert!(matches!(
            result,
            Err(HttpError::ServerError { status: 500, .. })
        ));
    }
}
