//! Shared HTTP session for every upstream call
//!
//! Wraps a pooled `reqwest::Client` with a fixed User-Agent and a bounded retry
//! policy: a request is retried when the response status is in the retryable set
//! or the transport fails to connect / times out. Anything else is returned to
//! the caller as-is, so adapters still decide with [`ensure_success`].
use crate::error::{AppError, AppResult};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use std::{sync::Arc, time::Duration};

pub const USER_AGENT: &str =
    "Mozilla/5.0 (compatible; MovieRankScraper/1.0; +https://yourdomain.example)";

/// Empty query string
pub const NO_PARAMS: &[(&str, &str)] = &[];

const MAX_BACKOFF_SECS: f64 = 120.0;

/// Retry settings for an [`HttpSession`]
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub retries: u32,
    pub backoff_factor: f64,
    pub retryable_statuses: Vec<StatusCode>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, 0.3)
    }
}

impl RetryPolicy {
    /// Policy retrying on 429, 500, 502, 503 and 504
    pub fn new(retries: u32, backoff_factor: f64) -> Self {
        Self {
            retries,
            backoff_factor,
            retryable_statuses: vec![
                StatusCode::TOO_MANY_REQUESTS,
                StatusCode::INTERNAL_SERVER_ERROR,
                StatusCode::BAD_GATEWAY,
                StatusCode::SERVICE_UNAVAILABLE,
                StatusCode::GATEWAY_TIMEOUT,
            ],
        }
    }

    pub fn is_retryable(&self, status: StatusCode) -> bool {
        self.retryable_statuses.contains(&status)
    }

    /// Delay before the `retry`-th retry (1-based).
    ///
    /// The first retry is immediate, later ones wait `backoff_factor * 2^(retry-1)`.
    pub fn backoff_delay(&self, retry: u32) -> Duration {
        if retry <= 1 || self.backoff_factor <= 0.0 {
            return Duration::ZERO;
        }
        let secs = self.backoff_factor * 2f64.powi(retry as i32 - 1);
        Duration::from_secs_f64(secs.min(MAX_BACKOFF_SECS))
    }
}

/// Turns a non-2xx response into [`AppError::UpstreamStatus`]
pub fn ensure_success(service: &'static str, response: Response) -> AppResult<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(AppError::UpstreamStatus {
            service,
            status: status.as_u16(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct HttpSession {
    client: Client,
    policy: Arc<RetryPolicy>,
}

impl HttpSession {
    pub fn new(policy: RetryPolicy) -> AppResult<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            client,
            policy: Arc::new(policy),
        })
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// GET `url` with query `params`
    pub async fn get<Q>(&self, url: &str, params: &Q, timeout: Duration) -> AppResult<Response>
    where
        Q: Serialize + ?Sized,
    {
        self.send_with_retry(url, || self.client.get(url).query(params).timeout(timeout))
            .await
    }

    /// POST a JSON body, optionally with a bearer token
    pub async fn post_json<B>(
        &self,
        url: &str,
        body: &B,
        bearer: Option<&str>,
        timeout: Duration,
    ) -> AppResult<Response>
    where
        B: Serialize + ?Sized,
    {
        self.send_with_retry(url, || {
            let request = self.client.post(url).json(body).timeout(timeout);
            match bearer {
                Some(token) => request.bearer_auth(token),
                None => request,
            }
        })
        .await
    }

    async fn send_with_retry(
        &self,
        url: &str,
        make_request: impl Fn() -> RequestBuilder,
    ) -> AppResult<Response> {
        let mut retry = 0;

        loop {
            let outcome = make_request().send().await;
            let can_retry = retry < self.policy.retries;

            match outcome {
                Ok(response) if can_retry && self.policy.is_retryable(response.status()) => {
                    tracing::warn!(
                        url = %url,
                        status = response.status().as_u16(),
                        attempt = retry + 1,
                        "Retryable upstream status"
                    );
                }
                Ok(response) => return Ok(response),
                Err(e) if can_retry && (e.is_connect() || e.is_timeout()) => {
                    tracing::warn!(
                        url = %url,
                        error = %e,
                        attempt = retry + 1,
                        "Transient transport failure"
                    );
                }
                Err(e) => return Err(e.into()),
            }

            retry += 1;
            let delay = self.policy.backoff_delay(retry);
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }
    }
}
