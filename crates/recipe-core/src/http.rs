use std::str::FromStr;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::warn;

/// Retry settings for one upstream service.
#[derive(Clone, Debug)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
}

impl RetryPolicy {
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            initial_backoff: Duration::from_millis(0),
            max_backoff: Duration::from_millis(0),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("invalid response JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("upstream returned error: status={status} body={body}")]
    Upstream { status: StatusCode, body: String },
}

/// Reads `name` from the environment and parses it, ignoring unset or unparseable values.
pub fn env_var<T: FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|s| s.trim().parse::<T>().ok())
}

pub fn build_client(user_agent: &str) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder().user_agent(user_agent).build()
}

/// GET `url` with `query` and decode the body as JSON.
///
/// The body is read as text first so that a shape mismatch surfaces as `InvalidJson`
/// rather than as a transport error.
pub async fn get_json<T: DeserializeOwned>(
    http: &reqwest::Client,
    url: &str,
    query: &[(&str, &str)],
    timeout: Duration,
    max_error_body_bytes: usize,
) -> Result<T, RequestError> {
    let resp = http.get(url).query(query).timeout(timeout).send().await?;
    let status = resp.status();
    if !status.is_success() {
        let body = read_limited_text(resp, max_error_body_bytes).await;
        return Err(RequestError::Upstream { status, body });
    }
    let text = resp.text().await?;
    Ok(serde_json::from_str(&text)?)
}

pub async fn with_retry<T, Fut, F>(
    policy: &RetryPolicy,
    service: &'static str,
    mut f: F,
) -> Result<T, RequestError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, RequestError>>,
{
    let mut attempt: u32 = 0;
    loop {
        attempt += 1;
        match f().await {
            Ok(v) => return Ok(v),
            Err(e) => {
                if attempt > policy.max_retries || !should_retry(&e) {
                    return Err(e);
                }
                let delay = backoff_delay(policy.initial_backoff, policy.max_backoff, attempt - 1);
                warn!(
                    service,
                    attempt,
                    delay_ms = delay.as_millis(),
                    error = %e,
                    "upstream request failed, retrying"
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}

fn should_retry(err: &RequestError) -> bool {
    match err {
        RequestError::Request(e) => e.is_timeout() || e.is_connect() || e.is_request() || e.is_body(),
        RequestError::Upstream { status, .. } => {
            *status == StatusCode::REQUEST_TIMEOUT
                || *status == StatusCode::TOO_MANY_REQUESTS
                || status.is_server_error()
        }
        RequestError::InvalidJson(_) => false,
    }
}

fn backoff_delay(initial: Duration, max: Duration, exponent: u32) -> Duration {
    let mult = 1u128.checked_shl(exponent).unwrap_or(u128::MAX);
    let base_ms = initial.as_millis().saturating_mul(mult);
    let capped_ms = std::cmp::min(base_ms, max.as_millis()) as u64;
    let jitter_cap = std::cmp::max(1, capped_ms / 4);
    Duration::from_millis(capped_ms.saturating_add(pseudo_jitter_ms(jitter_cap)))
}

fn pseudo_jitter_ms(max_inclusive: u64) -> u64 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_else(|_| Duration::from_secs(0))
        .subsec_nanos() as u64;
    nanos % (max_inclusive + 1)
}

async fn read_limited_text(resp: reqwest::Response, max_bytes: usize) -> String {
    match resp.bytes().await {
        Ok(mut b) => {
            if b.len() > max_bytes {
                b.truncate(max_bytes);
            }
            String::from_utf8_lossy(&b).to_string()
        }
        Err(e) => {
            warn!(error = %e, "failed to read upstream error body");
            "<failed to read error body>".to_string()
        }
    }
}
