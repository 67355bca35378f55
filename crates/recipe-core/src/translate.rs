/// Single-string translation between two locales.
///
/// `GoogleTranslator` talks to the public `translate_a/single` endpoint. Every call is
/// independent; there is no batching and no caching. Whitespace-only input never leaves
/// the process.
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::error::CommonError;
use crate::http::{self, RequestError, RetryPolicy};
use crate::throttle::Throttle;

#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, source: &str, target: &str) -> Result<String, CommonError>;
}

#[derive(Clone, Debug)]
pub struct TranslatorConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub retry: RetryPolicy,
    /// Calls per second; 0 leaves the translator unthrottled.
    pub max_rps: u32,
    pub max_error_body_bytes: usize,
}

impl TranslatorConfig {
    pub fn from_env() -> Self {
        let base_url = std::env::var("TRANSLATE_BASE_URL")
            .unwrap_or_else(|_| "https://translate.googleapis.com".to_string());

        let timeout = http::env_var::<u64>("TRANSLATE_TIMEOUT_SECS")
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(10));

        let retry = RetryPolicy {
            max_retries: http::env_var("TRANSLATE_MAX_RETRIES").unwrap_or(0),
            initial_backoff: http::env_var::<u64>("TRANSLATE_RETRY_INITIAL_MS")
                .map(Duration::from_millis)
                .unwrap_or_else(|| Duration::from_millis(250)),
            max_backoff: http::env_var::<u64>("TRANSLATE_RETRY_MAX_MS")
                .map(Duration::from_millis)
                .unwrap_or_else(|| Duration::from_millis(2_000)),
        };

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
            retry,
            max_rps: http::env_var("TRANSLATE_MAX_RPS").unwrap_or(0),
            max_error_body_bytes: 4 * 1024,
        }
    }
}

#[derive(Clone)]
pub struct GoogleTranslator {
    config: TranslatorConfig,
    http: reqwest::Client,
    throttle: Option<Throttle>,
}

impl GoogleTranslator {
    pub fn new(config: TranslatorConfig) -> Result<Self, CommonError> {
        let http = http::build_client("recipe-finder/translate")
            .map_err(|e| CommonError::Http(e.to_string()))?;
        let throttle = Throttle::per_second(config.max_rps);
        Ok(Self {
            config,
            http,
            throttle,
        })
    }

    async fn request(&self, text: &str, source: &str, target: &str) -> Result<Value, RequestError> {
        let url = format!("{}/translate_a/single", self.config.base_url);
        let query = [
            ("client", "gtx"),
            ("sl", source),
            ("tl", target),
            ("dt", "t"),
            ("q", text),
        ];
        http::with_retry(&self.config.retry, "translate", || async {
            if let Some(throttle) = &self.throttle {
                throttle.acquire().await;
            }
            http::get_json::<Value>(
                &self.http,
                &url,
                &query,
                self.config.timeout,
                self.config.max_error_body_bytes,
            )
            .await
        })
        .await
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(&self, text: &str, source: &str, target: &str) -> Result<String, CommonError> {
        if text.trim().is_empty() {
            return Ok(text.to_string());
        }
        let body = self
            .request(text, source, target)
            .await
            .map_err(|e| CommonError::Translation(e.to_string()))?;
        let translated = extract_translation(&body).ok_or_else(|| {
            CommonError::Translation("response carried no translated segments".to_string())
        })?;
        debug!(source, target, chars = text.len(), "translated text");
        Ok(translated)
    }
}

/// Joins the translated segments of a `translate_a/single` response.
///
/// The payload is a nested array whose first element lists
/// `[translated, original, ...]` segments, one per sentence.
fn extract_translation(body: &Value) -> Option<String> {
    let segments = body.get(0)?.as_array()?;
    let joined: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();
    if joined.is_empty() {
        None
    } else {
        Some(joined)
    }
}
