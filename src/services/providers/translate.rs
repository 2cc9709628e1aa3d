//! Google Translate client over the public `translate_a/single` endpoint
use crate::{
    error::{AppError, AppResult},
    services::{
        http::{ensure_success, HttpSession},
        providers::Translator,
    },
};
use serde_json::Value;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct GoogleTranslator {
    session: HttpSession,
    api_url: String,
}

impl GoogleTranslator {
    pub fn new(session: HttpSession, api_url: impl Into<String>) -> Self {
        Self {
            session,
            api_url: api_url.into(),
        }
    }
}

/// Joins the translated segments of a `translate_a/single` response.
///
/// The payload is positional: `[[["segment", "source", ...], ...], ...]`.
fn collect_segments(body: &Value) -> Option<String> {
    let segments = body.get(0)?.as_array()?;
    let text: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();
    Some(text)
}

#[async_trait::async_trait]
impl Translator for GoogleTranslator {
    async fn translate(&self, text: &str, source: &str, target: &str) -> AppResult<String> {
        if text.trim().is_empty() {
            return Ok(String::new());
        }

        let url = format!("{}/translate_a/single", self.api_url);
        let params = [
            ("client", "gtx"),
            ("sl", source),
            ("tl", target),
            ("dt", "t"),
            ("q", text),
        ];

        let response = self.session.get(&url, &params, REQUEST_TIMEOUT).await?;
        let body: Value = ensure_success("Google Translate", response)?.json().await?;

        let translated = collect_segments(&body).ok_or_else(|| {
            AppError::ExternalApi("Unexpected Google Translate response shape".to_string())
        })?;

        tracing::debug!(source = %source, target = %target, chars = translated.len(), "Translated text");
        Ok(translated)
    }
}
