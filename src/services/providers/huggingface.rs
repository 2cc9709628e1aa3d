//! Hugging Face hosted inference client for text classification
use crate::{
    error::{AppError, AppResult},
    services::{
        http::{ensure_success, HttpSession},
        providers::EmotionClassifier,
    },
};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

pub const EMOTION_MODEL: &str = "j-hartmann/emotion-english-distilroberta-base";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Deserialize)]
struct LabelScore {
    label: String,
    score: f64,
}

/// The API answers either one list per input or a flat list
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ClassificationResponse {
    Batched(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
}

impl ClassificationResponse {
    fn best_label(self) -> Option<String> {
        let scores = match self {
            ClassificationResponse::Batched(batches) => batches.into_iter().next()?,
            ClassificationResponse::Flat(scores) => scores,
        };
        scores
            .into_iter()
            .max_by(|a, b| a.score.total_cmp(&b.score))
            .map(|best| best.label)
    }
}

#[derive(Debug, Clone)]
pub struct HuggingFaceClassifier {
    session: HttpSession,
    api_url: String,
    api_token: Option<String>,
    model: String,
}

impl HuggingFaceClassifier {
    pub fn new(session: HttpSession, api_url: impl Into<String>, api_token: Option<String>) -> Self {
        Self {
            session,
            api_url: api_url.into(),
            api_token,
            model: EMOTION_MODEL.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl EmotionClassifier for HuggingFaceClassifier {
    async fn classify(&self, text: &str) -> AppResult<String> {
        let url = format!("{}/models/{}", self.api_url, self.model);
        let body = json!({ "inputs": text });

        let response = self
            .session
            .post_json(&url, &body, self.api_token.as_deref(), REQUEST_TIMEOUT)
            .await?;
        let parsed: ClassificationResponse =
            ensure_success("Hugging Face", response)?.json().await?;

        let label = parsed.best_label().ok_or_else(|| {
            AppError::ExternalApi("Classifier returned no labels".to_string())
        })?;

        tracing::info!(label = %label, model = %self.model, "Emotion classified");
        Ok(label)
    }
}
