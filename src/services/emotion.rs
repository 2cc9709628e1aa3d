use crate::{
    models::Emotion,
    services::providers::{EmotionClassifier, Translator},
};
use std::sync::Arc;

pub const UNCLASSIFIABLE_MESSAGE: &str = "감정을 분류할 수 없습니다. 다시 입력해주세요.";
pub const SERVICE_FAILURE_MESSAGE: &str = "감정 분석 서비스 호출 실패";

/// Result of classifying a diary entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmotionOutcome {
    Detected(Emotion),
    /// Input was empty or whitespace only
    Unclassifiable,
    /// Translator or classifier call failed
    ServiceFailure,
}

impl EmotionOutcome {
    /// User-facing message for outcomes that carry no emotion
    pub fn failure_message(&self) -> Option<&'static str> {
        match self {
            EmotionOutcome::Detected(_) => None,
            EmotionOutcome::Unclassifiable => Some(UNCLASSIFIABLE_MESSAGE),
            EmotionOutcome::ServiceFailure => Some(SERVICE_FAILURE_MESSAGE),
        }
    }
}

/// Korean text -> English translation -> English classifier -> Korean label
#[derive(Clone)]
pub struct EmotionAnalyzer {
    translator: Arc<dyn Translator>,
    classifier: Arc<dyn EmotionClassifier>,
}

impl EmotionAnalyzer {
    pub fn new(translator: Arc<dyn Translator>, classifier: Arc<dyn EmotionClassifier>) -> Self {
        Self {
            translator,
            classifier,
        }
    }

    pub async fn classify_emotion(&self, text: &str) -> EmotionOutcome {
        if text.trim().is_empty() {
            return EmotionOutcome::Unclassifiable;
        }

        let translated = match self.translator.translate(text, "ko", "en").await {
            Ok(translated) => translated,
            Err(e) => {
                tracing::warn!(error = %e, "Diary translation failed");
                return EmotionOutcome::ServiceFailure;
            }
        };

        let label = match self.classifier.classify(&translated).await {
            Ok(label) => label,
            Err(e) => {
                tracing::warn!(error = %e, "Emotion classification failed");
                return EmotionOutcome::ServiceFailure;
            }
        };

        let emotion = Emotion::from_classifier_label(&label);
        if let Emotion::Unmapped(raw) = &emotion {
            tracing::warn!(label = %raw, "Classifier label outside the known set");
        }
        EmotionOutcome::Detected(emotion)
    }
}
