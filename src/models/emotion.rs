use serde::Serialize;
use std::fmt::Display;

/// The closed label set of the English emotion classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionLabel {
    Joy,
    Sadness,
    Anger,
    Disgust,
    Fear,
    Surprise,
    Neutral,
}

impl EmotionLabel {
    pub const ALL: [EmotionLabel; 7] = [
        EmotionLabel::Joy,
        EmotionLabel::Sadness,
        EmotionLabel::Anger,
        EmotionLabel::Disgust,
        EmotionLabel::Fear,
        EmotionLabel::Surprise,
        EmotionLabel::Neutral,
    ];

    /// Parses a classifier label (`"joy"`, `"anger"`, ...)
    pub fn from_classifier_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "joy" => Some(EmotionLabel::Joy),
            "sadness" => Some(EmotionLabel::Sadness),
            "anger" => Some(EmotionLabel::Anger),
            "disgust" => Some(EmotionLabel::Disgust),
            "fear" => Some(EmotionLabel::Fear),
            "surprise" => Some(EmotionLabel::Surprise),
            "neutral" => Some(EmotionLabel::Neutral),
            _ => None,
        }
    }

    /// Display name shown to users
    pub fn korean(self) -> &'static str {
        match self {
            EmotionLabel::Joy => "기쁨",
            EmotionLabel::Sadness => "슬픔",
            EmotionLabel::Anger => "분노",
            EmotionLabel::Disgust => "혐오",
            EmotionLabel::Fear => "두려움",
            EmotionLabel::Surprise => "놀람",
            EmotionLabel::Neutral => "중립",
        }
    }
}

/// A detected emotion.
///
/// Labels outside the known set are carried verbatim rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emotion {
    Known(EmotionLabel),
    Unmapped(String),
}

impl Emotion {
    /// Maps a raw classifier label through the label table
    pub fn from_classifier_label(label: &str) -> Self {
        match EmotionLabel::from_classifier_label(label) {
            Some(known) => Emotion::Known(known),
            None => Emotion::Unmapped(label.to_string()),
        }
    }

    pub fn category(&self) -> MoodCategory {
        match self {
            Emotion::Known(EmotionLabel::Joy) => MoodCategory::Uplift,
            Emotion::Known(EmotionLabel::Neutral) | Emotion::Unmapped(_) => MoodCategory::Variety,
            Emotion::Known(_) => MoodCategory::Soothe,
        }
    }
}

impl Display for Emotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Emotion::Known(label) => write!(f, "{}", label.korean()),
            Emotion::Unmapped(raw) => write!(f, "{}", raw),
        }
    }
}

/// How recommendations should respond to an emotion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoodCategory {
    /// Stretch a good mood further
    Uplift,
    /// No strong mood; pick freely across genres
    Variety,
    /// Calm or lift a negative mood
    Soothe,
}
