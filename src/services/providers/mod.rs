//! External service boundaries
//!
//! Every third-party collaborator sits behind a small trait so adapters and
//! orchestration code receive their dependencies explicitly and tests can swap
//! in fakes. Concrete clients live in the submodules and all share one
//! [`HttpSession`](crate::services::http::HttpSession).
use crate::error::AppResult;

pub mod huggingface;
pub mod imdb;
pub mod kobis;
pub mod openai;
pub mod tmdb;
pub mod translate;

/// Best-effort poster lookup by title
#[async_trait::async_trait]
pub trait PosterLookup: Send + Sync {
    /// Returns a full-size poster URL, or `None` on any miss or failure.
    ///
    /// Implementations never return errors; failures are logged.
    async fn resolve_poster(
        &self,
        title: &str,
        year: Option<&str>,
        api_key: Option<&str>,
    ) -> Option<String>;
}

/// Title search against the movie catalog
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MovieCatalog: Send + Sync {
    /// Up to `count` localized titles matching `query`; empty on failure
    async fn search_titles(&self, query: &str, count: usize) -> Vec<String>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, source: &str, target: &str) -> AppResult<String>;
}

/// Single-label English emotion classifier
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait EmotionClassifier: Send + Sync {
    /// Highest scoring raw label, e.g. `"joy"`
    async fn classify(&self, text: &str) -> AppResult<String>;
}

/// Chat-style text generation
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ChatModel: Send + Sync {
    async fn complete(&self, prompt: &str, temperature: f32) -> AppResult<String>;
}
