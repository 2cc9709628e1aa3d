use std::sync::Arc;

use crate::{
    config::Config,
    error::AppResult,
    services::{
        providers::{
            huggingface::HuggingFaceClassifier, imdb::ImdbChartClient, kobis::KobisClient,
            openai::OpenAiChat, tmdb::TmdbClient, translate::GoogleTranslator,
        },
        EmotionAnalyzer, HttpSession, Recommender, RetryPolicy,
    },
};

/// Shared application state
///
/// Every client is built once here and shared read-only across requests.
#[derive(Clone)]
pub struct AppState {
    pub tmdb: Arc<TmdbClient>,
    pub kobis: Arc<KobisClient>,
    pub imdb: Arc<ImdbChartClient>,
    pub emotions: Arc<EmotionAnalyzer>,
    pub recommender: Arc<Recommender>,
}

impl AppState {
    /// Wires every upstream client from configuration
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let session = HttpSession::new(RetryPolicy::new(
            config.http_retries,
            config.http_backoff_factor,
        ))?;

        tracing::info!(
            retries = session.policy().retries,
            backoff_factor = session.policy().backoff_factor,
            "HTTP session ready"
        );

        let tmdb = Arc::new(TmdbClient::from_config(session.clone(), config));
        let translator = Arc::new(GoogleTranslator::new(
            session.clone(),
            config.translate_api_url.clone(),
        ));
        let classifier = Arc::new(HuggingFaceClassifier::new(
            session.clone(),
            config.huggingface_api_url.clone(),
            config.huggingface_api_token.clone(),
        ));
        let chat = Arc::new(OpenAiChat::new(
            session.clone(),
            config.openai_api_url.clone(),
            config.openai_api_key.clone(),
            config.openai_model.clone(),
        ));

        Ok(Self {
            kobis: Arc::new(KobisClient::from_config(
                session.clone(),
                config,
                tmdb.clone(),
            )),
            imdb: Arc::new(ImdbChartClient::from_config(session, config)),
            emotions: Arc::new(EmotionAnalyzer::new(translator.clone(), classifier)),
            recommender: Arc::new(Recommender::new(chat, tmdb.clone(), translator)),
            tmdb,
        })
    }
}
