use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    models::{RankEntry, RankingItem, RecommendResponse, SearchMovie},
    services::{combine, providers::imdb::DEFAULT_CHART_LIMIT, EmotionOutcome},
};

use super::AppState;

/// Items shown per `/rank/*` endpoint
const RANKING_ITEMS: usize = 10;
const TMDB_LANGUAGE: &str = "ko-KR";

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    #[serde(default)]
    pub diary: Option<String>,
    #[serde(default)]
    pub emotion: Option<String>,
}

impl RecommendRequest {
    /// `diary` wins when non-empty, otherwise `emotion`
    fn text(&self) -> &str {
        self.diary
            .as_deref()
            .filter(|d| !d.is_empty())
            .or(self.emotion.as_deref())
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct CombinedRankQuery {
    /// Resolve KOBIS posters (slow: one TMDB lookup per entry)
    #[serde(default)]
    pub posters: bool,
}

#[derive(Debug, Serialize)]
pub struct ResultsResponse<T> {
    pub results: Vec<T>,
}

impl<T> From<Vec<T>> for ResultsResponse<T> {
    fn from(results: Vec<T>) -> Self {
        Self { results }
    }
}

fn top_items(entries: Vec<RankEntry>) -> ResultsResponse<RankingItem> {
    entries
        .into_iter()
        .take(RANKING_ITEMS)
        .map(RankingItem::from)
        .collect::<Vec<_>>()
        .into()
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Classify a diary entry and recommend movies for the detected emotion
pub async fn recommend(
    State(state): State<AppState>,
    Json(request): Json<RecommendRequest>,
) -> AppResult<Json<RecommendResponse>> {
    let text = request.text();
    if text.trim().is_empty() {
        return Err(AppError::InvalidInput("텍스트를 입력해주세요.".to_string()));
    }

    let emotion = match state.emotions.classify_emotion(text).await {
        EmotionOutcome::Detected(emotion) => emotion,
        outcome => {
            let message = outcome.failure_message().unwrap_or_default();
            return Err(match outcome {
                EmotionOutcome::Unclassifiable => AppError::InvalidInput(message.to_string()),
                _ => AppError::ExternalApi(message.to_string()),
            });
        }
    };
    tracing::info!(emotion = %emotion, "Diary emotion detected");

    let recommendation = state
        .recommender
        .recommend_movies(&emotion)
        .await
        .replace("undefined", "")
        .trim()
        .to_string();

    if recommendation.is_empty() {
        return Err(AppError::ExternalApi("영화 추천 생성 실패.".to_string()));
    }

    Ok(Json(RecommendResponse {
        result: format!("🔍 감정 추출 결과 : {}\n\n{}", emotion, recommendation),
        emotion: emotion.to_string(),
        recommendation,
        success: true,
    }))
}

/// Handler for title search endpoint
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<ResultsResponse<SearchMovie>>> {
    let movies = state.tmdb.search_movies(&params.query).await?;
    Ok(Json(movies.into()))
}

/// TMDB top rated, first page
pub async fn rank_tmdb(State(state): State<AppState>) -> AppResult<Json<ResultsResponse<RankingItem>>> {
    let entries = state.tmdb.fetch_top_rated(None, TMDB_LANGUAGE, 1).await?;
    Ok(Json(top_items(entries)))
}

/// KOBIS daily box office with TMDB posters
pub async fn rank_kobis(State(state): State<AppState>) -> AppResult<Json<ResultsResponse<RankingItem>>> {
    let entries = state.kobis.fetch_daily_box_office(None, None, true).await?;
    Ok(Json(top_items(entries)))
}

/// IMDb top chart
pub async fn rank_imdb(State(state): State<AppState>) -> AppResult<Json<ResultsResponse<RankingItem>>> {
    let entries = state.imdb.fetch_chart(RANKING_ITEMS).await?;
    Ok(Json(top_items(entries)))
}

/// All three sources combined; a failing source is left out
pub async fn rank_all(
    State(state): State<AppState>,
    Query(params): Query<CombinedRankQuery>,
) -> Json<ResultsResponse<RankEntry>> {
    let tmdb = state.tmdb.fetch_top_rated(None, TMDB_LANGUAGE, 1).await;
    let kobis = state
        .kobis
        .fetch_daily_box_office(None, None, params.posters)
        .await;
    let imdb = state.imdb.fetch_chart(DEFAULT_CHART_LIMIT).await;

    let combined = combine([tmdb, kobis, imdb]);
    tracing::info!(results = combined.len(), "Combined ranking built");
    Json(combined.into())
}
