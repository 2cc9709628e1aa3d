use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Missing API key: {0}")]
    MissingApiKey(&'static str),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("{service} returned status {status}")]
    UpstreamStatus { service: &'static str, status: u16 },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = match &self {
            AppError::UpstreamStatus { service, status } => json!({
                "error": format!("{} API 호출 실패.", service),
                "status_code": status,
            }),
            AppError::InvalidInput(msg) | AppError::ExternalApi(msg) => json!({ "error": msg }),
            _ => json!({ "error": self.to_string() }),
        };

        let status = match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::MissingApiKey(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::HttpClient(_) | AppError::UpstreamStatus { .. } | AppError::ExternalApi(_) => {
                StatusCode::BAD_GATEWAY
            }
        };

        (status, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_status_maps_to_bad_gateway() {
        let response = AppError::UpstreamStatus {
            service: "TMDB",
            status: 401,
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_upstream_status_body_carries_status_code() {
        let response = AppError::UpstreamStatus {
            service: "TMDB",
            status: 401,
        }
        .into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "TMDB API 호출 실패.");
        assert_eq!(body["status_code"], 401);
    }

    #[test]
    fn test_invalid_input_maps_to_bad_request() {
        let response = AppError::InvalidInput("검색어가 필요합니다.".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_missing_key_message() {
        let err = AppError::MissingApiKey("KOBIS_API_KEY");
        assert_eq!(err.to_string(), "Missing API key: KOBIS_API_KEY");
    }
}
