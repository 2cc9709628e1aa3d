//! OpenAI chat completions client
use crate::{
    error::{AppError, AppResult},
    services::{
        http::{ensure_success, HttpSession},
        providers::ChatModel,
    },
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Clone)]
pub struct OpenAiChat {
    session: HttpSession,
    api_url: String,
    api_key: String,
    model: String,
}

impl OpenAiChat {
    pub fn new(
        session: HttpSession,
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            session,
            api_url: api_url.into(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }
}

#[async_trait::async_trait]
impl ChatModel for OpenAiChat {
    async fn complete(&self, prompt: &str, temperature: f32) -> AppResult<String> {
        let url = format!("{}/v1/chat/completions", self.api_url);
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature,
        };

        let response = self
            .session
            .post_json(&url, &request, Some(&self.api_key), REQUEST_TIMEOUT)
            .await?;
        let reply: ChatResponse = ensure_success("OpenAI", response)?.json().await?;

        let content = reply
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .ok_or_else(|| AppError::ExternalApi("OpenAI returned no choices".to_string()))?;

        tracing::debug!(model = %self.model, chars = content.len(), "Chat completion received");
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::http::RetryPolicy;
    use mockito::Matcher;
    use serde_json::json;

    fn chat(base_url: &str) -> OpenAiChat {
        OpenAiChat::new(
            HttpSession::new(RetryPolicy::new(0, 0.0)).unwrap(),
            base_url,
            "sk-test",
            "gpt-4o-mini",
        )
    }

    #[tokio::test]
    async fn test_complete_sends_model_and_temperature() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_header("authorization", "Bearer sk-test")
            .match_body(Matcher::PartialJson(json!({
                "model": "gpt-4o-mini",
                "messages": [{"role": "user", "content": "hello"}]
            })))
            .with_status(200)
            .with_body(r#"{"choices":[{"index":0,"message":{"role":"assistant","content":"  Paddington, Up, Amélie \n"}}]}"#)
            .create_async()
            .await;

        let content = chat(&server.url()).complete("hello", 0.8).await.unwrap();

        mock.assert_async().await;
        assert_eq!(content, "Paddington, Up, Amélie");
    }

    #[tokio::test]
    async fn test_no_choices_is_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices":[]}"#)
            .create_async()
            .await;

        let result = chat(&server.url()).complete("hello", 0.7).await;
        assert!(matches!(result, Err(AppError::ExternalApi(_))));
    }

    #[tokio::test]
    async fn test_upstream_error_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/chat/completions")
            .with_status(401)
            .create_async()
            .await;

        let result = chat(&server.url()).complete("hello", 0.7).await;
        assert!(matches!(
            result,
            Err(AppError::UpstreamStatus { service: "OpenAI", status: 401 })
        ));
    }
}
