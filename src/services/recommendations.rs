use crate::{
    models::{Emotion, MoodCategory},
    services::{
        providers::{ChatModel, MovieCatalog, Translator},
        title_search::search_with_fallback,
    },
};
use std::sync::Arc;

pub const KEYWORD_FAILURE: &str = "OpenAI API 호출 실패";
pub const DESCRIPTION_FAILURE: &str = "GPT 설명 생성 실패";

const KEYWORD_TEMPERATURE: f32 = 0.8;
const DESCRIPTION_TEMPERATURE: f32 = 0.7;
const TITLES_PER_KEYWORD: usize = 1;

/// Generates emotion-aware movie recommendations
///
/// Two chat model round trips: the first asks for three English original
/// titles, which are resolved against the catalog; the second turns the
/// resolved titles into a friendly Korean write-up.
///
/// Never fails: each external boundary degrades to a fixed message.
#[derive(Clone)]
pub struct Recommender {
    chat: Arc<dyn ChatModel>,
    catalog: Arc<dyn MovieCatalog>,
    translator: Arc<dyn Translator>,
}

impl Recommender {
    pub fn new(
        chat: Arc<dyn ChatModel>,
        catalog: Arc<dyn MovieCatalog>,
        translator: Arc<dyn Translator>,
    ) -> Self {
        Self {
            chat,
            catalog,
            translator,
        }
    }

    pub async fn recommend_movies(&self, emotion: &Emotion) -> String {
        let keyword_reply = match self
            .chat
            .complete(&keyword_prompt(emotion), KEYWORD_TEMPERATURE)
            .await
        {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!(error = %e, "Keyword generation failed");
                return KEYWORD_FAILURE.to_string();
            }
        };

        let keywords = parse_keywords(&keyword_reply);
        tracing::info!(emotion = %emotion, keywords = ?keywords, "Generated title keywords");

        let mut titles = Vec::new();
        for keyword in &keywords {
            let found = search_with_fallback(
                self.catalog.as_ref(),
                self.translator.as_ref(),
                keyword,
                TITLES_PER_KEYWORD,
            )
            .await;
            titles.extend(found);
        }

        if titles.is_empty() {
            tracing::warn!(emotion = %emotion, "No catalog match for any keyword");
            return no_match_message(emotion);
        }

        match self
            .chat
            .complete(&description_prompt(emotion, &titles), DESCRIPTION_TEMPERATURE)
            .await
        {
            Ok(description) => {
                tracing::info!(titles = ?titles, chars = description.chars().count(), "Recommendation written");
                description
            }
            Err(e) => {
                tracing::error!(error = %e, "Description generation failed");
                DESCRIPTION_FAILURE.to_string()
            }
        }
    }
}

pub fn no_match_message(emotion: &Emotion) -> String {
    format!("감정 '{}'에 맞는 영화를 검색하지 못하였습니다.", emotion)
}

/// Comma separated model reply -> trimmed, non-empty titles
pub fn parse_keywords(reply: &str) -> Vec<String> {
    reply
        .split(',')
        .map(str::trim)
        .filter(|kw| !kw.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn keyword_prompt(emotion: &Emotion) -> String {
    let request = match emotion.category() {
        MoodCategory::Uplift => "이 기분을 더 오래 이어가거나 더 즐겁게 만들어 줄",
        MoodCategory::Variety => "장르에 구애받지 않고 무작위로 고른",
        MoodCategory::Soothe => "이 감정을 누그러뜨리고 마음을 회복하도록 도와줄",
    };
    format!(
        "사용자의 감정은 '{emotion}'이야. {request} 실제 영화 3편을 골라서 \
         영어 원제(Original English title)로만, 콤마로 구분해서 답해줘. \
         가능하면 장르, 감독, 개봉 시기가 서로 다른 작품으로 골라줘.",
        emotion = emotion,
        request = request,
    )
}

pub fn description_prompt(emotion: &Emotion, titles: &[String]) -> String {
    let angle = match emotion.category() {
        MoodCategory::Uplift => {
            "각 영화가 지금의 즐거운 기분을 어떻게 더 넓혀 주고 이어 줄 수 있는지 한두 문장씩 묘사해줘."
        }
        MoodCategory::Variety => "각 영화의 간단한 내용이나 줄거리를 소개하면서 추천해줘.",
        MoodCategory::Soothe => {
            "각 영화가 어떻게 마음을 안정시키고 감정을 완화해 줄 수 있는지 자연스럽게 설명해줘."
        }
    };
    format!(
        "사용자의 감정은 '{emotion}'이고, 추천할 영화는 {titles}야. {angle} \
         이모티콘을 써도 좋아. \"이 영화는 어떠세요?\" 같은 친근한 말투로, \
         영화마다 번호를 붙여 따로따로 구분되게 설명해줘.",
        emotion = emotion,
        titles = titles.join(", "),
        angle = angle,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::AppError,
        models::EmotionLabel,
        services::providers::{MockChatModel, MockMovieCatalog, MockTranslator},
    };
    use mockall::predicate::{always, eq, function};

    fn recommender(
        chat: MockChatModel,
        catalog: MockMovieCatalog,
        translator: MockTranslator,
    ) -> Recommender {
        Recommender::new(Arc::new(chat), Arc::new(catalog), Arc::new(translator))
    }

    #[test]
    fn test_parse_keywords() {
        assert_eq!(
            parse_keywords(" Paddington 2, The Intouchables ,, Amélie "),
            vec!["Paddington 2", "The Intouchables", "Amélie"]
        );
        assert!(parse_keywords("  ").is_empty());
    }

    #[test]
    fn test_prompts_follow_category() {
        let joy = Emotion::Known(EmotionLabel::Joy);
        let sad = Emotion::Known(EmotionLabel::Sadness);
        assert!(keyword_prompt(&joy).contains("'기쁨'"));
        assert!(keyword_prompt(&joy).contains("즐겁게"));
        assert!(keyword_prompt(&sad).contains("회복"));
        assert!(keyword_prompt(&Emotion::Known(EmotionLabel::Neutral)).contains("무작위"));

        let prompt = description_prompt(&sad, &["인사이드 아웃".to_string(), "업".to_string()]);
        assert!(prompt.contains("인사이드 아웃, 업"));
        assert!(prompt.contains("안정"));
    }

    #[tokio::test]
    async fn test_full_flow() {
        let mut chat = MockChatModel::new();
        chat.expect_complete()
            .with(function(|p: &str| p.contains("영어 원제")), eq(0.8f32))
            .times(1)
            .returning(|_, _| Ok("Paddington 2, Up, Nowhere Film".to_string()));
        chat.expect_complete()
            .with(
                function(|p: &str| p.contains("패딩턴 2, 업")),
                eq(0.7f32),
            )
            .times(1)
            .returning(|_, _| Ok("1. 패딩턴 2 ...".to_string()));

        let mut catalog = MockMovieCatalog::new();
        catalog
            .expect_search_titles()
            .with(eq("Paddington 2"), always())
            .returning(|_, _| vec!["패딩턴 2".to_string()]);
        catalog
            .expect_search_titles()
            .with(eq("Up"), always())
            .returning(|_, _| vec!["업".to_string()]);
        catalog
            .expect_search_titles()
            .with(
                function(|q: &str| q != "Paddington 2" && q != "Up"),
                always(),
            )
            .times(2)
            .returning(|_, _| Vec::new());

        let mut translator = MockTranslator::new();
        translator
            .expect_translate()
            .with(eq("Nowhere Film"), eq("en"), eq("ko"))
            .times(1)
            .returning(|_, _, _| Ok("어디에도 없는 영화".to_string()));

        let result = recommender(chat, catalog, translator)
            .recommend_movies(&Emotion::Known(EmotionLabel::Sadness))
            .await;

        assert_eq!(result, "1. 패딩턴 2 ...");
    }

    #[tokio::test]
    async fn test_keyword_failure_message() {
        let mut chat = MockChatModel::new();
        chat.expect_complete()
            .times(1)
            .returning(|_, _| Err(AppError::ExternalApi("timeout".to_string())));

        let result = recommender(chat, MockMovieCatalog::new(), MockTranslator::new())
            .recommend_movies(&Emotion::Known(EmotionLabel::Joy))
            .await;
        assert_eq!(result, KEYWORD_FAILURE);
    }

    #[tokio::test]
    async fn test_no_titles_message() {
        let mut chat = MockChatModel::new();
        chat.expect_complete()
            .times(1)
            .returning(|_, _| Ok("Unknown One".to_string()));
        let mut catalog = MockMovieCatalog::new();
        catalog.expect_search_titles().returning(|_, _| Vec::new());
        let mut translator = MockTranslator::new();
        translator
            .expect_translate()
            .returning(|_, _, _| Ok("알 수 없는 영화".to_string()));

        let emotion = Emotion::Known(EmotionLabel::Fear);
        let result = recommender(chat, catalog, translator)
            .recommend_movies(&emotion)
            .await;
        assert_eq!(result, "감정 '두려움'에 맞는 영화를 검색하지 못하였습니다.");
    }

    #[tokio::test]
    async fn test_description_failure_message() {
        let mut chat = MockChatModel::new();
        chat.expect_complete()
            .with(always(), eq(0.8f32))
            .returning(|_, _| Ok("Up".to_string()));
        chat.expect_complete()
            .with(always(), eq(0.7f32))
            .returning(|_, _| Err(AppError::ExternalApi("rate limited".to_string())));
        let mut catalog = MockMovieCatalog::new();
        catalog
            .expect_search_titles()
            .returning(|_, _| vec!["업".to_string()]);

        let result = recommender(chat, catalog, MockTranslator::new())
            .recommend_movies(&Emotion::Known(EmotionLabel::Neutral))
            .await;
        assert_eq!(result, DESCRIPTION_FAILURE);
    }
}
