use serde::{Deserialize, Serialize};

mod emotion;
mod rank;

pub use emotion::{Emotion, EmotionLabel, MoodCategory};
pub use rank::{year_prefix, RankEntry, RankSource, RankingItem};

/// Movie returned by the `/search` endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchMovie {
    pub title: Option<String>,
    pub release_date: Option<String>,
    pub rating: Option<f64>,
    pub overview: Option<String>,
    pub poster: Option<String>,
}

/// Successful `/recommend` payload
#[derive(Debug, Clone, Serialize)]
pub struct RecommendResponse {
    pub result: String,
    pub emotion: String,
    pub recommendation: String,
    pub success: bool,
}

// ============================================================================
// TMDB API Types
// ============================================================================

/// Paged result list shared by `/search/movie` and `/movie/top_rated`
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbPage {
    #[serde(default)]
    pub results: Vec<TmdbMovie>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovie {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub vote_count: Option<u64>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
}

impl TmdbMovie {
    /// Localized title, falling back to the original title
    pub fn display_title(&self) -> String {
        self.title
            .as_deref()
            .filter(|t| !t.is_empty())
            .or(self.original_title.as_deref())
            .unwrap_or_default()
            .to_string()
    }
}

// ============================================================================
// KOBIS API Types
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KobisResponse {
    #[serde(default)]
    pub box_office_result: KobisBoxOfficeResult,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KobisBoxOfficeResult {
    #[serde(default)]
    pub daily_box_office_list: Vec<KobisDailyItem>,
}

/// One row of the daily list; KOBIS encodes every field as a string
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KobisDailyItem {
    #[serde(default)]
    pub rank: Option<String>,
    #[serde(default)]
    pub movie_nm: Option<String>,
    #[serde(default)]
    pub open_dt: Option<String>,
    #[serde(default)]
    pub movie_cd: Option<String>,
    #[serde(default)]
    pub audi_cnt: Option<String>,
    #[serde(default)]
    pub audi_acc: Option<String>,
    #[serde(default)]
    pub rank_inten: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_title_falls_back_to_original() {
        let movie: TmdbMovie = serde_json::from_value(serde_json::json!({
            "id": 496243,
            "title": "",
            "original_title": "기생충"
        }))
        .unwrap();
        assert_eq!(movie.display_title(), "기생충");
    }

    #[test]
    fn test_kobis_response_parses_camel_case() {
        let body = r#"{
            "boxOfficeResult": {
                "dailyBoxOfficeList": [
                    {"rank": "1", "movieNm": "파묘", "openDt": "2024-02-22", "movieCd": "20231089",
                     "audiCnt": "120000", "audiAcc": "9000000", "rankInten": "0"}
                ]
            }
        }"#;
        let parsed: KobisResponse = serde_json::from_str(body).unwrap();
        let item = &parsed.box_office_result.daily_box_office_list[0];
        assert_eq!(item.movie_nm.as_deref(), Some("파묘"));
        assert_eq!(item.rank_inten.as_deref(), Some("0"));
    }

    #[test]
    fn test_kobis_response_without_result_is_empty() {
        let parsed: KobisResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.box_office_result.daily_box_office_list.is_empty());
    }
}
