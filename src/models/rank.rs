use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::Display;

/// Provenance tag for a ranking entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankSource {
    /// TMDB top rated listing
    Tmdb,
    /// KOBIS daily box office
    Kobis,
    /// IMDb top chart page
    Imdb,
}

impl Display for RankSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self {
            RankSource::Tmdb => "tmdb",
            RankSource::Kobis => "kobis",
            RankSource::Imdb => "imdb",
        };
        write!(f, "{}", tag)
    }
}

/// Normalized record produced by every ranking source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankEntry {
    pub source: RankSource,
    /// 1-based position within the source's listing
    pub rank: Option<u32>,
    pub title: String,
    /// Four digit release year, or empty
    pub year: String,
    pub score: Option<f64>,
    pub url: Option<String>,
    pub poster: Option<String>,
    /// Source-specific metadata, never read by the aggregator
    #[serde(default)]
    pub extra: Map<String, Value>,
}

/// Compact item returned by the `/rank/*` endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingItem {
    pub title: String,
    pub poster: Option<String>,
    pub rating: Option<f64>,
    pub rank: Option<u32>,
}

impl From<RankEntry> for RankingItem {
    fn from(entry: RankEntry) -> Self {
        Self {
            title: entry.title,
            poster: entry.poster,
            rating: entry.score,
            rank: entry.rank,
        }
    }
}

/// First four characters of a date-like string (`2010-07-16` -> `2010`)
pub fn year_prefix(date: Option<&str>) -> String {
    date.unwrap_or_default().chars().take(4).collect()
}
