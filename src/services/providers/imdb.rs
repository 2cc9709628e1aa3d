//! IMDb top chart scraper
//!
//! Markup parsing is isolated behind [`ChartParser`]: it only pulls raw strings
//! out of the page. Turning those strings into [`RankEntry`] values (links,
//! poster resizing, rating parsing) happens in [`ImdbChartClient`], so a new
//! page layout only needs a new parser.
use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{RankEntry, RankSource},
    services::http::{ensure_success, HttpSession, NO_PARAMS},
};
use scraper::{ElementRef, Html, Selector};
use serde_json::Map;
use std::{sync::Arc, time::Duration};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
pub const DEFAULT_CHART_LIMIT: usize = 250;

/// Marker separating the image id from IMDb's resize/crop suffix
const THUMBNAIL_DELIMITER: &str = "._";
const FULL_SIZE_SUFFIX: &str = "._V1_.jpg";

/// Raw fields of one chart item, before normalization
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartRow {
    pub title: Option<String>,
    pub href: Option<String>,
    pub year: Option<String>,
    pub rating: Option<String>,
    pub image_src: Option<String>,
}

pub trait ChartParser: Send + Sync {
    /// Extract at most `limit` rows in page order
    fn parse(&self, html: &str, limit: usize) -> AppResult<Vec<ChartRow>>;
}

/// CSS selectors for the current chart layout
#[derive(Debug, Clone)]
pub struct ChartSelectors {
    pub item: &'static str,
    pub title: &'static str,
    pub rating: &'static str,
    pub year: &'static str,
    pub poster: &'static str,
}

impl Default for ChartSelectors {
    fn default() -> Self {
        Self {
            item: "ul.ipc-metadata-list li.ipc-metadata-list-summary-item",
            title: "a.ipc-title-link-wrapper",
            rating: ".ipc-rating-star--rating",
            year: ".ipc-metadata-list-summary-item__li",
            poster: "img.ipc-image",
        }
    }
}

/// [`ChartParser`] driven by CSS selectors
#[derive(Debug, Clone, Default)]
pub struct SelectorChartParser {
    selectors: ChartSelectors,
}

impl SelectorChartParser {
    pub fn new(selectors: ChartSelectors) -> Self {
        Self { selectors }
    }
}

fn compile(selector: &str) -> AppResult<Selector> {
    Selector::parse(selector)
        .map_err(|e| AppError::Internal(format!("invalid selector {:?}: {}", selector, e)))
}

fn text_of(item: &ElementRef<'_>, selector: &Selector) -> Option<String> {
    item.select(selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
}

fn attr_of(item: &ElementRef<'_>, selector: &Selector, attr: &str) -> Option<String> {
    item.select(selector)
        .next()
        .and_then(|el| el.value().attr(attr))
        .map(str::to_string)
}

impl ChartParser for SelectorChartParser {
    fn parse(&self, html: &str, limit: usize) -> AppResult<Vec<ChartRow>> {
        let item = compile(self.selectors.item)?;
        let title = compile(self.selectors.title)?;
        let rating = compile(self.selectors.rating)?;
        let year = compile(self.selectors.year)?;
        let poster = compile(self.selectors.poster)?;

        let document = Html::parse_document(html);
        let rows = document
            .select(&item)
            .take(limit)
            .map(|node| ChartRow {
                title: text_of(&node, &title),
                href: attr_of(&node, &title, "href"),
                year: text_of(&node, &year),
                rating: text_of(&node, &rating),
                image_src: attr_of(&node, &poster, "src"),
            })
            .collect();

        Ok(rows)
    }
}

/// Rewrites a thumbnail URL to the full-resolution variant.
///
/// `https://m.media-amazon.com/images/M/abc._V1_QL75_UX140_.jpg` becomes
/// `https://m.media-amazon.com/images/M/abc._V1_.jpg`; URLs without the
/// delimiter pass through.
pub fn full_size_poster(src: &str) -> String {
    match src.split_once(THUMBNAIL_DELIMITER) {
        Some((base, _)) => format!("{}{}", base, FULL_SIZE_SUFFIX),
        None => src.to_string(),
    }
}

#[derive(Clone)]
pub struct ImdbChartClient {
    session: HttpSession,
    base_url: String,
    parser: Arc<dyn ChartParser>,
}

impl ImdbChartClient {
    pub fn new(session: HttpSession, base_url: impl Into<String>, parser: Arc<dyn ChartParser>) -> Self {
        Self {
            session,
            base_url: base_url.into(),
            parser,
        }
    }

    pub fn from_config(session: HttpSession, config: &Config) -> Self {
        Self::new(
            session,
            config.imdb_base_url.clone(),
            Arc::new(SelectorChartParser::default()),
        )
    }

    /// Fetch the top chart, keeping at most `limit` entries
    pub async fn fetch_chart(&self, limit: usize) -> AppResult<Vec<RankEntry>> {
        let url = format!("{}/chart/top", self.base_url);
        let response = self.session.get(&url, NO_PARAMS, REQUEST_TIMEOUT).await?;
        let body = ensure_success("IMDb", response)?.text().await?;

        let rows = self.parser.parse(&body, limit)?;
        let entries: Vec<RankEntry> = rows
            .into_iter()
            .zip(1u32..)
            .map(|(row, rank)| self.rank_entry(row, rank))
            .collect();

        if entries.is_empty() {
            tracing::warn!(provider = %RankSource::Imdb, "Chart page yielded no items");
        } else {
            tracing::info!(results = entries.len(), provider = %RankSource::Imdb, "Top chart scraped");
        }

        Ok(entries)
    }

    fn rank_entry(&self, row: ChartRow, rank: u32) -> RankEntry {
        let score = row.rating.as_deref().and_then(|raw| match raw.parse::<f64>() {
            Ok(score) => Some(score),
            Err(_) => {
                tracing::warn!(rank = rank, rating = %raw, "Unparseable IMDb rating");
                None
            }
        });

        let url = row.href.as_deref().map(|href| {
            let path = href.split('?').next().unwrap_or(href);
            format!("{}{}", self.base_url, path)
        });

        RankEntry {
            source: RankSource::Imdb,
            rank: Some(rank),
            title: row.title.unwrap_or_default(),
            year: row.year.unwrap_or_default(),
            score,
            url,
            poster: row.image_src.as_deref().map(full_size_poster),
            extra: Map::new(),
        }
    }
}
