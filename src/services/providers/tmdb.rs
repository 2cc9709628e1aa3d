//! TMDB (The Movie Database) API client
//!
//! Covers the three things the service needs from TMDB:
//! 1. Top rated listing, normalized into [`RankEntry`] values
//! 2. Title search, both for the `/search` endpoint and for recommendations
//! 3. Poster resolution for sources that carry no artwork (KOBIS)
use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{year_prefix, RankEntry, RankSource, SearchMovie, TmdbMovie, TmdbPage},
    services::{
        http::{ensure_success, HttpSession},
        providers::{MovieCatalog, PosterLookup},
    },
};
use serde_json::{json, Map};
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const SEARCH_LANGUAGE: &str = "ko-KR";
const TOP_RATED_PAGE_SIZE: u32 = 20;

#[derive(Debug, Clone)]
pub struct TmdbClient {
    session: HttpSession,
    api_key: Option<String>,
    api_url: String,
    image_url: String,
    web_url: String,
}

impl TmdbClient {
    pub fn new(
        session: HttpSession,
        api_key: Option<String>,
        api_url: impl Into<String>,
        image_url: impl Into<String>,
        web_url: impl Into<String>,
    ) -> Self {
        Self {
            session,
            api_key,
            api_url: api_url.into(),
            image_url: image_url.into(),
            web_url: web_url.into(),
        }
    }

    pub fn from_config(session: HttpSession, config: &Config) -> Self {
        Self::new(
            session,
            Some(config.tmdb_api_key.clone()),
            config.tmdb_api_url.clone(),
            config.tmdb_image_url.clone(),
            config.tmdb_web_url.clone(),
        )
    }

    /// Explicit key wins over the configured one; blank keys count as missing
    fn resolve_key<'a>(&'a self, api_key: Option<&'a str>) -> Option<&'a str> {
        api_key
            .or(self.api_key.as_deref())
            .filter(|key| !key.trim().is_empty())
    }

    fn poster_url(&self, poster_path: Option<&str>) -> Option<String> {
        poster_path
            .filter(|path| !path.is_empty())
            .map(|path| format!("{}{}", self.image_url, path))
    }

    /// One `/search/movie` call, failing on any non-2xx status
    async fn search_page(
        &self,
        api_key: &str,
        query: &str,
        year: Option<&str>,
    ) -> AppResult<TmdbPage> {
        let url = format!("{}/search/movie", self.api_url);
        let mut params = vec![
            ("api_key", api_key),
            ("query", query),
            ("language", SEARCH_LANGUAGE),
            ("page", "1"),
        ];
        if let Some(year) = year.filter(|y| !y.is_empty()) {
            params.push(("year", year));
        }

        let response = self.session.get(&url, &params, REQUEST_TIMEOUT).await?;
        let page: TmdbPage = ensure_success("TMDB", response)?.json().await?;
        Ok(page)
    }

    /// Fetch one page of the top rated listing
    pub async fn fetch_top_rated(
        &self,
        api_key: Option<&str>,
        language: &str,
        page: u32,
    ) -> AppResult<Vec<RankEntry>> {
        let api_key = self
            .resolve_key(api_key)
            .ok_or(AppError::MissingApiKey("TMDB_API_KEY"))?;
        let first_rank = first_rank_of_page(page)?;

        let url = format!("{}/movie/top_rated", self.api_url);
        let page_param = page.to_string();
        let params = [
            ("api_key", api_key),
            ("language", language),
            ("page", page_param.as_str()),
        ];

        let response = self.session.get(&url, &params, REQUEST_TIMEOUT).await?;
        let listing: TmdbPage = ensure_success("TMDB", response)?.json().await?;

        let entries: Vec<RankEntry> = listing
            .results
            .into_iter()
            .zip(first_rank..=u32::MAX)
            .map(|(movie, rank)| self.rank_entry(movie, rank))
            .collect();

        tracing::info!(
            page = page,
            results = entries.len(),
            provider = %RankSource::Tmdb,
            "Top rated listing fetched"
        );

        Ok(entries)
    }

    fn rank_entry(&self, movie: TmdbMovie, rank: u32) -> RankEntry {
        let mut extra = Map::new();
        extra.insert("original_title".to_string(), json!(movie.original_title));
        extra.insert("tmdb_id".to_string(), json!(movie.id));
        extra.insert("vote_count".to_string(), json!(movie.vote_count));

        RankEntry {
            source: RankSource::Tmdb,
            rank: Some(rank),
            title: movie.display_title(),
            year: year_prefix(movie.release_date.as_deref()),
            score: movie.vote_average,
            url: movie.id.map(|id| format!("{}/movie/{}", self.web_url, id)),
            poster: self.poster_url(movie.poster_path.as_deref()),
            extra,
        }
    }

    /// Search for movies by title for the `/search` endpoint
    pub async fn search_movies(&self, query: &str) -> AppResult<Vec<SearchMovie>> {
        if query.trim().is_empty() {
            return Err(AppError::InvalidInput("검색어가 필요합니다.".to_string()));
        }
        let api_key = self
            .resolve_key(None)
            .ok_or(AppError::MissingApiKey("TMDB_API_KEY"))?;

        let page = self.search_page(api_key, query, None).await?;
        let movies: Vec<SearchMovie> = page
            .results
            .into_iter()
            .map(|movie| SearchMovie {
                poster: self.poster_url(movie.poster_path.as_deref()),
                title: movie.title,
                release_date: movie.release_date,
                rating: movie.vote_average,
                overview: movie.overview,
            })
            .collect();

        tracing::info!(
            query = %query,
            results = movies.len(),
            provider = "tmdb",
            "Title search completed"
        );

        Ok(movies)
    }
}

/// Rank of the first entry on a 1-based `page`; the whole page must fit in `u32`
fn first_rank_of_page(page: u32) -> AppResult<u32> {
    if page == 0 {
        return Err(AppError::InvalidInput("page starts at 1".to_string()));
    }
    let offset = (page - 1)
        .checked_mul(TOP_RATED_PAGE_SIZE)
        .filter(|offset| offset.checked_add(TOP_RATED_PAGE_SIZE).is_some())
        .ok_or_else(|| AppError::InvalidInput(format!("page {} is out of range", page)))?;
    Ok(offset + 1)
}

#[async_trait::async_trait]
impl PosterLookup for TmdbClient {
    async fn resolve_poster(
        &self,
        title: &str,
        year: Option<&str>,
        api_key: Option<&str>,
    ) -> Option<String> {
        let Some(api_key) = self.resolve_key(api_key) else {
            tracing::warn!(title = %title, "No TMDB key available for poster lookup");
            return None;
        };

        match self.search_page(api_key, title, year).await {
            Ok(page) => {
                let poster = page
                    .results
                    .first()
                    .and_then(|movie| self.poster_url(movie.poster_path.as_deref()));
                if poster.is_none() {
                    tracing::debug!(title = %title, "No TMDB poster found");
                }
                poster
            }
            Err(e) => {
                tracing::warn!(title = %title, error = %e, "TMDB poster lookup failed");
                None
            }
        }
    }
}

#[async_trait::async_trait]
impl MovieCatalog for TmdbClient {
    async fn search_titles(&self, query: &str, count: usize) -> Vec<String> {
        let Some(api_key) = self.resolve_key(None) else {
            tracing::warn!(query = %query, "No TMDB key available for title search");
            return Vec::new();
        };

        match self.search_page(api_key, query, None).await {
            Ok(page) => page
                .results
                .into_iter()
                .take(count)
                .filter_map(|movie| movie.title)
                .collect(),
            Err(e) => {
                tracing::warn!(query = %query, error = %e, "TMDB title search failed");
                Vec::new()
            }
        }
    }
}
