//! KOBIS (Korean Film Council) daily box office client
//!
//! KOBIS publishes no artwork, so each listed title can optionally be resolved
//! through a [`PosterLookup`]. Lookups run one at a time with a fixed pause in
//! between to stay under the TMDB rate limit; total latency grows with the list.
use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{year_prefix, KobisDailyItem, KobisResponse, RankEntry, RankSource},
    services::{
        http::{ensure_success, HttpSession},
        providers::PosterLookup,
    },
};
use chrono::{DateTime, Duration as ChronoDuration, FixedOffset, Utc};
use serde_json::{json, Map};
use std::{sync::Arc, time::Duration};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const POSTER_LOOKUP_DELAY: Duration = Duration::from_millis(300);
const KST_OFFSET_SECS: i32 = 9 * 3600;

#[derive(Clone)]
pub struct KobisClient {
    session: HttpSession,
    api_key: Option<String>,
    api_url: String,
    posters: Arc<dyn PosterLookup>,
    poster_delay: Duration,
}

impl KobisClient {
    pub fn new(
        session: HttpSession,
        api_key: Option<String>,
        api_url: impl Into<String>,
        posters: Arc<dyn PosterLookup>,
    ) -> Self {
        Self {
            session,
            api_key,
            api_url: api_url.into(),
            posters,
            poster_delay: POSTER_LOOKUP_DELAY,
        }
    }

    pub fn from_config(
        session: HttpSession,
        config: &Config,
        posters: Arc<dyn PosterLookup>,
    ) -> Self {
        Self::new(
            session,
            Some(config.kobis_api_key.clone()),
            config.kobis_api_url.clone(),
            posters,
        )
    }

    /// Override the pause between poster lookups
    pub fn with_poster_delay(mut self, delay: Duration) -> Self {
        self.poster_delay = delay;
        self
    }

    /// Daily box office for `date` (`YYYYMMDD`), defaulting to yesterday in KST
    pub async fn fetch_daily_box_office(
        &self,
        api_key: Option<&str>,
        date: Option<&str>,
        fetch_posters: bool,
    ) -> AppResult<Vec<RankEntry>> {
        let api_key = api_key
            .or(self.api_key.as_deref())
            .filter(|key| !key.trim().is_empty())
            .ok_or(AppError::MissingApiKey("KOBIS_API_KEY"))?;
        let target_date = match date {
            Some(date) => date.to_string(),
            None => yesterday_kst()?,
        };

        let url = format!(
            "{}/boxoffice/searchDailyBoxOfficeList.json",
            self.api_url
        );
        let params = [("key", api_key), ("targetDt", target_date.as_str())];

        let response = self.session.get(&url, &params, REQUEST_TIMEOUT).await?;
        let body: KobisResponse = ensure_success("KOBIS", response)?.json().await?;
        let items = body.box_office_result.daily_box_office_list;

        let mut entries = Vec::with_capacity(items.len());
        for item in items {
            let title = item.movie_nm.clone().unwrap_or_default();
            let year = year_prefix(item.open_dt.as_deref());

            let poster = if fetch_posters && !title.is_empty() {
                tracing::info!(title = %title, provider = %RankSource::Kobis, "Resolving poster");
                let poster = self
                    .posters
                    .resolve_poster(&title, Some(year.as_str()).filter(|y| !y.is_empty()), None)
                    .await;
                tokio::time::sleep(self.poster_delay).await;
                poster
            } else {
                None
            };

            entries.push(rank_entry(item, title, year, poster));
        }

        tracing::info!(
            date = %target_date,
            results = entries.len(),
            posters = entries.iter().filter(|e| e.poster.is_some()).count(),
            provider = %RankSource::Kobis,
            "Daily box office fetched"
        );

        Ok(entries)
    }
}

fn rank_entry(item: KobisDailyItem, title: String, year: String, poster: Option<String>) -> RankEntry {
    let rank = item
        .rank
        .as_deref()
        .and_then(|r| r.trim().parse::<u32>().ok())
        .filter(|r| *r >= 1);

    let mut extra = Map::new();
    extra.insert("movieCd".to_string(), json!(item.movie_cd));
    extra.insert("openDt".to_string(), json!(item.open_dt));
    extra.insert("audiCnt".to_string(), json!(item.audi_cnt));
    extra.insert("audiAcc".to_string(), json!(item.audi_acc));
    extra.insert("rankInten".to_string(), json!(item.rank_inten));

    RankEntry {
        source: RankSource::Kobis,
        rank,
        title,
        year,
        score: None,
        url: None,
        poster,
        extra,
    }
}

/// Yesterday's calendar date at UTC+9, formatted `YYYYMMDD`
pub fn yesterday_kst() -> AppResult<String> {
    yesterday_kst_from(Utc::now())
}

/// Calendar day before `now` as seen in KST
pub fn yesterday_kst_from(now: DateTime<Utc>) -> AppResult<String> {
    let kst = FixedOffset::east_opt(KST_OFFSET_SECS)
        .ok_or_else(|| AppError::Internal("invalid KST offset".to_string()))?;
    let yesterday = now.with_timezone(&kst) - ChronoDuration::days(1);
    Ok(yesterday.format("%Y%m%d").to_string())
}
