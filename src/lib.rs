//! Emotion-driven movie recommendations and normalized box office rankings.
//!
//! Two independent flows share one HTTP session:
//! - diary text -> emotion -> LLM title keywords -> TMDB titles -> LLM write-up
//! - TMDB / KOBIS / IMDb rankings -> [`models::RankEntry`] -> combined list

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
