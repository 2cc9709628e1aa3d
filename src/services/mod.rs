pub mod emotion;
pub mod http;
pub mod providers;
pub mod rankings;
pub mod recommendations;
pub mod title_search;

pub use emotion::{EmotionAnalyzer, EmotionOutcome};
pub use http::{HttpSession, RetryPolicy};
pub use rankings::{combine, SourceBatch};
pub use recommendations::Recommender;
