use crate::{error::AppResult, models::RankEntry};

/// One adapter's output as handed to the aggregator
pub type SourceBatch = AppResult<Vec<RankEntry>>;

/// Concatenates ranking batches in the order given.
///
/// Failed batches are skipped with a warning. Entries are neither deduplicated
/// nor re-ranked; each keeps the rank its source assigned.
pub fn combine<I>(batches: I) -> Vec<RankEntry>
where
    I: IntoIterator<Item = SourceBatch>,
{
    let mut combined = Vec::new();
    for (position, batch) in batches.into_iter().enumerate() {
        match batch {
            Ok(entries) => combined.extend(entries),
            Err(e) => {
                tracing::warn!(position = position, error = %e, "Skipping ranking batch that is not a list");
            }
        }
    }
    combined
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::AppError, models::RankSource};
    use serde_json::{json, Map};

    fn entries(source: RankSource, titles: &[&str]) -> Vec<RankEntry> {
        titles
            .iter()
            .zip(1u32..)
            .map(|(title, rank)| RankEntry {
                source,
                rank: Some(rank),
                title: title.to_string(),
                year: String::new(),
                score: None,
                url: None,
                poster: None,
                extra: Map::new(),
            })
            .collect()
    }

    #[test]
    fn test_combine_preserves_length_and_order() {
        let a = entries(RankSource::Tmdb, &["A1", "A2"]);
        let b = entries(RankSource::Kobis, &["B1", "B2", "B3"]);
        let c = entries(RankSource::Imdb, &["C1"]);

        let combined = combine([Ok(a.clone()), Ok(b.clone()), Ok(c.clone())]);

        assert_eq!(combined.len(), a.len() + b.len() + c.len());
        let titles: Vec<&str> = combined.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["A1", "A2", "B1", "B2", "B3", "C1"]);
        assert_eq!(combined[2].rank, Some(1));
    }

    #[test]
    fn test_combine_skips_failed_batch() {
        let a = entries(RankSource::Tmdb, &["A1"]);
        let c = entries(RankSource::Imdb, &["C1", "C2"]);

        let with_failure = combine([
            Ok(a.clone()),
            Err(AppError::ExternalApi("chart unavailable".to_string())),
            Ok(c.clone()),
        ]);
        let without = combine([Ok(a), Ok(c)]);

        assert_eq!(with_failure, without);
    }

    #[test]
    fn test_combine_empty() {
        assert!(combine(Vec::<SourceBatch>::new()).is_empty());
    }

    #[test]
    fn test_combine_leaves_extra_untouched() {
        let mut kobis = entries(RankSource::Kobis, &["파묘"]);
        kobis[0]
            .extra
            .insert("nested".to_string(), json!({"any": [1, 2]}));

        let combined = combine([Ok(kobis.clone())]);
        assert_eq!(combined[0].extra, kobis[0].extra);
    }
}
