use crate::services::providers::{MovieCatalog, Translator};

/// Title search with a cross-language retry
///
/// Searches the catalog with `keyword` as given (usually an English original
/// title). If nothing matches, the keyword is translated English -> Korean and
/// searched once more. Every failure ends in an empty list.
pub async fn search_with_fallback(
    catalog: &dyn MovieCatalog,
    translator: &dyn Translator,
    keyword: &str,
    count: usize,
) -> Vec<String> {
    let titles = catalog.search_titles(keyword, count).await;
    if !titles.is_empty() {
        return titles;
    }

    let translated = match translator.translate(keyword, "en", "ko").await {
        Ok(translated) if !translated.trim().is_empty() => translated,
        Ok(_) => return Vec::new(),
        Err(e) => {
            tracing::warn!(keyword = %keyword, error = %e, "Keyword translation failed");
            return Vec::new();
        }
    };

    let titles = catalog.search_titles(&translated, count).await;
    tracing::info!(
        keyword = %keyword,
        translated = %translated,
        results = titles.len(),
        "Retried title search in Korean"
    );
    titles
}
