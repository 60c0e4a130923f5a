//! Two-pass catalog search adapter.
//!
//! Translates `search_cruises` tool arguments into filtered reads. The
//! primary pass matches the whole phrase; when it comes back empty the
//! fallback pass retries with the individual search words, which recovers
//! results when the phrase spans fields ("luxury bahamas getaway") but
//! its parts match across records.

use std::sync::Arc;

use crate::catalog::{CatalogFilter, CatalogStore, CruiseSummary, TextFilter};
use crate::types::tool::SearchArguments;
use crate::Result;

/// Upper bound on returned recommendations.
pub const RESULT_LIMIT: usize = 3;

/// Upper bound on search words considered, so a pathological query
/// cannot grow the fallback OR-clause without limit.
pub const MAX_SEARCH_WORDS: usize = 8;

/// Tokens worth matching on: whitespace-split fragments longer than two
/// characters, capped at [`MAX_SEARCH_WORDS`].
pub fn search_words(query: &str) -> Vec<String> {
    query
        .split_whitespace()
        .filter(|w| w.len() > 2)
        .take(MAX_SEARCH_WORDS)
        .map(|w| w.to_string())
        .collect()
}

/// The catalog query adapter. Read-only; never fails on "no matches".
#[derive(Clone)]
pub struct CatalogSearcher {
    store: Arc<dyn CatalogStore>,
}

impl CatalogSearcher {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    pub async fn search(&self, args: &SearchArguments) -> Result<Vec<CruiseSummary>> {
        let query = args
            .query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty());
        let words = query.map(search_words).unwrap_or_default();

        let text = match query {
            None => TextFilter::None,
            Some(phrase) => TextFilter::Phrase {
                phrase: phrase.to_string(),
                // Tags match any of the search words; when every token was
                // too short to survive, fall back to the raw query.
                tag_terms: if words.is_empty() {
                    vec![phrase.to_string()]
                } else {
                    words.clone()
                },
            },
        };

        let primary = CatalogFilter {
            text,
            max_price: args.max_price,
            duration: args.duration.clone(),
        };
        let hits = self.store.find(&primary, RESULT_LIMIT).await?;
        if !hits.is_empty() || words.is_empty() {
            return Ok(hits);
        }

        tracing::debug!(words = words.len(), "phrase search empty, retrying per word");
        let fallback = CatalogFilter {
            text: TextFilter::AnyWord(words),
            max_price: args.max_price,
            duration: args.duration.clone(),
        };
        self.store.find(&fallback, RESULT_LIMIT).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::memory::sample_catalog;
    use crate::catalog::InMemoryCatalog;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Store wrapper that records every filter it is asked to run.
    struct RecordingStore {
        inner: InMemoryCatalog,
        seen: Mutex<Vec<CatalogFilter>>,
    }

    impl RecordingStore {
        fn new(inner: InMemoryCatalog) -> Self {
            Self {
                inner,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl CatalogStore for RecordingStore {
        async fn find(&self, filter: &CatalogFilter, limit: usize) -> Result<Vec<CruiseSummary>> {
            self.seen.lock().unwrap().push(filter.clone());
            self.inner.find(filter, limit).await
        }
    }

    fn searcher() -> (CatalogSearcher, Arc<RecordingStore>) {
        let store = Arc::new(RecordingStore::new(sample_catalog()));
        (CatalogSearcher::new(store.clone()), store)
    }

    #[test]
    fn short_tokens_are_discarded() {
        assert_eq!(search_words("a 4 night luxury cruise"), vec!["night", "luxury", "cruise"]);
        assert!(search_words("a to of").is_empty());
    }

    #[test]
    fn search_words_are_capped() {
        let long = "one! two! three! four! five! sixx seven eight nine! ten!!";
        assert_eq!(search_words(long).len(), MAX_SEARCH_WORDS);
    }

    #[tokio::test]
    async fn empty_query_applies_only_price_and_duration() {
        let (searcher, store) = searcher();
        let hits = searcher
            .search(&SearchArguments {
                query: None,
                max_price: Some(700),
                duration: None,
            })
            .await
            .unwrap();
        let names: Vec<&str> = hits.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Caribbean Dream", "Bahamas Weekend"]);

        let seen = store.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].text, TextFilter::None);
    }

    #[tokio::test]
    async fn no_filters_returns_top_entries_not_an_error() {
        let (searcher, _) = searcher();
        let hits = searcher.search(&SearchArguments::default()).await.unwrap();
        assert_eq!(hits.len(), RESULT_LIMIT);
        let ids: Vec<u64> = hits.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn fallback_runs_per_word_when_phrase_finds_nothing() {
        let (searcher, store) = searcher();
        // No record contains this full phrase, but "glacier" appears in a
        // description and "nassau" in a route.
        let hits = searcher
            .search(&SearchArguments {
                query: Some("glacier nassau voyage".into()),
                max_price: None,
                duration: None,
            })
            .await
            .unwrap();
        let names: Vec<&str> = hits.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Fjord Explorer", "Bahamas Weekend"]);

        let seen = store.seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert!(matches!(seen[0].text, TextFilter::Phrase { .. }));
        assert!(matches!(seen[1].text, TextFilter::AnyWord(_)));
    }

    #[tokio::test]
    async fn fallback_keeps_price_and_duration_constraints() {
        let (searcher, _) = searcher();
        let hits = searcher
            .search(&SearchArguments {
                query: Some("glacier nassau voyage".into()),
                max_price: Some(500),
                duration: None,
            })
            .await
            .unwrap();
        let names: Vec<&str> = hits.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Bahamas Weekend"]);
    }

    #[tokio::test]
    async fn no_fallback_without_search_words() {
        let (searcher, store) = searcher();
        // Every token is too short, and the phrase matches nothing.
        let hits = searcher
            .search(&SearchArguments {
                query: Some("xy zw".into()),
                max_price: None,
                duration: None,
            })
            .await
            .unwrap();
        assert!(hits.is_empty());
        assert_eq!(store.seen.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn identical_arguments_yield_identical_ordered_results() {
        let (searcher, _) = searcher();
        let args = SearchArguments {
            query: Some("luxury".into()),
            max_price: None,
            duration: None,
        };
        let first = searcher.search(&args).await.unwrap();
        let second = searcher.search(&args).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn literal_scenario_four_nights_under_700() {
        let (searcher, _) = searcher();
        let hits = searcher
            .search(&SearchArguments {
                query: None,
                max_price: Some(700),
                duration: Some("4 Nights".into()),
            })
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Caribbean Dream");
        assert!(hits[0].price <= 700);
    }
}
