//! In-memory catalog store, seeded from a JSON file at startup.

use async_trait::async_trait;
use std::path::Path;

use crate::catalog::{CatalogFilter, CatalogStore, CruiseSummary, TextFilter};
use crate::{Error, Result};

/// Catalog held in memory. Seed order is the default ranking, so
/// identical queries always return identical ordered slices.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    cruises: Vec<CruiseSummary>,
}

impl InMemoryCatalog {
    pub fn new(cruises: Vec<CruiseSummary>) -> Self {
        Self { cruises }
    }

    /// Loads the seed file: a JSON array of cruise entries.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let cruises: Vec<CruiseSummary> = serde_json::from_str(&raw).map_err(|e| {
            Error::Catalog(format!("invalid catalog seed {}: {e}", path.display()))
        })?;
        Ok(Self::new(cruises))
    }

    pub fn len(&self) -> usize {
        self.cruises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cruises.is_empty()
    }

    fn matches(cruise: &CruiseSummary, filter: &CatalogFilter) -> bool {
        if let Some(ceiling) = filter.max_price {
            if cruise.price > ceiling {
                return false;
            }
        }
        if let Some(duration) = &filter.duration {
            if !contains_ci(&cruise.duration, duration) {
                return false;
            }
        }
        match &filter.text {
            TextFilter::None => true,
            TextFilter::Phrase { phrase, tag_terms } => {
                contains_ci(&cruise.name, phrase)
                    || contains_ci(&cruise.route, phrase)
                    || contains_ci(&cruise.description, phrase)
                    || cruise
                        .tags
                        .iter()
                        .any(|tag| tag_terms.iter().any(|term| contains_ci(tag, term)))
            }
            TextFilter::AnyWord(words) => words.iter().any(|word| {
                contains_ci(&cruise.name, word)
                    || contains_ci(&cruise.route, word)
                    || contains_ci(&cruise.description, word)
            }),
        }
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[async_trait]
impl CatalogStore for InMemoryCatalog {
    async fn find(&self, filter: &CatalogFilter, limit: usize) -> Result<Vec<CruiseSummary>> {
        Ok(self
            .cruises
            .iter()
            .filter(|c| Self::matches(c, filter))
            .take(limit)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
pub(crate) fn sample_catalog() -> InMemoryCatalog {
    InMemoryCatalog::new(vec![
        CruiseSummary {
            id: 1,
            name: "Caribbean Dream".into(),
            route: "Miami - Cozumel - Grand Cayman".into(),
            description: "A relaxed island-hopping escape with snorkeling stops.".into(),
            tags: vec!["family".into(), "beach".into()],
            price: 650,
            duration: "4 Nights".into(),
        },
        CruiseSummary {
            id: 2,
            name: "Luxury Riviera".into(),
            route: "Barcelona - Nice - Rome".into(),
            description: "Five-star dining and spa suites along the Mediterranean coast.".into(),
            tags: vec!["luxury".into(), "couples".into()],
            price: 1400,
            duration: "7 Nights".into(),
        },
        CruiseSummary {
            id: 3,
            name: "Fjord Explorer".into(),
            route: "Bergen - Geiranger - Flam".into(),
            description: "Glacier hikes and quiet fjords aboard a small expedition ship.".into(),
            tags: vec!["adventure".into(), "nature".into()],
            price: 990,
            duration: "5 Nights".into(),
        },
        CruiseSummary {
            id: 4,
            name: "Bahamas Weekend".into(),
            route: "Fort Lauderdale - Nassau".into(),
            description: "A quick luxury getaway with a private-island beach day.".into(),
            tags: vec!["luxury".into(), "beach".into()],
            price: 420,
            duration: "3 Nights".into(),
        },
    ])
}
