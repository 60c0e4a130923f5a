//! Cruise catalog boundary.
//!
//! The catalog itself is owned elsewhere (the marketplace's data layer);
//! this module only defines the read-only query boundary and the search
//! adapter that translates tool arguments into filtered reads.

pub mod memory;
pub mod search;

pub use memory::InMemoryCatalog;
pub use search::CatalogSearcher;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;

/// Projection of a catalog entry: enough for the model to justify a
/// recommendation and for the client to render a result card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CruiseSummary {
    pub id: u64,
    pub name: String,
    pub route: String,
    pub description: String,
    pub tags: Vec<String>,
    pub price: u64,
    pub duration: String,
}

/// Text portion of a catalog filter.
///
/// Empty sub-filters are omitted structurally: `None` matches every
/// record rather than none.
#[derive(Debug, Clone, PartialEq)]
pub enum TextFilter {
    /// No text constraint.
    None,
    /// Case-insensitive phrase match against name, route and description,
    /// OR any tag matching any of `tag_terms`.
    Phrase {
        phrase: String,
        tag_terms: Vec<String>,
    },
    /// Case-insensitive per-word match: any word found in name, route or
    /// description.
    AnyWord(Vec<String>),
}

/// A filtered, bounded, read-only catalog query.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogFilter {
    pub text: TextFilter,
    /// Inclusive price ceiling.
    pub max_price: Option<u64>,
    /// Case-insensitive substring match on the duration field.
    pub duration: Option<String>,
}

/// Read-only query interface over the cruise catalog.
///
/// Implementations must return a deterministic order for identical
/// filters; the stored ranking is the default ordering.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn find(&self, filter: &CatalogFilter, limit: usize) -> Result<Vec<CruiseSummary>>;
}
