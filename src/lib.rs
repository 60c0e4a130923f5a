//! # voyage-assistant
//!
//! Conversational cruise search for the Voyage marketplace.
//!
//! The service exposes a single chat endpoint. Each request drives a
//! two-step exchange against a completion provider: a first,
//! tool-eligible call decides whether to search the cruise catalog; if
//! the model asks for a search, the catalog results are fed back through
//! a second, streaming call whose deltas are relayed to the client as
//! Server-Sent Events. A rate-limited primary credential fails over to a
//! secondary credential exactly once, re-running the whole exchange.
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`types`] | Core type definitions (messages, tools, client events) |
//! | [`catalog`] | Cruise catalog boundary and the two-pass search adapter |
//! | [`completion`] | Completion provider client (non-streaming and streaming) |
//! | [`chat`] | Tool-call interpretation and the failover orchestrator |
//! | [`stream`] | Ordering of recommendation and content events |
//! | [`server`] | HTTP surface: routing, validation, SSE responses |
//! | [`config`] | Environment-driven service configuration |

pub mod catalog;
pub mod chat;
pub mod completion;
pub mod config;
pub mod server;
pub mod stream;
pub mod types;

use futures::Stream;
use std::pin::Pin;

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// A pinned, boxed stream of fallible items.
pub type BoxStream<'a, T> = Pin<Box<dyn Stream<Item = Result<T>> + Send + 'a>>;

pub mod error;
pub use error::Error;

// Re-export the main types for consumers and tests.
pub use catalog::{CatalogStore, CruiseSummary, InMemoryCatalog};
pub use chat::ChatOrchestrator;
pub use completion::{CompletionClient, CredentialId};
pub use config::AppConfig;
pub use types::events::ChatEvent;
pub use types::message::{ChatMessage, Role};
pub use types::tool::SearchArguments;
