use thiserror::Error;

/// Unified error type for the service.
///
/// Classification and recovery decisions live in the orchestrator; the
/// completion client and catalog only construct these variants and never
/// swallow or retry on their own.
#[derive(Debug, Error)]
pub enum Error {
    /// The incoming request was malformed (missing/empty message list).
    #[error("{0}")]
    Validation(String),

    /// The provider answered HTTP 429 for the selected credential.
    #[error("completion provider rate limited{}", retry_after_hint(.retry_after_secs))]
    RateLimited { retry_after_secs: Option<u64> },

    /// The model requested the search tool with arguments we could not parse,
    /// or named a tool that was never offered.
    #[error("unusable tool call: {0}")]
    ToolArguments(String),

    /// Non-success, non-429 provider response.
    #[error("completion provider returned HTTP {status}: {message}")]
    Remote { status: u16, message: String },

    /// The provider answered 200 but the payload did not have the expected shape.
    #[error("malformed provider response: {0}")]
    MalformedResponse(String),

    /// Network-level failure talking to the provider.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Catalog store failure.
    #[error("catalog error: {0}")]
    Catalog(String),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn retry_after_hint(retry_after: &Option<u64>) -> String {
    match retry_after {
        Some(secs) => format!(" (retry after {secs}s)"),
        None => String::new(),
    }
}

impl Error {
    /// Whether this failure may be recovered by switching credentials.
    ///
    /// Only the provider's own rate-limit signal qualifies; invalid
    /// requests and tool-argument failures would fail identically on any
    /// credential.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Error::RateLimited { .. })
    }
}
