//! The failover orchestration loop.
//!
//! One exchange is: tool-eligible completion, optional catalog search,
//! streaming follow-up completion. The loop runs the exchange over an
//! ordered credential list bounded to two entries, so "at most one
//! retry" holds structurally. Only the rate-limit error class advances
//! the loop; everything else is terminal.

use std::sync::Arc;
use uuid::Uuid;

use crate::catalog::{CatalogSearcher, CatalogStore, CruiseSummary};
use crate::chat::interpreter::{self, ToolOutcome, SEARCH_TOOL};
use crate::chat::prompt::build_prompt;
use crate::completion::{CompletionClient, CredentialId, ProviderMessage};
use crate::types::message::ChatMessage;
use crate::{BoxStream, Error, Result};

/// Outcome of one successful exchange, ready for streaming to the client.
pub struct ChatReply {
    /// `Some` whenever a catalog search ran, even with zero hits.
    pub recommendations: Option<Vec<CruiseSummary>>,
    pub body: ReplyBody,
}

/// The answer text, either already complete (no tool call was made, so
/// no second request exists to stream from) or as a live delta stream.
pub enum ReplyBody {
    Complete(String),
    Stream(BoxStream<'static, String>),
}

/// Drives the two-call exchange with single-step credential failover.
pub struct ChatOrchestrator {
    completions: Arc<CompletionClient>,
    searcher: CatalogSearcher,
}

impl ChatOrchestrator {
    pub fn new(completions: Arc<CompletionClient>, store: Arc<dyn CatalogStore>) -> Self {
        Self {
            completions,
            searcher: CatalogSearcher::new(store),
        }
    }

    /// Runs the exchange for one request.
    ///
    /// A rate-limited primary attempt restarts the whole exchange on the
    /// secondary credential, so conversational state and the tool schema
    /// stay consistent with whichever credential answers. A second
    /// rate limit, or a rate limit with no secondary configured, is
    /// terminal.
    pub async fn respond(&self, history: &[ChatMessage]) -> Result<ChatReply> {
        let prompt = build_prompt(history);
        let exchange_id = Uuid::new_v4().to_string();

        let mut last_rate_limit = None;
        for credential in self.credential_order() {
            match self.attempt(&exchange_id, credential, &prompt).await {
                Ok(reply) => return Ok(reply),
                Err(err) if err.is_rate_limited() => {
                    tracing::warn!(
                        exchange_id = %exchange_id,
                        credential = %credential,
                        "credential rate limited"
                    );
                    last_rate_limit = Some(err);
                }
                Err(err) => return Err(err),
            }
        }

        Err(last_rate_limit
            .unwrap_or_else(|| Error::Configuration("no completion credentials".into())))
    }

    fn credential_order(&self) -> Vec<CredentialId> {
        if self.completions.has_secondary() {
            vec![CredentialId::Primary, CredentialId::Secondary]
        } else {
            vec![CredentialId::Primary]
        }
    }

    async fn attempt(
        &self,
        exchange_id: &str,
        credential: CredentialId,
        prompt: &[ProviderMessage],
    ) -> Result<ChatReply> {
        let turn = self
            .completions
            .complete(
                credential,
                exchange_id,
                prompt,
                Some(std::slice::from_ref(&*SEARCH_TOOL)),
            )
            .await?;

        match interpreter::interpret(&turn)? {
            ToolOutcome::Answer(text) => {
                tracing::debug!(exchange_id, "answered without a catalog search");
                Ok(ChatReply {
                    recommendations: None,
                    body: ReplyBody::Complete(text),
                })
            }
            ToolOutcome::Search(search) => {
                let results = self.searcher.search(&search.args).await?;
                tracing::debug!(exchange_id, hits = results.len(), "catalog search ran");

                let mut follow_up = prompt.to_vec();
                follow_up.extend(interpreter::follow_up_messages(&search, &results)?);

                let deltas = self
                    .completions
                    .stream(credential, exchange_id, &follow_up)
                    .await?;
                Ok(ChatReply {
                    recommendations: Some(results),
                    body: ReplyBody::Stream(deltas),
                })
            }
        }
    }
}
