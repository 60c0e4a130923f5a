//! Tool-call interpretation.
//!
//! Inspects the first, tool-eligible completion for a `search_cruises`
//! request, parses its arguments, and builds the messages that carry the
//! search results back into the second completion call.

use once_cell::sync::Lazy;

use crate::catalog::CruiseSummary;
use crate::completion::{AssistantTurn, ProviderMessage};
use crate::types::tool::{FunctionDefinition, SearchArguments, ToolCall, ToolDefinition};
use crate::{Error, Result};

pub const SEARCH_TOOL_NAME: &str = "search_cruises";

/// The single tool offered to the model. Parameters are generated from
/// [`SearchArguments`] so the advertised schema cannot drift from the
/// parser.
pub static SEARCH_TOOL: Lazy<ToolDefinition> = Lazy::new(|| ToolDefinition {
    tool_type: "function".to_string(),
    function: FunctionDefinition {
        name: SEARCH_TOOL_NAME.to_string(),
        description: Some(
            "Search the cruise catalog by free-text query, maximum price and duration. \
             All fields are optional; omit a field to leave it unconstrained."
                .to_string(),
        ),
        parameters: Some(
            serde_json::to_value(schemars::schema_for!(SearchArguments))
                .expect("search tool schema serializes to JSON"),
        ),
    },
});

/// What the model decided on the first call.
#[derive(Debug)]
pub enum ToolOutcome {
    /// No tool call: the assistant's text is the whole answer.
    Answer(String),
    /// The model asked for a catalog search.
    Search(SearchCall),
}

/// A validated `search_cruises` invocation.
#[derive(Debug, Clone)]
pub struct SearchCall {
    pub call: ToolCall,
    pub args: SearchArguments,
}

/// Interprets a non-streaming completion.
///
/// Only the first tool call is honored; a response carrying several is
/// unusual enough to log but not to fail on.
pub fn interpret(turn: &AssistantTurn) -> Result<ToolOutcome> {
    let Some(first) = turn.tool_calls.first() else {
        return Ok(ToolOutcome::Answer(
            turn.content.clone().unwrap_or_default(),
        ));
    };

    if turn.tool_calls.len() > 1 {
        tracing::debug!(
            ignored = turn.tool_calls.len() - 1,
            "model returned multiple tool calls, honoring the first"
        );
    }

    if first.name != SEARCH_TOOL_NAME {
        return Err(Error::ToolArguments(format!(
            "model requested undeclared tool '{}'",
            first.name
        )));
    }

    let args: SearchArguments = serde_json::from_str(&first.arguments).map_err(|e| {
        Error::ToolArguments(format!("unparseable {SEARCH_TOOL_NAME} arguments: {e}"))
    })?;

    Ok(ToolOutcome::Search(SearchCall {
        call: first.clone(),
        args,
    }))
}

/// The two messages appended to the prompt ahead of the streaming call:
/// the assistant turn that requested the search, then its result.
pub fn follow_up_messages(
    search: &SearchCall,
    results: &[CruiseSummary],
) -> Result<Vec<ProviderMessage>> {
    let payload = serde_json::to_string(results)?;
    Ok(vec![
        ProviderMessage::assistant_tool_call(&search.call),
        ProviderMessage::tool_result(search.call.id.clone(), payload),
    ])
}
