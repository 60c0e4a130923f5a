//! Tool calling definitions for the completion provider.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Tool definition (function calling).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    #[serde(rename = "type")]
    pub tool_type: String, // "function"
    pub function: FunctionDefinition,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionDefinition {
    pub name: String,
    pub description: Option<String>,
    pub parameters: Option<serde_json::Value>, // JSON Schema
}

/// Tool invocation requested by the model.
///
/// `arguments` is kept as the raw JSON string from the wire; parsing is
/// the interpreter's job so a malformed payload surfaces as its own
/// error class instead of a deserialization failure inside the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    pub arguments: String,
}

/// Arguments of the `search_cruises` tool.
///
/// Every field is optional: an empty object means "no filter" and yields
/// the catalog's top entries in default order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchArguments {
    /// Free-text description of the cruise the traveler wants.
    pub query: Option<String>,
    /// Upper bound on the price, in whole dollars.
    pub max_price: Option<u64>,
    /// Desired duration, e.g. "4 Nights".
    pub duration: Option<String>,
}

impl SearchArguments {
    /// True when no field carries a filter.
    pub fn is_empty(&self) -> bool {
        self.query.is_none() && self.max_price.is_none() && self.duration.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_arguments() {
        let args: SearchArguments =
            serde_json::from_str(r#"{"query":"luxury","maxPrice":700,"duration":"4 Nights"}"#)
                .unwrap();
        assert_eq!(args.query.as_deref(), Some("luxury"));
        assert_eq!(args.max_price, Some(700));
        assert_eq!(args.duration.as_deref(), Some("4 Nights"));
    }

    #[test]
    fn empty_object_means_no_filter() {
        let args: SearchArguments = serde_json::from_str("{}").unwrap();
        assert!(args.is_empty());
    }

    #[test]
    fn unknown_fields_are_tolerated() {
        let args: SearchArguments =
            serde_json::from_str(r#"{"query":"alaska","departurePort":"Seattle"}"#).unwrap();
        assert_eq!(args.query.as_deref(), Some("alaska"));
    }

    #[test]
    fn malformed_payload_is_an_error() {
        assert!(serde_json::from_str::<SearchArguments>(r#"{"maxPrice":"cheap"}"#).is_err());
        assert!(serde_json::from_str::<SearchArguments>("not json").is_err());
    }
}
