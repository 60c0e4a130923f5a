//! Client-facing event vocabulary and its SSE framing.
//!
//! The wire format is one JSON fragment per `data:` line. Keeping the
//! encoder here, away from the orchestration code, lets the framing be
//! unit-tested without a live provider.

use serde::{Deserialize, Serialize};

use crate::catalog::CruiseSummary;

/// One event of the chat response stream.
///
/// The `recommendations` event is emitted at most once, before any
/// content, and only when a catalog search actually ran: an empty array
/// tells the client "searched, found nothing", which is distinct from no
/// event at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChatEvent {
    Recommendations { recommendations: Vec<CruiseSummary> },
    Content { content: String },
}

impl ChatEvent {
    pub fn recommendations(items: Vec<CruiseSummary>) -> Self {
        ChatEvent::Recommendations {
            recommendations: items,
        }
    }

    pub fn content(text: impl Into<String>) -> Self {
        ChatEvent::Content {
            content: text.into(),
        }
    }

    /// Encodes the event as a single SSE frame: `data: <json>\n\n`.
    pub fn sse_frame(&self) -> String {
        // Both variants are plain data with string keys; serialization
        // cannot fail.
        let json = serde_json::to_string(self).expect("chat event serializes to JSON");
        format!("data: {json}\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_frame_has_sse_shape() {
        let frame = ChatEvent::content("Ahoy").sse_frame();
        assert_eq!(frame, "data: {\"content\":\"Ahoy\"}\n\n");
    }

    #[test]
    fn empty_recommendations_still_encode_the_key() {
        let frame = ChatEvent::recommendations(Vec::new()).sse_frame();
        assert_eq!(frame, "data: {\"recommendations\":[]}\n\n");
    }

    #[test]
    fn frames_round_trip_through_serde() {
        let ev = ChatEvent::content("a delta");
        let json = serde_json::to_string(&ev).unwrap();
        let back: ChatEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ev);
    }
}
