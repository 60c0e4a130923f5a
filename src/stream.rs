//! Response event ordering.
//!
//! Turns a [`ChatReply`] into the client-facing event sequence: at most
//! one recommendations event first, then content deltas in the exact
//! order the provider emitted them. No buffering or reordering, so the
//! client keeps the provider's pacing.

use futures::{future, stream, Stream, StreamExt};
use std::pin::Pin;

use crate::chat::{ChatReply, ReplyBody};
use crate::types::events::ChatEvent;

/// Stream of client events for one chat response.
pub type EventStream = Pin<Box<dyn Stream<Item = ChatEvent> + Send + 'static>>;

/// Orders the reply into the wire event sequence.
///
/// A mid-stream provider failure ends the sequence; by then headers and
/// earlier frames are already on the wire, so closing is all that is
/// left to do. Dropping the stream tears down the provider connection.
pub fn into_events(reply: ChatReply) -> EventStream {
    let head = stream::iter(
        reply
            .recommendations
            .map(ChatEvent::recommendations)
            .into_iter(),
    );

    let tail: EventStream = match reply.body {
        ReplyBody::Complete(text) => Box::pin(stream::once(future::ready(ChatEvent::content(text)))),
        ReplyBody::Stream(deltas) => Box::pin(deltas.scan((), |_, item| {
            future::ready(match item {
                Ok(delta) => Some(ChatEvent::content(delta)),
                Err(err) => {
                    tracing::warn!(error = %err, "delta stream failed mid-response");
                    None
                }
            })
        })),
    };

    Box::pin(head.chain(tail))
}
