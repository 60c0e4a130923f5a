//! Provider-side SSE decoding: raw bytes -> ordered content deltas.
//!
//! Frames are split on the blank-line delimiter, the `data:` prefix is
//! stripped, and `[DONE]` terminates the stream. Frames without a
//! content delta (role preludes, usage metadata, comments) are skipped;
//! text order is otherwise preserved exactly as emitted.

use bytes::Bytes;
use futures::{stream, Stream, StreamExt};
use serde::Deserialize;

use crate::{BoxStream, Error};

const DELIMITER: &str = "\n\n";
const DATA_PREFIX: &str = "data:";
const DONE_SIGNAL: &str = "[DONE]";

#[derive(Deserialize)]
struct StreamChunk {
    #[serde(default)]
    choices: Vec<StreamChoice>,
}

#[derive(Deserialize)]
struct StreamChoice {
    #[serde(default)]
    delta: StreamDelta,
}

#[derive(Deserialize, Default)]
struct StreamDelta {
    #[serde(default)]
    content: Option<String>,
}

fn delta_from_frame(frame: &str) -> Option<String> {
    let trimmed = frame.trim();
    if trimmed.is_empty() || trimmed.starts_with(':') {
        return None;
    }
    let payload = trimmed.strip_prefix(DATA_PREFIX).unwrap_or(trimmed).trim_start();
    if payload == DONE_SIGNAL {
        return None;
    }
    let chunk: StreamChunk = serde_json::from_str(payload).ok()?;
    chunk.choices.into_iter().next().and_then(|c| c.delta.content)
}

fn is_done(frame: &str) -> bool {
    let trimmed = frame.trim();
    trimmed == DONE_SIGNAL
        || trimmed
            .strip_prefix(DATA_PREFIX)
            .map(|rest| rest.trim() == DONE_SIGNAL)
            .unwrap_or(false)
}

/// Decodes a provider byte stream into text deltas.
///
/// Buffers incrementally so frames split across network chunks are
/// reassembled before parsing.
pub(crate) fn content_deltas<S>(input: S) -> BoxStream<'static, String>
where
    S: Stream<Item = reqwest::Result<Bytes>> + Send + 'static,
{
    let input = Box::pin(input);
    let stream = stream::unfold((input, String::new()), |(mut input, mut buf)| async move {
        loop {
            // Emit the next complete frame from the buffer, if any.
            if let Some(idx) = buf.find(DELIMITER) {
                let frame = buf[..idx].to_string();
                buf = buf[idx + DELIMITER.len()..].to_string();

                if is_done(&frame) {
                    return None;
                }
                if let Some(delta) = delta_from_frame(&frame) {
                    return Some((Ok(delta), (input, buf)));
                }
                continue;
            }

            // Need more bytes.
            match input.next().await {
                Some(Ok(bytes)) => {
                    buf.push_str(&String::from_utf8_lossy(&bytes));
                }
                Some(Err(e)) => {
                    return Some((Err(Error::Transport(e)), (input, buf)));
                }
                None => {
                    // EOF: the remainder may hold one last frame.
                    if is_done(&buf) {
                        return None;
                    }
                    if let Some(delta) = delta_from_frame(&buf) {
                        return Some((Ok(delta), (input, String::new())));
                    }
                    return None;
                }
            }
        }
    });

    Box::pin(stream)
}
