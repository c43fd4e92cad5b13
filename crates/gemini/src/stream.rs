//! SSE parsing for `streamGenerateContent?alt=sse`.
//!
//! Each event is a block of lines separated by a blank line; the payload
//! is the `data: ` line holding one JSON [`WireResponse`].

use crate::WireResponse;
use anyhow::Result;
use pcore::Response;

/// Split complete SSE blocks off the front of `buf`.
///
/// The buffer holds raw bytes so a UTF-8 sequence split across network
/// reads is only decoded once its block is complete. Carriage returns are
/// dropped so `\r\n\r\n` separators are handled like `\n\n`.
/// Incomplete trailing data stays in the buffer.
pub(crate) fn drain_blocks(buf: &mut Vec<u8>) -> Vec<String> {
    buf.retain(|&byte| byte != b'\r');

    let mut blocks = Vec::new();
    while let Some(pos) = buf.windows(2).position(|pair| pair == b"\n\n") {
        blocks.push(String::from_utf8_lossy(&buf[..pos]).into_owned());
        buf.drain(..pos + 2);
    }
    blocks
}

/// Parse a single SSE block.
///
/// Returns `None` for blocks without a payload and for payloads that fail
/// to decode (logged and skipped). In-band errors and blocked prompts are
/// returned as `Some(Err(..))`.
pub fn parse_sse_block(block: &str) -> Option<Result<Response>> {
    let data = block
        .lines()
        .filter_map(|line| line.strip_prefix("data:"))
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n");
    if data.is_empty() || data == "[DONE]" {
        return None;
    }

    match serde_json::from_str::<WireResponse>(&data) {
        Ok(wire) => Some(wire.into_response()),
        Err(e) => {
            tracing::warn!("failed to parse gemini chunk: {e}, data: {data}");
            None
        }
    }
}
