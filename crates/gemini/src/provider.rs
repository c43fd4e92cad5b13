//! Model trait implementation for the Gemini backend.

use crate::{Gemini, Request, WireResponse, response::error_message, stream};
use anyhow::{Result, bail};
use async_stream::try_stream;
use futures_core::Stream;
use futures_util::StreamExt;
use pcore::{Model, Response};
use reqwest::Method;

impl Model for Gemini {
    async fn send(&self, request: &pcore::Request) -> Result<Response> {
        let body = Request::from(request);
        tracing::trace!("request: {}", serde_json::to_string(&body)?);
        let response = self
            .client
            .request(Method::POST, self.endpoint(&request.model, false))
            .headers(self.headers.clone())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        tracing::trace!("response: {text}");
        if !status.is_success() {
            bail!("{}", error_message(status, &text));
        }

        serde_json::from_str::<WireResponse>(&text)?.into_response()
    }

    fn stream(&self, request: pcore::Request) -> impl Stream<Item = Result<Response>> + Send {
        let body = Request::from(&request);
        if let Ok(body) = serde_json::to_string(&body) {
            tracing::trace!("request: {}", body);
        }
        let request = self
            .client
            .request(Method::POST, self.endpoint(&request.model, true))
            .headers(self.headers.clone())
            .json(&body);

        try_stream! {
            let response = request.send().await?;
            let status = response.status();
            if !status.is_success() {
                let text = response.text().await?;
                Err::<(), _>(anyhow::anyhow!("{}", error_message(status, &text)))?;
                return;
            }

            let mut bytes = response.bytes_stream();
            let mut buf = Vec::new();
            while let Some(next) = bytes.next().await {
                let chunk = next?;
                tracing::trace!("chunk: {} bytes", chunk.len());
                buf.extend_from_slice(&chunk);
                for block in stream::drain_blocks(&mut buf) {
                    tracing::trace!("block: {block}");
                    if let Some(result) = stream::parse_sse_block(&block) {
                        yield result?;
                    }
                }
            }

            // Handle any remaining data in buffer.
            let rest = String::from_utf8_lossy(&buf);
            if !rest.trim().is_empty()
                && let Some(result) = stream::parse_sse_block(&rest)
            {
                yield result?;
            }
        }
    }
}
