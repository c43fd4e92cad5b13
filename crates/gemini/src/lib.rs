//! Gemini backend.
//!
//! Implements the Generative Language REST API: `generateContent` for
//! one-shot calls and `streamGenerateContent?alt=sse` for streaming.

use anyhow::Result;
use reqwest::{
    Client,
    header::{self, HeaderMap, HeaderValue},
};
pub use {
    request::Request,
    response::{ErrorBody, WireResponse},
    stream::parse_sse_block,
};

mod provider;
mod request;
mod response;
mod stream;

/// The Generative Language API base URL.
pub const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// The API key header.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// The Gemini backend.
#[derive(Clone)]
pub struct Gemini {
    /// The HTTP client.
    pub client: Client,
    /// Request headers (api key, content-type).
    headers: HeaderMap,
    /// API base URL, without trailing slash.
    base: String,
}

impl Gemini {
    /// Create a backend targeting the public API.
    pub fn api(client: Client, key: &str) -> Result<Self> {
        Self::custom(client, key, BASE_URL)
    }

    /// Create a backend targeting a custom base URL (proxies, test servers).
    pub fn custom(client: Client, key: &str, base: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(API_KEY_HEADER, key.parse()?);
        Ok(Self {
            client,
            headers,
            base: base.trim_end_matches('/').to_owned(),
        })
    }

    /// The endpoint for a model, streaming or not.
    pub fn endpoint(&self, model: &str, stream: bool) -> String {
        if stream {
            format!("{}/models/{model}:streamGenerateContent?alt=sse", self.base)
        } else {
            format!("{}/models/{model}:generateContent", self.base)
        }
    }

    /// Get a reference to the headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}
