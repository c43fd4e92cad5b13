//! Image resolution errors.

use thiserror::Error;

/// Why an image reference could not be resolved.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read image: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to fetch image: {0}")]
    Http(#[from] reqwest::Error),

    #[error("image request to {url} failed with status {status}")]
    Status { url: String, status: u16 },

    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("failed to encode image: {0}")]
    Encode(image::ImageError),

    #[error("image has no pixels")]
    Empty,

    #[error("image task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
