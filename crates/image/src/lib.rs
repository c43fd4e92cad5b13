//! Image references and their resolution into encoded [`Image`]s.
//!
//! A reference is opaque to callers: a file path, an http(s) URL or raw
//! bytes. [`Loader`] fetches it, decodes it, scales it so the longest edge
//! fits [`MAX_DIMENSION`] and re-encodes it as JPEG.

use pcore::Image;
use std::{fmt, path::PathBuf};
pub use {
    error::Error,
    loader::{Loader, decode, target_size},
};

mod error;
mod loader;

/// Longest edge, in pixels, of a resolved image.
pub const MAX_DIMENSION: u32 = 768;

/// An unresolved image reference.
#[derive(Clone, PartialEq, Eq)]
pub enum ImageRef {
    /// A local file.
    Path(PathBuf),
    /// An http or https URL.
    Url(String),
    /// Encoded bytes already in memory.
    Bytes(Vec<u8>),
}

impl From<&str> for ImageRef {
    fn from(s: &str) -> Self {
        if s.starts_with("http://") || s.starts_with("https://") {
            Self::Url(s.to_owned())
        } else {
            Self::Path(PathBuf::from(s))
        }
    }
}

impl From<PathBuf> for ImageRef {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
            Self::Bytes(bytes) => write!(f, "<{} bytes>", bytes.len()),
        }
    }
}

impl fmt::Debug for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ImageRef({self})")
    }
}

/// Resolves references into decoded, downscaled images.
pub trait Resolve: Send + Sync {
    /// Resolve one reference.
    fn resolve(&self, reference: &ImageRef) -> impl Future<Output = Result<Image, Error>> + Send;
}
