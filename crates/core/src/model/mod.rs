//! Generation model types and the [`Model`] trait.
//!
//! Provides the shared types used by every backend: [`Content`], [`Part`],
//! [`Image`], [`Request`] and [`Response`].

use anyhow::Result;
use futures_core::Stream;
pub use content::{Content, ContentBuilder, Image, Part, Role};
pub use request::Request;
pub use response::{FinishReason, Response, Usage};

mod content;
mod request;
mod response;

/// A generation backend.
///
/// Constructors are inherent methods on each backend and are never called
/// polymorphically.
pub trait Model: Sized + Clone {
    /// Generate a complete response in one call.
    fn send(&self, request: &Request) -> impl Future<Output = Result<Response>> + Send;

    /// Generate a response as a finite stream of partial chunks.
    ///
    /// The stream may fail at any point; an error item is the last item
    /// a consumer should act on.
    fn stream(&self, request: Request) -> impl Stream<Item = Result<Response>> + Send;
}
