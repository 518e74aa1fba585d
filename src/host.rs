//! Collaborators the core talks to but does not implement.
//!
//! - [`DocumentRenderer`]: turns a document URI into an HTML body
//! - [`ViewHost`]: owns the rendering surfaces and delivers messages to them
//!
//! Both are async so fetches and sends are suspend points that never block
//! other documents or views.

use std::future::Future;
use std::sync::Arc;

use crate::id::{DocumentUri, ViewId};
use crate::message::ViewMessage;

/// Asynchronously renders a document to HTML.
///
/// # Example
///
/// ```ignore
/// struct DocxRenderer;
///
/// impl DocumentRenderer for DocxRenderer {
///     type Error = std::io::Error;
///
///     async fn render(&self, uri: &DocumentUri) -> Result<String, Self::Error> {
///         let bytes = tokio::fs::read(uri.path()).await?;
///         Ok(docx_to_html(&bytes))
///     }
/// }
/// ```
pub trait DocumentRenderer: Send + Sync {
    /// Error type returned when rendering fails.
    type Error: std::fmt::Display + Send + 'static;

    /// Render the document body for `uri`.
    fn render(&self, uri: &DocumentUri) -> impl Future<Output = Result<String, Self::Error>> + Send;
}

/// Delivers messages to live views.
///
/// `send` resolves once the message is enqueued for the view, not when the
/// view has applied it. Messages to one view must be delivered in send order.
pub trait ViewHost: Send + Sync {
    /// Error type returned when a message cannot be enqueued.
    type Error: std::fmt::Display + Send + 'static;

    /// Enqueue `message` for `view`.
    fn send(&self, view: ViewId, message: ViewMessage) -> impl Future<Output = Result<(), Self::Error>> + Send;
}

impl<T: DocumentRenderer> DocumentRenderer for Arc<T> {
    type Error = T::Error;

    fn render(&self, uri: &DocumentUri) -> impl Future<Output = Result<String, Self::Error>> + Send {
        (**self).render(uri)
    }
}

impl<T: ViewHost> ViewHost for Arc<T> {
    type Error = T::Error;

    fn send(&self, view: ViewId, message: ViewMessage) -> impl Future<Output = Result<(), Self::Error>> + Send {
        (**self).send(view, message)
    }
}
