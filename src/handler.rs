//! Handler Capability Surface
//!
//! The interface an application implements to back the engine. Every
//! capability defaults to `Unsupported`; a concrete handler overrides
//! only the subset it supports, and the router maps the rest to a
//! MethodNotFound response (requests) or silence (notifications).

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{
    CompletionItem, DidChangeTextDocumentParams, Hover, InitializeParams, InitializeResult,
    Location, TextDocumentPositionParams,
};

/// Marker for a capability the handler does not implement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("capability not implemented")]
pub struct Unsupported;

/// Outcome of one capability invocation.
pub type Handled<T> = Result<T, Unsupported>;

/// The closed set of overridable operations.
///
/// Handler failures other than `Unsupported` are the implementor's
/// concern; this layer does not catch them.
#[async_trait]
pub trait LanguageServer: Send {
    async fn initialize(&mut self, params: InitializeParams) -> Handled<InitializeResult> {
        let _ = params;
        Err(Unsupported)
    }

    /// Notification: a document was opened.
    async fn did_open(&mut self) -> Handled<()> {
        Err(Unsupported)
    }

    /// Notification: a document's content was replaced.
    async fn did_change(&mut self, params: DidChangeTextDocumentParams) -> Handled<()> {
        let _ = params;
        Err(Unsupported)
    }

    async fn hover(&mut self, params: TextDocumentPositionParams) -> Handled<Hover> {
        let _ = params;
        Err(Unsupported)
    }

    async fn definition(&mut self, params: TextDocumentPositionParams) -> Handled<Vec<Location>> {
        let _ = params;
        Err(Unsupported)
    }

    async fn completion(
        &mut self,
        params: TextDocumentPositionParams,
    ) -> Handled<Vec<CompletionItem>> {
        let _ = params;
        Err(Unsupported)
    }
}
