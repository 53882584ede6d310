//! Request Router
//!
//! Owns the mapping from method-name strings to typed decoder/capability
//! pairs. Method names resolve once, at lookup, into an enumerated tag;
//! unknown names are rejected by the lookup itself rather than by a
//! fallthrough branch. "Unknown method" and "capability not implemented"
//! deliberately collapse into the same observable outcome: MethodNotFound
//! for requests, silence for notifications.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ProtocolError, ServerResult};
use crate::handler::{Handled, LanguageServer};
use crate::models::{
    DidChangeTextDocumentParams, TextDocumentContentChangeEvent, VersionedTextDocumentIdentifier,
};
use crate::protocol::{RequestId, Response, ResponseError, methods};
use crate::wire;

// ============================================================================
// Method Table
// ============================================================================

/// Enumerated message-kind tag for the dispatch table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Initialize,
    DidOpen,
    DidChange,
    Hover,
    Definition,
    Completion,
}

impl Method {
    /// Resolve a wire method name, rejecting unknown names at lookup time.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            methods::INITIALIZE => Some(Self::Initialize),
            methods::DID_OPEN => Some(Self::DidOpen),
            methods::DID_CHANGE => Some(Self::DidChange),
            methods::HOVER => Some(Self::Hover),
            methods::DEFINITION => Some(Self::Definition),
            methods::COMPLETION => Some(Self::Completion),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Initialize => methods::INITIALIZE,
            Self::DidOpen => methods::DID_OPEN,
            Self::DidChange => methods::DID_CHANGE,
            Self::Hover => methods::HOVER,
            Self::Definition => methods::DEFINITION,
            Self::Completion => methods::COMPLETION,
        }
    }
}

// ============================================================================
// Parameter Decoding
// ============================================================================

fn parse_params<T: DeserializeOwned>(method: &'static str, params: Value) -> ServerResult<T> {
    serde_json::from_value(params).map_err(|source| ProtocolError::InvalidParams { method, source })
}

/// Inbound change event before the full-replacement filter.
#[derive(Debug, Deserialize)]
struct RawContentChange {
    #[serde(default)]
    range: Option<Value>,
    text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDidChangeParams {
    text_document: VersionedTextDocumentIdentifier,
    content_changes: Vec<RawContentChange>,
}

/// Decode `didChange` params, dropping range-bearing change events.
///
/// Only whole-document replacement is representable downstream; an
/// incremental event never reaches the handler.
fn decode_did_change(params: Value) -> ServerResult<DidChangeTextDocumentParams> {
    let raw: RawDidChangeParams = parse_params(methods::DID_CHANGE, params)?;
    Ok(DidChangeTextDocumentParams {
        text_document: raw.text_document,
        content_changes: raw
            .content_changes
            .into_iter()
            .filter(|change| change.range.is_none())
            .map(|change| TextDocumentContentChangeEvent { text: change.text })
            .collect(),
    })
}

// ============================================================================
// Dispatch
// ============================================================================

fn respond<T: Serialize>(id: RequestId, outcome: Handled<T>) -> ServerResult<Response> {
    match outcome {
        Ok(value) => Ok(Response::success(id, wire::marshal(&value)?)),
        Err(_) => Ok(Response::error(id, ResponseError::method_not_found())),
    }
}

/// Dispatch a request with a recognized method.
///
/// Decoding failure on a required field is fatal and propagates; it is a
/// malformed client message, not an unsupported capability. The returned
/// response always carries the original `id`.
pub async fn dispatch_request<H: LanguageServer>(
    handler: &mut H,
    id: RequestId,
    method: Method,
    params: Value,
) -> ServerResult<Response> {
    match method {
        Method::Initialize => respond(
            id,
            handler
                .initialize(parse_params(methods::INITIALIZE, params)?)
                .await,
        ),
        Method::DidOpen => respond(id, handler.did_open().await),
        Method::DidChange => respond(id, handler.did_change(decode_did_change(params)?).await),
        Method::Hover => respond(
            id,
            handler.hover(parse_params(methods::HOVER, params)?).await,
        ),
        Method::Definition => respond(
            id,
            handler
                .definition(parse_params(methods::DEFINITION, params)?)
                .await,
        ),
        Method::Completion => respond(
            id,
            handler
                .completion(parse_params(methods::COMPLETION, params)?)
                .await,
        ),
    }
}

/// Dispatch a notification with a recognized method.
///
/// There is no response channel: an unimplemented capability is dropped
/// silently, a produced value is discarded.
pub async fn dispatch_notification<H: LanguageServer>(
    handler: &mut H,
    method: Method,
    params: Value,
) -> ServerResult<()> {
    let outcome = match method {
        Method::Initialize => handler
            .initialize(parse_params(methods::INITIALIZE, params)?)
            .await
            .map(|_| ()),
        Method::DidOpen => handler.did_open().await,
        Method::DidChange => handler.did_change(decode_did_change(params)?).await,
        Method::Hover => handler
            .hover(parse_params(methods::HOVER, params)?)
            .await
            .map(|_| ()),
        Method::Definition => handler
            .definition(parse_params(methods::DEFINITION, params)?)
            .await
            .map(|_| ()),
        Method::Completion => handler
            .completion(parse_params(methods::COMPLETION, params)?)
            .await
            .map(|_| ()),
    };

    if outcome.is_err() {
        tracing::debug!("Dropping unimplemented notification: {}", method.as_str());
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
