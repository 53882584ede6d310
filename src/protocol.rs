//! JSON-RPC 2.0 Protocol Types
//!
//! Defines the message envelope for editor-facing communication.
//! Domain types (Position, Range, TextEdit, ...) are in models/lsp.rs

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ProtocolError, ServerResult};

pub const JSONRPC_VERSION: &str = "2.0";

/// Method names understood by the engine
pub mod methods {
    pub const INITIALIZE: &str = "initialize";
    pub const DID_OPEN: &str = "textDocument/didOpen";
    pub const DID_CHANGE: &str = "textDocument/didChange";
    pub const HOVER: &str = "textDocument/hover";
    pub const DEFINITION: &str = "textDocument/definition";
    pub const COMPLETION: &str = "textDocument/completion";
}

/// JSON-RPC error codes emitted by this layer
pub mod error_codes {
    pub const METHOD_NOT_FOUND: i32 = -32601;
}

// ============================================================================
// JSON-RPC 2.0 Core Types
// ============================================================================

/// Request ID - can be number or string
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum RequestId {
    Number(u64),
    String(String),
}

impl From<u64> for RequestId {
    fn from(id: u64) -> Self {
        RequestId::Number(id)
    }
}

/// Inbound message requiring exactly one response
#[derive(Debug, Clone, Deserialize)]
pub struct Request {
    pub id: RequestId,
    pub method: String,
    pub params: Value,
}

/// Inbound message with no id and no response channel
#[derive(Debug, Clone, Deserialize)]
pub struct Notification {
    pub method: String,
    pub params: Value,
}

/// One decoded inbound message
///
/// Discrimination is by `id` presence: carrying an `id` makes a message a
/// request; its absence makes it a notification.
#[derive(Debug, Clone)]
pub enum Message {
    Request(Request),
    Notification(Notification),
}

impl Message {
    /// Parse a JSON body into a Message
    ///
    /// `method` and `params` are required fields; a body that is not a
    /// JSON object is rejected.
    pub fn parse(json: &str) -> ServerResult<Self> {
        let value: Value = serde_json::from_str(json)?;
        if !value.is_object() {
            return Err(ProtocolError::MalformedMessage(
                "body is not a JSON object".to_string(),
            ));
        }

        let message = if value.get("id").is_some() {
            Message::Request(
                serde_json::from_value(value)
                    .map_err(|e| ProtocolError::MalformedMessage(e.to_string()))?,
            )
        } else {
            Message::Notification(
                serde_json::from_value(value)
                    .map_err(|e| ProtocolError::MalformedMessage(e.to_string()))?,
            )
        };
        Ok(message)
    }

    pub fn method(&self) -> &str {
        match self {
            Message::Request(req) => &req.method,
            Message::Notification(notif) => &notif.method,
        }
    }
}

// ============================================================================
// Response Envelope
// ============================================================================

/// Outbound response envelope
///
/// Both `result` and `error` are always serialized; the absent side is an
/// explicit `null` on the wire. Exactly one side is populated for any
/// request outcome (a void acknowledgement carries `result: null` with no
/// error).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    pub jsonrpc: String,
    pub id: RequestId,
    #[serde(default)]
    pub result: Value,
    #[serde(default)]
    pub error: Option<ResponseError>,
}

impl Response {
    pub fn success(id: RequestId, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result,
            error: None,
        }
    }

    pub fn error(id: RequestId, error: ResponseError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: Value::Null,
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// JSON-RPC 2.0 Error
///
/// `data` is always serialized, `null` when unset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResponseError {
    pub code: i32,
    pub message: String,
    pub data: Option<Value>,
}

impl ResponseError {
    /// The single error this layer defines. Unknown and unimplemented
    /// methods are indistinguishable to the client.
    pub fn method_not_found() -> Self {
        Self {
            code: error_codes::METHOD_NOT_FOUND,
            message: "Method not found".to_string(),
            data: None,
        }
    }
}

impl std::fmt::Display for ResponseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ResponseError {}

// ============================================================================
// Tests
// ============================================================================
