//! Larynx - Embeddable Language Server Protocol Engine
//!
//! Frames JSON-RPC 2.0 messages over a byte stream, routes them to a
//! pluggable [`LanguageServer`] handler by method name, and marshals
//! typed results back to wire form. The engine carries no analysis
//! logic of its own: implement the capabilities you support, and every
//! other method answers MethodNotFound by default.

pub mod error;
pub mod handler;
pub mod models;
pub mod protocol;
pub mod router;
pub mod server;
pub mod transport;
pub mod wire;

pub use error::{ProtocolError, ServerResult};
pub use handler::{Handled, LanguageServer, Unsupported};
pub use server::Server;
