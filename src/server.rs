//! Server Run Loop
//!
//! Composes Transport + Router + Handler. The Server owns both the
//! transport and the handler; the router hands composed responses back
//! and the Server alone writes to the output stream.

use tokio::io::{AsyncRead, AsyncWrite};

use crate::error::ServerResult;
use crate::handler::LanguageServer;
use crate::protocol::{Message, Response, ResponseError};
use crate::router::{self, Method};
use crate::transport::Transport;

/// Protocol engine over one input/output stream pair
pub struct Server<R, W, H> {
    transport: Transport<R, W>,
    handler: H,
}

impl<R, W, H> Server<R, W, H>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
    H: LanguageServer,
{
    pub fn new(input: R, output: W, handler: H) -> Self {
        Self {
            transport: Transport::new(input, output),
            handler,
        }
    }

    /// Run until the input stream ends.
    ///
    /// At most one message is in flight: a request's response is written
    /// and flushed before the next read, so responses are FIFO with
    /// respect to requests. Clean end-of-input returns `Ok(())`; framing
    /// and decode faults propagate.
    pub async fn run(&mut self) -> ServerResult<()> {
        tracing::info!("Language server loop started");

        while let Some(message) = self.transport.read_message().await? {
            match message {
                Message::Request(request) => {
                    let response = match Method::from_name(&request.method) {
                        Some(method) => {
                            router::dispatch_request(
                                &mut self.handler,
                                request.id,
                                method,
                                request.params,
                            )
                            .await?
                        }
                        // Unknown method: no handler call, no param decode.
                        None => {
                            tracing::debug!("Unknown request method: {}", request.method);
                            Response::error(request.id, ResponseError::method_not_found())
                        }
                    };
                    self.transport.write_response(&response).await?;
                }
                Message::Notification(notification) => {
                    match Method::from_name(&notification.method) {
                        Some(method) => {
                            router::dispatch_notification(
                                &mut self.handler,
                                method,
                                notification.params,
                            )
                            .await?;
                        }
                        None => {
                            tracing::debug!(
                                "Dropping unknown notification: {}",
                                notification.method
                            );
                        }
                    }
                }
            }
        }

        tracing::info!("Input stream closed, shutting down");
        Ok(())
    }

    /// Consume the server, handing the handler back to the caller.
    pub fn into_handler(self) -> H {
        self.handler
    }
}

// ============================================================================
// Tests
// ============================================================================
