//! Message Transport Layer
//!
//! Handles message framing with Content-Length headers over a byte
//! stream. Generic over the underlying streams so the same transport
//! serves stdio and in-memory buffers.

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::error::{ProtocolError, ServerResult};
use crate::protocol::{Message, Response};

/// Framed reader/writer pair
pub struct Transport<R, W> {
    reader: BufReader<R>,
    writer: W,
}

impl<R, W> Transport<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(input: R, output: W) -> Self {
        Self {
            reader: BufReader::new(input),
            writer: output,
        }
    }

    /// Read the next framed message from the input stream.
    ///
    /// Messages are framed with headers:
    /// ```text
    /// Content-Length: 123\r\n
    /// \r\n
    /// {"jsonrpc":"2.0",...}
    /// ```
    ///
    /// Returns `Ok(None)` on end-of-input at a message boundary, the
    /// clean shutdown path. Any malformed framing is a fatal error.
    pub async fn read_message(&mut self) -> ServerResult<Option<Message>> {
        let Some(content_length) = self.read_headers().await? else {
            return Ok(None);
        };

        let mut body = vec![0u8; content_length];
        self.reader.read_exact(&mut body).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::UnexpectedEof {
                ProtocolError::UnexpectedEof("message body")
            } else {
                ProtocolError::Io(e)
            }
        })?;

        let json = String::from_utf8(body)
            .map_err(|e| ProtocolError::MalformedMessage(e.to_string()))?;

        tracing::trace!("<- {}", json);

        Message::parse(&json).map(Some)
    }

    /// Read a header block and return the Content-Length.
    ///
    /// A blank line before any header is idle padding and skipped; a
    /// blank line after at least one header ends the block. Returns
    /// `Ok(None)` on end-of-input before any header of the next message.
    async fn read_headers(&mut self) -> ServerResult<Option<usize>> {
        let mut content_length: Option<usize> = None;
        let mut seen_header = false;
        let mut line = String::new();

        loop {
            line.clear();
            let bytes_read = self.reader.read_line(&mut line).await?;

            if bytes_read == 0 {
                if seen_header {
                    return Err(ProtocolError::UnexpectedEof("header block"));
                }
                return Ok(None);
            }

            let line = line.trim();

            if line.is_empty() {
                if seen_header {
                    break;
                }
                continue;
            }

            let Some((name, value)) = line.split_once(':') else {
                return Err(ProtocolError::MalformedHeader(line.to_string()));
            };
            seen_header = true;

            // Only Content-Length is consulted; other headers are parsed
            // and ignored.
            if name.trim() == "Content-Length" {
                let value = value.trim();
                content_length = Some(
                    value
                        .parse()
                        .map_err(|_| ProtocolError::InvalidContentLength(value.to_string()))?,
                );
            }
        }

        match content_length {
            Some(length) => Ok(Some(length)),
            None => Err(ProtocolError::MissingContentLength),
        }
    }

    /// Write a framed response and flush before returning.
    ///
    /// The flush guarantees the bytes are emitted before the next
    /// message is read.
    pub async fn write_response(&mut self, response: &Response) -> ServerResult<()> {
        let json = serde_json::to_string(response)?;

        tracing::trace!("-> {}", json);

        let message = format!("Content-Length: {}\r\n\r\n{}", json.len(), json);
        self.writer.write_all(message.as_bytes()).await?;
        self.writer.flush().await?;
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{RequestId, ResponseError};

    fn frame(body: &str) -> Vec<u8> {
        format!("Content-Length: {}\r\n\r\n{}", body.len(), body).into_bytes()
    }

    #[tokio::test]
    async fn test_read_framed_request() {
        let input = frame(r#"{"id":1,"method":"initialize","params":{}}"#);
        let mut out = Vec::new();
        let mut transport = Transport::new(&input[..], &mut out);

        let message = transport.read_message().await.unwrap().unwrap();
        assert!(matches!(message, Message::Request(_)));
        assert_eq!(message.method(), "initialize");
    }

    #[tokio::test]
    async fn test_eof_at_message_boundary_is_clean() {
        let input: &[u8] = b"";
        let mut out = Vec::new();
        let mut transport = Transport::new(input, &mut out);

        assert!(transport.read_message().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_idle_blank_lines_are_skipped() {
        let mut input = b"\r\n\r\n".to_vec();
        input.extend(frame(r#"{"method":"textDocument/didOpen","params":{}}"#));
        let mut out = Vec::new();
        let mut transport = Transport::new(&input[..], &mut out);

        let message = transport.read_message().await.unwrap().unwrap();
        assert!(matches!(message, Message::Notification(_)));
    }

    #[tokio::test]
    async fn test_eof_after_idle_blank_lines_is_clean() {
        let input: &[u8] = b"\r\n\r\n";
        let mut out = Vec::new();
        let mut transport = Transport::new(input, &mut out);

        assert!(transport.read_message().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_extra_headers_are_ignored() {
        let body = r#"{"id":2,"method":"textDocument/hover","params":{}}"#;
        let input = format!(
            "Content-Type: application/vscode-jsonrpc; charset=utf-8\r\nContent-Length: {}\r\n\r\n{}",
            body.len(),
            body
        )
        .into_bytes();
        let mut out = Vec::new();
        let mut transport = Transport::new(&input[..], &mut out);

        let message = transport.read_message().await.unwrap().unwrap();
        assert_eq!(message.method(), "textDocument/hover");
    }

    #[tokio::test]
    async fn test_missing_content_length_is_fatal() {
        let input: &[u8] = b"Content-Type: application/json\r\n\r\n{}";
        let mut out = Vec::new();
        let mut transport = Transport::new(input, &mut out);

        assert!(matches!(
            transport.read_message().await,
            Err(ProtocolError::MissingContentLength)
        ));
    }

    #[tokio::test]
    async fn test_unparseable_content_length_is_fatal() {
        let input: &[u8] = b"Content-Length: twelve\r\n\r\n{}";
        let mut out = Vec::new();
        let mut transport = Transport::new(input, &mut out);

        assert!(matches!(
            transport.read_message().await,
            Err(ProtocolError::InvalidContentLength(_))
        ));
    }

    #[tokio::test]
    async fn test_colonless_header_line_is_fatal() {
        let input: &[u8] = b"Content-Length 12\r\n\r\n{}";
        let mut out = Vec::new();
        let mut transport = Transport::new(input, &mut out);

        assert!(matches!(
            transport.read_message().await,
            Err(ProtocolError::MalformedHeader(_))
        ));
    }

    #[tokio::test]
    async fn test_truncated_body_is_fatal() {
        let input: &[u8] = b"Content-Length: 100\r\n\r\n{\"id\":1}";
        let mut out = Vec::new();
        let mut transport = Transport::new(input, &mut out);

        assert!(matches!(
            transport.read_message().await,
            Err(ProtocolError::UnexpectedEof("message body"))
        ));
    }

    #[tokio::test]
    async fn test_eof_inside_header_block_is_fatal() {
        let input: &[u8] = b"Content-Length: 10\r\n";
        let mut out = Vec::new();
        let mut transport = Transport::new(input, &mut out);

        assert!(matches!(
            transport.read_message().await,
            Err(ProtocolError::UnexpectedEof("header block"))
        ));
    }

    #[tokio::test]
    async fn test_invalid_json_body_is_fatal() {
        let input = frame("{not json");
        let mut out = Vec::new();
        let mut transport = Transport::new(&input[..], &mut out);

        assert!(transport.read_message().await.is_err());
    }

    #[tokio::test]
    async fn test_write_response_framing_round_trips() {
        let response = Response::error(RequestId::Number(9), ResponseError::method_not_found());
        let expected_body = serde_json::to_string(&response).unwrap();

        let mut out = Vec::new();
        {
            let input: &[u8] = b"";
            let mut transport = Transport::new(input, &mut out);
            transport.write_response(&response).await.unwrap();
        }

        let written = String::from_utf8(out).unwrap();
        let header = format!("Content-Length: {}\r\n\r\n", expected_body.len());
        assert!(written.starts_with(&header));
        assert_eq!(&written[header.len()..], expected_body);
    }

    #[tokio::test]
    async fn test_framing_round_trip_preserves_body_bytes() {
        let body = r#"{"id":1,"method":"textDocument/hover","params":{"textDocument":{"uri":"file:///ü.rs"},"position":{"line":0,"character":0}}}"#;
        let input = frame(body);
        let mut out = Vec::new();
        let mut transport = Transport::new(&input[..], &mut out);

        let Message::Request(req) = transport.read_message().await.unwrap().unwrap() else {
            panic!("expected request");
        };
        assert_eq!(
            req.params["textDocument"]["uri"],
            "file:///\u{fc}.rs".to_string()
        );
        // The frame consumed exactly Content-Length bytes; nothing remains.
        assert!(transport.read_message().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_consecutive_messages_on_one_stream() {
        let mut input = frame(r#"{"id":1,"method":"initialize","params":{}}"#);
        input.extend(frame(r#"{"method":"textDocument/didOpen","params":{}}"#));
        let mut out = Vec::new();
        let mut transport = Transport::new(&input[..], &mut out);

        assert!(matches!(
            transport.read_message().await.unwrap(),
            Some(Message::Request(_))
        ));
        assert!(matches!(
            transport.read_message().await.unwrap(),
            Some(Message::Notification(_))
        ));
        assert!(transport.read_message().await.unwrap().is_none());
    }
}
