//! stdio transport for MCP (used by desktop MCP clients)

use serde_json::Value;
use std::io;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::protocol::{McpError, McpMessage, RequestHandler};

/// stdio transport for MCP protocol
///
/// Every incoming message is handled on its own task, so slow backend calls
/// do not hold up other requests. Responses go through a single writer.
pub struct StdioTransport {
    handler: Arc<RequestHandler>,
}

impl StdioTransport {
    /// Create a new stdio transport
    pub fn new(handler: Arc<RequestHandler>) -> Self {
        Self { handler }
    }

    /// Run the stdio transport until stdin closes
    pub async fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        info!("Starting MCP server on stdio");

        let reader = BufReader::new(tokio::io::stdin());
        self.serve(reader, tokio::io::stdout()).await?;

        Ok(())
    }

    /// Serve newline-delimited JSON-RPC from `reader`, answering on `writer`
    ///
    /// Returns the writer once the input is exhausted and every in-flight
    /// response has been written.
    pub async fn serve<R, W>(&self, mut reader: R, writer: W) -> io::Result<W>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let writer_task = tokio::spawn(write_messages(rx, writer));
        let mut buf = Vec::new();

        // Lines are read as bytes so malformed input costs one parse error,
        // not the session
        let read_result = loop {
            buf.clear();

            match reader.read_until(b'\n', &mut buf).await {
                Ok(0) => {
                    info!("EOF received, shutting down");
                    break Ok(());
                }
                Ok(_) => {}
                Err(e) => {
                    error!("Failed to read from input: {}", e);
                    break Err(e);
                }
            }

            if buf.iter().all(u8::is_ascii_whitespace) {
                continue;
            }

            debug!("Received: {}", String::from_utf8_lossy(&buf).trim());

            let message: McpMessage = match serde_json::from_slice(&buf) {
                Ok(msg) => msg,
                Err(e) => {
                    error!("Failed to parse message: {}", e);
                    let _ = tx.send(McpMessage::error_response(
                        Some(Value::Null),
                        McpError::parse_error(),
                    ));
                    continue;
                }
            };

            let handler = self.handler.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                if let Some(response) = handler.handle(message).await {
                    // Send only fails once the writer is gone
                    let _ = tx.send(response);
                }
            });
        };

        // The writer drains until the last in-flight handler drops its sender,
        // also when reading failed
        drop(tx);
        let written = writer_task
            .await
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

        read_result.and(written)
    }
}

/// Write responses one per line, flushing after each
async fn write_messages<W>(mut rx: mpsc::UnboundedReceiver<McpMessage>, mut writer: W) -> io::Result<W>
where
    W: AsyncWrite + Unpin,
{
    while let Some(message) = rx.recv().await {
        let response_line = serde_json::to_string(&message)?;
        debug!("Sending: {}", response_line);
        writer.write_all(response_line.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
    }

    Ok(writer)
}
