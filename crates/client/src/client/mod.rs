//! Socket client for the situps live-update server.

pub mod entries;
pub mod events;
mod registry;

#[cfg(test)]
pub(crate) mod test_server;

use std::sync::Arc;
use std::time::Duration;

use situps_core::entry::EntryKey;
use situps_core::protocol::{decode_line, encode_line, ClientMessage, ServerMessage};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tokio::sync::mpsc;

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

use registry::Dispatcher;
pub use registry::StateChangeSubscription;

/// Capacity of the outgoing message queue.
const OUTGOING_CAPACITY: usize = 64;

/// Handle to a live connection with the server.
///
/// Cloning the handle shares the connection. The socket is written by a
/// background writer task and read by a background reader task that routes
/// responses and broadcasts to the matching callers.
#[derive(Debug, Clone)]
pub struct SitupsClient {
    outgoing: mpsc::Sender<String>,
    dispatcher: Arc<Dispatcher>,
    request_timeout: Duration,
    address: String,
}

impl SitupsClient {
    /// Connect to the server at `config.ws_url` and acknowledge the connection.
    pub async fn connect(config: &ClientConfig) -> Result<Self> {
        let stream = TcpStream::connect(&config.ws_url)
            .await
            .map_err(|e| ClientError::Connection(format!("{}: {}", config.ws_url, e)))?;

        Self::from_stream(stream, config).await
    }

    /// Wrap an already connected stream.
    pub async fn from_stream(stream: TcpStream, config: &ClientConfig) -> Result<Self> {
        let address = stream
            .peer_addr()
            .map(|addr| addr.to_string())
            .unwrap_or_else(|_| config.ws_url.clone());
        stream.set_nodelay(true)?;
        let (reader, writer) = stream.into_split();
        let (outgoing, queue) = mpsc::channel(OUTGOING_CAPACITY);
        let dispatcher = Arc::new(Dispatcher::new());

        tokio::spawn(write_loop(writer, queue));
        tokio::spawn(read_loop(reader, Arc::clone(&dispatcher)));

        let client = Self {
            outgoing,
            dispatcher,
            request_timeout: config.request_timeout(),
            address,
        };
        client.send(ClientMessage::AckConnect).await?;

        tracing::info!(address = %client.address, "connected to live-update socket");
        Ok(client)
    }

    /// Get the server address.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Returns false once the server closed the connection or a write failed.
    pub fn is_connected(&self) -> bool {
        !self.outgoing.is_closed() && !self.dispatcher.is_closed()
    }

    #[cfg(test)]
    pub(crate) async fn abandoned_requests(&self) -> usize {
        self.dispatcher.abandoned_count().await
    }

    /// Encode a message and queue it for the writer task.
    async fn send(&self, message: ClientMessage) -> Result<()> {
        let line = encode_line(&message)?;
        self.outgoing
            .send(line)
            .await
            .map_err(|_| ClientError::ConnectionClosed)
    }
}

/// Rejects keys the server could never match.
pub(crate) fn validate_key(key: &EntryKey) -> Result<()> {
    if key.user_id.trim().is_empty() {
        return Err(ClientError::InvalidInput(
            "user ID must not be empty".to_string(),
        ));
    }
    key.date()?;
    Ok(())
}

/// Writes queued lines to the socket.
async fn write_loop(mut writer: OwnedWriteHalf, mut queue: mpsc::Receiver<String>) {
    while let Some(line) = queue.recv().await {
        tracing::debug!(message = line.trim_end(), "sending");
        if let Err(e) = writer.write_all(line.as_bytes()).await {
            tracing::warn!(error = %e, "live-update socket write failed");
            break;
        }
    }

    if let Err(e) = writer.shutdown().await {
        tracing::debug!(error = %e, "socket shutdown failed");
    }
}

/// Reads server messages until the socket closes, then closes the dispatcher.
async fn read_loop(reader: OwnedReadHalf, dispatcher: Arc<Dispatcher>) {
    let mut lines = BufReader::new(reader).lines();

    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if line.trim().is_empty() {
                    continue;
                }
                match decode_line::<ServerMessage>(&line) {
                    Ok(message) => {
                        tracing::debug!(message = %line, "received");
                        dispatcher.dispatch(message).await;
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, line = %line, "dropping undecodable message");
                    }
                }
            }
            Ok(None) => {
                tracing::info!("live-update socket closed by server");
                break;
            }
            Err(e) => {
                tracing::warn!(error = %e, "live-update socket read failed");
                break;
            }
        }
    }

    dispatcher.close().await;
}
