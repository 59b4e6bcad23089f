//! In-process stand-in for the live-update server, used by the client tests.

use situps_core::entry::{Entry, EntryData, EntryGetResponse, EntryKey};
use situps_core::protocol::{decode_line, encode_line, ClientMessage, ServerMessage};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpListener;

use crate::config::ClientConfig;

/// Client configuration pointing at `address` with a short timeout.
pub(crate) fn test_config(address: &str) -> ClientConfig {
    ClientConfig {
        ws_url: address.to_string(),
        user_id: "ada".to_string(),
        request_timeout_ms: 2_000,
        previous_weeks: 0,
        upcoming_weeks: 0,
    }
}

pub(crate) struct FakeServer {
    listener: TcpListener,
}

impl FakeServer {
    pub async fn bind() -> Self {
        Self {
            listener: TcpListener::bind("127.0.0.1:0").await.unwrap(),
        }
    }

    pub fn address(&self) -> String {
        self.listener.local_addr().unwrap().to_string()
    }

    pub async fn accept(&self) -> FakeConnection {
        let (stream, _) = self.listener.accept().await.unwrap();
        let (reader, writer) = stream.into_split();
        FakeConnection {
            lines: BufReader::new(reader).lines(),
            writer,
        }
    }
}

pub(crate) struct FakeConnection {
    lines: Lines<BufReader<OwnedReadHalf>>,
    writer: OwnedWriteHalf,
}

impl FakeConnection {
    /// Next message sent by the client.
    pub async fn receive(&mut self) -> ClientMessage {
        let line = self
            .lines
            .next_line()
            .await
            .unwrap()
            .expect("client closed the connection");
        decode_line(&line).unwrap()
    }

    pub async fn send(&mut self, message: &ServerMessage) {
        let line = encode_line(message).unwrap();
        self.writer.write_all(line.as_bytes()).await.unwrap();
    }

    pub async fn send_raw(&mut self, line: &str) {
        self.writer
            .write_all(format!("{}\n", line).as_bytes())
            .await
            .unwrap();
    }

    /// Answers a `getEntryData` request for `key`.
    pub async fn send_entry_data(&mut self, key: &EntryKey, amount: Option<u32>) {
        self.send(&ServerMessage::GetEntryData(EntryGetResponse {
            entry_key: key.clone(),
            entry_data: amount.map(|amount| EntryData::new(Some(amount))),
        }))
        .await;
    }

    /// Broadcasts an update of `key`.
    pub async fn send_update(&mut self, key: &EntryKey, amount: Option<u32>) {
        self.send(&ServerMessage::UpdateEntry(Entry::new(
            key.clone(),
            EntryData::new(amount),
        )))
        .await;
    }
}
