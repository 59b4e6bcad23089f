//! Wire protocol spoken with the live-update server.
//!
//! Messages are externally tagged JSON objects, one per line. The client
//! sends [`ClientMessage`]s and receives [`ServerMessage`]s.

mod codec;
mod error;
mod messages;

pub use codec::{decode_line, encode_line};
pub use error::{ProtocolError, Result};
pub use messages::{ClientMessage, GetEntryDataRequest, ServerMessage, UpdateEntryRequest};
