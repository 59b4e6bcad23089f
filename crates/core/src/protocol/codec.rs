use serde::de::DeserializeOwned;
use serde::Serialize;

use super::error::{ProtocolError, Result};

/// Serializes a message as a single newline-terminated JSON line.
pub fn encode_line<T: Serialize>(message: &T) -> Result<String> {
    let mut line = serde_json::to_string(message)?;
    line.push('\n');
    Ok(line)
}

/// Parses one line of input into a message.
///
/// Surrounding whitespace, including the line terminator, is ignored.
pub fn decode_line<T: DeserializeOwned>(line: &str) -> Result<T> {
    let line = line.trim();
    if line.is_empty() {
        return Err(ProtocolError::EmptyLine);
    }
    Ok(serde_json::from_str(line)?)
}
