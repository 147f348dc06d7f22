//! Inbound message validation.

use serde_json::Value;

use crate::error::RelayError;

/// Validate the inbound `message` field and return its trimmed text.
///
/// Checks run in order: type, emptiness, length. Length is counted in
/// characters on the untrimmed input and `max_length` itself is allowed.
pub fn validate_message(value: Option<&Value>, max_length: usize) -> Result<String, RelayError> {
    let Some(Value::String(raw)) = value else {
        return Err(RelayError::InvalidMessageType);
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(RelayError::EmptyMessage);
    }

    let length = raw.chars().count();
    if length > max_length {
        return Err(RelayError::MessageTooLong {
            max: max_length,
            actual: length,
        });
    }

    Ok(trimmed.to_string())
}
