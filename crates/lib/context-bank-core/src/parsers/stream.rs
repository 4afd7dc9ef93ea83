use std::{error::Error, fmt};

use context_bank_store::schema::AGENTIC_SENTINEL;
use serde_json::Value;

/// Error type for send-message body decode failures.
#[derive(Debug)]
pub enum StreamParseError {
    /// The body is not JSON and carries no sentinel to split on.
    MissingSentinel(serde_json::Error),
    /// The sentinel appears more than once, so the answer object is ambiguous.
    RepeatedSentinel,
    /// The segment after the sentinel is not a single JSON value.
    Trailing(serde_json::Error),
}

impl fmt::Display for StreamParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSentinel(err) => {
                write!(f, "stream body is not JSON and has no agentic sentinel: {err}")
            }
            Self::RepeatedSentinel => write!(f, "stream body repeats the agentic sentinel"),
            Self::Trailing(err) => write!(f, "invalid JSON after agentic sentinel: {err}"),
        }
    }
}

impl Error for StreamParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::MissingSentinel(err) | Self::Trailing(err) => Some(err),
            Self::RepeatedSentinel => None,
        }
    }
}

/// Decodes a send-message body into its answer object.
///
/// A body that is already valid JSON is returned as decoded. Otherwise the
/// body is treated as streamed fragments and the single JSON value following
/// [`AGENTIC_SENTINEL`] is decoded instead.
///
/// # Errors
/// Returns `StreamParseError` when neither strategy yields a JSON value.
pub fn parse_stream_body(raw: &str) -> Result<Value, StreamParseError> {
    let direct = match serde_json::from_str::<Value>(raw) {
        Ok(value) => return Ok(value),
        Err(err) => err,
    };

    let Some((_, tail)) = raw.split_once(AGENTIC_SENTINEL) else {
        return Err(StreamParseError::MissingSentinel(direct));
    };
    if tail.contains(AGENTIC_SENTINEL) {
        return Err(StreamParseError::RepeatedSentinel);
    }
    serde_json::from_str(tail).map_err(StreamParseError::Trailing)
}
