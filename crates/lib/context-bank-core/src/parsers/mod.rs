//! Parsers for raw Onyx response bodies.
//!
//! The send-message endpoint writes concatenated JSON objects without framing;
//! the stream parser recovers the final answer object from that body.

pub mod stream;

pub use stream::{StreamParseError, parse_stream_body};
