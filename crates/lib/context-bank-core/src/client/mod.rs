//! Onyx API client and HTTP transport.
//!
//! The client layer issues one POST per call, decodes the body, and reports
//! failures as `ClientError` after logging them.

pub mod http;

use std::{error::Error, fmt, future::Future};

use context_bank_store::schema::{
    PATH_CREATE_CHAT_SESSION,
    PATH_DOCUMENT_SEARCH,
    PATH_SEND_MESSAGE,
    endpoint_url,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{Instrument, Span, debug, error};

use crate::parsers::{StreamParseError, parse_stream_body};

pub use http::HttpTransport;

#[derive(Debug)]
pub enum ClientError {
    /// The request could not be built, sent, or read.
    Http(Box<reqwest::Error>),
    /// The backend answered with a non-success status.
    Status { status: u16, body: String },
    /// The backend answered with no usable body.
    EmptyBody,
    /// The request body could not be encoded.
    Encode(serde_json::Error),
    /// The response body is not decodable JSON.
    InvalidJson(serde_json::Error),
    /// The streamed response body yields no answer object.
    Decode(StreamParseError),
    /// The response JSON does not match the expected shape.
    Schema(serde_json::Error),
}

/// Coarse classification of a client failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Transport,
    Decode,
}

impl ClientError {
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::Http(_) | Self::Status { .. } | Self::EmptyBody => FailureKind::Transport,
            Self::Encode(_) | Self::InvalidJson(_) | Self::Decode(_) | Self::Schema(_) => {
                FailureKind::Decode
            }
        }
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(err) => write!(f, "HTTP error: {err}"),
            Self::Status { status, body } => write!(f, "HTTP error! status: {status}: {body}"),
            Self::EmptyBody => write!(f, "empty response body"),
            Self::Encode(err) => write!(f, "failed to encode request: {err}"),
            Self::InvalidJson(err) => write!(f, "invalid JSON response: {err}"),
            Self::Decode(err) => write!(f, "{err}"),
            Self::Schema(err) => write!(f, "unexpected response shape: {err}"),
        }
    }
}

impl Error for ClientError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Http(err) => Some(err.as_ref()),
            Self::Encode(err) | Self::InvalidJson(err) | Self::Schema(err) => Some(err),
            Self::Decode(err) => Some(err),
            Self::Status { .. } | Self::EmptyBody => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(Box::new(err))
    }
}

impl From<StreamParseError> for ClientError {
    fn from(err: StreamParseError) -> Self {
        Self::Decode(err)
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Sends a JSON body and returns the raw response text.
///
/// Implementations return `ClientError::Status` for non-success responses.
pub trait Transport: Send + Sync + 'static {
    fn post_json(
        &self,
        url: &str,
        body: &Value,
    ) -> impl Future<Output = ClientResult<String>> + Send;
}

/// Remote operations exposed by the knowledge base.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    CreateChatSession,
    SendMessage,
    DocumentSearch,
}

impl Endpoint {
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::CreateChatSession => PATH_CREATE_CHAT_SESSION,
            Self::SendMessage => PATH_SEND_MESSAGE,
            Self::DocumentSearch => PATH_DOCUMENT_SEARCH,
        }
    }

    /// Whether the endpoint answers with concatenated stream fragments.
    #[must_use]
    pub const fn is_streaming(self) -> bool {
        matches!(self, Self::SendMessage)
    }
}

/// Client for the Onyx chat API.
pub struct OnyxClient<T: Transport> {
    base_url: String,
    transport: T,
    span: Span,
}

impl<T: Transport> OnyxClient<T> {
    #[must_use]
    pub fn new(base_url: impl Into<String>, transport: T) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            transport,
            span: Span::none(),
        }
    }

    /// Attaches the span every request is recorded under.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Posts a typed body to an endpoint and decodes the typed response.
    ///
    /// # Errors
    /// Returns `ClientError` on any transport, decode, or shape failure.
    pub async fn post<B, R>(&self, endpoint: Endpoint, body: &B) -> ClientResult<R>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let result = self
            .request_typed(endpoint, body)
            .instrument(self.span.clone())
            .await;
        self.log_failure(endpoint.path(), result)
    }

    /// Posts a JSON body to `path` and returns the decoded JSON value.
    ///
    /// Streaming bodies go through [`parse_stream_body`]; others are decoded
    /// directly.
    ///
    /// # Errors
    /// Returns `ClientError` on any transport or decode failure.
    pub async fn post_value(&self, path: &str, body: &Value, streaming: bool) -> ClientResult<Value> {
        let result = self
            .request_value(path, body, streaming)
            .instrument(self.span.clone())
            .await;
        self.log_failure(path, result)
    }

    async fn request_typed<B, R>(&self, endpoint: Endpoint, body: &B) -> ClientResult<R>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let body = serde_json::to_value(body).map_err(ClientError::Encode)?;
        let value = self
            .request_value(endpoint.path(), &body, endpoint.is_streaming())
            .await?;
        serde_json::from_value(value).map_err(ClientError::Schema)
    }

    async fn request_value(&self, path: &str, body: &Value, streaming: bool) -> ClientResult<Value> {
        let url = endpoint_url(&self.base_url, path);
        debug!(%url, streaming, "posting Onyx request");
        let raw = self.transport.post_json(&url, body).await?;
        if raw.trim().is_empty() {
            return Err(ClientError::EmptyBody);
        }

        let value = if streaming {
            parse_stream_body(&raw)?
        } else {
            serde_json::from_str(&raw).map_err(ClientError::InvalidJson)?
        };
        if value.is_null() {
            return Err(ClientError::EmptyBody);
        }
        Ok(value)
    }

    fn log_failure<R>(&self, path: &str, result: ClientResult<R>) -> ClientResult<R> {
        if let Err(err) = &result {
            self.span.in_scope(|| {
                error!(path, kind = ?err.kind(), "Error making Onyx request: {err}");
            });
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use context_bank_store::models::SendMessageResponse;
    use serde_json::json;

    struct StaticTransport(&'static str);

    impl Transport for StaticTransport {
        async fn post_json(&self, _url: &str, _body: &Value) -> ClientResult<String> {
            Ok(self.0.to_string())
        }
    }

    fn client(body: &'static str) -> OnyxClient<StaticTransport> {
        OnyxClient::new("http://onyx.test/", StaticTransport(body))
    }

    #[test]
    fn only_send_message_streams() {
        assert!(Endpoint::SendMessage.is_streaming());
        assert!(!Endpoint::CreateChatSession.is_streaming());
        assert!(!Endpoint::DocumentSearch.is_streaming());
        assert_eq!(client("{}").base_url(), "http://onyx.test");
    }

    #[tokio::test]
    async fn blank_and_null_bodies_are_empty() {
        for body in ["", "  \n", "null"] {
            let err = client(body)
                .post_value(PATH_CREATE_CHAT_SESSION, &json!({}), false)
                .await
                .expect_err("empty body should fail");
            assert!(matches!(err, ClientError::EmptyBody), "body {body:?}");
            assert_eq!(err.kind(), FailureKind::Transport);
        }
    }

    #[tokio::test]
    async fn streaming_flag_selects_sentinel_split() {
        let raw = r#"{"answer_piece": "a"}{"agentic_message_ids": []}{"message": "done"}"#;

        let streamed = client(raw)
            .post_value(PATH_SEND_MESSAGE, &json!({}), true)
            .await
            .expect("stream body decodes");
        assert_eq!(streamed, json!({ "message": "done" }));

        let err = client(raw)
            .post_value(PATH_SEND_MESSAGE, &json!({}), false)
            .await
            .expect_err("plain decode rejects stream body");
        assert!(matches!(err, ClientError::InvalidJson(_)));
        assert_eq!(err.kind(), FailureKind::Decode);
    }

    #[tokio::test]
    async fn mismatched_shape_is_a_schema_failure() {
        let err = client(r#"{"message_id": "seven", "message": "hi"}"#)
            .post::<_, SendMessageResponse>(Endpoint::SendMessage, &json!({}))
            .await
            .expect_err("textual message id does not decode");
        assert!(matches!(err, ClientError::Schema(_)));
    }
}
