use reqwest::header::{CONTENT_TYPE, HeaderValue};
use serde_json::Value;

use super::{ClientError, ClientResult, Transport};

/// `reqwest`-backed transport for the Onyx API.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    api_key: Option<String>,
}

impl HttpTransport {
    /// Builds a transport with the default `reqwest` client settings.
    ///
    /// # Errors
    /// Returns `ClientError::Http` if the TLS backend cannot be initialized.
    pub fn new(api_key: Option<String>) -> ClientResult<Self> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self::with_client(client, api_key))
    }

    #[must_use]
    pub fn with_client(client: reqwest::Client, api_key: Option<String>) -> Self {
        let api_key = api_key.filter(|key| !key.trim().is_empty());
        Self { client, api_key }
    }

    #[must_use]
    pub const fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Transport for HttpTransport {
    async fn post_json(&self, url: &str, body: &Value) -> ClientResult<String> {
        let mut request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .json(body);
        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                body: text,
            });
        }
        Ok(text)
    }
}
