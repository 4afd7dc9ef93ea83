use std::sync::{Arc, Mutex};

use context_bank_core::client::{ClientError, ClientResult, OnyxClient, Transport};
use context_bank_core::control::OnyxControlPlane;
use rmcp::model::CallToolResult;
use serde_json::Value;

use crate::ContextBankMcp;

/// Canned reply for the fake transport.
pub enum Reply {
    Body(String),
    Status(u16),
}

/// Transport that records every request and answers with one canned reply.
#[derive(Clone)]
pub struct FakeTransport {
    reply: Arc<Mutex<Option<Reply>>>,
    requests: Arc<Mutex<Vec<(String, Value)>>>,
}

impl FakeTransport {
    pub fn replying(reply: Reply) -> Self {
        Self {
            reply: Arc::new(Mutex::new(Some(reply))),
            requests: Arc::default(),
        }
    }

    pub fn json(body: &Value) -> Self {
        Self::replying(Reply::Body(body.to_string()))
    }

    pub fn requests(&self) -> Vec<(String, Value)> {
        self.requests.lock().expect("requests lock").clone()
    }
}

impl Transport for FakeTransport {
    async fn post_json(&self, url: &str, body: &Value) -> ClientResult<String> {
        self.requests
            .lock()
            .expect("requests lock")
            .push((url.to_string(), body.clone()));
        let reply = self.reply.lock().expect("reply lock").take();
        match reply {
            Some(Reply::Body(body)) => Ok(body),
            Some(Reply::Status(status)) => Err(ClientError::Status {
                status,
                body: String::new(),
            }),
            None => panic!("fake transport called more than once"),
        }
    }
}

pub fn server(transport: &FakeTransport) -> ContextBankMcp<FakeTransport> {
    let client = OnyxClient::new("http://onyx.test", transport.clone());
    ContextBankMcp::new(OnyxControlPlane::new(client))
}

/// Text blocks of a tool result, read from its protocol JSON.
pub fn texts(result: &CallToolResult) -> Vec<String> {
    let value = serde_json::to_value(result).expect("tool result serializes");
    value["content"]
        .as_array()
        .expect("tool result has content")
        .iter()
        .map(|block| {
            assert_eq!(block["type"], "text");
            block["text"].as_str().expect("text block").to_string()
        })
        .collect()
}
