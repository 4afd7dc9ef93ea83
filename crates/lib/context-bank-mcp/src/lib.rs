//! MCP server implementation for context-bank.
//!
//! This crate wires the Onyx control plane into rmcp tool handlers and exposes
//! chat and document search as MCP tools.

mod helpers;
mod tools;
pub mod server;

#[cfg(test)]
mod test_support;

use context_bank_core::client::Transport;
use context_bank_core::control::OnyxControlPlane;
use rmcp::{ServerHandler, handler::server::tool::ToolRouter, tool_handler};
use rmcp::model::{Implementation, ServerCapabilities, ServerInfo};

pub use tools::chat::{CreateChatSessionParams, QueryAtherosParams};
pub use tools::search::DocumentSearchParams;

const SERVER_NAME: &str = "context-bank";

const SERVER_INSTRUCTIONS: &str = r"context-bank answers questions from the AtherOS knowledge base.

Workflow:
1. For a quick lookup, call `document-search` with the text to search for. Each result is the
   matching passage followed by its link.
2. For a conversational answer, call `create-chat-session` once and keep the returned chat
   session id.
3. Call `query-atheros` with that `chat_session_id` and your `message`. Pass
   `parent_message_id` (the `Message ID` of a previous answer) to continue a thread.

Notes:
- Answers include the rephrased query when the knowledge base produced one, and cite the top
  source with its relevance score and link.
- Failures come back as plain text explaining what went wrong.";

/// MCP server wrapper around the Onyx control plane and tool routers.
pub struct ContextBankMcp<T: Transport> {
    tool_router: ToolRouter<Self>,
    control: OnyxControlPlane<T>,
}

impl<T: Transport> Clone for ContextBankMcp<T> {
    fn clone(&self) -> Self {
        Self {
            tool_router: self.tool_router.clone(),
            control: self.control.clone(),
        }
    }
}

impl<T: Transport> ContextBankMcp<T> {
    /// Creates a new server over a control plane handle.
    #[must_use]
    pub fn new(control: OnyxControlPlane<T>) -> Self {
        let tool_router = Self::tool_router_chat() + Self::tool_router_search();
        Self {
            tool_router,
            control,
        }
    }

    #[must_use]
    pub const fn control(&self) -> &OnyxControlPlane<T> {
        &self.control
    }
}

#[tool_handler]
impl<T: Transport> ServerHandler for ContextBankMcp<T> {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: SERVER_NAME.into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            instructions: Some(SERVER_INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .build(),
            ..Default::default()
        }
    }
}
