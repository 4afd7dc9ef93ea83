use context_bank_core::client::Transport;
use context_bank_core::control::ControlError;
use context_bank_core::format::format_send_message_response;
use context_bank_store::models::{CreateChatSessionRequest, SendMessageRequest};
use rmcp::{
    ErrorData,
    handler::server::wrapper::Parameters,
    model::CallToolResult,
    schemars,
    tool,
    tool_router,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{ContextBankMcp, helpers};

const SESSION_CREATE_FAILED: &str =
    "Failed to create chat session for querying the AtherOS's knowledge base";
const SESSION_ID_MISSING: &str = "Failed to get chat session id";

/// Parameters for opening a chat session.
#[derive(Debug, Clone, Default, Serialize, Deserialize, schemars::JsonSchema)]
pub struct CreateChatSessionParams {
    /// User id, default is 0.
    pub persona_id: Option<i64>,
    /// Description of the chat session, default is empty string.
    pub description: Option<String>,
}

/// Parameters for sending a message to a chat session.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct QueryAtherosParams {
    /// Chat session id.
    pub chat_session_id: String,
    /// Message to send for querying the knowledge base.
    pub message: String,
    /// Parent message id when the message replies to a previous answer; omit otherwise.
    pub parent_message_id: Option<i64>,
}

#[tool_router(router = tool_router_chat, vis = "pub")]
impl<T: Transport> ContextBankMcp<T> {
    #[tool(
        name = "create-chat-session",
        description = "Create a chat session for querying the AtherOS's knowledge base"
    )]
    async fn create_chat_session(
        &self,
        Parameters(params): Parameters<CreateChatSessionParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let request = CreateChatSessionRequest::new(params.persona_id, params.description);
        debug!(persona_id = request.persona_id, "creating chat session");

        let text = match self.control.create_chat_session(request).await {
            Ok(session) => format!(
                "Chat session created for querying the AtherOS's knowledge base. Chat session id: {}",
                session.chat_session_id
            ),
            Err(ControlError::MissingField(field)) => {
                warn!(field, "create-chat-session response is incomplete");
                SESSION_ID_MISSING.to_string()
            }
            Err(ControlError::Client(_)) => SESSION_CREATE_FAILED.to_string(),
        };
        Ok(helpers::text_result(text))
    }

    #[tool(
        name = "query-atheros",
        description = "Send a message to the chat session for querying the AtherOS's knowledge base"
    )]
    async fn query_atheros(
        &self,
        Parameters(params): Parameters<QueryAtherosParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let QueryAtherosParams {
            chat_session_id,
            message,
            parent_message_id,
        } = params;
        debug!(%chat_session_id, ?parent_message_id, "sending chat message");

        let request =
            SendMessageRequest::new(chat_session_id.as_str(), message.as_str(), parent_message_id);
        let text = match self.control.send_message(request).await {
            Ok(response) => format_send_message_response(&response),
            Err(ControlError::MissingField(field)) => {
                warn!(field, %chat_session_id, "send-message answer is incomplete");
                format!("Failed to get message response from chat session {chat_session_id}")
            }
            Err(ControlError::Client(_)) => {
                format!("Failed to send message {message} to chat session {chat_session_id}")
            }
        };
        Ok(helpers::text_result(text))
    }
}
