use context_bank_store::models::{
    ChatSession,
    CreateChatSessionRequest,
    CreateChatSessionResponse,
    SendMessageRequest,
    SendMessageResponse,
};

use crate::client::{Endpoint, Transport};

use super::{ControlError, OnyxControlPlane};

impl<T: Transport> OnyxControlPlane<T> {
    /// Opens a chat session on the knowledge base.
    ///
    /// # Errors
    /// Returns `ControlError::Client` if the request fails and
    /// `ControlError::MissingField` if no session id comes back.
    pub async fn create_chat_session(
        &self,
        request: CreateChatSessionRequest,
    ) -> Result<ChatSession, ControlError> {
        let response: CreateChatSessionResponse = self
            .client
            .post(Endpoint::CreateChatSession, &request)
            .await?;

        let chat_session_id = response
            .chat_session_id
            .filter(|id| !id.trim().is_empty())
            .ok_or(ControlError::MissingField("chat_session_id"))?;
        Ok(ChatSession { chat_session_id })
    }

    /// Sends a message to a chat session and returns the final answer.
    ///
    /// # Errors
    /// Returns `ControlError::Client` if the request fails and
    /// `ControlError::MissingField` if the answer carries no message text.
    pub async fn send_message(
        &self,
        request: SendMessageRequest,
    ) -> Result<SendMessageResponse, ControlError> {
        let response: SendMessageResponse =
            self.client.post(Endpoint::SendMessage, &request).await?;

        if response.message.as_deref().is_none_or(str::is_empty) {
            return Err(ControlError::MissingField("message"));
        }
        Ok(response)
    }
}
