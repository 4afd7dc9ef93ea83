pub const PATH_CREATE_CHAT_SESSION: &str = "/api/chat/create-chat-session";
pub const PATH_SEND_MESSAGE: &str = "/api/chat/send-message";
pub const PATH_DOCUMENT_SEARCH: &str = "/api/chat/document-search";

/// Anchor object the send-message stream emits once, right before the answer.
pub const AGENTIC_SENTINEL: &str = r#"{"agentic_message_ids": []}"#;

pub const DEFAULT_PERSONA_ID: i64 = 0;
pub const DEFAULT_SESSION_DESCRIPTION: &str = "";

pub const DEFAULT_ALTERNATE_ASSISTANT_ID: i64 = 0;
pub const DEFAULT_PROMPT_ID: i64 = 0;
pub const DEFAULT_RUN_SEARCH: &str = "auto";
pub const DEFAULT_REAL_TIME: bool = true;
pub const DEFAULT_MODEL_PROVIDER: &str = "Default";
pub const DEFAULT_MODEL_VERSION: &str = "gpt-4o";
pub const DEFAULT_USE_AGENTIC_SEARCH: bool = false;

pub const SEARCH_TYPE_SEMANTIC: &str = "semantic";
pub const SEARCH_EVALUATION_SKIP: &str = "skip";
pub const SEARCH_OFFSET: u32 = 0;
pub const SEARCH_LIMIT: u32 = 3;
pub const SEARCH_DEDUPE_DOCS: bool = true;
pub const SEARCH_AUTO_DETECT_FILTERS: bool = false;
pub const SEARCH_CHUNKS_ABOVE: u32 = 1;
pub const SEARCH_CHUNKS_BELOW: u32 = 1;
pub const SEARCH_FULL_DOC: bool = false;

#[must_use]
pub fn endpoint_url(base: &str, path: &str) -> String {
    format!("{}{path}", base.trim_end_matches('/'))
}
