use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::schema::{
    DEFAULT_ALTERNATE_ASSISTANT_ID,
    DEFAULT_MODEL_PROVIDER,
    DEFAULT_MODEL_VERSION,
    DEFAULT_PERSONA_ID,
    DEFAULT_PROMPT_ID,
    DEFAULT_REAL_TIME,
    DEFAULT_RUN_SEARCH,
    DEFAULT_SESSION_DESCRIPTION,
    DEFAULT_USE_AGENTIC_SEARCH,
    SEARCH_AUTO_DETECT_FILTERS,
    SEARCH_CHUNKS_ABOVE,
    SEARCH_CHUNKS_BELOW,
    SEARCH_DEDUPE_DOCS,
    SEARCH_EVALUATION_SKIP,
    SEARCH_FULL_DOC,
    SEARCH_LIMIT,
    SEARCH_OFFSET,
    SEARCH_TYPE_SEMANTIC,
};

/// Chat session handle issued by the knowledge base.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatSession {
    pub chat_session_id: String,
}

/// Body for `POST /api/chat/create-chat-session`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateChatSessionRequest {
    pub persona_id: i64,
    pub description: String,
}

impl CreateChatSessionRequest {
    #[must_use]
    pub fn new(persona_id: Option<i64>, description: Option<String>) -> Self {
        Self {
            persona_id: persona_id.unwrap_or(DEFAULT_PERSONA_ID),
            description: description.unwrap_or_else(|| DEFAULT_SESSION_DESCRIPTION.to_string()),
        }
    }
}

impl Default for CreateChatSessionRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Response from `POST /api/chat/create-chat-session`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateChatSessionResponse {
    #[serde(default, deserialize_with = "id_as_string")]
    pub chat_session_id: Option<String>,
}

/// Numeric ids are kept as their decimal text; other non-string values read as absent.
fn id_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(id)) => Some(id),
        Some(Value::Number(id)) => Some(id.to_string()),
        _ => None,
    })
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Filters applied to chat retrieval. The backend expects every key present.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RetrievalFilters {
    pub source_type: Option<Vec<String>>,
    pub document_set: Option<Vec<String>>,
    pub time_cutoff: Option<String>,
    #[serde(default)]
    pub tags: Vec<Value>,
}

/// Retrieval settings attached to a chat message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatRetrievalOptions {
    pub run_search: String,
    pub real_time: bool,
    pub filters: RetrievalFilters,
}

impl Default for ChatRetrievalOptions {
    fn default() -> Self {
        Self {
            run_search: DEFAULT_RUN_SEARCH.to_string(),
            real_time: DEFAULT_REAL_TIME,
            filters: RetrievalFilters::default(),
        }
    }
}

/// Model selection forwarded to the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LlmOverride {
    pub model_provider: String,
    pub model_version: String,
}

impl Default for LlmOverride {
    fn default() -> Self {
        Self {
            model_provider: DEFAULT_MODEL_PROVIDER.to_string(),
            model_version: DEFAULT_MODEL_VERSION.to_string(),
        }
    }
}

/// Body for `POST /api/chat/send-message`.
///
/// Optional fields serialize as explicit `null`; the backend rejects bodies
/// with missing keys.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SendMessageRequest {
    pub alternate_assistant_id: i64,
    pub chat_session_id: String,
    pub message: String,
    pub prompt_id: i64,
    pub search_doc_ids: Option<Vec<i64>>,
    pub file_descriptors: Vec<Value>,
    pub regenerate: bool,
    pub retrieval_options: ChatRetrievalOptions,
    pub prompt_override: Option<Value>,
    pub llm_override: LlmOverride,
    pub use_agentic_search: bool,
    pub parent_message_id: Option<i64>,
}

impl SendMessageRequest {
    #[must_use]
    pub fn new(
        chat_session_id: impl Into<String>,
        message: impl Into<String>,
        parent_message_id: Option<i64>,
    ) -> Self {
        Self {
            alternate_assistant_id: DEFAULT_ALTERNATE_ASSISTANT_ID,
            chat_session_id: chat_session_id.into(),
            message: message.into(),
            prompt_id: DEFAULT_PROMPT_ID,
            search_doc_ids: None,
            file_descriptors: Vec::new(),
            regenerate: false,
            retrieval_options: ChatRetrievalOptions::default(),
            prompt_override: None,
            llm_override: LlmOverride::default(),
            use_agentic_search: DEFAULT_USE_AGENTIC_SEARCH,
            parent_message_id,
        }
    }
}

/// Documents the backend attached to a chat answer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ContextDocs {
    #[serde(default, deserialize_with = "null_as_default")]
    pub top_documents: Vec<Document>,
}

/// Final answer object of a send-message stream.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SendMessageResponse {
    #[serde(default)]
    pub message_id: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub rephrased_query: Option<String>,
    #[serde(default)]
    pub context_docs: Option<ContextDocs>,
}

/// Retrieval settings for a semantic document search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchRetrievalOptions {
    pub enable_auto_detect_filters: bool,
    pub offset: u32,
    pub limit: u32,
    pub dedupe_docs: bool,
}

impl Default for SearchRetrievalOptions {
    fn default() -> Self {
        Self {
            enable_auto_detect_filters: SEARCH_AUTO_DETECT_FILTERS,
            offset: SEARCH_OFFSET,
            limit: SEARCH_LIMIT,
            dedupe_docs: SEARCH_DEDUPE_DOCS,
        }
    }
}

/// Body for `POST /api/chat/document-search`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentSearchRequest {
    pub message: String,
    pub search_type: String,
    pub retrieval_options: SearchRetrievalOptions,
    pub evaluation_type: String,
    pub chunks_above: u32,
    pub chunks_below: u32,
    pub full_doc: bool,
}

impl DocumentSearchRequest {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            search_type: SEARCH_TYPE_SEMANTIC.to_string(),
            retrieval_options: SearchRetrievalOptions::default(),
            evaluation_type: SEARCH_EVALUATION_SKIP.to_string(),
            chunks_above: SEARCH_CHUNKS_ABOVE,
            chunks_below: SEARCH_CHUNKS_BELOW,
            full_doc: SEARCH_FULL_DOC,
        }
    }
}

/// Response from `POST /api/chat/document-search`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DocumentSearchResponse {
    #[serde(default)]
    pub top_documents: Option<Vec<Document>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub llm_indices: Vec<Value>,
}

/// Retrieved document chunk, as returned by search and chat endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Document {
    #[serde(default)]
    pub document_id: Option<String>,
    #[serde(default)]
    pub chunk_ind: Option<i64>,
    #[serde(default)]
    pub semantic_identifier: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub blurb: Option<String>,
    #[serde(default)]
    pub source_type: Option<String>,
    #[serde(default)]
    pub boost: Option<f64>,
    #[serde(default)]
    pub hidden: Option<bool>,
    #[serde(default)]
    pub metadata: Option<Value>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub is_relevant: Option<bool>,
    #[serde(default)]
    pub relevance_explanation: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub match_highlights: Vec<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub primary_owners: Option<Value>,
    #[serde(default)]
    pub secondary_owners: Option<Value>,
    #[serde(default)]
    pub is_internet: Option<bool>,
    #[serde(default)]
    pub db_doc_id: Option<i64>,
    #[serde(default)]
    pub content: Option<String>,
}
