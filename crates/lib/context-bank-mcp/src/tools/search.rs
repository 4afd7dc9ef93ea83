use context_bank_core::client::Transport;
use context_bank_core::format::NO_LINK;
use context_bank_store::models::{Document, DocumentSearchRequest};
use rmcp::{
    ErrorData,
    handler::server::wrapper::Parameters,
    model::CallToolResult,
    schemars,
    tool,
    tool_router,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{ContextBankMcp, helpers};

const SEARCH_FAILED: &str = "Failed to search for documents in the AtherOS's knowledge base";
const NO_DOCUMENTS: &str = "No documents found in the AtherOS's knowledge base";

/// Parameters for a semantic document search.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct DocumentSearchParams {
    /// Message to search for.
    pub message: String,
}

#[tool_router(router = tool_router_search, vis = "pub")]
impl<T: Transport> ContextBankMcp<T> {
    #[tool(
        name = "document-search",
        description = "Search for documents in the AtherOS's knowledge base"
    )]
    async fn document_search(
        &self,
        Parameters(params): Parameters<DocumentSearchParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let request = DocumentSearchRequest::new(params.message);
        let texts = match self.control.search_documents(request).await {
            Ok(documents) if documents.is_empty() => vec![NO_DOCUMENTS.to_string()],
            Ok(documents) => {
                debug!(count = documents.len(), "document search returned results");
                documents.iter().map(document_text).collect()
            }
            Err(_) => vec![SEARCH_FAILED.to_string()],
        };
        Ok(helpers::texts_result(texts))
    }
}

fn document_text(document: &Document) -> String {
    let content = document.content.as_deref().unwrap_or_default();
    let link = document
        .link
        .as_deref()
        .filter(|link| !link.is_empty())
        .unwrap_or(NO_LINK);
    format!("{content}\n{link}")
}
