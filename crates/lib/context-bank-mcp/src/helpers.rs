use rmcp::model::{CallToolResult, Content};

/// Wraps a single text block as a successful tool result.
pub fn text_result(text: impl Into<String>) -> CallToolResult {
    texts_result([text.into()])
}

/// Wraps text blocks as a successful tool result; failures are reported as text too.
pub fn texts_result(texts: impl IntoIterator<Item = String>) -> CallToolResult {
    CallToolResult::success(texts.into_iter().map(Content::text).collect())
}
