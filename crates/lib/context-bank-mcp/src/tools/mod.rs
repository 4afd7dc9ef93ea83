//! MCP tool modules.
//!
//! Tools are grouped by backend area: chat sessions and messages, and
//! semantic document search.

pub mod chat;
pub mod search;
