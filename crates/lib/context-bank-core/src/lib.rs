//! Core client and formatting for context-bank.
//!
//! This crate owns the HTTP bridge to the Onyx knowledge base: the stream
//! body parser, the API client and its transport seam, the control plane that
//! applies per-operation checks, and the text rendering of chat answers.

pub mod client;
pub mod control;
pub mod format;
pub mod parsers;
