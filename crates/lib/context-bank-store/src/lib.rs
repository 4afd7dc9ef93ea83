//! Wire models and request defaults for the Onyx knowledge-base API.
//!
//! This crate defines the request and response shapes shared by the API
//! client, the control plane, and the MCP tool surface.

pub mod models;
pub mod schema;

pub use models::*;
