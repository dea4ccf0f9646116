//! JSON-RPC 2.0 framing for the session service.
//!
//! This module provides the wire types (`Request`, `Response`, `ErrorObject`),
//! the `RpcError` taxonomy, and `handle_payload`, which turns one parsed HTTP
//! body (single call or batch) into the reply to send back.

pub mod dispatch;
pub mod error;
pub mod protocol;

pub use dispatch::{handle_body, handle_payload, Reply};
pub use error::RpcError;
pub use protocol::{ErrorObject, Request, Response};
