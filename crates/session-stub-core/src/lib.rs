//! Core library for session-stub.
//!
//! A fixture JSON-RPC service with three methods (`login`, `keepalive`,
//! `logout`) that answers with hardcoded credentials and a fixed session id.
//! Clients under test can point at it instead of a real user service.

pub mod auth;
pub mod config;
pub mod events;
pub mod http;
pub mod rpc;
pub mod service;

pub use config::Config;
pub use events::{EventSink, RecordingSink, SessionEvent, TracingSink};
pub use service::SessionService;
