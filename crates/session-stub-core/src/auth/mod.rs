//! Credential checks and the session grant handed out on success.
//!
//! This module provides:
//! - `CredentialScheme` / `Credential`: the three literal login schemes
//! - `SessionGrant`: the fixed interval/session pair returned by login and keepalive
//!
//! Nothing is stored. Every check compares against literals and every grant is identical.

pub mod credentials;
pub mod session;

pub use credentials::{Credential, CredentialScheme};
pub use session::{SessionGrant, KEEPALIVE_INTERVAL_SECS, SESSION_ID};
