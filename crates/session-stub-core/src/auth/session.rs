use serde::Serialize;

/// Session id issued on every successful login.
pub const SESSION_ID: &str = "64162c06-3770-44ef-9c85-19d640ba0155";

/// Seconds a client should wait between keepalive calls.
pub const KEEPALIVE_INTERVAL_SECS: u64 = 5;

/// Result payload of `login` and `keepalive`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionGrant {
    pub interval: u64,
    pub session_id: String,
}

impl SessionGrant {
    /// The grant every successful call receives. Never rotated.
    pub fn fixed() -> Self {
        Self {
            interval: KEEPALIVE_INTERVAL_SECS,
            session_id: SESSION_ID.to_string(),
        }
    }
}
