//! Observability sink for session calls.
//!
//! Handlers never write to a console directly. They hand a `SessionEvent`
//! to whatever `EventSink` the service was built with.

use std::fmt;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Login,
    Keepalive,
    Logout,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventKind::Login => "login",
            EventKind::Keepalive => "keepalive",
            EventKind::Logout => "logout",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionEvent {
    pub kind: EventKind,
    /// Raw call arguments, exactly as received.
    pub args: Value,
    pub at: DateTime<Utc>,
}

impl SessionEvent {
    pub fn new(kind: EventKind, args: Value) -> Self {
        Self {
            kind,
            args,
            at: Utc::now(),
        }
    }
}

pub trait EventSink: Send + Sync {
    fn record(&self, event: &SessionEvent);
}

/// Writes events to the process-wide `tracing` subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn record(&self, event: &SessionEvent) {
        info!(event = %event.kind, args = %event.args, "session call");
    }
}

/// Keeps every event in memory, in arrival order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<SessionEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<SessionEvent> {
        match self.events.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn kinds(&self) -> Vec<EventKind> {
        self.events().iter().map(|e| e.kind).collect()
    }
}

impl EventSink for RecordingSink {
    fn record(&self, event: &SessionEvent) {
        // A poisoned lock only means another recorder panicked; keep recording.
        let mut events = match self.events.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        events.push(event.clone());
    }
}
