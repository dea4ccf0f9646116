//! The three session methods and the name-based dispatch table.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::auth::{Credential, CredentialScheme, SessionGrant};
use crate::events::{EventKind, EventSink, SessionEvent, TracingSink};
use crate::rpc::RpcError;

/// Protocol version accepted by `login`.
const SUPPORTED_VERSION: i64 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Login,
    Keepalive,
    Logout,
}

impl Method {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "login" => Some(Method::Login),
            "keepalive" => Some(Method::Keepalive),
            "logout" => Some(Method::Logout),
            _ => None,
        }
    }
}

/// Stateless handler set. Cloning shares the sink.
#[derive(Clone)]
pub struct SessionService {
    sink: Arc<dyn EventSink>,
}

impl Default for SessionService {
    fn default() -> Self {
        Self::new(Arc::new(TracingSink))
    }
}

impl SessionService {
    pub fn new(sink: Arc<dyn EventSink>) -> Self {
        Self { sink }
    }

    /// Run `method` against `params` and return the JSON result value.
    pub fn call(&self, method: &str, params: &Value) -> Result<Value, RpcError> {
        let method = Method::from_name(method).ok_or(RpcError::MethodNotFound)?;
        let result = match method {
            Method::Login => grant_value(self.login(params)?)?,
            Method::Keepalive => grant_value(self.keepalive(params))?,
            Method::Logout => {
                self.logout(params);
                Value::Null
            }
        };
        Ok(result)
    }

    /// Check version, then scheme, then the credential literals.
    pub fn login(&self, params: &Value) -> Result<SessionGrant, RpcError> {
        let version = params.get("version").and_then(Value::as_f64);
        if version != Some(SUPPORTED_VERSION as f64) {
            return Err(RpcError::UnsupportedVersion);
        }

        let scheme = params
            .get("type")
            .and_then(integral)
            .and_then(CredentialScheme::from_code)
            .ok_or(RpcError::InvalidType)?;

        let credential = Credential::new(
            scheme,
            params.get("username").and_then(Value::as_str),
            params.get("data").and_then(Value::as_str),
        );
        if !credential.is_accepted() {
            debug!(scheme = scheme.code(), "login rejected");
            return Err(RpcError::AuthFailed);
        }

        if scheme == CredentialScheme::Password {
            self.sink.record(&SessionEvent::new(EventKind::Login, params.clone()));
        }
        Ok(SessionGrant::fixed())
    }

    /// Always succeeds; the presented session id is not checked.
    pub fn keepalive(&self, params: &Value) -> SessionGrant {
        self.sink.record(&SessionEvent::new(EventKind::Keepalive, params.clone()));
        SessionGrant::fixed()
    }

    /// Always succeeds; there is no session table to remove anything from.
    pub fn logout(&self, params: &Value) {
        self.sink.record(&SessionEvent::new(EventKind::Logout, params.clone()));
    }
}

fn grant_value(grant: SessionGrant) -> Result<Value, RpcError> {
    serde_json::to_value(grant).map_err(|e| {
        debug!(error = %e, "failed to encode session grant");
        RpcError::Internal
    })
}

/// A JSON number with no fractional part, as an integer.
fn integral(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    let f = value.as_f64()?;
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

// ============================================================================
// Tests
// ============================================================================
