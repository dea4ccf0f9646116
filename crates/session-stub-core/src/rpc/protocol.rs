use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::error::RpcError;

pub const JSONRPC_VERSION: &str = "2.0";

/// A validated request object.
///
/// `id` is `None` only when the member was absent (a notification);
/// an explicit `"id": null` becomes `Some(Value::Null)`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Request {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
    #[serde(default, deserialize_with = "present_value")]
    pub id: Option<Value>,
}

fn present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl Request {
    /// Validate one element of a payload.
    ///
    /// Any shape problem is an Invalid Request; the caller answers with a null id.
    pub fn from_value(value: Value) -> Result<Self, RpcError> {
        let request: Request =
            serde_json::from_value(value).map_err(|_| RpcError::InvalidRequest)?;
        if request.jsonrpc != JSONRPC_VERSION {
            return Err(RpcError::InvalidRequest);
        }
        match request.params {
            None | Some(Value::Object(_)) | Some(Value::Array(_)) => {}
            Some(_) => return Err(RpcError::InvalidRequest),
        }
        // ids are strings, numbers or null
        match request.id {
            Some(Value::Object(_)) | Some(Value::Array(_)) | Some(Value::Bool(_)) => {
                return Err(RpcError::InvalidRequest);
            }
            _ => {}
        }
        Ok(request)
    }

    /// Params as handlers see them; absent params read as null.
    pub fn params(&self) -> &Value {
        self.params.as_ref().unwrap_or(&Value::Null)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorObject {
    pub code: i64,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Result(Value),
    Error(ErrorObject),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl Response {
    pub fn result(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            outcome: Outcome::Result(result),
        }
    }

    pub fn error(id: Value, error: impl Into<ErrorObject>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            outcome: Outcome::Error(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_without_id_is_notification() {
        let req = Request::from_value(json!({"jsonrpc": "2.0", "method": "logout"})).unwrap();
        assert_eq!(req.id, None);
        assert_eq!(req.params(), &Value::Null);
    }

    #[test]
    fn test_request_with_null_id_is_not_notification() {
        let req =
            Request::from_value(json!({"jsonrpc": "2.0", "method": "logout", "id": null}))
                .unwrap();
        assert_eq!(req.id, Some(Value::Null));
    }

    #[test]
    fn test_request_rejects_bad_shapes() {
        let bad = [
            json!("login"),
            json!({"method": "login", "id": 1}),
            json!({"jsonrpc": "1.0", "method": "login", "id": 1}),
            json!({"jsonrpc": "2.0", "method": 7, "id": 1}),
            json!({"jsonrpc": "2.0", "id": 1}),
            json!({"jsonrpc": "2.0", "method": "login", "params": "x", "id": 1}),
            json!({"jsonrpc": "2.0", "method": "logout", "id": {"a": 1}}),
            json!({"jsonrpc": "2.0", "method": "logout", "id": [1]}),
            json!({"jsonrpc": "2.0", "method": "logout", "id": true}),
        ];
        for value in bad {
            assert_eq!(
                Request::from_value(value.clone()),
                Err(RpcError::InvalidRequest),
                "{value}"
            );
        }
    }

    #[test]
    fn test_request_accepts_string_and_number_ids() {
        for id in [json!("abc"), json!(7), json!(1.5)] {
            let value = json!({"jsonrpc": "2.0", "method": "logout", "id": id.clone()});
            let req = Request::from_value(value).unwrap();
            assert_eq!(req.id, Some(id));
        }
    }

    #[test]
    fn test_response_serializes_null_result() {
        let resp = Response::result(json!(3), Value::Null);
        assert_eq!(
            serde_json::to_value(&resp).unwrap(),
            json!({"jsonrpc": "2.0", "id": 3, "result": null})
        );
    }

    #[test]
    fn test_response_serializes_error() {
        let resp = Response::error(Value::Null, RpcError::ParseError);
        assert_eq!(
            serde_json::to_value(&resp).unwrap(),
            json!({
                "jsonrpc": "2.0",
                "id": null,
                "error": {"code": -32700, "message": "Parse error"}
            })
        );
    }
}
