use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::error::RpcError;
use super::protocol::{Request, Response};
use crate::service::SessionService;

/// What goes back over the wire for one HTTP body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Reply {
    Single(Response),
    Batch(Vec<Response>),
    /// Every call was a notification.
    #[serde(skip)]
    Empty,
}

/// Parse a raw body and handle it. Bodies that are not JSON get a Parse error.
pub fn handle_body(service: &SessionService, body: &[u8]) -> Reply {
    match serde_json::from_slice::<Value>(body) {
        Ok(payload) => handle_payload(service, payload),
        Err(e) => {
            debug!(error = %e, "unparseable request body");
            Reply::Single(Response::error(Value::Null, RpcError::ParseError))
        }
    }
}

/// Handle a single request object or a batch array.
pub fn handle_payload(service: &SessionService, payload: Value) -> Reply {
    match payload {
        Value::Array(items) if items.is_empty() => {
            Reply::Single(Response::error(Value::Null, RpcError::InvalidRequest))
        }
        Value::Array(items) => {
            let responses: Vec<Response> = items
                .into_iter()
                .filter_map(|item| handle_one(service, item))
                .collect();
            if responses.is_empty() {
                Reply::Empty
            } else {
                Reply::Batch(responses)
            }
        }
        other => match handle_one(service, other) {
            Some(response) => Reply::Single(response),
            None => Reply::Empty,
        },
    }
}

/// `None` means the request was a notification.
fn handle_one(service: &SessionService, value: Value) -> Option<Response> {
    let request = match Request::from_value(value) {
        Ok(request) => request,
        Err(e) => {
            debug!(error = %e, "rejected request object");
            return Some(Response::error(Value::Null, e));
        }
    };

    let outcome = service.call(&request.method, request.params());
    if let Err(e) = &outcome {
        debug!(method = %request.method, code = e.code(), error = %e, "call failed");
    }

    let id = request.id?;
    Some(match outcome {
        Ok(result) => Response::result(id, result),
        Err(e) => Response::error(id, e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::SESSION_ID;
    use serde_json::json;

    fn reply_json(payload: Value) -> Option<Value> {
        let service = SessionService::default();
        match handle_payload(&service, payload) {
            Reply::Empty => None,
            reply => Some(serde_json::to_value(reply).unwrap()),
        }
    }

    #[test]
    fn test_login_success_response() {
        let reply = reply_json(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "login",
            "params": {"version": 0, "type": 0, "username": "UMU", "data": "123456"}
        }));
        assert_eq!(
            reply,
            Some(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "result": {"interval": 5, "session_id": SESSION_ID}
            }))
        );
    }

    #[test]
    fn test_domain_errors_echo_id() {
        let reply = reply_json(json!({
            "jsonrpc": "2.0",
            "id": "abc",
            "method": "login",
            "params": {"version": 1}
        }));
        assert_eq!(
            reply,
            Some(json!({
                "jsonrpc": "2.0",
                "id": "abc",
                "error": {"code": 1, "message": "Unsupported version!"}
            }))
        );

        let reply = reply_json(json!({
            "jsonrpc": "2.0",
            "id": 2,
            "method": "login",
            "params": {"version": 0, "type": 7}
        }))
        .unwrap();
        assert_eq!(reply["error"], json!({"code": 2, "message": "Invalid type!"}));

        let reply = reply_json(json!({
            "jsonrpc": "2.0",
            "id": 3,
            "method": "login",
            "params": {"version": 0, "type": 0, "username": "UMU", "data": "wrong"}
        }))
        .unwrap();
        assert_eq!(reply["error"], json!({"code": 3, "message": "Failed!"}));
    }

    #[test]
    fn test_logout_result_is_null() {
        let reply =
            reply_json(json!({"jsonrpc": "2.0", "id": 9, "method": "logout", "params": {}}));
        assert_eq!(reply, Some(json!({"jsonrpc": "2.0", "id": 9, "result": null})));
    }

    #[test]
    fn test_method_not_found() {
        let reply = reply_json(json!({"jsonrpc": "2.0", "id": 4, "method": "whoami"})).unwrap();
        assert_eq!(reply["id"], json!(4));
        assert_eq!(reply["error"]["code"], json!(-32601));
    }

    #[test]
    fn test_invalid_request_has_null_id() {
        let reply = reply_json(json!({"jsonrpc": "1.0", "id": 4, "method": "logout"})).unwrap();
        assert_eq!(reply["id"], Value::Null);
        assert_eq!(reply["error"]["code"], json!(-32600));
    }

    #[test]
    fn test_structured_id_is_invalid_request() {
        for id in [json!({"a": 1}), json!([1]), json!(true)] {
            let reply = reply_json(json!({
                "jsonrpc": "2.0",
                "id": id,
                "method": "keepalive",
                "params": {}
            }))
            .unwrap();
            assert_eq!(reply["id"], Value::Null);
            assert_eq!(reply["error"]["code"], json!(-32600));
            assert!(reply.get("result").is_none());
        }
    }

    #[test]
    fn test_notification_gets_no_reply() {
        assert_eq!(reply_json(json!({"jsonrpc": "2.0", "method": "logout"})), None);
        // Failing notifications are silent too
        assert_eq!(
            reply_json(json!({"jsonrpc": "2.0", "method": "login", "params": {"version": 3}})),
            None
        );
    }

    #[test]
    fn test_batch() {
        let reply = reply_json(json!([
            {
                "jsonrpc": "2.0",
                "id": 1,
                "method": "keepalive",
                "params": {"session_id": SESSION_ID}
            },
            {"jsonrpc": "2.0", "method": "logout", "params": {}},
            {"jsonrpc": "2.0", "id": 2, "method": "nope"},
            42
        ]))
        .unwrap();
        let items = reply.as_array().unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0]["result"]["session_id"], json!(SESSION_ID));
        assert_eq!(items[1]["error"]["code"], json!(-32601));
        assert_eq!(items[2]["error"]["code"], json!(-32600));
    }

    #[test]
    fn test_empty_batch_is_invalid() {
        let reply = reply_json(json!([])).unwrap();
        assert_eq!(reply["error"]["code"], json!(-32600));
    }

    #[test]
    fn test_batch_of_notifications_is_empty() {
        let reply = reply_json(json!([
            {"jsonrpc": "2.0", "method": "logout"},
            {"jsonrpc": "2.0", "method": "keepalive"}
        ]));
        assert_eq!(reply, None);
    }

    #[test]
    fn test_parse_error() {
        let service = SessionService::default();
        let reply = serde_json::to_value(handle_body(&service, b"{not json")).unwrap();
        assert_eq!(
            reply,
            json!({
                "jsonrpc": "2.0",
                "id": null,
                "error": {"code": -32700, "message": "Parse error"}
            })
        );
    }
}
