use thiserror::Error;

use super::protocol::ErrorObject;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RpcError {
    #[error("Unsupported version!")]
    UnsupportedVersion,

    #[error("Invalid type!")]
    InvalidType,

    #[error("Failed!")]
    AuthFailed,

    #[error("Parse error")]
    ParseError,

    #[error("Invalid request")]
    InvalidRequest,

    #[error("Method not found")]
    MethodNotFound,

    #[error("Internal error")]
    Internal,
}

impl RpcError {
    /// Numeric code sent in the error object.
    pub fn code(self) -> i64 {
        match self {
            RpcError::UnsupportedVersion => 1,
            RpcError::InvalidType => 2,
            RpcError::AuthFailed => 3,
            RpcError::ParseError => -32700,
            RpcError::InvalidRequest => -32600,
            RpcError::MethodNotFound => -32601,
            RpcError::Internal => -32603,
        }
    }
}

impl From<RpcError> for ErrorObject {
    fn from(err: RpcError) -> Self {
        ErrorObject {
            code: err.code(),
            message: err.to_string(),
        }
    }
}
