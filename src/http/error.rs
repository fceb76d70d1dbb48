//! Classified request failures.

use crate::http::response::StatusCode;

/// Every way a request can fail to produce a 200 or 304.
///
/// All variants except `Internal` are answered with their own status and
/// a short HTML body; `Internal` becomes a best-effort 500.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("malformed request line")]
    Malformed,

    #[error("unsupported protocol version {0}")]
    UnsupportedVersion(String),

    #[error("illegal request target {0}")]
    IllegalTarget(String),

    #[error("method {0} is not implemented")]
    NotImplemented(String),

    #[error("unsupported method {0}")]
    UnsupportedMethod(String),

    #[error("resource {0} not found")]
    NotFound(String),

    #[error("I/O failure: {0}")]
    Internal(#[from] std::io::Error),
}

impl RequestError {
    pub fn status(&self) -> StatusCode {
        match self {
            RequestError::Malformed
            | RequestError::IllegalTarget(_)
            | RequestError::UnsupportedMethod(_) => StatusCode::BadRequest,
            RequestError::UnsupportedVersion(_) | RequestError::NotImplemented(_) => {
                StatusCode::NotImplemented
            }
            RequestError::NotFound(_) => StatusCode::NotFound,
            RequestError::Internal(_) => StatusCode::InternalServerError,
        }
    }
}
