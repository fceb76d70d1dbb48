//! Method and route resolution.
//!
//! Checks run in a fixed order and the first failing one decides the
//! status, so the same request is always classified the same way:
//!
//! 1. version other than `HTTP/1.0` → 501
//! 2. target not starting with `/` → 400
//! 3. GET or HEAD → serve the file
//! 4. POST → 501
//! 5. anything else → 400
//!
//! Structurally malformed request lines never get here; the parser
//! rejects them with 400 first.

use crate::http::error::RequestError;
use crate::http::request::{Method, Request};
use crate::http::HTTP_VERSION;

/// What to do with a request that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Send headers and the file body
    Get,
    /// Send headers only
    Head,
}

pub fn route(req: &Request) -> Result<Action, RequestError> {
    if req.version != HTTP_VERSION {
        return Err(RequestError::UnsupportedVersion(req.version.clone()));
    }

    if !req.path.starts_with('/') {
        return Err(RequestError::IllegalTarget(req.path.clone()));
    }

    match &req.method {
        Method::GET => Ok(Action::Get),
        Method::HEAD => Ok(Action::Head),
        Method::POST => Err(RequestError::NotImplemented(req.method.as_str().to_string())),
        Method::Other(m) => Err(RequestError::UnsupportedMethod(m.clone())),
    }
}
