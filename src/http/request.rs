use std::collections::HashMap;
use std::time::SystemTime;

/// HTTP request methods.
///
/// GET and HEAD are served, POST is recognized but not implemented.
/// Every other token is kept verbatim so routing can reject it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
    /// HEAD - Like GET but without the response body
    HEAD,
    /// POST - Submit data (answered with 501)
    POST,
    /// Any other token, case preserved
    Other(String),
}

/// Represents a parsed HTTP request from a client.
///
/// Contains all information extracted from the request line and headers.
/// Request bodies are never read.
#[derive(Debug, Clone)]
pub struct Request {
    /// The HTTP method (GET, HEAD, ...)
    pub method: Method,
    /// The request target (e.g., "/index.html")
    pub path: String,
    /// HTTP version token (e.g., "HTTP/1.0")
    pub version: String,
    /// Request headers keyed by lowercase name, values trimmed
    pub headers: HashMap<String, String>,
}

/// Builder for constructing Request objects.
pub struct RequestBuilder {
    method: Option<Method>,
    path: Option<String>,
    version: Option<String>,
    headers: HashMap<String, String>,
}

impl Method {
    /// Maps a request-line token to a method.
    ///
    /// Matching is case-sensitive, so `get` becomes `Method::Other("get")`.
    ///
    /// # Example
    ///
    /// ```
    /// # use labserver::http::request::Method;
    /// assert_eq!(Method::from_token("GET"), Method::GET);
    /// assert_eq!(Method::from_token("get"), Method::Other("get".to_string()));
    /// ```
    pub fn from_token(s: &str) -> Self {
        match s {
            "GET" => Method::GET,
            "HEAD" => Method::HEAD,
            "POST" => Method::POST,
            other => Method::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Method::GET => "GET",
            Method::HEAD => "HEAD",
            Method::POST => "POST",
            Method::Other(s) => s,
        }
    }
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self {
            method: None,
            path: None,
            version: None,
            headers: HashMap::new(),
        }
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn header(mut self, key: &str, value: impl Into<String>) -> Self {
        self.headers.insert(key.to_ascii_lowercase(), value.into());
        self
    }

    pub fn build(self) -> Result<Request, &'static str> {
        Ok(Request {
            method: self.method.ok_or("method missing")?,
            path: self.path.ok_or("path missing")?,
            version: self.version.unwrap_or_else(|| super::HTTP_VERSION.to_string()),
            headers: self.headers,
        })
    }
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Request {
    /// Retrieves a header value by name, ignoring ASCII case.
    ///
    /// # Returns
    ///
    /// `Some(&str)` with the header value if present, `None` otherwise.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .get(&key.to_ascii_lowercase())
            .map(|v| v.as_str())
    }

    /// Parses the `If-Modified-Since` header.
    ///
    /// Returns `None` when the header is absent or not a valid HTTP date,
    /// which makes the request unconditional.
    pub fn if_modified_since(&self) -> Option<SystemTime> {
        self.header("If-Modified-Since")
            .and_then(|v| httpdate::parse_http_date(v).ok())
    }

    pub fn is_head(&self) -> bool {
        self.method == Method::HEAD
    }
}
