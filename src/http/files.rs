//! Static file resolution and response construction.
//!
//! A target is mapped to a file by plain concatenation of the configured
//! root and the target, so `/index.html` becomes `./index.html` with the
//! default root. Targets containing a `..` segment are refused as not found.

use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use tokio::fs::File;

use crate::config::StaticFilesConfig;
use crate::http::error::RequestError;
use crate::http::mime;
use crate::http::request::Request;
use crate::http::response::{Body, Response, ResponseBuilder, StatusCode};
use crate::http::router::Action;

/// A file on disk matching a request target.
#[derive(Debug, Clone)]
pub struct Resource {
    pub path: PathBuf,
    pub len: u64,
    pub modified: SystemTime,
}

impl Resource {
    /// Opens `root + target`. Missing files and directories are `NotFound`.
    ///
    /// Length and modification time come from the open handle, so they
    /// describe the same file that gets streamed.
    pub async fn open(root: &str, target: &str) -> Result<(Self, File), RequestError> {
        if escapes_root(target) {
            return Err(RequestError::NotFound(target.to_string()));
        }

        let path = PathBuf::from(format!("{}{}", root, target));

        let file = match File::open(&path).await {
            Ok(file) => file,
            Err(e) if is_missing(&e) => return Err(RequestError::NotFound(target.to_string())),
            Err(e) => return Err(e.into()),
        };

        let meta = file.metadata().await?;
        if !meta.is_file() {
            return Err(RequestError::NotFound(target.to_string()));
        }

        let resource = Self {
            path,
            len: meta.len(),
            modified: meta.modified()?,
        };
        Ok((resource, file))
    }

    /// The media type inferred from the file name.
    pub fn content_type(&self) -> &'static str {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();
        mime::content_type(&name)
    }

    /// True when a client copy dated `since` is still current.
    ///
    /// HTTP dates carry whole seconds, so the modification time is
    /// truncated before comparing.
    pub fn not_modified_since(&self, since: SystemTime) -> bool {
        since >= truncate_to_seconds(self.modified)
    }
}

/// Serves files below the configured root.
#[derive(Debug, Clone)]
pub struct StaticFiles {
    config: Arc<StaticFilesConfig>,
}

impl StaticFiles {
    pub fn new(config: Arc<StaticFilesConfig>) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StaticFilesConfig {
        &self.config
    }

    /// Builds the 200 or 304 response for a routed GET/HEAD request.
    pub async fn serve(&self, req: &Request, action: Action) -> Result<Response, RequestError> {
        let (resource, file) = Resource::open(&self.config.root, &req.path).await?;

        if let Some(since) = req.if_modified_since() {
            if resource.not_modified_since(since) {
                tracing::debug!(path = %req.path, "Resource not modified");
                return Ok(self.base(StatusCode::NotModified).build());
            }
        }

        let body = match action {
            Action::Get => Body::File {
                file,
                len: resource.len,
            },
            Action::Head => Body::Empty,
        };

        Ok(self
            .base(StatusCode::Ok)
            .header("Content-Length", resource.len.to_string())
            .header("Content-Type", resource.content_type())
            .header("Last-Modified", httpdate::fmt_http_date(resource.modified))
            .body(body)
            .build())
    }

    /// Error page for a classified failure.
    pub fn error_response(&self, status: StatusCode, head_only: bool) -> Response {
        Response::error(status, &self.config.server_name, head_only)
    }

    fn base(&self, status: StatusCode) -> ResponseBuilder {
        ResponseBuilder::new(status).general_headers(&self.config.server_name, SystemTime::now())
    }
}

fn is_missing(e: &io::Error) -> bool {
    matches!(e.kind(), io::ErrorKind::NotFound | io::ErrorKind::NotADirectory)
}

fn escapes_root(target: &str) -> bool {
    Path::new(target)
        .components()
        .any(|c| matches!(c, Component::ParentDir))
}

fn truncate_to_seconds(time: SystemTime) -> SystemTime {
    let since_epoch = time
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or(Duration::ZERO);
    SystemTime::UNIX_EPOCH + Duration::from_secs(since_epoch.as_secs())
}
