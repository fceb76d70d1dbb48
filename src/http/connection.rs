use std::sync::Arc;

use bytes::{Buf, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{error, info, warn};

use crate::config::StaticFilesConfig;
use crate::http::error::RequestError;
use crate::http::files::StaticFiles;
use crate::http::parser::{parse_http_request, ParseError};
use crate::http::request::Request;
use crate::http::response::{Response, StatusCode};
use crate::http::router;
use crate::http::writer::ResponseWriter;

/// Handles exactly one request on one client stream.
pub struct Connection<S> {
    stream: S,
    buffer: BytesMut,
    files: StaticFiles,
    state: ConnectionState,
    head_only: bool,
    response_started: bool,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(ResponseWriter),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, config: Arc<StaticFilesConfig>) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(4096),
            files: StaticFiles::new(config),
            state: ConnectionState::Reading,
            head_only: false,
            response_started: false,
        }
    }

    /// Reads one request, writes one response and closes the stream.
    ///
    /// Never fails: internal errors become a best-effort 500 and are logged.
    pub async fn run(mut self) {
        if let Err(e) = self.drive().await {
            error!(error = %e, "Request processing failed");
            self.send_internal_error().await;
        }

        self.close().await;
    }

    async fn drive(&mut self) -> anyhow::Result<()> {
        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Reading => {
                    self.state = match self.read_request().await {
                        Ok(Some(req)) => ConnectionState::Processing(req),
                        Ok(None) => {
                            error!("Request is empty");
                            ConnectionState::Closed
                        }
                        Err(e) => self.reject(e)?,
                    };
                }

                ConnectionState::Processing(req) => {
                    self.state = match self.handle_request(&req).await {
                        Ok(response) => {
                            info!(
                                method = req.method.as_str(),
                                path = %req.path,
                                status = response.status.as_u16(),
                                "Serving resource"
                            );
                            ConnectionState::Writing(ResponseWriter::new(response))
                        }
                        Err(e) => self.reject(e)?,
                    };
                }

                ConnectionState::Writing(mut writer) => {
                    self.response_started = true;
                    writer.write_to_stream(&mut self.stream).await?;
                    tracing::debug!(bytes = writer.written(), "Response written");
                }

                ConnectionState::Closed => break,
            }
        }

        Ok(())
    }

    /// Reads until a full request head is buffered or the peer stops sending.
    ///
    /// Returns `Ok(None)` if the stream ended before any byte arrived.
    pub async fn read_request(&mut self) -> Result<Option<Request>, RequestError> {
        let limit = self.files.config().max_request_bytes;
        let mut eof = false;

        loop {
            match parse_http_request(&self.buffer, eof) {
                Ok((request, consumed)) => {
                    self.buffer.advance(consumed);
                    self.head_only = request.is_head();
                    return Ok(Some(request));
                }

                Err(ParseError::Empty) => return Ok(None),

                Err(ParseError::Malformed) => return Err(RequestError::Malformed),

                Err(ParseError::Incomplete) if self.buffer.len() >= limit => {
                    warn!(limit, "Request head exceeds size limit");
                    return Err(RequestError::Malformed);
                }

                Err(ParseError::Incomplete) => {
                    // Need more data → fall through to read
                }
            }

            let n = self.stream.read_buf(&mut self.buffer).await?;

            if n == 0 {
                eof = true;
            }
        }
    }

    async fn handle_request(&self, req: &Request) -> Result<Response, RequestError> {
        info!(
            "[Request] {} {} {}",
            req.method.as_str(),
            req.path,
            req.version
        );

        let action = router::route(req)?;
        self.files.serve(req, action).await
    }

    /// Turns a classified failure into an error response.
    ///
    /// Internal failures are handed back to `run` instead.
    fn reject(&self, err: RequestError) -> anyhow::Result<ConnectionState> {
        if let RequestError::Internal(_) = err {
            return Err(err.into());
        }

        let status = err.status();
        warn!(error = %err, status = status.as_u16(), "Rejecting request");

        let response = self.files.error_response(status, self.head_only);
        Ok(ConnectionState::Writing(ResponseWriter::new(response)))
    }

    async fn send_internal_error(&mut self) {
        if self.response_started {
            // Part of a response may already be on the wire
            warn!("Response already started, not sending 500");
            return;
        }
        self.response_started = true;

        let response = self
            .files
            .error_response(StatusCode::InternalServerError, self.head_only);
        let mut writer = ResponseWriter::new(response);

        if let Err(e) = writer.write_to_stream(&mut self.stream).await {
            error!(error = %e, "Failed to send 500 response");
        }
    }

    async fn close(mut self) {
        if let Err(e) = self.stream.shutdown().await {
            error!(error = %e, "Failed to close connection");
        }
    }
}
