use bytes::BytesMut;
use tokio::io::{AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::http::response::{Body, Response};
use crate::http::{CRLF, HTTP_VERSION};

/// Chunk size for streaming file bodies
const BUFFER_SIZE: usize = 8192;

/// Serializes the status line, headers and blank line.
pub fn serialize_head(resp: &Response) -> Vec<u8> {
    let mut buf = Vec::new();

    // Status line
    let status_line = format!(
        "{} {} {}{}",
        HTTP_VERSION,
        resp.status.as_u16(),
        resp.status.reason_phrase(),
        CRLF
    );
    buf.extend_from_slice(status_line.as_bytes());

    // Headers
    for (k, v) in &resp.headers {
        buf.extend_from_slice(k.as_bytes());
        buf.extend_from_slice(b": ");
        buf.extend_from_slice(v.as_bytes());
        buf.extend_from_slice(CRLF.as_bytes());
    }

    // Header/body separator
    buf.extend_from_slice(CRLF.as_bytes());

    buf
}

pub struct ResponseWriter {
    head: Vec<u8>,
    written: usize,
    body: Body,
}

impl ResponseWriter {
    pub fn new(response: Response) -> Self {
        Self {
            head: serialize_head(&response),
            written: 0,
            body: response.body,
        }
    }

    /// Bytes sent so far, head and body.
    pub fn written(&self) -> usize {
        self.written
    }

    pub async fn write_to_stream<W>(&mut self, stream: &mut W) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        let mut sent = 0;
        while sent < self.head.len() {
            let n = stream.write(&self.head[sent..]).await?;

            if n == 0 {
                return Err(anyhow::anyhow!("connection closed while writing"));
            }

            sent += n;
            self.written += n;
        }

        match std::mem::take(&mut self.body) {
            Body::Empty => {}
            Body::Bytes(bytes) => {
                stream.write_all(&bytes).await?;
                self.written += bytes.len();
            }
            Body::File { file, len } => {
                // Never send more than the declared Content-Length
                let mut file = file.take(len);
                let mut chunk = BytesMut::with_capacity(BUFFER_SIZE);
                loop {
                    chunk.clear();
                    if file.read_buf(&mut chunk).await? == 0 {
                        break;
                    }
                    stream.write_all(&chunk).await?;
                    self.written += chunk.len();
                }
            }
        }

        stream.flush().await?;
        Ok(())
    }
}
