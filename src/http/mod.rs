//! HTTP/1.0 protocol implementation.
//!
//! This module implements a one-request-per-connection HTTP/1.0 static file server.
//!
//! # Architecture
//!
//! The HTTP layer is organized into several submodules:
//!
//! - **`connection`**: The per-connection state machine (read, process, write, close)
//! - **`parser`**: Parses the request line and headers from a byte buffer
//! - **`request`**: HTTP request representation
//! - **`router`**: Classifies a parsed request into an action or a rejection
//! - **`files`**: Resolves the target to a local file and builds the response
//! - **`response`**: HTTP response representation with builder pattern
//! - **`writer`**: Serializes the response head and streams the body
//! - **`mime`**: MIME type detection based on file extensions
//! - **`error`**: Classified request failures and their status codes
//!
//! # Connection State Machine
//!
//! Each client connection goes through a state machine:
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Wait for request line and headers
//!        └──────┬──────┘
//!               │ Request received      (empty request → Closed)
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Route, resolve file, build response
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send head and body to client
//!        └──────┬───────────┘
//!               │ Response sent
//!               ▼
//!        ┌──────────────────┐
//!        │     Closed       │ ← Stream shut down
//!        └──────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use labserver::config::StaticFilesConfig;
//! use labserver::http::connection::Connection;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let listener = TcpListener::bind("127.0.0.1:7000").await?;
//!     let cfg = Arc::new(StaticFilesConfig::default());
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let cfg = Arc::clone(&cfg);
//!         tokio::spawn(async move {
//!             Connection::new(socket, cfg).run().await;
//!         });
//!     }
//! }
//! ```

pub mod connection;
pub mod error;
pub mod files;
pub mod mime;
pub mod parser;
pub mod request;
pub mod response;
pub mod router;
pub mod writer;

/// The only protocol version this server speaks.
pub const HTTP_VERSION: &str = "HTTP/1.0";

/// Line terminator used on the wire.
pub const CRLF: &str = "\r\n";
