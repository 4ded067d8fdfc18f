//! Line-delimited response streaming.
//!
//! # Responsibilities
//! - Own one persistent response body and its read buffer
//! - Yield non-empty, whitespace-trimmed lines in arrival order
//! - Expose an explicit closed terminal state
//!
//! # Design Decisions
//! - Pull-driven: nothing is read from the socket until `next_line` is
//!   awaited
//! - Blank lines are swallowed, never yielded
//! - Not restartable; a new stream means a new connection
//! - A trailing unterminated line is surfaced before the stream closes

use std::mem;
use std::pin::Pin;
use std::time::Duration;

use bytes::Bytes;
use futures_util::{Stream, StreamExt};
use reqwest::Response;

use crate::transport::error::TransportError;

type BodyStream = Pin<Box<dyn Stream<Item = Result<Bytes, TransportError>> + Send>>;

/// Lazy sequence of decoded lines from a keep-alive response.
pub struct LineStream {
    body: BodyStream,
    buf: Vec<u8>,
    closed: bool,
    pull_timeout: Option<Duration>,
}

impl LineStream {
    pub(crate) fn new(response: Response, pull_timeout: Option<Duration>) -> Self {
        let body = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(TransportError::from_body));
        Self {
            body: Box::pin(body),
            buf: Vec::new(),
            closed: false,
            pull_timeout,
        }
    }

    /// Whether the underlying connection has closed.
    ///
    /// Once closed, every subsequent pull returns `Ok(None)`.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Pull the next line, suspending until the daemon pushes one.
    ///
    /// Returns `Ok(None)` once the connection has closed. A connection or
    /// decode failure surfaces at the pull where it is observed and closes
    /// the stream.
    pub async fn next_line(&mut self) -> Result<Option<String>, TransportError> {
        if self.closed {
            return Ok(None);
        }

        loop {
            if let Some(pos) = self.buf.iter().position(|&b| b == b'\n') {
                let raw: Vec<u8> = self.buf.drain(..=pos).collect();
                match self.decode(&raw)? {
                    Some(line) => return Ok(Some(line)),
                    None => continue,
                }
            }

            let pull = self.body.next();
            let chunk = match self.pull_timeout {
                Some(deadline) => match tokio::time::timeout(deadline, pull).await {
                    Ok(chunk) => chunk,
                    Err(_) => {
                        self.closed = true;
                        return Err(TransportError::Timeout);
                    }
                },
                None => pull.await,
            };

            match chunk {
                Some(Ok(bytes)) => self.buf.extend_from_slice(&bytes),
                Some(Err(err)) => {
                    self.closed = true;
                    return Err(err);
                }
                None => {
                    self.closed = true;
                    let raw = mem::take(&mut self.buf);
                    return self.decode(&raw);
                }
            }
        }
    }

    /// Decode one raw line; `None` when it is empty after trimming.
    fn decode(&mut self, raw: &[u8]) -> Result<Option<String>, TransportError> {
        let text = match std::str::from_utf8(raw) {
            Ok(text) => text,
            Err(err) => {
                self.closed = true;
                return Err(err.into());
            }
        };
        let trimmed = text.trim();
        if trimmed.is_empty() {
            Ok(None)
        } else {
            Ok(Some(trimmed.to_owned()))
        }
    }
}

impl std::fmt::Debug for LineStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineStream")
            .field("buffered", &self.buf.len())
            .field("closed", &self.closed)
            .finish()
    }
}
