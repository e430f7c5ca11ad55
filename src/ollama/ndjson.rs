//! Newline-delimited JSON decoding for the model server's streamed responses.
//!
//! The server writes one JSON object per line, but the HTTP body arrives in
//! arbitrary chunks, so lines are reassembled from raw bytes before decoding.
//! Splitting on bytes keeps multi-byte UTF-8 characters intact when a network
//! chunk boundary falls inside one.

use crate::{Error, Result};
use bytes::Bytes;
use futures::{Stream, StreamExt};
use serde::de::DeserializeOwned;

/// Decode a byte stream into a stream of `T`, one per non-empty line.
///
/// Whitespace-only lines are skipped and a trailing `\r` is ignored. A final
/// line without a terminating newline is still decoded. The stream ends after
/// yielding the first error, whether it came from the transport or from a
/// malformed line.
pub fn decode<T, S, E>(byte_stream: S) -> impl Stream<Item = Result<T>> + Send + 'static
where
    T: DeserializeOwned + Send + 'static,
    S: Stream<Item = std::result::Result<Bytes, E>> + Send + 'static,
    E: Into<Error> + Send + 'static,
{
    async_stream::stream! {
        let mut byte_stream = std::pin::pin!(byte_stream);
        let mut buf: Vec<u8> = Vec::new();
        // Bytes before this offset are known to contain no newline.
        let mut scanned = 0usize;

        while let Some(chunk) = byte_stream.next().await {
            let chunk = match chunk {
                Ok(chunk) => chunk,
                Err(e) => {
                    let err: Error = e.into();
                    yield Err(err);
                    return;
                }
            };
            buf.extend_from_slice(&chunk);

            while let Some(offset) = buf[scanned..].iter().position(|b| *b == b'\n') {
                let pos = scanned + offset;
                let line: Vec<u8> = buf.drain(..=pos).collect();
                scanned = 0;
                match decode_line::<T>(&line[..pos]) {
                    Some(Ok(item)) => {
                        yield Ok(item);
                    }
                    Some(Err(e)) => {
                        yield Err(e);
                        return;
                    }
                    None => {}
                }
            }
            scanned = buf.len();
        }

        if let Some(item) = decode_line::<T>(&buf) {
            yield item;
        }
    }
}

/// Returns `None` for blank lines.
fn decode_line<T: DeserializeOwned>(line: &[u8]) -> Option<Result<T>> {
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    if line.iter().all(u8::is_ascii_whitespace) {
        return None;
    }
    Some(serde_json::from_slice(line).map_err(Error::from))
}
