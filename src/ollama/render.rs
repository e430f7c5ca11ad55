//! User-facing strings for client results.
//!
//! The clients return typed errors; the UI shows plain text. These are the only
//! places the two meet.

use crate::{Error, Result, error::NO_MODEL_ADVISORY};
use futures::{Stream, StreamExt};

pub fn generation_message(item: Result<String>) -> String {
    match item {
        Ok(text) => text,
        Err(Error::NoModelInstalled) => NO_MODEL_ADVISORY.to_string(),
        Err(e) => format!("Error: {}", e),
    }
}

pub fn generation_messages<S>(stream: S) -> impl Stream<Item = String>
where
    S: Stream<Item = Result<String>>,
{
    stream.map(generation_message)
}

pub fn pull_message(result: Result<String>) -> String {
    match result {
        Ok(log) => log,
        Err(e) => format!("Error pulling model: {}", e),
    }
}
