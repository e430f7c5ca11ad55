mod client;
pub mod ndjson;
pub mod render;
mod types;

pub use client::*;
pub use types::*;
