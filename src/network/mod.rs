pub mod client;
pub mod splitter;
pub mod transport;

pub use client::{ReplyFetcher, TransportError, WebhookClient};
