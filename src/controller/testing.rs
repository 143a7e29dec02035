use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::time::Instant;

use crate::network::{ReplyFetcher, TransportError};

/// Fetcher that replays canned replies and records every call.
pub(crate) struct ScriptedFetcher {
    replies: Mutex<VecDeque<Result<String, TransportError>>>,
    calls: Mutex<Vec<(String, Instant)>>,
    in_flight: AtomicUsize,
    pub(crate) max_in_flight: AtomicUsize,
    latency: Duration,
}

impl ScriptedFetcher {
    pub(crate) fn new(latency: Duration, replies: Vec<Result<String, TransportError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            calls: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            latency,
        })
    }

    pub(crate) fn calls(&self) -> Vec<(String, Instant)> {
        self.calls.lock().unwrap().clone()
    }
}

impl ReplyFetcher for ScriptedFetcher {
    async fn fetch_reply(&self, _identity: &str, text: &str) -> Result<String, TransportError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        self.calls
            .lock()
            .unwrap()
            .push((text.to_string(), Instant::now()));

        tokio::time::sleep(self.latency).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        let next = self.replies.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(String::new()))
    }
}
