use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::config::{PacingConfig, ReplyTexts};
use crate::network::ReplyFetcher;
use crate::network::splitter::split_with_fallback;

/// Progress reported by a dispatch worker back to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchStep {
    Typing(Option<String>),
    Reply(String),
    Finished,
}

/// Everything a worker needs to deliver one reply.
pub struct DispatchJob {
    pub identity: String,
    pub text: String,
    /// Pause before contacting the webhook (queued continuations).
    pub lead_delay: Option<Duration>,
}

/// Fetch, split and pace one reply, reporting each step over `steps`.
///
/// Always ends with [`DispatchStep::Finished`]; transport failures become a
/// single apology reply.
pub async fn run_dispatch<F: ReplyFetcher>(
    fetcher: Arc<F>,
    job: DispatchJob,
    pacing: PacingConfig,
    replies: ReplyTexts,
    steps: mpsc::Sender<DispatchStep>,
) {
    if let Some(delay) = job.lead_delay {
        tokio::time::sleep(delay).await;
    }

    let typing = Some(replies.typing_indicator.clone());
    if send(&steps, DispatchStep::Typing(typing.clone())).await.is_err() {
        return;
    }

    match fetcher.fetch_reply(&job.identity, &job.text).await {
        Ok(raw) => {
            let chunks = split_with_fallback(&raw, &replies.fallback_reply);
            let last = chunks.len() - 1;
            log::debug!("Delivering {} reply chunk(s)", chunks.len());

            for (index, chunk) in chunks.into_iter().enumerate() {
                if index > 0 {
                    if send(&steps, DispatchStep::Typing(typing.clone())).await.is_err() {
                        return;
                    }
                    tokio::time::sleep(pacing.typing_delay()).await;
                }

                if send(&steps, DispatchStep::Typing(None)).await.is_err()
                    || send(&steps, DispatchStep::Reply(chunk)).await.is_err()
                {
                    return;
                }

                if index < last {
                    tokio::time::sleep(pacing.chunk_gap()).await;
                }
            }
        }
        Err(err) => {
            log::warn!("Webhook error: {err}");
            if send(&steps, DispatchStep::Typing(None)).await.is_err()
                || send(&steps, DispatchStep::Reply(replies.apology_reply.clone()))
                    .await
                    .is_err()
            {
                return;
            }
        }
    }

    let _ = send(&steps, DispatchStep::Finished).await;
}

async fn send(
    steps: &mpsc::Sender<DispatchStep>,
    step: DispatchStep,
) -> Result<(), mpsc::error::SendError<DispatchStep>> {
    steps.send(step).await.inspect_err(|_| {
        log::warn!("Controller went away mid-dispatch");
    })
}
