pub mod dispatch;
pub mod state;
#[cfg(test)]
pub(crate) mod testing;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::common::{Phase, View, WidgetCommand, WidgetEvent};
use crate::config::{PacingConfig, ReplyTexts};
use crate::network::ReplyFetcher;
use crate::storage::{SessionStore, StoreResult};

use dispatch::{DispatchJob, DispatchStep, run_dispatch};
use state::{ConversationState, Submission};

const STEP_CHANNEL_CAPACITY: usize = 16;

/// Drives the send/receive pipeline for one session.
///
/// Owns the transcript and the pending queue; a dispatch worker is only ever
/// spawned from `Idle` or when the previous worker reports `Finished`, so at
/// most one webhook request is in flight.
pub struct ConversationController<F: ReplyFetcher> {
    fetcher: Arc<F>,
    store: SessionStore,
    identity: String,
    state: ConversationState,
    pacing: PacingConfig,
    replies: ReplyTexts,
    event_sender: mpsc::Sender<WidgetEvent>,
    command_receiver: mpsc::Receiver<WidgetCommand>,
    step_sender: mpsc::Sender<DispatchStep>,
    step_receiver: mpsc::Receiver<DispatchStep>,
    deferred_sender: mpsc::Sender<String>,
    deferred_receiver: mpsc::Receiver<String>,
    deferred_pending: usize,
}

impl<F: ReplyFetcher> ConversationController<F> {
    pub fn new(
        fetcher: Arc<F>,
        store: SessionStore,
        pacing: PacingConfig,
        replies: ReplyTexts,
        event_sender: mpsc::Sender<WidgetEvent>,
        command_receiver: mpsc::Receiver<WidgetCommand>,
    ) -> StoreResult<Self> {
        let identity = store.get_or_create_identity()?;
        let history = store.load_conversation(&identity);
        log::info!(
            "Session {identity} restored with {} message(s)",
            history.len()
        );

        let (step_sender, step_receiver) = mpsc::channel(STEP_CHANNEL_CAPACITY);
        let (deferred_sender, deferred_receiver) = mpsc::channel(STEP_CHANNEL_CAPACITY);

        Ok(Self {
            fetcher,
            store,
            identity,
            state: ConversationState::new(history),
            pacing,
            replies,
            event_sender,
            command_receiver,
            step_sender,
            step_receiver,
            deferred_sender,
            deferred_receiver,
            deferred_pending: 0,
        })
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Run until the command channel closes and every accepted message has
    /// been answered.
    pub async fn run(mut self) {
        self.emit(WidgetEvent::HistoryRestored(self.state.messages().to_vec()))
            .await;

        let mut accepting = true;
        loop {
            if !accepting && self.is_settled() {
                break;
            }

            tokio::select! {
                command = self.command_receiver.recv(), if accepting => {
                    if let Some(command) = command {
                        self.handle_command(command).await;
                    } else {
                        log::debug!("Command channel closed; draining pending work");
                        accepting = false;
                    }
                }
                Some(step) = self.step_receiver.recv() => {
                    self.handle_step(step).await;
                }
                Some(question) = self.deferred_receiver.recv() => {
                    self.deferred_pending -= 1;
                    self.submit(&question).await;
                }
            }
        }

        log::info!("Conversation controller for {} stopped", self.identity);
    }

    fn is_settled(&self) -> bool {
        self.state.phase() == Phase::Idle && self.deferred_pending == 0
    }

    async fn handle_command(&mut self, command: WidgetCommand) {
        match command {
            WidgetCommand::Submit(text) => self.submit(&text).await,
            WidgetCommand::Navigate(view) => self.navigate(view).await,
            WidgetCommand::QuickQuestion(question) => {
                self.navigate(View::Chat).await;
                self.defer_submit(question, self.pacing.view_transition());
            }
        }
    }

    async fn submit(&mut self, text: &str) {
        let submission = match self.state.submit(text) {
            Ok(submission) => submission,
            Err(err) => {
                log::debug!("Ignoring submission: {err}");
                return;
            }
        };

        self.persist();
        if let Some(echo) = self.state.messages().last().cloned() {
            self.emit(WidgetEvent::MessageAppended(echo)).await;
        }

        match submission {
            Submission::Dispatch(text) => {
                self.emit(WidgetEvent::PhaseChanged(Phase::Busy)).await;
                self.start_dispatch(text, None);
            }
            Submission::Queued { position } => {
                log::info!("Agent busy; message queued at position {position}");
            }
        }
    }

    async fn navigate(&mut self, view: View) {
        if self.state.navigate(view) {
            self.emit(WidgetEvent::ViewChanged(view)).await;
        }
    }

    fn defer_submit(&mut self, question: String, delay: Duration) {
        self.deferred_pending += 1;
        let sender = self.deferred_sender.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = sender.send(question).await;
        });
    }

    async fn handle_step(&mut self, step: DispatchStep) {
        match step {
            DispatchStep::Typing(typing) => {
                if self.state.set_typing(typing.clone()) {
                    self.emit(WidgetEvent::Typing(typing)).await;
                }
            }
            DispatchStep::Reply(text) => {
                let message = self.state.push_agent(text).clone();
                self.persist();
                self.emit(WidgetEvent::MessageAppended(message)).await;
            }
            DispatchStep::Finished => match self.state.finish_dispatch() {
                Some(next) => {
                    log::debug!("Dispatching next queued message");
                    self.start_dispatch(next, Some(self.pacing.queue_gap()));
                }
                None => self.emit(WidgetEvent::PhaseChanged(Phase::Idle)).await,
            },
        }
    }

    fn start_dispatch(&self, text: String, lead_delay: Option<Duration>) {
        let job = DispatchJob {
            identity: self.identity.clone(),
            text,
            lead_delay,
        };
        tokio::spawn(run_dispatch(
            Arc::clone(&self.fetcher),
            job,
            self.pacing,
            self.replies.clone(),
            self.step_sender.clone(),
        ));
    }

    fn persist(&self) {
        if let Err(err) = self
            .store
            .save_conversation(&self.identity, self.state.messages())
        {
            log::error!("Failed to persist transcript: {err}");
        }
    }

    async fn emit(&mut self, event: WidgetEvent) {
        if let Err(err) = self.event_sender.send(event).await {
            log::debug!("Frontend is gone, dropping event: {err}");
        }
    }
}
