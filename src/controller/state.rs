use std::collections::VecDeque;

use thiserror::Error;

use crate::common::{Message, Phase, View};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("message is empty")]
    EmptyMessage,
}

/// What the controller should do after a submission was recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// The controller was idle; dispatch this text now.
    Dispatch(String),
    /// A dispatch is running; the text waits at `position` (1-based) in the queue.
    Queued { position: usize },
}

/// Conversation state owned by the controller task.
#[derive(Debug, Default)]
pub struct ConversationState {
    messages: Vec<Message>,
    pending: VecDeque<String>,
    phase: Phase,
    typing: Option<String>,
    view: View,
}

impl ConversationState {
    pub fn new(history: Vec<Message>) -> Self {
        Self {
            messages: history,
            ..Self::default()
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn pending(&self) -> impl ExactSizeIterator<Item = &str> {
        self.pending.iter().map(String::as_str)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn typing(&self) -> Option<&str> {
        self.typing.as_deref()
    }

    pub fn view(&self) -> View {
        self.view
    }

    /// Record a user submission. The echo is appended whatever the phase.
    pub fn submit(&mut self, raw: &str) -> Result<Submission, ValidationError> {
        let text = raw.trim();
        if text.is_empty() {
            return Err(ValidationError::EmptyMessage);
        }

        self.messages.push(Message::user(text));

        match self.phase {
            Phase::Idle => {
                self.phase = Phase::Busy;
                Ok(Submission::Dispatch(text.to_string()))
            }
            Phase::Busy => {
                self.pending.push_back(text.to_string());
                Ok(Submission::Queued {
                    position: self.pending.len(),
                })
            }
        }
    }

    pub fn push_agent(&mut self, text: impl Into<String>) -> &Message {
        self.messages.push(Message::agent(text));
        &self.messages[self.messages.len() - 1]
    }

    pub fn set_typing(&mut self, typing: Option<String>) -> bool {
        if self.typing == typing {
            return false;
        }
        self.typing = typing;
        true
    }

    /// Switch the active view; returns whether it changed.
    pub fn navigate(&mut self, view: View) -> bool {
        if self.view == view {
            return false;
        }
        self.view = view;
        true
    }

    /// Close out the running dispatch. Hands back the next queued text, or
    /// drops to `Idle` when nothing is waiting.
    pub fn finish_dispatch(&mut self) -> Option<String> {
        let next = self.pending.pop_front();
        if next.is_none() {
            self.phase = Phase::Idle;
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Origin;

    #[test]
    fn idle_submission_dispatches_immediately() {
        let mut state = ConversationState::default();

        let outcome = state.submit("  where is my order?  ").unwrap();

        assert_eq!(outcome, Submission::Dispatch("where is my order?".into()));
        assert_eq!(state.phase(), Phase::Busy);
        assert_eq!(state.messages().len(), 1);
        assert_eq!(state.messages()[0].origin, Origin::User);
        assert_eq!(state.messages()[0].text, "where is my order?");
    }

    #[test]
    fn busy_submissions_echo_and_queue_in_order() {
        let mut state = ConversationState::default();
        state.submit("first").unwrap();

        assert_eq!(state.submit("second").unwrap(), Submission::Queued { position: 1 });
        assert_eq!(state.submit("third").unwrap(), Submission::Queued { position: 2 });

        assert_eq!(state.messages().len(), 3);
        assert_eq!(state.pending().collect::<Vec<_>>(), vec!["second", "third"]);
    }

    #[test]
    fn blank_submission_changes_nothing() {
        let mut state = ConversationState::default();
        state.submit("first").unwrap();

        assert_eq!(state.submit("   \n\t"), Err(ValidationError::EmptyMessage));
        assert_eq!(state.submit(""), Err(ValidationError::EmptyMessage));

        assert_eq!(state.messages().len(), 1);
        assert_eq!(state.pending().len(), 0);
        assert_eq!(state.phase(), Phase::Busy);
    }

    #[test]
    fn duplicate_submissions_are_kept() {
        let mut state = ConversationState::default();
        state.submit("same").unwrap();
        state.submit("same").unwrap();

        assert_eq!(state.messages().len(), 2);
        assert_eq!(state.pending().collect::<Vec<_>>(), vec!["same"]);
    }

    #[test]
    fn finishing_drains_queue_then_goes_idle() {
        let mut state = ConversationState::default();
        state.submit("a").unwrap();
        state.submit("b").unwrap();
        state.submit("c").unwrap();

        assert_eq!(state.finish_dispatch().as_deref(), Some("b"));
        assert_eq!(state.phase(), Phase::Busy);
        assert_eq!(state.finish_dispatch().as_deref(), Some("c"));
        assert_eq!(state.phase(), Phase::Busy);
        assert_eq!(state.finish_dispatch(), None);
        assert_eq!(state.phase(), Phase::Idle);
    }

    #[test]
    fn history_is_kept_and_appended_to() {
        let mut state = ConversationState::new(vec![Message::user("old"), Message::agent("reply")]);

        state.push_agent("new reply");

        let texts: Vec<_> = state.messages().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["old", "reply", "new reply"]);
        assert_eq!(state.phase(), Phase::Idle);
    }

    #[test]
    fn navigate_and_typing_report_changes() {
        let mut state = ConversationState::default();

        assert_eq!(state.view(), View::Home);
        assert!(state.navigate(View::Faq));
        assert!(!state.navigate(View::Faq));

        assert!(state.set_typing(Some("typing".into())));
        assert!(!state.set_typing(Some("typing".into())));
        assert!(state.set_typing(None));
        assert_eq!(state.typing(), None);
    }
}
