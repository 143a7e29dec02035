use super::types::{Message, Phase, View};

/// Events the conversation controller sends up to the frontend.
#[derive(Debug, Clone)]
pub enum WidgetEvent {
    /// Transcript restored from the session store at startup.
    HistoryRestored(Vec<Message>),
    MessageAppended(Message),
    /// `Some(text)` shows the typing indicator, `None` hides it.
    Typing(Option<String>),
    PhaseChanged(Phase),
    ViewChanged(View),
}
