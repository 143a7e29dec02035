use crate::common::{Message, Phase, View, WidgetEvent};

/// Local mirror of what the controller has announced.
#[derive(Debug, Default)]
pub struct AppState {
    pub messages: Vec<Message>,
    pub typing: Option<String>,
    pub view: View,
    pub phase: Phase,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one controller event into the mirror.
    pub fn apply(&mut self, event: &WidgetEvent) {
        match event {
            WidgetEvent::HistoryRestored(history) => self.messages = history.clone(),
            WidgetEvent::MessageAppended(message) => self.messages.push(message.clone()),
            WidgetEvent::Typing(typing) => self.typing = typing.clone(),
            WidgetEvent::PhaseChanged(phase) => self.phase = *phase,
            WidgetEvent::ViewChanged(view) => self.view = *view,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_update_the_mirror() {
        let mut state = AppState::new();

        state.apply(&WidgetEvent::HistoryRestored(vec![Message::user("old")]));
        state.apply(&WidgetEvent::MessageAppended(Message::agent("new")));
        state.apply(&WidgetEvent::Typing(Some("typing".into())));
        state.apply(&WidgetEvent::PhaseChanged(Phase::Busy));
        state.apply(&WidgetEvent::ViewChanged(View::Chat));

        assert_eq!(state.messages.len(), 2);
        assert_eq!(state.typing.as_deref(), Some("typing"));
        assert_eq!(state.phase, Phase::Busy);
        assert_eq!(state.view, View::Chat);
    }
}
