use super::types::View;

/// Commands the frontend sends to the conversation controller.
#[derive(Debug, Clone)]
pub enum WidgetCommand {
    /// Raw text typed by the user.
    Submit(String),
    /// FAQ shortcut: open the chat view, then submit the question.
    QuickQuestion(String),
    /// Switch the active screen.
    Navigate(View),
}
