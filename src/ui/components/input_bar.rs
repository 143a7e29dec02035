use crate::common::{FaqEntry, View, WidgetCommand};

/// What a line typed at the prompt asks for.
#[derive(Debug, Clone)]
pub enum InputAction {
    Command(WidgetCommand),
    Help,
    Contact,
    Quit,
    /// Nothing to send (blank line).
    Nothing,
    Invalid(String),
}

pub const HELP: &str = "Commands: /home, /chat, /faq, /ask <n>, /contact, /help, /quit. Anything else is sent to support.";

pub fn parse(line: &str, faq: &[FaqEntry]) -> InputAction {
    let line = line.trim();
    if line.is_empty() {
        return InputAction::Nothing;
    }

    let Some(rest) = line.strip_prefix('/') else {
        return InputAction::Command(WidgetCommand::Submit(line.to_string()));
    };

    let mut parts = rest.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some("home"), None) => InputAction::Command(WidgetCommand::Navigate(View::Home)),
        (Some("chat"), None) => InputAction::Command(WidgetCommand::Navigate(View::Chat)),
        (Some("faq"), None) => InputAction::Command(WidgetCommand::Navigate(View::Faq)),
        (Some("help"), None) => InputAction::Help,
        (Some("contact"), None) => InputAction::Contact,
        (Some("quit" | "exit"), None) => InputAction::Quit,
        (Some("ask"), Some(index)) => match index.parse::<usize>() {
            Ok(n) if (1..=faq.len()).contains(&n) => {
                InputAction::Command(WidgetCommand::QuickQuestion(faq[n - 1].question.clone()))
            }
            _ => InputAction::Invalid(format!("No FAQ entry `{index}` (1-{})", faq.len())),
        },
        _ => InputAction::Invalid(format!("Unknown command `{line}`")),
    }
}
