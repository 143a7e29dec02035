use crate::common::{FaqEntry, View};

pub fn render(faq: &[FaqEntry]) -> Vec<String> {
    if faq.is_empty() {
        return vec!["No FAQ entries configured".to_string()];
    }

    let mut lines = vec!["Frequently asked questions (use /ask <n>):".to_string()];
    for (index, entry) in faq.iter().enumerate() {
        lines.push(format!("  {}. {}", index + 1, entry.question));
        lines.push(format!("     {}", entry.answer));
    }
    lines
}

/// One-line banner shown when the active view changes.
pub fn view_banner(view: View) -> &'static str {
    match view {
        View::Home => "How can we help you today? Type a message, /faq, /contact, or /help",
        View::Chat => "We typically reply within seconds",
        View::Faq => "Find quick answers to common questions",
    }
}
