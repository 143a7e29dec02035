use chrono::{DateTime, Local, TimeZone};

use crate::common::{Message, Origin};

pub fn render_message(message: &Message) -> String {
    render_message_in(message, &Local)
}

/// Render one transcript line, e.g. `[09:41] Agent: Hello`.
pub fn render_message_in<Tz: TimeZone>(message: &Message, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let speaker = match message.origin {
        Origin::User => "You",
        Origin::Agent => "Agent",
    };
    format!(
        "[{}] {speaker}: {}",
        format_time(&message.sent_at.with_timezone(tz)),
        message.text
    )
}

pub fn format_time<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format("%H:%M").to_string()
}

pub fn render_typing(indicator: &str) -> String {
    format!("  ... {indicator}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn renders_speaker_time_and_text() {
        let mut message = Message::agent("How can I help?");
        message.sent_at = Utc.with_ymd_and_hms(2024, 5, 1, 9, 41, 0).unwrap();

        assert_eq!(
            render_message_in(&message, &Utc),
            "[09:41] Agent: How can I help?"
        );
    }

    #[test]
    fn user_lines_are_labelled() {
        let mut message = Message::user("hi");
        message.sent_at = Utc.with_ymd_and_hms(2024, 5, 1, 18, 5, 0).unwrap();

        assert_eq!(render_message_in(&message, &Utc), "[18:05] You: hi");
    }
}
