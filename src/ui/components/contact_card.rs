use crate::config::ContactConfig;

/// Lines for `/contact`: the human support channels next to the chat.
pub fn render(contact: &ContactConfig) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(phone) = &contact.phone {
        lines.push(format!("Call Support: {phone} (speak with a human agent)"));
    }
    if let Some(email) = &contact.email {
        lines.push(format!("Email Us: {email} (send us a detailed message)"));
    }
    if lines.is_empty() {
        lines.push("No contact details configured; use the chat instead".to_string());
    }
    lines
}
