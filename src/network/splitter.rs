/// Literal two-character separator the webhook uses between reply parts.
pub const REPLY_DELIMITER: &str = "\\k";

pub const DEFAULT_FALLBACK_REPLY: &str = "Thank you for your message. How can I assist you today?";

/// Split a raw webhook reply into display chunks.
pub fn split(raw: &str) -> Vec<String> {
    split_with_fallback(raw, DEFAULT_FALLBACK_REPLY)
}

/// Split on [`REPLY_DELIMITER`], trimming each part and dropping blank ones.
/// Never returns an empty list: `fallback` stands in when nothing survives.
pub fn split_with_fallback(raw: &str, fallback: &str) -> Vec<String> {
    let chunks: Vec<String> = raw
        .split(REPLY_DELIMITER)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect();

    if chunks.is_empty() {
        vec![fallback.to_string()]
    } else {
        chunks
    }
}
