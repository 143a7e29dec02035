use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::common::FaqEntry;
use crate::storage::ensure_parent_dir;

pub const DEFAULT_CONFIG_PATH: &str = "config/support_chat.json";
pub const WEBHOOK_URL_ENV: &str = "SUPPORT_CHAT_WEBHOOK_URL";

const PLACEHOLDER_WEBHOOK_URL: &str = "http://localhost:5678/webhook/support";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_webhook_url")]
    pub webhook_url: String,
    /// No timeout is applied to the webhook call unless this is set.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    /// SQLite file holding the session; in-memory when absent.
    #[serde(default)]
    pub session_path: Option<PathBuf>,
    #[serde(default)]
    pub pacing: PacingConfig,
    #[serde(default)]
    pub replies: ReplyTexts,
    #[serde(default = "default_faq")]
    pub faq: Vec<FaqEntry>,
    #[serde(default)]
    pub contact: ContactConfig,
}

/// Human support channels offered next to the chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            phone: Some("1-800-123-4567".to_string()),
            email: Some("support@company.com".to_string()),
        }
    }
}

/// Delays (milliseconds) used to pace agent replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    pub typing_delay_ms: u64,
    pub chunk_gap_ms: u64,
    pub queue_gap_ms: u64,
    pub view_transition_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplyTexts {
    pub typing_indicator: String,
    /// Sent when the webhook answers with nothing displayable.
    pub fallback_reply: String,
    /// Sent when the webhook call fails.
    pub apology_reply: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            webhook_url: default_webhook_url(),
            request_timeout_secs: None,
            session_path: None,
            pacing: PacingConfig::default(),
            replies: ReplyTexts::default(),
            faq: default_faq(),
            contact: ContactConfig::default(),
        }
    }
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            typing_delay_ms: 1000,
            chunk_gap_ms: 200,
            queue_gap_ms: 2000,
            view_transition_ms: 300,
        }
    }
}

impl PacingConfig {
    pub fn typing_delay(&self) -> Duration {
        Duration::from_millis(self.typing_delay_ms)
    }

    pub fn chunk_gap(&self) -> Duration {
        Duration::from_millis(self.chunk_gap_ms)
    }

    pub fn queue_gap(&self) -> Duration {
        Duration::from_millis(self.queue_gap_ms)
    }

    pub fn view_transition(&self) -> Duration {
        Duration::from_millis(self.view_transition_ms)
    }
}

impl Default for ReplyTexts {
    fn default() -> Self {
        Self {
            typing_indicator: "Support agent is typing...".to_string(),
            fallback_reply: crate::network::splitter::DEFAULT_FALLBACK_REPLY.to_string(),
            apology_reply: "I apologize, but I'm experiencing some technical difficulties. \
                Please try again or contact our human support team at support@company.com \
                or 1-800-123-4567."
                .to_string(),
        }
    }
}

impl AppConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Applies `SUPPORT_CHAT_WEBHOOK_URL` if it is set and non-empty.
    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var(WEBHOOK_URL_ENV) {
            let url = url.trim();
            if !url.is_empty() {
                log::debug!("Webhook URL taken from {WEBHOOK_URL_ENV}");
                self.webhook_url = url.to_string();
            }
        }
    }
}

fn default_webhook_url() -> String {
    PLACEHOLDER_WEBHOOK_URL.to_string()
}

fn default_faq() -> Vec<FaqEntry> {
    [
        (
            "What are your business hours?",
            "We're available Monday-Friday 9AM-6PM EST. The chat assistant answers common questions around the clock.",
        ),
        (
            "How can I track my order?",
            "Use the tracking number sent to your email, or contact support with your order ID.",
        ),
        (
            "What's your return policy?",
            "We offer 30-day returns on most items. Items must be in original condition with tags attached.",
        ),
        (
            "How do I contact customer service?",
            "You can reach us through this chat, by email, or by phone during business hours.",
        ),
        (
            "Do you offer international shipping?",
            "Yes, we ship to most countries. Shipping costs and delivery times vary by location.",
        ),
    ]
    .into_iter()
    .map(|(question, answer)| FaqEntry {
        question: question.to_string(),
        answer: answer.to_string(),
    })
    .collect()
}

pub fn load_config(path: &str) -> AppConfig {
    let path = Path::new(path);
    match fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<AppConfig>(&content) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Failed to parse config file {}: {err}", path.display());
                AppConfig::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            log::info!("Config file {} not found; using defaults", path.display());
            AppConfig::default()
        }
        Err(err) => {
            log::warn!("Failed to read config file {}: {err}", path.display());
            AppConfig::default()
        }
    }
}

pub fn save_config(path: &str, config: &AppConfig) -> std::io::Result<()> {
    ensure_parent_dir(Path::new(path))?;
    let json = serde_json::to_string_pretty(config)?;
    fs::write(path, json)
}
