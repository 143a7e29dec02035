use std::path::Path;
use uuid::Uuid;

use crate::common::Message;

use super::database::Database;
use super::{StoreError, StoreResult};

const IDENTITY_KEY: &str = "support_user_id";
const TRANSCRIPT_KEY_PREFIX: &str = "chat_messages_";
const IDENTITY_PREFIX: &str = "user_";
const IDENTITY_SUFFIX_LEN: usize = 8;

/// Session-scoped key/value store holding the user identity and transcript.
///
/// In-memory unless a file is given; a file lets a session outlive a restart
/// of the frontend, the way a browser session survives a page reload.
pub struct SessionStore {
    db: Database,
}

impl SessionStore {
    /// Open a session at `path`, or an in-memory one when `path` is `None`.
    pub fn open(path: Option<&Path>) -> StoreResult<Self> {
        Ok(Self {
            db: Database::open(path)?,
        })
    }

    pub fn in_memory() -> StoreResult<Self> {
        Self::open(None)
    }

    /// Return the session identity, generating and storing one on first use.
    pub fn get_or_create_identity(&self) -> StoreResult<String> {
        if let Some(existing) = self.db.get_entry(IDENTITY_KEY)? {
            return Ok(existing);
        }

        let identity = generate_identity();
        self.db.put_entry(IDENTITY_KEY, &identity)?;
        log::info!("Created session identity {identity}");
        Ok(identity)
    }

    /// Load the transcript for `identity`.
    ///
    /// Absent, unreadable, or corrupt transcripts all come back empty; the
    /// failure is logged and the corrupt entry is left to be overwritten by
    /// the next save.
    pub fn load_conversation(&self, identity: &str) -> Vec<Message> {
        match self.try_load_conversation(identity) {
            Ok(Some(messages)) => messages,
            Ok(None) => Vec::new(),
            Err(err) => {
                log::warn!("Discarding stored transcript: {err}");
                Vec::new()
            }
        }
    }

    /// Strict variant of [`load_conversation`](Self::load_conversation).
    pub fn try_load_conversation(&self, identity: &str) -> StoreResult<Option<Vec<Message>>> {
        let key = transcript_key(identity);
        let Some(raw) = self.db.get_entry(&key)? else {
            return Ok(None);
        };

        serde_json::from_str::<Vec<Message>>(&raw)
            .map(Some)
            .map_err(|source| StoreError::CorruptTranscript { key, source })
    }

    /// Overwrite the transcript for `identity`. Empty transcripts are skipped.
    pub fn save_conversation(&self, identity: &str, messages: &[Message]) -> StoreResult<()> {
        if messages.is_empty() {
            return Ok(());
        }
        let json = serde_json::to_string(messages)?;
        self.db.put_entry(&transcript_key(identity), &json)
    }
}

fn transcript_key(identity: &str) -> String {
    format!("{TRANSCRIPT_KEY_PREFIX}{identity}")
}

/// `user_` followed by eight lowercase base-36 digits drawn from a v4 UUID.
fn generate_identity() -> String {
    let mut bits = Uuid::new_v4().as_u128();
    let mut identity = String::with_capacity(IDENTITY_PREFIX.len() + IDENTITY_SUFFIX_LEN);
    identity.push_str(IDENTITY_PREFIX);
    for _ in 0..IDENTITY_SUFFIX_LEN {
        let digit = (bits % 36) as u32;
        identity.push(char::from_digit(digit, 36).unwrap_or('0'));
        bits /= 36;
    }
    identity
}
