//! Customer-support chat client: relays user messages to a reply webhook,
//! paces multi-part answers, and keeps the transcript for the session.

pub mod common;
pub mod config;
pub mod controller;
pub mod network;
pub mod storage;
pub mod ui;
