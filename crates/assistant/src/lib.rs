//! Site chat assistant.
//!
//! [`OpenAiChat`] talks to any OpenAI-compatible chat completions API over
//! [`reqwest`]. Handlers only see the [`ChatBackend`] trait.

pub mod client;
pub mod config;

pub use client::{ChatBackend, ChatError, OpenAiChat, UnconfiguredChat};
pub use config::ChatConfig;
