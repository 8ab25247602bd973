//! Chat completion API: request shape, prompt, and HTTP client.

pub mod client;
pub mod prompt;

pub use client::{
    ChatMessage, ChatRequest, ChatResponse, CompletionClient, HttpCompletionClient,
};
pub use prompt::{COMMIT_SYSTEM_PROMPT, DIFF_PREAMBLE, build_request};
