//! Boundary to the language-model completion service.

pub mod client;
pub mod errors;
pub mod prompt;
pub mod types;

#[cfg(test)]
pub use client::MockCompletionClient;
pub use client::{CompletionClient, OpenAiClient};
pub use errors::CompletionError;
pub use prompt::{INSTRUCTION_BLOCK, SYSTEM_PROMPT, build_prompt};
