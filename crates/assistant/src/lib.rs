//! Bulletin generation and the interactive chat session for Aerwatch.
//!
//! This crate sits between the classification core and the chat provider:
//! deterministic formatting of the [`Summary`](aerwatch_core::Summary),
//! prompt templates, the two-chain briefing generator, and the session
//! state machine for follow-up questions.

pub mod briefing;
pub mod bulletin;
pub mod prompts;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;

pub use briefing::{BriefingGenerator, Bulletin};
pub use session::{ChatSession, InMemoryStore, SessionState};
