//! # Aerwatch Core
//!
//! Domain types, traits, and the classification engine for the Aerwatch
//! air-quality assistant. This crate has **zero framework dependencies** —
//! it defines the domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! The classification pipeline (threshold lookup → aggregation →
//! summarization) is synchronous, side-effect-free, and owns no shared
//! mutable state: the threshold table is read-only after load, and every
//! pipeline invocation produces fresh value objects. External collaborators
//! (the measurement provider, the chat model) are defined as traits here and
//! implemented in their respective crates.

pub mod aggregate;
pub mod chat;
pub mod error;
pub mod message;
pub mod observation;
pub mod source;
pub mod summary;
pub mod thresholds;

// Re-export key types at crate root for ergonomics
pub use aggregate::{aggregate, PollutantMapping, PollutantResult, ResultSet};
pub use chat::{ChatProvider, ChatRequest, ChatResponse, Usage};
pub use error::{ClassifyError, Error, ProviderError, Result, ThresholdError};
pub use message::{Conversation, ConversationId, ConversationStore, Message, Role};
pub use observation::{Observation, PollutantId};
pub use source::PollutionSource;
pub use summary::{summarize, Summary};
pub use thresholds::{ThresholdBand, ThresholdTable};
