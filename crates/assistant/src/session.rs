//! The interactive chat session, modeled as an explicit state machine.
//!
//! States: Idle → AwaitingInput → Responding → AwaitingInput, back to Idle
//! on `end`. The history backing is injected via [`ConversationStore`], so
//! the session itself carries no implicit conversational state.

use aerwatch_core::chat::{ChatProvider, ChatRequest};
use aerwatch_core::message::{ConversationStore, Message};
use aerwatch_core::{Error, Result};
use std::sync::Arc;
use tracing::debug;

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Not started or already ended.
    Idle,
    /// Seeded and waiting for the next user turn.
    AwaitingInput,
    /// A user turn is in flight to the provider.
    Responding,
}

/// A simple in-memory history store; lives only for the session.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    messages: Vec<Message>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConversationStore for InMemoryStore {
    fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    fn history(&self) -> &[Message] {
        &self.messages
    }
}

/// An interactive Q&A session over the generated bulletin.
pub struct ChatSession<S: ConversationStore> {
    provider: Arc<dyn ChatProvider>,
    store: S,
    model: String,
    temperature: f32,
    max_tokens: u32,
    state: SessionState,
}

impl<S: ConversationStore> ChatSession<S> {
    pub fn new(
        provider: Arc<dyn ChatProvider>,
        store: S,
        model: impl Into<String>,
        temperature: f32,
        max_tokens: u32,
    ) -> Self {
        Self {
            provider,
            store,
            model: model.into(),
            temperature,
            max_tokens,
            state: SessionState::Idle,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Seed the session with the assistant role and the opening bulletin,
    /// then start accepting user turns.
    pub fn begin(&mut self, role: &str, opening: &str) {
        self.store.append(Message::system(role));
        self.store.append(Message::assistant(opening));
        self.state = SessionState::AwaitingInput;
        debug!(history = self.store.len(), "Chat session started");
    }

    /// Process one user turn: send the stored history plus the new message
    /// to the provider, then commit both the turn and the reply.
    pub async fn user_turn(&mut self, text: impl Into<String>) -> Result<String> {
        if self.state != SessionState::AwaitingInput {
            return Err(Error::Internal(format!(
                "Chat session cannot accept input in state {:?}",
                self.state
            )));
        }

        self.state = SessionState::Responding;

        // The user message joins the store only once the provider answers,
        // so a failed turn can be retried without duplicating the question.
        let user_message = Message::user(text);
        let mut messages = self.store.history().to_vec();
        messages.push(user_message.clone());

        let request = ChatRequest::new(&self.model, messages, self.temperature)
            .with_max_tokens(self.max_tokens);

        let response = match self.provider.complete(request).await {
            Ok(response) => response,
            Err(e) => {
                // The turn failed; stay available for the next one.
                self.state = SessionState::AwaitingInput;
                return Err(e.into());
            }
        };

        let reply = response.message.content.clone();
        self.store.append(user_message);
        self.store.append(response.message);
        self.state = SessionState::AwaitingInput;
        Ok(reply)
    }

    /// End the session.
    pub fn end(&mut self) {
        self.state = SessionState::Idle;
        debug!(history = self.store.len(), "Chat session ended");
    }

    /// The stored history (role seed, bulletin, and all turns).
    pub fn history(&self) -> &[Message] {
        self.store.history()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedChatProvider;
    use aerwatch_core::message::Role;

    fn session(responses: Vec<String>) -> (ChatSession<InMemoryStore>, Arc<ScriptedChatProvider>) {
        let provider = Arc::new(ScriptedChatProvider::new(responses));
        let session = ChatSession::new(provider.clone(), InMemoryStore::new(), "gpt-4o", 0.1, 512);
        (session, provider)
    }

    #[tokio::test]
    async fn begin_seeds_role_and_opening() {
        let (mut session, _) = session(vec![]);
        assert_eq!(session.state(), SessionState::Idle);

        session.begin("You are an air-quality assistant.", "Good day! Air is good.");
        assert_eq!(session.state(), SessionState::AwaitingInput);
        assert_eq!(session.history().len(), 2);
        assert_eq!(session.history()[0].role, Role::System);
        assert_eq!(session.history()[1].role, Role::Assistant);
    }

    #[tokio::test]
    async fn user_turn_appends_and_returns_reply() {
        let (mut session, provider) = session(vec!["Yes, it's a fine day for a jog.".into()]);
        session.begin("role", "opening");

        let reply = session.user_turn("Can I go jogging?").await.unwrap();
        assert_eq!(reply, "Yes, it's a fine day for a jog.");
        assert_eq!(session.state(), SessionState::AwaitingInput);

        // role + opening + user + assistant
        assert_eq!(session.history().len(), 4);
        // The provider saw the full history including the new user turn.
        assert_eq!(provider.message_counts(), vec![3]);
    }

    #[tokio::test]
    async fn turn_before_begin_is_rejected() {
        let (mut session, _) = session(vec!["unused".into()]);
        let err = session.user_turn("hello").await.unwrap_err();
        assert!(matches!(err, Error::Internal(_)));
    }

    #[tokio::test]
    async fn failed_turn_recovers_to_awaiting_input() {
        let (mut session, _) = session(vec![]);
        session.begin("role", "opening");

        assert!(session.user_turn("hello").await.is_err());
        assert_eq!(session.state(), SessionState::AwaitingInput);
    }

    #[tokio::test]
    async fn failed_turn_leaves_history_unchanged() {
        let (mut session, provider) = session(vec![]);
        session.begin("role", "opening");

        assert!(session.user_turn("first try").await.is_err());
        // The unanswered question is not committed to history.
        assert_eq!(session.history().len(), 2);

        // A retry sends the same history depth, not a duplicated question.
        assert!(session.user_turn("second try").await.is_err());
        assert_eq!(provider.message_counts(), vec![3, 3]);
    }

    #[tokio::test]
    async fn end_returns_to_idle() {
        let (mut session, _) = session(vec![]);
        session.begin("role", "opening");
        session.end();
        assert_eq!(session.state(), SessionState::Idle);
        // History survives until the session is dropped.
        assert_eq!(session.history().len(), 2);
    }
}
