//! The briefing generator: Summary → natural-language bulletin.
//!
//! Two chat calls mirror the two bulletin parts: a warm greeting (high
//! temperature) and a condensed recommendations digest (temperature 0).
//! Provider failures propagate; no partial bulletin is produced.

use crate::bulletin;
use crate::prompts;
use aerwatch_config::{LlmConfig, LocationConfig};
use aerwatch_core::chat::{ChatProvider, ChatRequest};
use aerwatch_core::message::Message;
use aerwatch_core::{Result, Summary};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// The generated natural-language bulletin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bulletin {
    /// Rephrased greeting with time, location, and overall condition.
    pub greeting: String,

    /// Condensed recommendations digest.
    pub recommendations: String,
}

impl Bulletin {
    /// The bulletin as one opening message for the chat session.
    pub fn combined(&self) -> String {
        format!("{} {}", self.greeting, self.recommendations)
    }
}

/// Turns structured summaries into bulletins via a chat provider.
pub struct BriefingGenerator {
    provider: Arc<dyn ChatProvider>,
    llm: LlmConfig,
    location: LocationConfig,
}

impl BriefingGenerator {
    pub fn new(provider: Arc<dyn ChatProvider>, llm: LlmConfig, location: LocationConfig) -> Self {
        Self {
            provider,
            llm,
            location,
        }
    }

    /// Generate the bulletin for one summary.
    pub async fn generate(&self, summary: &Summary) -> Result<Bulletin> {
        let greeting_line = bulletin::greeting_line(summary, &self.location.name)?;
        let bullets = bulletin::recommendation_bullets(summary);

        let greeting = self
            .run_chain(
                prompts::greeting_prompt(&greeting_line),
                self.llm.greeting_temperature,
            )
            .await?;

        let recommendations = self
            .run_chain(
                prompts::recommendations_prompt(&bullets),
                self.llm.recommendations_temperature,
            )
            .await?;

        info!(
            timestamp = summary.timestamp,
            overall = %summary.overall_qualitative_name,
            "Generated bulletin"
        );

        Ok(Bulletin {
            greeting,
            recommendations,
        })
    }

    async fn run_chain(&self, prompt: String, temperature: f32) -> Result<String> {
        let request = ChatRequest::new(&self.llm.model, vec![Message::system(prompt)], temperature)
            .with_max_tokens(self.llm.max_tokens);

        let response = self.provider.complete(request).await?;
        Ok(response.message.content)
    }
}
