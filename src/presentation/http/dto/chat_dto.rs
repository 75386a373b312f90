use serde::Deserialize;

use crate::application::ports::GenerationSettings;
use crate::domain::{Message, Role};

#[derive(Debug, Deserialize)]
pub struct ChatRequestDto {
    pub messages: Vec<Message>,
    pub use_knowledge_base: bool,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_top_p")]
    pub top_p: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default)]
    pub bad: Option<Vec<String>>,
    #[serde(default)]
    pub stop: Option<Vec<String>>,
    #[serde(default)]
    pub stream: bool,
}

fn default_temperature() -> f32 {
    0.2
}

fn default_top_p() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_seed() -> u64 {
    42
}

impl ChatRequestDto {
    /// The most recent user turn is the query for the chains. It is removed
    /// from the history, so the history ends at most with an assistant or
    /// system turn.
    pub fn take_last_user_turn(&mut self) -> Option<String> {
        let index = self
            .messages
            .iter()
            .rposition(|message| message.role == Role::User)?;

        Some(self.messages.remove(index).content)
    }

    /// Every field except the message list and the knowledge-base flag.
    pub fn generation_settings(&self) -> GenerationSettings {
        GenerationSettings {
            temperature: self.temperature,
            top_p: self.top_p,
            max_tokens: self.max_tokens,
            seed: self.seed,
            bad: self.bad.clone(),
            stop: self.stop.clone(),
            stream: self.stream,
        }
    }
}
