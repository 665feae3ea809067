// Client module - external text-generation collaborator used by the AI generators
pub mod chat;

pub use chat::ChatCompletionsClient;

use crate::error::TextGenerationError;
use async_trait::async_trait;

/// One prompt for a text generator: a system instruction plus a user template
/// whose `{placeholders}` are filled from `params`.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptRequest {
    pub system: String,
    pub template: String,
    pub params: Vec<(String, String)>,
    /// Ask the service for a machine-parseable JSON reply.
    pub json_output: bool,
}

impl PromptRequest {
    pub fn new(system: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            template: template.into(),
            params: Vec::new(),
            json_output: false,
        }
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    pub fn json(mut self) -> Self {
        self.json_output = true;
        self
    }

    pub fn user_message(&self) -> String {
        self.params
            .iter()
            .fold(self.template.clone(), |text, (key, value)| {
                text.replace(&format!("{{{}}}", key), value)
            })
    }
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn complete(&self, request: &PromptRequest) -> Result<String, TextGenerationError>;
}
