use crate::client::{PromptRequest, TextGenerator};
use crate::config::LlmConfig;
use crate::error::TextGenerationError;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::time::Duration;

const API_LOG_FILE: &str = "api_debug.log";

/// Client for an OpenAI-compatible `/chat/completions` endpoint.
#[derive(Clone)]
pub struct ChatCompletionsClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
    temperature: f32,
    api_logging: bool,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

impl ChatCompletionsClient {
    pub fn new(config: &LlmConfig) -> Result<Self, TextGenerationError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(env_var) = &config.api_key_env {
            let token = std::env::var(env_var)
                .map_err(|_| TextGenerationError::MissingApiKey(env_var.clone()))?;
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| TextGenerationError::InvalidApiKey(e.to_string()))?;
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
            api_logging: config.api_logging,
        })
    }

    fn log_api_call(&self, url: &str, body: &str, response_status: u16, response_body: &str) {
        if !self.api_logging {
            return;
        }

        let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
        let log_entry = format!(
            "\n=== TEXT GENERATION CALL [{timestamp}] ===\n\
             URL: {url}\n\
             Request Body: {body}\n\
             Response Status: {response_status}\n\
             Response Body: {response_body}\n\
             ========================================\n"
        );

        if let Ok(mut file) = OpenOptions::new()
            .create(true)
            .append(true)
            .open(API_LOG_FILE)
        {
            let _ = file.write_all(log_entry.as_bytes());
        }
    }
}

#[async_trait]
impl TextGenerator for ChatCompletionsClient {
    async fn complete(&self, request: &PromptRequest) -> Result<String, TextGenerationError> {
        let url = format!("{}/chat/completions", self.base_url);
        let chat_request = ChatRequest {
            model: &self.model,
            temperature: self.temperature,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: Some(request.system.clone()),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: Some(request.user_message()),
                },
            ],
            response_format: request
                .json_output
                .then_some(ResponseFormat { kind: "json_object" }),
        };
        let body = serde_json::to_string(&chat_request)
            .map_err(|e| TextGenerationError::Decode(e.to_string()))?;

        tracing::debug!("🛰️ POST {} (model {})", url, self.model);
        let response = self.client.post(&url).body(body.clone()).send().await?;
        let status = response.status().as_u16();

        if !response.status().is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read response".to_string());
            self.log_api_call(&url, &body, status, &error_body);
            return Err(TextGenerationError::Status {
                status,
                body: error_body,
            });
        }

        let response_text = response.text().await?;
        self.log_api_call(&url, &body, status, &response_text);

        let chat_response: ChatResponse = serde_json::from_str(&response_text)
            .map_err(|e| TextGenerationError::Decode(e.to_string()))?;

        chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(TextGenerationError::EmptyResponse)
    }
}
