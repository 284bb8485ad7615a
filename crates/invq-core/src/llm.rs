//! Intent classification: deciding which tool, if any, answers a question.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::LlmError;
use crate::models::config::LlmConfig;
use crate::tools::Tool;

/// What the classifier decided to do with a question.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Call one tool; `arguments` is the JSON argument object as text.
    ToolCall { name: String, arguments: String },
    /// Answer directly with free text.
    Reply(String),
}

/// Classifier trait
#[async_trait]
pub trait IntentClassifier: Send + Sync {
    async fn classify(&self, question: &str, tools: &[Tool]) -> Result<Intent, LlmError>;
}

/// Classifier that always returns the same intent, for tests and offline use.
pub struct StaticClassifier {
    pub intent: Intent,
}

impl StaticClassifier {
    pub fn tool_call(name: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self {
            intent: Intent::ToolCall {
                name: name.into(),
                arguments: arguments.into(),
            },
        }
    }

    pub fn reply(text: impl Into<String>) -> Self {
        Self {
            intent: Intent::Reply(text.into()),
        }
    }
}

#[async_trait]
impl IntentClassifier for StaticClassifier {
    async fn classify(&self, _question: &str, _tools: &[Tool]) -> Result<Intent, LlmError> {
        Ok(self.intent.clone())
    }
}

/// Function-calling classifier over an OpenAI-compatible chat completions API.
pub struct OpenAiClassifier {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl OpenAiClassifier {
    pub fn new(config: &LlmConfig, api_key: impl Into<String>) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LlmError::Http(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            api_key: api_key.into(),
        })
    }

    /// Build a classifier from config, reading the key from `config.api_key_env`.
    pub fn from_env(config: &LlmConfig) -> Result<Self, LlmError> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| LlmError::MissingApiKey(config.api_key_env.clone()))?;
        Self::new(config, api_key)
    }

    fn build_request(&self, question: &str, tools: &[Tool]) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: question.to_string(),
            }],
            tools: tools.iter().map(|tool| tool.to_function_json()).collect(),
            tool_choice: "auto".to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    tools: Vec<Value>,
    tool_choice: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<ChatToolCall>>,
}

#[derive(Debug, Deserialize)]
struct ChatToolCall {
    function: ChatFunctionCall,
}

#[derive(Debug, Deserialize)]
struct ChatFunctionCall {
    name: String,
    #[serde(default)]
    arguments: String,
}

/// Turn a chat completions response body into an intent.
///
/// Only the first tool call is used.
fn parse_response(body: &str) -> Result<Intent, LlmError> {
    let parsed: ChatResponse =
        serde_json::from_str(body).map_err(|e| LlmError::Serialization(e.to_string()))?;

    let message = parsed
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message)
        .ok_or_else(|| LlmError::Response("Missing choices".to_string()))?;

    match message.tool_calls.and_then(|calls| calls.into_iter().next()) {
        Some(call) => Ok(Intent::ToolCall {
            name: call.function.name,
            arguments: call.function.arguments,
        }),
        None => Ok(Intent::Reply(message.content.unwrap_or_default())),
    }
}

#[async_trait]
impl IntentClassifier for OpenAiClassifier {
    async fn classify(&self, question: &str, tools: &[Tool]) -> Result<Intent, LlmError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let value = format!("Bearer {}", self.api_key);
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&value).map_err(|e| LlmError::Http(e.to_string()))?,
        );

        let body = self.build_request(question, tools);
        debug!(
            model = %self.model,
            tool_count = body.tools.len(),
            "sending classification request"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .headers(headers)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Http(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(LlmError::Response(format!("HTTP {}: {}", status, text)));
        }

        let text = response
            .text()
            .await
            .map_err(|e| LlmError::Http(e.to_string()))?;

        parse_response(&text)
    }
}
