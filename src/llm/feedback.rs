//! Feedback collaborator boundary.
//!
//! The alignment core never depends on generated feedback: callers build a
//! [`FeedbackRequest`] from an analysis and pass it to any
//! [`FeedbackGenerator`]. Tests substitute a stub; production uses an
//! OpenAI-compatible chat completions endpoint.

use crate::config::FeedbackConfig;
use crate::error::{Result, SkillGapError};
use crate::llm::prompts::PromptTemplates;
use crate::processing::analyzer::AlignmentResult;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;

/// Read-only view of an analysis handed to a feedback generator
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequest<'a> {
    pub resume_text: &'a str,
    pub job_text: &'a str,
    pub score: f64,
}

impl<'a> FeedbackRequest<'a> {
    pub fn new(resume_text: &'a str, job_text: &'a str, result: &AlignmentResult) -> Self {
        Self {
            resume_text,
            job_text,
            score: result.score,
        }
    }
}

pub trait FeedbackGenerator {
    fn generate(
        &self,
        request: &FeedbackRequest<'_>,
    ) -> impl Future<Output = Result<String>> + Send;
}

/// Generator backed by a chat completions HTTP API
pub struct ChatCompletionsGenerator {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
    max_tokens: u32,
    temperature: f32,
    templates: PromptTemplates,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: Option<String>,
}

impl ChatCompletionsGenerator {
    /// The API key is supplied by the caller; this type never reads the
    /// environment.
    pub fn new(config: &FeedbackConfig, api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(SkillGapError::Feedback("API key is empty".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            api_key,
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            templates: PromptTemplates::default(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl FeedbackGenerator for ChatCompletionsGenerator {
    async fn generate(&self, request: &FeedbackRequest<'_>) -> Result<String> {
        let prompt = self.templates.render_feedback(request);
        debug!("Feedback prompt length: {} characters", prompt.len());

        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &self.templates.system,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt,
                },
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        info!("Requesting feedback from {} ({})", self.endpoint, self.model);
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(SkillGapError::Feedback(format!(
                "endpoint returned {}: {}",
                status,
                truncate(&text, 300)
            )));
        }

        parse_completion(&text)
    }
}

/// Pull the first choice's message out of a chat completions response body
pub fn parse_completion(body: &str) -> Result<String> {
    let response: ChatResponse = serde_json::from_str(body)?;
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
        .ok_or_else(|| SkillGapError::Feedback("response contained no message content".to_string()))
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
