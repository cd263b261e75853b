//! HTTP adapter for a generative-language text service.
//!
//! Speaks the `models/{model}:generateContent` JSON API. Used only to turn a
//! computed route into a narrative report.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::FormatterError;
use crate::traits::ReportFormatter;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextServiceConfig {
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
    /// Environment variable holding the API key.
    pub api_key_env: String,
}

impl Default for TextServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-2.5-flash".to_string(),
            timeout_secs: 30,
            api_key_env: "GOOGLE_API_KEY".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GenerativeClient {
    config: TextServiceConfig,
    api_key: String,
    client: reqwest::blocking::Client,
}

impl GenerativeClient {
    pub fn new(config: TextServiceConfig, api_key: impl Into<String>) -> Result<Self, FormatterError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            config,
            api_key: api_key.into(),
            client,
        })
    }

    /// Build a client with the key read from `config.api_key_env`.
    pub fn from_env(config: TextServiceConfig) -> Result<Self, FormatterError> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| FormatterError::MissingApiKey(config.api_key_env.clone()))?;
        Self::new(config, api_key)
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }
}

impl ReportFormatter for GenerativeClient {
    fn format_report(&self, system_prompt: &str, user_prompt: &str) -> Result<String, FormatterError> {
        debug!(model = %self.config.model, "Invoking text service");

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&GenerateRequest::new(system_prompt, user_prompt))
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(FormatterError::Api {
                status: status.as_u16(),
                body,
            });
        }

        extract_text(response.json::<GenerateResponse>()?)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
}

impl<'a> GenerateRequest<'a> {
    fn new(system_prompt: &'a str, user_prompt: &'a str) -> Self {
        Self {
            system_instruction: Content {
                role: None,
                parts: vec![Part { text: system_prompt }],
            },
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part { text: user_prompt }],
            }],
        }
    }
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

fn extract_text(response: GenerateResponse) -> Result<String, FormatterError> {
    if let Some(reason) = response.prompt_feedback.and_then(|feedback| feedback.block_reason) {
        return Err(FormatterError::Blocked(reason));
    }

    let text = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<String>()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(FormatterError::EmptyResponse);
    }
    Ok(text)
}
