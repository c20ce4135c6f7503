//! Chat-completion payloads exchanged with the model provider.
//!
//! Only the request and response bodies live here. Sending them is left to
//! the caller.

use crate::Error;
use crate::envelope::SolveEnvelope;
use crate::prompt::solve_prompt;
use serde::{Deserialize, Serialize};

pub const DEFAULT_ENDPOINT: &str = "https://api.deepseek.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "deepseek-chat";
pub const DEFAULT_TEMPERATURE: f32 = 0.2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub endpoint: String,
    pub model: String,
    pub temperature: f32,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl ProviderConfig {
    /// A single-message request carrying `prompt`.
    pub fn request(&self, prompt: impl Into<String>) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::user(prompt)],
            temperature: self.temperature,
        }
    }

    /// The request asking the model to solve `equation`.
    pub fn solve_request(&self, equation: &str) -> Result<ChatRequest, Error> {
        Ok(self.request(solve_prompt(equation)?))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: Some(content.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletion {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    pub message: ChatMessage,
}

impl ChatCompletion {
    pub fn from_json(raw: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Text of the first choice.
    pub fn content(&self) -> Option<&str> {
        self.choices.first()?.message.content.as_deref()
    }

    /// Wraps the completion the way the solve endpoint forwards it.
    pub fn into_envelope(self) -> SolveEnvelope {
        match self.content() {
            Some(content) => SolveEnvelope::success(content),
            None => {
                log::warn!("Completion carried no message content");
                SolveEnvelope::failure("Provider returned no completion.")
            }
        }
    }
}

/// Envelope reporting a non-success status from the provider.
pub fn status_error(status: u16, body: &str) -> SolveEnvelope {
    SolveEnvelope::failure(format!("Provider error: {} - {}", status, body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::Outcome;
    use serde_json::json;

    #[test]
    fn test_default_request_body() {
        let config = ProviderConfig::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        let request = config.request("hi");
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "model": "deepseek-chat",
                "messages": [{ "role": "user", "content": "hi" }],
                "temperature": 0.2f32
            })
        );
    }

    #[test]
    fn test_solve_request_rejects_blank_equation() {
        assert!(ProviderConfig::default().solve_request(" ").is_err());
        let request = ProviderConfig::default().solve_request("x=1").unwrap();
        assert!(request.messages[0].content.as_deref().unwrap().ends_with("x=1"));
    }

    #[test]
    fn test_completion_into_envelope() {
        let completion = ChatCompletion::from_json(
            r#"{"id":"c1","choices":[{"index":0,"message":{"role":"assistant","content":"{\"notes\":\"ok\"}"}}]}"#,
        )
        .unwrap();
        assert_eq!(completion.content(), Some(r#"{"notes":"ok"}"#));
        let outcome = completion.into_envelope().outcome();
        assert_eq!(outcome.document().unwrap().notes.as_deref(), Some("ok"));
    }

    #[test]
    fn test_empty_completion_is_failure() {
        let envelope = ChatCompletion::default().into_envelope();
        assert_eq!(
            envelope.outcome(),
            Outcome::Failure("Provider returned no completion.".into())
        );
    }

    #[test]
    fn test_status_error_message() {
        let envelope = status_error(502, "bad gateway");
        assert_eq!(envelope.error.as_deref(), Some("Provider error: 502 - bad gateway"));
    }
}
