use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
    #[serde(rename = "N")]
    Unspecified,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
            Gender::Unspecified => "N",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "M" | "MALE" => Ok(Gender::Male),
            "F" | "FEMALE" => Ok(Gender::Female),
            "N" | "NONE" => Ok(Gender::Unspecified),
            _ => Err(Error::invalid_input(format!(
                "Unknown gender '{}' (expected M, F or N)",
                s
            ))),
        }
    }
}

/// Body of `POST /api/saju-pm`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub birth_iso: String,
    pub location: String,
    pub gender: Gender,
}

/// Success body of both endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReplyResponse {
    #[serde(default)]
    pub reply: Option<String>,
}

impl ReplyResponse {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: Some(reply.into()),
        }
    }

    /// The reply, or an empty string when the backend sent none.
    pub fn text(&self) -> &str {
        self.reply.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Body of `POST /api/chat`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    pub model: String,
    pub temperature: f32,
}

impl ChatRequest {
    /// A system prompt followed by a single user message.
    pub fn new(
        system_prompt: impl Into<String>,
        message: impl Into<String>,
        model: impl Into<String>,
        temperature: f32,
    ) -> Self {
        Self {
            messages: vec![ChatMessage::system(system_prompt), ChatMessage::user(message)],
            model: model.into(),
            temperature,
        }
    }
}

/// Extracts a readable message from a non-success response body.
///
/// `detail` may be a string or a list of validation errors carrying `msg`.
/// Returns `None` if the body is not JSON or has no usable detail.
pub fn error_detail(body: &[u8]) -> Option<String> {
    let data: Value = serde_json::from_slice(body).ok()?;
    let detail = data.get("detail").filter(|d| is_truthy(d))?;

    let message = match detail {
        Value::Array(items) => items
            .iter()
            .map(|item| match item.get("msg").filter(|m| is_truthy(m)) {
                Some(msg) => display_value(msg),
                None => display_value(item),
            })
            .collect::<Vec<_>>()
            .join(", "),
        other => display_value(other),
    };

    (!message.is_empty()).then_some(message)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
