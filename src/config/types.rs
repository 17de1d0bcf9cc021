use crate::{Error, Result, timestamp::BirthZone};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub birth: BirthConfig,
    #[serde(default)]
    pub logs: LogsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_analysis_path")]
    pub analysis_path: String,
    #[serde(default = "default_chat_path")]
    pub chat_path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatConfig {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BirthConfig {
    /// `local` or a fixed `±HH:MM` offset.
    #[serde(default = "default_time_zone")]
    pub time_zone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogsConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub json: bool,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(Error::config("api.base_url must not be empty"));
        }
        for (name, path) in [
            ("api.analysis_path", &self.api.analysis_path),
            ("api.chat_path", &self.api.chat_path),
        ] {
            if !path.starts_with('/') {
                return Err(Error::config(format!(
                    "{} must start with '/', got '{}'",
                    name, path
                )));
            }
        }
        if !(0.0..=2.0).contains(&self.chat.temperature) {
            return Err(Error::config(format!(
                "chat.temperature must be between 0.0 and 2.0, got {}",
                self.chat.temperature
            )));
        }
        self.birth.zone()?;
        Ok(())
    }
}

impl BirthConfig {
    pub fn zone(&self) -> Result<BirthZone> {
        self.time_zone
            .parse()
            .map_err(|e| Error::config(format!("birth.time_zone: {}", e)))
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            analysis_path: default_analysis_path(),
            chat_path: default_chat_path(),
        }
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            temperature: default_temperature(),
            system_prompt: default_system_prompt(),
        }
    }
}

impl Default for BirthConfig {
    fn default() -> Self {
        Self {
            time_zone: default_time_zone(),
        }
    }
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_analysis_path() -> String {
    "/api/saju-pm".to_string()
}

fn default_chat_path() -> String {
    "/api/chat".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_temperature() -> f32 {
    0.5
}

fn default_system_prompt() -> String {
    "당신은 친절한 대화를 제공하는 어시스턴트입니다.".to_string()
}

fn default_time_zone() -> String {
    "local".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}
