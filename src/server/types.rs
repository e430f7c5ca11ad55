use serde::{Deserialize, Serialize};

/// Body of `POST /api/generate`. Omitted fields fall back to configuration.
#[derive(Debug, Deserialize)]
pub struct GenerateForm {
    pub prompt: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub max_tokens: Option<u32>,
    #[serde(default)]
    pub server_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PullForm {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub server_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ModelsQuery {
    #[serde(default)]
    pub server_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SettingsResponse {
    pub server_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Serialize)]
pub struct ModelsResponse {
    pub models: Vec<String>,
}

/// Payload of each `data:` event in the generation stream.
#[derive(Debug, Serialize)]
pub struct OutputEvent {
    pub output: String,
}

#[derive(Debug, Serialize)]
pub struct PullResponse {
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
