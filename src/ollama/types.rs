use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Reserved model identifier meaning "nothing is installed". Selecting it
/// short-circuits generation.
pub const NO_MODELS_SENTINEL: &str = "No models available";

/// User-supplied inputs for one generation.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    pub model: String,
    pub prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl GenerationParams {
    pub fn new(
        model: impl Into<String>,
        prompt: impl Into<String>,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<Self> {
        if !temperature.is_finite() || !(0.0..=1.0).contains(&temperature) {
            return Err(Error::invalid_parameter(format!(
                "temperature must be between 0.0 and 1.0, got {}",
                temperature
            )));
        }
        if max_tokens == 0 {
            return Err(Error::invalid_parameter(
                "max tokens must be a positive integer",
            ));
        }

        Ok(Self {
            model: model.into(),
            prompt: prompt.into(),
            temperature,
            max_tokens,
        })
    }

    pub fn is_sentinel(&self) -> bool {
        self.model == NO_MODELS_SENTINEL
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    pub stream: bool,
    pub options: GenerateOptions,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateOptions {
    pub temperature: f32,
    pub num_predict: u32,
}

impl From<&GenerationParams> for GenerateRequest {
    fn from(params: &GenerationParams) -> Self {
        Self {
            model: params.model.clone(),
            prompt: params.prompt.clone(),
            stream: true,
            options: GenerateOptions {
                temperature: params.temperature,
                num_predict: params.max_tokens,
            },
        }
    }
}

/// One line of the `/api/generate` stream. Fields other than the fragment are
/// informational only, except an `error` on a line that carries no fragment.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateChunk {
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub error: Option<String>,
}

impl GenerateChunk {
    pub fn fragment(&self) -> &str {
        self.response.as_deref().unwrap_or_default()
    }

    /// The server's error report, when the line is nothing but that report.
    pub fn failure(&self) -> Option<&str> {
        match self.response {
            Some(_) => None,
            None => self.error.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PullRequest {
    pub name: String,
}

/// One line of the `/api/pull` stream. Same `error` rule as [`GenerateChunk`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PullStatus {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl PullStatus {
    pub fn message(&self) -> &str {
        self.status.as_deref().unwrap_or_default()
    }

    pub fn failure(&self) -> Option<&str> {
        match self.status {
            Some(_) => None,
            None => self.error.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagsResponse {
    #[serde(default)]
    pub models: Vec<ModelTag>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelTag {
    pub name: String,
}
