use super::types::*;
use crate::{
    config::OllamaConfig,
    ollama::{GenerationParams, NO_MODELS_SENTINEL, OllamaClient, render},
};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{
        Html, Json,
        sse::{Event, KeepAlive, Sse},
    },
};
use futures::{Stream, StreamExt, stream};
use std::convert::Infallible;
use tracing::{error, info, warn};

const INDEX_HTML: &str = include_str!("index.html");

#[derive(Clone)]
pub struct AppState {
    pub client: OllamaClient,
    pub defaults: OllamaConfig,
}

impl AppState {
    pub fn new(client: OllamaClient, defaults: OllamaConfig) -> Self {
        Self { client, defaults }
    }

    /// The configured client, or one pointed at the server URL the user typed.
    fn client_for(&self, server_url: Option<&str>) -> OllamaClient {
        match server_url.map(str::trim).filter(|url| !url.is_empty()) {
            Some(url) => self.client.with_base_url(url),
            None => self.client.clone(),
        }
    }
}

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn settings(State(state): State<AppState>) -> Json<SettingsResponse> {
    Json(SettingsResponse {
        server_url: state.client.base_url().to_string(),
        model: state.defaults.default_model.clone(),
        temperature: state.defaults.temperature,
        max_tokens: state.defaults.max_tokens,
    })
}

pub async fn models(
    State(state): State<AppState>,
    Query(query): Query<ModelsQuery>,
) -> Json<ModelsResponse> {
    let client = state.client_for(query.server_url.as_deref());

    let models = match client.list_models().await {
        Ok(models) if !models.is_empty() => models,
        Ok(_) => {
            info!("No models installed on {}", client.base_url());
            vec![NO_MODELS_SENTINEL.to_string()]
        }
        Err(e) => {
            warn!("Failed to list models on {}: {}", client.base_url(), e);
            vec![NO_MODELS_SENTINEL.to_string()]
        }
    };

    Json(ModelsResponse { models })
}

pub async fn generate(
    State(state): State<AppState>,
    Json(form): Json<GenerateForm>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, (StatusCode, Json<ErrorResponse>)>
{
    let params = GenerationParams::new(
        form.model.unwrap_or_else(|| state.defaults.default_model.clone()),
        form.prompt,
        form.temperature.unwrap_or(state.defaults.temperature),
        form.max_tokens.unwrap_or(state.defaults.max_tokens),
    )
    .map_err(|e| {
        warn!("Rejected generation request: {}", e);
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
    })?;

    let client = state.client_for(form.server_url.as_deref());
    info!(
        "Received generation request for model {} on {}",
        params.model,
        client.base_url()
    );

    let events = render::generation_messages(client.generate(params))
        .map(|output| {
            let data = serde_json::to_string(&OutputEvent { output }).unwrap_or_default();
            Ok::<_, Infallible>(Event::default().data(data))
        })
        .chain(stream::once(async {
            Ok::<_, Infallible>(Event::default().event("done").data(""))
        }));

    Ok(Sse::new(events).keep_alive(KeepAlive::default()))
}

pub async fn pull(State(state): State<AppState>, Json(form): Json<PullForm>) -> Json<PullResponse> {
    let client = state.client_for(form.server_url.as_deref());
    let model = form
        .model
        .unwrap_or_else(|| state.defaults.default_model.clone());

    let result = client.pull_model(&model).await;
    match &result {
        Err(e) if e.is_upstream() => error!("Failed to pull model {}: {}", model, e),
        Err(e) => warn!("Rejected pull of {:?}: {}", model, e),
        Ok(_) => info!("Pulled model {}", model),
    }

    Json(PullResponse {
        status: render::pull_message(result),
    })
}
