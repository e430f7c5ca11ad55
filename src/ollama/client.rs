use super::{ndjson, types::*};
use crate::{Error, Result, config::OllamaConfig};
use futures::{Stream, StreamExt};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Client for the generate/pull/tags endpoints of an Ollama server.
///
/// Cloning is cheap; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    http: reqwest::Client,
    base_url: String,
}

/// Builds the HTTP client used for every call to the model server.
///
/// Only connecting is bounded by default: generations and pulls stream for as
/// long as the server keeps sending, unless `request_timeout_secs` is set.
pub fn build_http_client(config: &OllamaConfig) -> Result<reqwest::Client> {
    let mut builder =
        reqwest::Client::builder().connect_timeout(Duration::from_secs(config.connect_timeout_secs));

    if let Some(secs) = config.request_timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    builder
        .build()
        .map_err(|e| Error::config(format!("Failed to create HTTP client: {}", e)))
}

impl OllamaClient {
    pub fn new(config: &OllamaConfig) -> Result<Self> {
        let http = build_http_client(config)?;
        Ok(Self::with_http_client(http, &config.base_url))
    }

    pub fn with_http_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Same connection pool, different server.
    pub fn with_base_url(&self, base_url: impl Into<String>) -> Self {
        Self::with_http_client(self.http.clone(), base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Streams a generation as successive prefixes of the output.
    ///
    /// Each NDJSON line from the server yields the accumulated text so far,
    /// so a stream of N lines yields N items. The first error ends the stream;
    /// items already yielded remain valid. Nothing is sent until the stream
    /// is first polled, and selecting [`NO_MODELS_SENTINEL`] yields a single
    /// [`Error::NoModelInstalled`] without touching the network.
    pub fn generate(
        &self,
        params: GenerationParams,
    ) -> impl Stream<Item = Result<String>> + Send + use<> {
        let http = self.http.clone();
        let url = self.url("/api/generate");

        async_stream::stream! {
            if params.is_sentinel() {
                debug!("No model selected, skipping generation request");
                yield Err(Error::NoModelInstalled);
                return;
            }

            let request_id = Uuid::new_v4();
            debug!(%request_id, model = %params.model, "Sending generation request to {}", url);

            let body = GenerateRequest::from(&params);
            let response = match post_json(&http, &url, &body).await {
                Ok(response) => response,
                Err(e) => {
                    warn!(%request_id, "Generation request failed: {}", e);
                    yield Err(e);
                    return;
                }
            };

            let mut chunks =
                std::pin::pin!(ndjson::decode::<GenerateChunk, _, _>(response.bytes_stream()));
            let mut output = String::new();
            let mut received = 0usize;

            while let Some(chunk) = chunks.next().await {
                match chunk {
                    Ok(chunk) => {
                        if let Some(message) = chunk.failure() {
                            warn!(%request_id, "Server reported error mid-generation: {}", message);
                            yield Err(Error::server(message));
                            return;
                        }
                        received += 1;
                        output.push_str(chunk.fragment());
                        yield Ok(output.clone());
                    }
                    Err(e) => {
                        warn!(%request_id, "Generation stream aborted after {} chunks: {}", received, e);
                        yield Err(e);
                        return;
                    }
                }
            }

            info!(
                %request_id,
                model = %params.model,
                "Generation finished: {} chunks, {} bytes",
                received,
                output.len()
            );
        }
    }

    /// Pulls a model and returns the complete status log, one line per
    /// status message. Blocks until the server closes the stream.
    pub async fn pull_model(&self, model: &str) -> Result<String> {
        if model.trim().is_empty() || model == NO_MODELS_SENTINEL {
            return Err(Error::invalid_parameter("a model name is required to pull"));
        }

        let url = self.url("/api/pull");
        info!("Pulling model {} via {}", model, url);

        let body = PullRequest {
            name: model.to_string(),
        };
        let response = post_json(&self.http, &url, &body).await?;

        let mut statuses =
            std::pin::pin!(ndjson::decode::<PullStatus, _, _>(response.bytes_stream()));
        let mut log = String::new();

        while let Some(status) = statuses.next().await {
            let status = status?;
            if let Some(message) = status.failure() {
                return Err(Error::server(message));
            }
            debug!("Pull {}: {}", model, status.message());
            log.push_str(status.message());
            log.push('\n');
        }

        info!("Pull of {} finished", model);
        Ok(log)
    }

    /// Names of the models installed on the server, in server order.
    pub async fn list_models(&self) -> Result<Vec<String>> {
        let url = self.url("/api/tags");
        debug!("Listing installed models from {}", url);

        let response = self.http.get(&url).send().await?;
        let response = check_status(response).await?;
        let tags: TagsResponse = serde_json::from_slice(&response.bytes().await?)?;

        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }
}

async fn post_json<B: Serialize + ?Sized>(
    http: &reqwest::Client,
    url: &str,
    body: &B,
) -> Result<reqwest::Response> {
    let response = http.post(url).json(body).send().await?;
    check_status(response).await
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(Error::http(status.as_u16(), &body))
}
