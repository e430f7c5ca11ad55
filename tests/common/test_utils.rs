use hiollama::{
    config::{Config, LogsConfig, OllamaConfig, ServerConfig},
    ollama::OllamaClient,
};
use serde_json::Value;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

/// Create a test configuration pointing at the given model server
pub fn create_test_config(base_url: &str) -> Config {
    Config {
        ollama: OllamaConfig {
            base_url: base_url.to_string(),
            default_model: "llama3:latest".to_string(),
            temperature: 0.7,
            max_tokens: 1000,
            connect_timeout_secs: 2,
            request_timeout_secs: Some(10),
        },
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 7860,
            logs: LogsConfig {
                level: "debug".to_string(),
            },
        },
    }
}

pub fn create_test_client(server: &MockServer) -> OllamaClient {
    OllamaClient::new(&create_test_config(&server.uri()).ollama).unwrap()
}

/// A base URL nothing listens on
pub const UNREACHABLE_URL: &str = "http://127.0.0.1:1";

/// Render JSON values as an NDJSON body
pub fn ndjson(lines: &[Value]) -> String {
    lines.iter().map(|line| format!("{}\n", line)).collect()
}

/// Respond to `POST {route}` with a streamed NDJSON body
pub async fn mount_ndjson(server: &MockServer, route: &str, body: String) {
    Mock::given(method("POST"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/x-ndjson"))
        .mount(server)
        .await;
}

pub async fn mount_tags(server: &MockServer, names: &[&str]) {
    let models: Vec<Value> = names
        .iter()
        .map(|name| serde_json::json!({ "name": name, "size": 4661224676u64 }))
        .collect();

    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "models": models })))
        .mount(server)
        .await;
}
