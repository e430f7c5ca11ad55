use anyhow::Result;
use hiollama::{config, server};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Validates that a log level string is valid
fn validate_log_level(level: &str) -> Result<()> {
    level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .map_err(|_| {
            anyhow::anyhow!(
                "Invalid log level: '{}'. Valid levels: error, warn, info, debug, trace",
                level
            )
        })?;
    Ok(())
}

/// `RUST_LOG` directives when given and parsable, otherwise the configured level.
fn env_filter(rust_log: Option<&str>, level: &str) -> EnvFilter {
    match rust_log {
        Some(directives) => EnvFilter::try_new(directives).unwrap_or_else(|e| {
            eprintln!(
                "Ignoring invalid RUST_LOG '{}': {}. Using level '{}'",
                directives, e, level
            );
            EnvFilter::new(level)
        }),
        None => EnvFilter::new(level),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Configuration decides the log level, so it loads before logging exists
    let config = match config::load().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = validate_log_level(&config.server.logs.level) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    let rust_log = std::env::var("RUST_LOG").ok();
    let filter = env_filter(rust_log.as_deref(), &config.server.logs.level);
    let filter_display = filter.to_string();

    tracing_subscriber::fmt().with_env_filter(filter).json().init();

    info!("Starting HiOllama with log filter: {}", filter_display);

    server::run(config).await?;

    Ok(())
}
