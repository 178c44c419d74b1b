//! Main binary for the Text Analysis Service
//!
//! Serves sentiment, keyphrase and summary analysis over HTTP using the
//! provider selected at startup.

use text_analysis_service::{config::AnalysisConfig, providers::ProviderKind, AppState};

use clap::{Arg, ArgMatches, Command};
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // .env is optional
    dotenvy::dotenv().ok();

    init_tracing()?;

    let matches = create_cli().get_matches();
    let config = load_config(&matches)?;

    config.validate().map_err(|e| {
        error!("Configuration validation failed: {}", e);
        e
    })?;

    info!(
        "Starting Text Analysis Service v{}",
        env!("CARGO_PKG_VERSION")
    );
    info!(
        "Provider: {}, max_chars: {}, request timeout: {}ms",
        config.provider, config.max_chars, config.request_timeout_ms
    );

    let addr = config.server.address();
    let state = AppState::from_config(config);
    let app = text_analysis_service::create_router(state);

    let listener = TcpListener::bind(&addr).await.map_err(|e| {
        error!("Failed to bind to address {}: {}", addr, e);
        e
    })?;

    info!("Text Analysis Service listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await?;

    info!("Text Analysis Service stopped gracefully");
    Ok(())
}

/// Initialize tracing/logging
fn init_tracing() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "text_analysis_service=info,tower_http=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true))
        .try_init()?;

    Ok(())
}

/// Create CLI argument parser
fn create_cli() -> Command {
    Command::new("text-analysis-server")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Text Analysis Service - sentiment, keyphrases and summaries")
        .arg(
            Arg::new("host")
                .long("host")
                .value_name("HOST")
                .help("Server host address (overrides HOST)"),
        )
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .value_name("PORT")
                .help("Server port (overrides PORT)"),
        )
        .arg(
            Arg::new("provider")
                .long("provider")
                .value_name("NAME")
                .help("Analysis provider: simple, hf or spacy (overrides PROVIDER)"),
        )
}

/// Load configuration from the environment, then apply CLI overrides
fn load_config(
    matches: &ArgMatches,
) -> Result<AnalysisConfig, Box<dyn std::error::Error + Send + Sync>> {
    let mut config = AnalysisConfig::from_env()?;

    if let Some(host) = matches.get_one::<String>("host") {
        config.server.host = host.clone();
    }

    if let Some(port_str) = matches.get_one::<String>("port") {
        config.server.port = port_str
            .parse()
            .map_err(|e| format!("Invalid port number '{}': {}", port_str, e))?;
    }

    if let Some(provider) = matches.get_one::<String>("provider") {
        config.provider = provider.parse::<ProviderKind>()?;
    }

    Ok(config)
}

/// Wait for shutdown signals
async fn wait_for_shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received terminate signal");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_cli() {
        let matches = create_cli()
            .try_get_matches_from(vec!["text-analysis-server", "--port", "9090"])
            .unwrap();
        assert_eq!(matches.get_one::<String>("port"), Some(&"9090".to_string()));
    }

    #[test]
    fn test_cli_overrides() {
        let matches = create_cli().get_matches_from(vec![
            "text-analysis-server",
            "--host",
            "0.0.0.0",
            "--port",
            "9999",
            "--provider",
            "spacy",
        ]);

        let config = load_config(&matches).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9999);
        assert_eq!(config.provider, ProviderKind::Spacy);
    }

    #[test]
    fn test_invalid_port_handling() {
        let matches =
            create_cli().get_matches_from(vec!["text-analysis-server", "--port", "invalid"]);
        assert!(load_config(&matches).is_err());
    }

    #[test]
    fn test_invalid_provider_handling() {
        let matches =
            create_cli().get_matches_from(vec!["text-analysis-server", "--provider", "openai"]);
        assert!(load_config(&matches).is_err());
    }
}
