use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use careline::api::{create_router, AppState};
use careline::config::Config;

#[derive(Parser)]
#[command(name = "careline")]
#[command(about = "Chat proxy for the Phyllis Home Care website widget")]
struct Args {
    /// Override the configured listen port
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "careline=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = Config::from_env();
    if let Some(port) = args.port {
        config.server.port = port;
    }

    if config.chat.allowed_origins.is_empty() {
        tracing::warn!(
            "CHAT_ALLOWED_ORIGINS is empty or malformed — no origin will receive a CORS grant."
        );
    }
    if config.chat.api_key.is_none() {
        tracing::warn!(
            "OPENAI_API_KEY is not set — upstream calls will fail and visitors will see the fallback reply."
        );
    }

    let state = AppState::new(config.clone())?;
    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!("CareLine starting on http://{}", addr);
    tracing::info!("  Chat endpoint: http://{}/v1/chat", addr);
    tracing::info!("  Health check:  http://{}/health", addr);
    tracing::info!("  API docs:      http://{}/docs", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
