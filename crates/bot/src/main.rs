//! `mercboard-bot` -- chat front end for the mercboard commission backend.
//!
//! Boots the health surface, the backend client, and the command
//! dispatcher, then consumes invocations from the chat-platform adapter
//! until shutdown.  See [`mercboard_bot::config::BotConfig`] for the
//! environment variables.

use std::sync::Arc;

use tokio::sync::mpsc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mercboard_bot::adapter::{self, Invocation};
use mercboard_bot::config::BotConfig;
use mercboard_bot::dispatcher::Dispatcher;
use mercboard_bot::gateway::{ChatGateway, DeliveryError};
use mercboard_bot::routes;
use mercboard_bot::state::ConnectionState;
use mercboard_client::HttpBackend;

/// Placeholder gateway wired until the platform SDK session registers its
/// own implementation; it only logs what it would send.
struct LoggingGateway;

#[async_trait::async_trait]
impl ChatGateway for LoggingGateway {
    async fn send_private(&self, user_id: &str, content: &str) -> Result<(), DeliveryError> {
        tracing::info!(user_id, content, "Private reply");
        Ok(())
    }

    async fn send_channel(&self, channel_id: &str, content: &str) -> Result<(), DeliveryError> {
        tracing::info!(channel_id, content, "Channel reply");
        Ok(())
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mercboard=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match BotConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = %err, "Invalid configuration");
            std::process::exit(1);
        }
    };

    tracing::info!(
        backend_url = %config.backend_url,
        guild_id = config.guild_id,
        admin_role = %config.admin_role_name,
        "Starting mercboard bot service"
    );

    let backend = HttpBackend::new(config.backend_url.clone());
    let dispatcher = Arc::new(Dispatcher::new(backend, config.admin_role_name.clone()));
    let connection = Arc::new(ConnectionState::new());

    // --- Health surface ---
    let app = routes::health::router(Arc::clone(&connection))
        .layer(TraceLayer::new_for_http());
    let listener =
        match tokio::net::TcpListener::bind(("0.0.0.0", config.health_port)).await {
            Ok(listener) => listener,
            Err(err) => {
                tracing::error!(port = config.health_port, error = %err, "Failed to bind health listener");
                std::process::exit(1);
            }
        };
    tracing::info!(port = config.health_port, "Health surface listening");
    tokio::spawn(async move {
        if let Err(err) = axum::serve(listener, app).await {
            tracing::error!(error = %err, "Health server exited");
        }
    });

    // --- Chat adapter boundary ---
    // The platform SDK session authenticates with `config.bot_token`,
    // marks `connection` ready, and feeds invocations into this channel.
    let (_invocation_tx, invocation_rx) = mpsc::channel::<Invocation>(64);
    let gateway = Arc::new(LoggingGateway);
    let adapter_handle = tokio::spawn(adapter::run(invocation_rx, dispatcher, gateway));

    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutting down");
    drop(_invocation_tx);
    let _ = adapter_handle.await;
}
