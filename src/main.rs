//! # Appointment Bot Main Entry Point
//!
//! Initializes logging, loads configuration, wires the slot store, dialogue
//! engine and notifier together, then serves Telegram updates by long polling
//! or through a webhook, next to the health endpoints.

use anyhow::{Context, Result};
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::info;

use appointment_bot::bot::handlers::BotHandler;
use appointment_bot::bot::{webhook, AppContext, Command, DialogueEngine};
use appointment_bot::config::Config;
use appointment_bot::services::availability::{Availability, SlotCatalog};
use appointment_bot::services::health::HealthService;
use appointment_bot::services::notifier::TelegramNotifier;
use appointment_bot::storage::SlotStore;
use appointment_bot::utils::logging::{self, log_system_event};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env first so RUST_LOG from it applies
    dotenvy::dotenv().ok();
    logging::init();

    let config = Config::from_env()?;

    info!("Starting Appointment Bot v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration loaded - Data file: {}, HTTP Port: {}, Slots: {:02}:00-{:02}:00 every {} min, {} day(s) ahead",
        config.data_file,
        config.http_port,
        config.slot_start_hour,
        config.slot_end_hour,
        config.slot_step_minutes,
        config.booking_days
    );

    // Initialize bot
    info!("Initializing Telegram bot...");
    let bot = Bot::new(&config.telegram_bot_token);
    let me = bot
        .get_me()
        .await
        .context("Failed to reach Telegram with the configured BOT_TOKEN")?;
    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        tracing::warn!("Failed to register bot commands: {}", e);
    }
    info!("Telegram bot @{} initialized successfully", me.username());

    // Wire the booking core
    let store = SlotStore::new(&config.data_file);
    store.init().await?;
    let catalog = SlotCatalog::new(
        config.slot_start_hour,
        config.slot_end_hour,
        config.slot_step_minutes,
    );
    let availability = Availability::new(store.clone(), catalog, config.booking_days);
    let notifier = Arc::new(TelegramNotifier::new(
        bot.clone(),
        config.admin_chat_id.map(ChatId),
        config.admin_language,
    ));
    let ctx = AppContext::new(DialogueEngine::new(availability, notifier), me.username());
    info!("Bookings stored in {}", store.path().display());

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.http_port))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to port {}: {}", config.http_port, e))?;

    match config.webhook_endpoint() {
        Some(endpoint) => {
            webhook::register(&bot, &endpoint).await?;

            let app = HealthService::new(store, "webhook")
                .router
                .merge(webhook::router(bot, ctx))
                .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));

            info!("Webhook server starting on port {}", config.http_port);
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    if let Err(e) = tokio::signal::ctrl_c().await {
                        tracing::error!("Failed to listen for ctrl-c: {}", e);
                    }
                })
                .await
                .context("Webhook server error")?;
        }
        None => {
            // Telegram refuses getUpdates while a webhook is set
            if let Err(e) = bot.delete_webhook().await {
                tracing::warn!("Failed to delete webhook before polling: {}", e);
            }

            let handler = BotHandler::new(ctx);
            let health_router = HealthService::new(store, "polling")
                .router
                .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));

            info!("Health check server starting on port {}", config.http_port);

            // Run both the bot and health server concurrently
            let bot_task = tokio::spawn(async move {
                Dispatcher::builder(bot, handler.schema())
                    .enable_ctrlc_handler()
                    .build()
                    .dispatch()
                    .await;
            });

            let health_task = tokio::spawn(async move {
                if let Err(e) = axum::serve(listener, health_router).await {
                    tracing::error!("Health server error: {}", e);
                }
            });

            // Wait for either task to complete (which would indicate shutdown)
            tokio::select! {
                result1 = bot_task => {
                    if let Err(e) = result1 {
                        tracing::error!("Bot task error: {}", e);
                    }
                }
                result2 = health_task => {
                    if let Err(e) = result2 {
                        tracing::error!("Health task error: {}", e);
                    }
                }
            }
        }
    }

    log_system_event("Application stopped", None);
    Ok(())
}
