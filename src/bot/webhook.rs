use anyhow::{Context, Result};
use axum::{body::Bytes, extract::State, response::Json, routing::post, Router};
use serde::{Deserialize, Serialize};
use teloxide::prelude::*;
use url::Url;

use crate::bot::handlers::dispatch_update;
use crate::bot::AppContext;

/// Body returned to Telegram for every webhook call.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct WebhookAck {
    pub status: String,
}

impl WebhookAck {
    fn new(status: &str) -> Self {
        Self {
            status: status.to_string(),
        }
    }
}

#[derive(Clone)]
struct WebhookState {
    bot: Bot,
    ctx: AppContext,
}

/// `POST /webhook`, fed by Telegram once the webhook is registered.
pub fn router(bot: Bot, ctx: AppContext) -> Router {
    Router::new()
        .route("/webhook", post(receive_update))
        .with_state(WebhookState { bot, ctx })
}

/// Points Telegram at `endpoint`.
pub async fn register(bot: &Bot, endpoint: &str) -> Result<()> {
    let url = Url::parse(endpoint).with_context(|| format!("Invalid webhook URL {endpoint}"))?;
    bot.set_webhook(url)
        .await
        .with_context(|| format!("Failed to set webhook to {endpoint}"))?;
    tracing::info!("Webhook set to {}", endpoint);
    Ok(())
}

// Answers 200 for every payload, decodable or not.
async fn receive_update(State(state): State<WebhookState>, body: Bytes) -> Json<WebhookAck> {
    let update: Update = match serde_json::from_slice(&body) {
        Ok(update) => update,
        Err(e) => {
            tracing::warn!("Discarding undecodable webhook payload: {}", e);
            return Json(WebhookAck::new("ignored"));
        }
    };

    if let Err(e) = dispatch_update(state.bot, state.ctx, update).await {
        tracing::error!("Failed to process webhook update: {:#}", e);
    }

    Json(WebhookAck::new("ok"))
}
