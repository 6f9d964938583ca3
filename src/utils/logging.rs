use tracing::{debug, error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the global tracing subscriber, honouring `RUST_LOG` when set.
pub fn init() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "appointment_bot=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Logs a dialogue transition with consistent format
pub fn log_dialogue_step(chat_id: i64, user_id: i64, from: &str, to: &str) {
    debug!("DIALOGUE: chat {} user {} {} -> {}", chat_id, user_id, from, to);
}

/// Logs a confirmed booking with consistent format
pub fn log_booking(date: &str, time: &str, language: &str, user_id: i64) {
    info!("BOOKING: {} {} ({}) by user {}", date, time, language, user_id);
}

/// Logs a rejected booking attempt with consistent format
pub fn log_booking_rejected(date: &str, time: &str, user_id: i64) {
    info!("BOOKING_REJECTED: {} {} already taken, user {}", date, time, user_id);
}

/// Logs off-menu input with consistent format
pub fn log_invalid_input(user_id: i64, state: &str, input: &str) {
    warn!("INVALID_INPUT: user {} in {} sent '{}'", user_id, state, input);
}

/// Logs store errors with consistent format
pub fn log_store_error(operation: &str, target: &str, error: &str) {
    error!("STORE_ERROR: {} on {} failed: {}", operation, target, error);
}

/// Logs system events with consistent format
pub fn log_system_event(event: &str, details: Option<&str>) {
    match details {
        Some(d) => info!("SYSTEM: {} - {}", event, d),
        None => info!("SYSTEM: {}", event),
    }
}
