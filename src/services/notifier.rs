use teloxide::prelude::*;
use tokio::task::JoinHandle;

use crate::i18n::{self, Language};
use crate::storage::Booking;

/// Receives every confirmed booking. Implementations must not block the
/// caller: delivery happens in the background and failures are only logged.
pub trait Notifier: Send + Sync {
    fn notify(&self, booking: &Booking);
}

/// Sends new bookings to the administrator chat.
pub struct TelegramNotifier {
    bot: Bot,
    admin_chat: Option<ChatId>,
    language: Language,
}

impl TelegramNotifier {
    pub fn new(bot: Bot, admin_chat: Option<ChatId>, language: Language) -> Self {
        if admin_chat.is_none() {
            tracing::warn!("ADMIN_CHAT_ID not set - new bookings will not be forwarded");
        }
        Self {
            bot,
            admin_chat,
            language,
        }
    }

    /// Starts delivery in the background. `None` when no administrator is set.
    pub fn send(&self, booking: &Booking) -> Option<JoinHandle<()>> {
        let Some(admin_chat) = self.admin_chat else {
            tracing::debug!("No administrator configured, skipping notification");
            return None;
        };

        let text = i18n::admin_notice(self.language, booking);
        let bot = self.bot.clone();
        let date = booking.date;
        let time = booking.time.clone();

        Some(tokio::spawn(async move {
            match bot.send_message(admin_chat, text).await {
                Ok(_) => tracing::info!("Administrator notified about {} {}", date, time),
                Err(e) => tracing::error!(
                    "Failed to notify administrator about {} {}: {}",
                    date,
                    time,
                    e
                ),
            }
        }))
    }
}

impl Notifier for TelegramNotifier {
    fn notify(&self, booking: &Booking) {
        self.send(booking);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::time::Duration;
    use url::Url;

    fn booking() -> Booking {
        Booking {
            date: NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(),
            time: "14:00".to_string(),
            language: Language::En,
            user_id: 42,
            username: Some("alice".to_string()),
        }
    }

    #[tokio::test]
    async fn test_no_admin_sends_nothing() {
        let notifier = TelegramNotifier::new(Bot::new("123456:TEST"), None, Language::Ru);

        assert!(notifier.send(&booking()).is_none());
        notifier.notify(&booking());
    }

    #[tokio::test]
    async fn test_failed_delivery_is_contained() {
        // Nothing listens on port 1, so the request fails
        let bot = Bot::new("123456:TEST").set_api_url(Url::parse("http://127.0.0.1:1/").unwrap());
        let notifier = TelegramNotifier::new(bot, Some(ChatId(1001)), Language::En);

        let handle = notifier.send(&booking()).expect("admin is configured");

        let joined = tokio::time::timeout(Duration::from_secs(30), handle)
            .await
            .expect("delivery task finished");
        assert!(joined.is_ok(), "delivery task panicked");

        // The trait entry point returns without waiting on the network
        let started = std::time::Instant::now();
        notifier.notify(&booking());
        assert!(started.elapsed() < Duration::from_secs(1));
    }
}
