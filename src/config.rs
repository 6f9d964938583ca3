use anyhow::{anyhow, Result};
use std::env;

use crate::i18n::Language;
use crate::utils::validation::{
    validate_booking_days, validate_slot_schedule, validate_telegram_chat_id,
};

#[derive(Debug, Clone)]
pub struct Config {
    pub telegram_bot_token: String,
    pub admin_chat_id: Option<i64>,
    pub admin_language: Language,
    pub webhook_url: Option<String>,
    pub http_port: u16,
    pub data_file: String,
    pub slot_start_hour: u32,
    pub slot_end_hour: u32,
    pub slot_step_minutes: u32,
    pub booking_days: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let token = env::var("BOT_TOKEN").map_err(|_| anyhow!("BOT_TOKEN must be set"))?;

        if token.trim().is_empty() {
            return Err(anyhow!("BOT_TOKEN must be set"));
        }

        let admin_chat_id = match non_empty_var("ADMIN_CHAT_ID") {
            Some(raw) => {
                let id: i64 = raw
                    .trim()
                    .parse()
                    .map_err(|_| anyhow!("Invalid ADMIN_CHAT_ID"))?;
                validate_telegram_chat_id(id).map_err(|e| anyhow!("Invalid ADMIN_CHAT_ID: {}", e))?;
                Some(id)
            }
            None => None,
        };

        let admin_language = match non_empty_var("ADMIN_LANGUAGE") {
            Some(raw) => raw
                .parse()
                .map_err(|_| anyhow!("Invalid ADMIN_LANGUAGE"))?,
            None => Language::default(),
        };

        let webhook_url = non_empty_var("WEBHOOK_URL").map(|url| url.trim().to_string());

        let data_file =
            non_empty_var("DATA_FILE").unwrap_or_else(|| "appointments.json".to_string());

        let http_port = parse_var("HTTP_PORT", 3000)?;
        let slot_start_hour = parse_var("SLOT_START_HOUR", 12)?;
        let slot_end_hour = parse_var("SLOT_END_HOUR", 22)?;
        let slot_step_minutes = parse_var("SLOT_STEP_MINUTES", 60)?;
        validate_slot_schedule(slot_start_hour, slot_end_hour, slot_step_minutes)?;

        let booking_days = parse_var("BOOKING_DAYS", 3)?;
        validate_booking_days(booking_days)?;

        Ok(Config {
            telegram_bot_token: token,
            admin_chat_id,
            admin_language,
            webhook_url,
            http_port,
            data_file,
            slot_start_hour,
            slot_end_hour,
            slot_step_minutes,
            booking_days,
        })
    }

    /// Full webhook address registered with Telegram, `None` in polling mode.
    pub fn webhook_endpoint(&self) -> Option<String> {
        let base = self.webhook_url.as_deref()?.trim_end_matches('/');
        if base.ends_with("/webhook") {
            Some(base.to_string())
        } else {
            Some(format!("{base}/webhook"))
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T> {
    match non_empty_var(name) {
        Some(raw) => raw.trim().parse().map_err(|_| anyhow!("Invalid {}", name)),
        None => Ok(default),
    }
}
