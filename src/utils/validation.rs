use anyhow::{anyhow, Result};
use chrono::NaiveDate;

use crate::i18n::Language;
use crate::utils::datetime::{parse_date, parse_slot};

pub fn validate_telegram_chat_id(chat_id: i64) -> Result<()> {
    // Telegram chat IDs should be non-zero
    if chat_id == 0 {
        return Err(anyhow!("Chat ID cannot be zero"));
    }

    // Private chats are positive and fit in 52 bits
    if chat_id > (1_i64 << 52) {
        return Err(anyhow!("Invalid user chat ID range"));
    }

    // Supergroups and channels sit around -100xxxxxxxxxx
    if chat_id < -2000000000000 {
        return Err(anyhow!("Chat ID out of valid range"));
    }

    Ok(())
}

pub fn validate_language(code: &str) -> Result<Language> {
    code.parse::<Language>()
}

/// Accepts a date only if it is one of the dates currently offered.
pub fn validate_date_choice(raw: &str, offered: &[NaiveDate]) -> Result<NaiveDate> {
    let date = parse_date(raw)?;
    if !offered.contains(&date) {
        return Err(anyhow!("Date {} is not open for booking", date));
    }
    Ok(date)
}

/// Accepts a time only if it is one of the catalog's slot labels.
pub fn validate_time_choice(raw: &str, slots: &[String]) -> Result<String> {
    let label = raw.trim();
    parse_slot(label)?;
    if !slots.iter().any(|slot| slot == label) {
        return Err(anyhow!("Time {} is not a bookable slot", label));
    }
    Ok(label.to_string())
}

pub fn validate_slot_schedule(start_hour: u32, end_hour: u32, step_minutes: u32) -> Result<()> {
    if end_hour > 24 {
        return Err(anyhow!("Slot end hour cannot be later than 24"));
    }

    if start_hour >= end_hour {
        return Err(anyhow!("Slot start hour must be before the end hour"));
    }

    if step_minutes == 0 || step_minutes > 240 {
        return Err(anyhow!("Slot step must be between 1 and 240 minutes"));
    }

    Ok(())
}

pub fn validate_booking_days(days: u32) -> Result<()> {
    if days == 0 {
        return Err(anyhow!("At least one booking day must be offered"));
    }

    if days > 14 {
        return Err(anyhow!("Cannot offer more than 14 booking days"));
    }

    Ok(())
}
