use anyhow::{anyhow, Result};
use chrono::{Local, NaiveDate, NaiveTime};

/// Store and callback format of a calendar date.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Store and callback format of a slot start time.
pub const SLOT_FORMAT: &str = "%H:%M";

/// Today's date on the bot's local clock.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
        .map_err(|_| anyhow!("Invalid date '{}', expected YYYY-MM-DD", input))
}

pub fn format_slot(time: NaiveTime) -> String {
    time.format(SLOT_FORMAT).to_string()
}

pub fn parse_slot(input: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(input.trim(), SLOT_FORMAT)
        .map_err(|_| anyhow!("Invalid time '{}', expected HH:MM", input))
}
