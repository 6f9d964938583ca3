use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::i18n::Language;

/// Value stored for a booked slot.
///
/// Older files hold just the language code per slot (`"14:00": "en"`); those
/// read back with `user_id` 0 and no username.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredRecord")]
pub struct BookingRecord {
    pub language: Language,
    pub user_id: i64,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredRecord {
    Full {
        language: Language,
        user_id: i64,
        #[serde(default)]
        username: Option<String>,
    },
    LanguageOnly(Language),
}

impl From<StoredRecord> for BookingRecord {
    fn from(stored: StoredRecord) -> Self {
        match stored {
            StoredRecord::Full {
                language,
                user_id,
                username,
            } => Self {
                language,
                user_id,
                username,
            },
            StoredRecord::LanguageOnly(language) => Self {
                language,
                user_id: 0,
                username: None,
            },
        }
    }
}

/// Bookings of one day, keyed by "HH:MM" slot label.
pub type DayBookings = BTreeMap<String, BookingRecord>;

/// Whole store contents: date -> time -> record.
pub type Schedule = BTreeMap<NaiveDate, DayBookings>;

/// A confirmed slot assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub date: NaiveDate,
    pub time: String,
    pub language: Language,
    pub user_id: i64,
    pub username: Option<String>,
}

impl Booking {
    pub fn record(&self) -> BookingRecord {
        BookingRecord {
            language: self.language,
            user_id: self.user_id,
            username: self.username.clone(),
        }
    }
}
