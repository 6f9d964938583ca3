//! Localization table for every user-facing message.
//!
//! Each message is looked up by `(Language, Text)` so that language coverage
//! stays complete and can be checked in tests.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::storage::models::Booking;

/// Service language a client can book an appointment in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Russian
    #[default]
    Ru,
    /// English
    En,
    /// Georgian
    Ka,
}

impl Language {
    /// All languages in the order they are offered.
    pub const ALL: [Language; 3] = [Language::Ru, Language::En, Language::Ka];

    /// Lowercase ISO code, also used as callback payload and in the store.
    pub fn code(self) -> &'static str {
        match self {
            Language::Ru => "ru",
            Language::En => "en",
            Language::Ka => "ka",
        }
    }

    /// Name of the language written in the language itself.
    pub fn native_name(self) -> &'static str {
        match self {
            Language::Ru => "Русский",
            Language::En => "English",
            Language::Ka => "ქართული",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "ru" => Ok(Language::Ru),
            "en" => Ok(Language::En),
            "ka" => Ok(Language::Ka),
            other => Err(anyhow!("Unsupported language '{}'", other)),
        }
    }
}

/// Keys of the message table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Text {
    /// Language prompt line
    ChooseLanguage,
    /// Date prompt
    ChooseDate,
    /// Time prompt
    ChooseTime,
    /// Header of the confirmation message
    Confirmed,
    /// Dialogue aborted by the client
    Cancelled,
    /// Cancel with no active dialogue
    NothingToCancel,
    /// Slot already booked; takes the booking language as argument
    SlotTaken,
    /// Off-menu selection
    InvalidChoice,
    /// Free text while a menu is open
    UseButtons,
    /// Button pressed after the dialogue ended
    SessionExpired,
    /// Label of the cancel button
    CancelButton,
    /// Header of the administrator notification
    AdminNewBooking,
    /// "Date" field label
    DateLabel,
    /// "Time" field label
    TimeLabel,
    /// "Language" field label
    LanguageLabel,
    /// "Client" field label
    ClientLabel,
    /// Reply to /help
    Help,
    /// Internal error while handling a button press
    Failure,
}

impl Text {
    /// Every key, used to check that the table is complete.
    pub const ALL: [Text; 18] = [
        Text::ChooseLanguage,
        Text::ChooseDate,
        Text::ChooseTime,
        Text::Confirmed,
        Text::Cancelled,
        Text::NothingToCancel,
        Text::SlotTaken,
        Text::InvalidChoice,
        Text::UseButtons,
        Text::SessionExpired,
        Text::CancelButton,
        Text::AdminNewBooking,
        Text::DateLabel,
        Text::TimeLabel,
        Text::LanguageLabel,
        Text::ClientLabel,
        Text::Help,
        Text::Failure,
    ];
}

/// Looks up a message template.
pub fn text(language: Language, key: Text) -> &'static str {
    use Language::*;
    use Text::*;

    match (language, key) {
        (Ru, ChooseLanguage) => "Выберите язык обслуживания:",
        (En, ChooseLanguage) => "Choose the service language:",
        (Ka, ChooseLanguage) => "აირჩიეთ მომსახურების ენა:",

        (Ru, ChooseDate) => "Выберите дату:",
        (En, ChooseDate) => "Choose a date:",
        (Ka, ChooseDate) => "აირჩიეთ თარიღი:",

        (Ru, ChooseTime) => "Выберите время:",
        (En, ChooseTime) => "Choose a time:",
        (Ka, ChooseTime) => "აირჩიეთ დრო:",

        (Ru, Confirmed) => "✅ Запись подтверждена:",
        (En, Confirmed) => "✅ Appointment confirmed:",
        (Ka, Confirmed) => "✅ ჩაწერა დადასტურებულია:",

        (Ru, Cancelled) => "Запись отменена.",
        (En, Cancelled) => "Booking cancelled.",
        (Ka, Cancelled) => "ჩაწერა გაუქმებულია.",

        (Ru, NothingToCancel) => "Нет активной записи. Отправьте /start, чтобы записаться.",
        (En, NothingToCancel) => "There is nothing to cancel. Send /start to book.",
        (Ka, NothingToCancel) => "გასაუქმებელი არაფერია. ჩასაწერად გამოგზავნეთ /start.",

        (Ru, SlotTaken) => "Это время уже занято ({}). Выберите другое.",
        (En, SlotTaken) => "This time is already booked ({}). Please choose another.",
        (Ka, SlotTaken) => "ეს დრო უკვე დაკავებულია ({}). აირჩიეთ სხვა.",

        (Ru, InvalidChoice) => "Этот вариант недоступен. Выберите из списка.",
        (En, InvalidChoice) => "That option is not available. Please pick one from the list.",
        (Ka, InvalidChoice) => "ეს ვარიანტი მიუწვდომელია. აირჩიეთ სიიდან.",

        (Ru, UseButtons) => "Пожалуйста, используйте кнопки выше или /cancel.",
        (En, UseButtons) => "Please use the buttons above, or /cancel.",
        (Ka, UseButtons) => "გთხოვთ, გამოიყენოთ ზემოთ მოცემული ღილაკები ან /cancel.",

        (Ru, SessionExpired) => "Сессия устарела. Отправьте /start.",
        (En, SessionExpired) => "This menu has expired. Send /start.",
        (Ka, SessionExpired) => "ეს მენიუ მოძველებულია. გამოგზავნეთ /start.",

        (Ru, CancelButton) => "✖ Отмена",
        (En, CancelButton) => "✖ Cancel",
        (Ka, CancelButton) => "✖ გაუქმება",

        (Ru, AdminNewBooking) => "🆕 Новая запись:",
        (En, AdminNewBooking) => "🆕 New booking:",
        (Ka, AdminNewBooking) => "🆕 ახალი ჩაწერა:",

        (Ru, DateLabel) => "Дата",
        (En, DateLabel) => "Date",
        (Ka, DateLabel) => "თარიღი",

        (Ru, TimeLabel) => "Время",
        (En, TimeLabel) => "Time",
        (Ka, TimeLabel) => "დრო",

        (Ru, LanguageLabel) => "Язык",
        (En, LanguageLabel) => "Language",
        (Ka, LanguageLabel) => "ენა",

        (Ru, ClientLabel) => "Клиент",
        (En, ClientLabel) => "Client",
        (Ka, ClientLabel) => "კლიენტი",

        (Ru, Help) => "Отправьте /start, чтобы записаться, или /cancel, чтобы прервать запись.",
        (En, Help) => "Send /start to book an appointment, or /cancel to abort.",
        (Ka, Help) => "ჩასაწერად გამოგზავნეთ /start, შესაწყვეტად კი /cancel.",

        (Ru, Failure) => "⚠️ Что-то пошло не так. Попробуйте ещё раз.",
        (En, Failure) => "⚠️ Something went wrong. Please try again.",
        (Ka, Failure) => "⚠️ რაღაც შეცდომა მოხდა. სცადეთ თავიდან.",
    }
}

/// Language prompt, shown in every language since none is chosen yet.
pub fn language_prompt() -> String {
    Language::ALL
        .iter()
        .map(|language| text(*language, Text::ChooseLanguage))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Alert shown when the slot is already held by a booking in `booked_in`.
pub fn slot_taken(language: Language, booked_in: Language) -> String {
    text(language, Text::SlotTaken).replace("{}", booked_in.native_name())
}

/// Help text in every language.
pub fn help() -> String {
    Language::ALL
        .iter()
        .map(|language| text(*language, Text::Help))
        .collect::<Vec<_>>()
        .join("\n")
}

fn booking_details(language: Language, booking: &Booking) -> String {
    format!(
        "{}: {}\n{}: {}\n{}: {}",
        text(language, Text::DateLabel),
        booking.date.format("%Y-%m-%d"),
        text(language, Text::TimeLabel),
        booking.time,
        text(language, Text::LanguageLabel),
        booking.language.native_name(),
    )
}

/// Confirmation shown to the client once the booking is written.
pub fn confirmation(language: Language, booking: &Booking) -> String {
    format!(
        "{}\n{}",
        text(language, Text::Confirmed),
        booking_details(language, booking)
    )
}

/// Notification sent to the administrator.
pub fn admin_notice(language: Language, booking: &Booking) -> String {
    let client = match &booking.username {
        Some(username) => format!("@{} ({})", username, booking.user_id),
        None => booking.user_id.to_string(),
    };
    format!(
        "{}\n{}\n{}: {}",
        text(language, Text::AdminNewBooking),
        booking_details(language, booking),
        text(language, Text::ClientLabel),
        client
    )
}
