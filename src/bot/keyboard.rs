use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::i18n::Language;
use crate::utils::validation::validate_language;

/// Callback payload carried by an inline button.
///
/// Encoded as `kind:value`, e.g. `lang:en`, `date:2026-10-18`, `time:14:00`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    Language(Language),
    Date(String),
    Time(String),
    /// A slot rendered as unavailable.
    Taken(String),
    Cancel,
}

impl Choice {
    pub fn encode(&self) -> String {
        match self {
            Choice::Language(language) => format!("lang:{}", language.code()),
            Choice::Date(date) => format!("date:{date}"),
            Choice::Time(time) => format!("time:{time}"),
            Choice::Taken(time) => format!("taken:{time}"),
            Choice::Cancel => "cancel".to_string(),
        }
    }

    /// Decodes callback data; anything unrecognised is `None`.
    pub fn parse(data: &str) -> Option<Self> {
        if data == "cancel" {
            return Some(Choice::Cancel);
        }

        let (kind, value) = data.split_once(':')?;
        if value.is_empty() {
            return None;
        }
        match kind {
            "lang" => validate_language(value).ok().map(Choice::Language),
            "date" => Some(Choice::Date(value.to_string())),
            "time" => Some(Choice::Time(value.to_string())),
            "taken" => Some(Choice::Taken(value.to_string())),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub choice: Choice,
}

impl Button {
    pub fn new(label: impl Into<String>, choice: Choice) -> Self {
        Self {
            label: label.into(),
            choice,
        }
    }
}

/// Text plus an optional inline keyboard, one `Vec` per row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub text: String,
    pub keyboard: Vec<Vec<Button>>,
}

impl Prompt {
    pub fn new(text: impl Into<String>, keyboard: Vec<Vec<Button>>) -> Self {
        Self {
            text: text.into(),
            keyboard,
        }
    }

    /// A prompt without buttons.
    pub fn notice(text: impl Into<String>) -> Self {
        Self::new(text, Vec::new())
    }

    pub fn buttons(&self) -> impl Iterator<Item = &Button> {
        self.keyboard.iter().flatten()
    }

    pub fn markup(&self) -> Option<InlineKeyboardMarkup> {
        if self.keyboard.is_empty() {
            return None;
        }

        let rows = self.keyboard.iter().map(|row| {
            row.iter()
                .map(|button| InlineKeyboardButton::callback(button.label.clone(), button.choice.encode()))
                .collect::<Vec<_>>()
        });
        Some(InlineKeyboardMarkup::new(rows))
    }
}
