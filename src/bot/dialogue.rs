//! Booking dialogue: language, then date, then time.
//!
//! [`DialogueEngine::handle`] is a pure transition function over
//! [`DialogueState`]; it knows nothing about Telegram beyond the callback
//! payloads in [`Choice`]. The transport owns session storage and rendering.

use anyhow::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use teloxide::types::User;

use crate::bot::keyboard::{Button, Choice, Prompt};
use crate::i18n::{self, text, Language, Text};
use crate::services::availability::Availability;
use crate::services::notifier::Notifier;
use crate::storage::{Booking, BookingOutcome};
use crate::utils::datetime::format_date;
use crate::utils::logging::{log_booking, log_booking_rejected, log_invalid_input};
use crate::utils::validation::{validate_date_choice, validate_time_choice};

/// Per-chat progress through the booking dialogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DialogueState {
    AwaitingLanguage,
    AwaitingDate { language: Language },
    AwaitingTime { language: Language, date: NaiveDate },
    Done,
}

impl DialogueState {
    pub fn name(&self) -> &'static str {
        match self {
            DialogueState::AwaitingLanguage => "awaiting_language",
            DialogueState::AwaitingDate { .. } => "awaiting_date",
            DialogueState::AwaitingTime { .. } => "awaiting_time",
            DialogueState::Done => "done",
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, DialogueState::Done)
    }

    /// Language chosen so far, if any.
    pub fn language(&self) -> Option<Language> {
        match self {
            DialogueState::AwaitingDate { language } | DialogueState::AwaitingTime { language, .. } => {
                Some(*language)
            }
            _ => None,
        }
    }
}

/// Something the client did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// `/start`
    Start,
    /// `/cancel`
    Cancel,
    /// Inline button press, carrying its callback data.
    Selection(String),
    /// Any other text message.
    Text(String),
}

/// Identity recorded with a booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    pub user_id: i64,
    pub username: Option<String>,
}

impl From<&User> for Client {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id.0 as i64,
            username: user.username.clone(),
        }
    }
}

/// What the transport should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Show this prompt: a new message for commands, an edit for button presses.
    Show(Prompt),
    /// Short alert on the pressed button, optionally re-rendering the menu.
    Alert { text: String, refresh: Option<Prompt> },
    /// Nothing to say.
    Silent,
}

impl Reply {
    fn alert(text: impl Into<String>) -> Self {
        Reply::Alert {
            text: text.into(),
            refresh: None,
        }
    }

    fn alert_with(text: impl Into<String>, refresh: Prompt) -> Self {
        Reply::Alert {
            text: text.into(),
            refresh: Some(refresh),
        }
    }
}

/// Result of one transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub state: DialogueState,
    pub reply: Reply,
}

impl Step {
    fn new(state: DialogueState, reply: Reply) -> Self {
        Self { state, reply }
    }
}

pub struct DialogueEngine {
    availability: Availability,
    notifier: Arc<dyn Notifier>,
}

impl DialogueEngine {
    pub fn new(availability: Availability, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            availability,
            notifier,
        }
    }

    pub fn availability(&self) -> &Availability {
        &self.availability
    }

    /// Applies `input` to the chat's current state. `None` means no dialogue
    /// is in progress.
    pub async fn handle(
        &self,
        state: Option<DialogueState>,
        client: &Client,
        input: Input,
        today: NaiveDate,
    ) -> Result<Step> {
        let state = state.unwrap_or(DialogueState::Done);

        match input {
            Input::Start => Ok(Step::new(
                DialogueState::AwaitingLanguage,
                Reply::Show(language_prompt()),
            )),
            Input::Cancel => Ok(cancel(state)),
            Input::Text(_) if state.is_active() => {
                let language = state.language().unwrap_or_default();
                Ok(Step::new(
                    state,
                    Reply::Show(Prompt::notice(text(language, Text::UseButtons))),
                ))
            }
            Input::Text(_) => Ok(Step::new(state, Reply::Silent)),
            Input::Selection(data) => self.select(state, client, &data, today).await,
        }
    }

    async fn select(
        &self,
        state: DialogueState,
        client: &Client,
        data: &str,
        today: NaiveDate,
    ) -> Result<Step> {
        if !state.is_active() {
            return Ok(Step::new(
                DialogueState::Done,
                Reply::alert(text(Language::default(), Text::SessionExpired)),
            ));
        }

        let language = state.language().unwrap_or_default();
        let Some(choice) = Choice::parse(data) else {
            log_invalid_input(client.user_id, state.name(), data);
            return Ok(invalid(state, language, None));
        };

        match (state.clone(), choice) {
            (_, Choice::Cancel) => Ok(cancel(state)),

            (DialogueState::AwaitingLanguage, Choice::Language(language)) => Ok(Step::new(
                DialogueState::AwaitingDate { language },
                Reply::Show(self.date_prompt(language, today)),
            )),

            (DialogueState::AwaitingDate { language }, Choice::Date(raw)) => {
                match validate_date_choice(&raw, &self.availability.booking_days(today)) {
                    Ok(date) => Ok(Step::new(
                        DialogueState::AwaitingTime { language, date },
                        Reply::Show(self.time_prompt(language, date).await),
                    )),
                    Err(e) => {
                        tracing::debug!("Rejected date choice: {}", e);
                        let refresh = self.date_prompt(language, today);
                        Ok(invalid(state, language, Some(refresh)))
                    }
                }
            }

            (DialogueState::AwaitingTime { language, date }, Choice::Time(raw)) => {
                if !self.availability.offers(today, date) {
                    return Ok(Step::new(
                        DialogueState::AwaitingDate { language },
                        Reply::alert_with(
                            text(language, Text::InvalidChoice),
                            self.date_prompt(language, today),
                        ),
                    ));
                }
                match validate_time_choice(&raw, &self.availability.slots_for(date)) {
                    Ok(time) => self.book(language, date, time, client).await,
                    Err(e) => {
                        tracing::debug!("Rejected time choice: {}", e);
                        let refresh = self.time_prompt(language, date).await;
                        Ok(invalid(state, language, Some(refresh)))
                    }
                }
            }

            (DialogueState::AwaitingTime { language, date }, Choice::Taken(raw)) => {
                let refresh = self.time_prompt(language, date).await;
                if !self.availability.contains(date, &raw) {
                    log_invalid_input(client.user_id, state.name(), data);
                    return Ok(invalid(state, language, Some(refresh)));
                }
                match self.availability.store().lookup(date, &raw).await {
                    Some(existing) => Ok(Step::new(
                        state,
                        Reply::alert_with(i18n::slot_taken(language, existing.language), refresh),
                    )),
                    None => Ok(invalid(state, language, Some(refresh))),
                }
            }

            (state, _) => {
                log_invalid_input(client.user_id, state.name(), data);
                Ok(invalid(state, language, None))
            }
        }
    }

    async fn book(
        &self,
        language: Language,
        date: NaiveDate,
        time: String,
        client: &Client,
    ) -> Result<Step> {
        let booking = Booking {
            date,
            time: time.clone(),
            language,
            user_id: client.user_id,
            username: client.username.clone(),
        };

        match self.availability.store().book(booking).await? {
            BookingOutcome::Booked(booking) => {
                log_booking(
                    &format_date(booking.date),
                    &booking.time,
                    booking.language.code(),
                    booking.user_id,
                );
                self.notifier.notify(&booking);
                Ok(Step::new(
                    DialogueState::Done,
                    Reply::Show(Prompt::notice(i18n::confirmation(language, &booking))),
                ))
            }
            BookingOutcome::AlreadyBooked(existing) => {
                log_booking_rejected(&format_date(date), &time, client.user_id);
                Ok(Step::new(
                    DialogueState::AwaitingTime { language, date },
                    Reply::alert_with(
                        i18n::slot_taken(language, existing.language),
                        self.time_prompt(language, date).await,
                    ),
                ))
            }
        }
    }

    fn date_prompt(&self, language: Language, today: NaiveDate) -> Prompt {
        let mut rows: Vec<Vec<Button>> = self
            .availability
            .booking_days(today)
            .into_iter()
            .map(|date| {
                let label = format_date(date);
                vec![Button::new(label.clone(), Choice::Date(label))]
            })
            .collect();
        rows.push(cancel_row(language));
        Prompt::new(text(language, Text::ChooseDate), rows)
    }

    async fn time_prompt(&self, language: Language, date: NaiveDate) -> Prompt {
        let buttons: Vec<Button> = self
            .availability
            .day(date)
            .await
            .into_iter()
            .map(|slot| match slot.booked_by {
                Some(booked_in) => Button::new(
                    format!("{} ❌ {}", slot.time, booked_in.code().to_uppercase()),
                    Choice::Taken(slot.time),
                ),
                None => Button::new(slot.time.clone(), Choice::Time(slot.time)),
            })
            .collect();

        let mut rows: Vec<Vec<Button>> = buttons.chunks(2).map(|row| row.to_vec()).collect();
        rows.push(cancel_row(language));
        Prompt::new(
            format!("{}\n{}", text(language, Text::ChooseTime), format_date(date)),
            rows,
        )
    }
}

fn language_prompt() -> Prompt {
    let rows = Language::ALL
        .iter()
        .map(|language| vec![Button::new(language.native_name(), Choice::Language(*language))])
        .collect();
    Prompt::new(i18n::language_prompt(), rows)
}

fn cancel_row(language: Language) -> Vec<Button> {
    vec![Button::new(text(language, Text::CancelButton), Choice::Cancel)]
}

fn cancel(state: DialogueState) -> Step {
    let message = if state.is_active() {
        text(state.language().unwrap_or_default(), Text::Cancelled)
    } else {
        text(Language::default(), Text::NothingToCancel)
    };
    Step::new(DialogueState::Done, Reply::Show(Prompt::notice(message)))
}

fn invalid(state: DialogueState, language: Language, refresh: Option<Prompt>) -> Step {
    Step::new(
        state,
        Reply::Alert {
            text: text(language, Text::InvalidChoice).to_string(),
            refresh,
        },
    )
}
