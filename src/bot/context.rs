use anyhow::Result;
use std::sync::Arc;
use teloxide::dispatching::dialogue::{Dialogue, InMemStorage};
use teloxide::types::ChatId;

use crate::bot::dialogue::{Client, DialogueEngine, DialogueState, Input, Step};
use crate::utils::datetime::today;
use crate::utils::logging::log_dialogue_step;

/// In-process session storage; sessions are lost on restart.
pub type SessionStorage = InMemStorage<DialogueState>;
pub type BookingDialogue = Dialogue<DialogueState, SessionStorage>;

/// Everything a handler needs, shared by polling and webhook transports.
#[derive(Clone)]
pub struct AppContext {
    engine: Arc<DialogueEngine>,
    sessions: Arc<SessionStorage>,
    bot_username: String,
}

impl AppContext {
    pub fn new(engine: DialogueEngine, bot_username: impl Into<String>) -> Self {
        Self {
            engine: Arc::new(engine),
            sessions: InMemStorage::new(),
            bot_username: bot_username.into(),
        }
    }

    pub fn engine(&self) -> &DialogueEngine {
        &self.engine
    }

    pub fn bot_username(&self) -> &str {
        &self.bot_username
    }

    pub fn dialogue(&self, chat_id: ChatId) -> BookingDialogue {
        Dialogue::new(self.sessions.clone(), chat_id)
    }

    /// Runs one transition for `chat_id` and persists the resulting session.
    pub async fn advance(&self, chat_id: ChatId, client: &Client, input: Input) -> Result<Step> {
        let dialogue = self.dialogue(chat_id);
        let current = dialogue.get().await?;
        let from = current.as_ref().map_or("none", DialogueState::name);

        let step = self
            .engine
            .handle(current.clone(), client, input, today())
            .await?;

        if step.state.is_active() {
            dialogue.update(step.state.clone()).await?;
        } else if current.is_some() {
            dialogue.exit().await?;
        }

        log_dialogue_step(chat_id.0, client.user_id, from, step.state.name());
        Ok(step)
    }
}
