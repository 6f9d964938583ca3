pub mod callback;
pub mod message;

use teloxide::{
    dispatching::{UpdateFilterExt, UpdateHandler},
    prelude::*,
    types::{ChatId, MessageId, UpdateKind},
    ApiError, RequestError,
};

use crate::bot::keyboard::Prompt;
use crate::bot::{AppContext, HandlerResult};

pub struct BotHandler {
    pub ctx: AppContext,
}

impl BotHandler {
    pub fn new(ctx: AppContext) -> Self {
        Self { ctx }
    }

    /// Handler tree for the long-polling dispatcher.
    pub fn schema(&self) -> UpdateHandler<anyhow::Error> {
        let ctx = self.ctx.clone();
        let ctx_callback = self.ctx.clone();

        dptree::entry()
            .branch(Update::filter_message().endpoint(move |bot: Bot, msg: Message| {
                let ctx = ctx.clone();
                async move { message::message_handler(bot, msg, ctx).await }
            }))
            .branch(
                Update::filter_callback_query().endpoint(move |bot: Bot, q: CallbackQuery| {
                    let ctx = ctx_callback.clone();
                    async move { callback::callback_handler(bot, q, ctx).await }
                }),
            )
    }
}

/// Routes a raw update the same way the polling schema does.
pub async fn dispatch_update(bot: Bot, ctx: AppContext, update: Update) -> HandlerResult {
    match update.kind {
        UpdateKind::Message(msg) => message::message_handler(bot, msg, ctx).await,
        UpdateKind::CallbackQuery(q) => callback::callback_handler(bot, q, ctx).await,
        _ => {
            tracing::debug!("Ignoring update {:?} of unsupported kind", update.id);
            Ok(())
        }
    }
}

pub(crate) async fn send_prompt(bot: &Bot, chat_id: ChatId, prompt: &Prompt) -> HandlerResult {
    let mut request = bot.send_message(chat_id, prompt.text.clone());
    if let Some(markup) = prompt.markup() {
        request = request.reply_markup(markup);
    }
    request.await?;
    Ok(())
}

pub(crate) async fn edit_prompt(
    bot: &Bot,
    chat_id: ChatId,
    message_id: MessageId,
    prompt: &Prompt,
) -> HandlerResult {
    let mut request = bot.edit_message_text(chat_id, message_id, prompt.text.clone());
    if let Some(markup) = prompt.markup() {
        request = request.reply_markup(markup);
    }
    match request.await {
        Ok(_) => Ok(()),
        Err(RequestError::Api(ApiError::MessageNotModified)) => {
            tracing::debug!("Message {} in chat {} already current", message_id.0, chat_id);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
