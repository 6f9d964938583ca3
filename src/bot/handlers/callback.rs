use teloxide::prelude::*;

use crate::bot::dialogue::{Client, Input, Reply};
use crate::bot::handlers::edit_prompt;
use crate::bot::{AppContext, HandlerResult};
use crate::i18n::{text, Language, Text};

pub async fn callback_handler(bot: Bot, q: CallbackQuery, ctx: AppContext) -> HandlerResult {
    let client = Client::from(&q.from);
    let data = q.data.clone().unwrap_or_default();

    let Some(message) = q.message.as_ref() else {
        // Inline-mode buttons carry no chat; nothing to edit.
        bot.answer_callback_query(q.id.clone()).await?;
        return Ok(());
    };
    let chat_id = message.chat.id;

    tracing::info!(
        "Callback received: '{}' from user {} ({}) in chat {}",
        data,
        client.username.as_deref().unwrap_or("unknown"),
        client.user_id,
        chat_id
    );

    let step = match ctx.advance(chat_id, &client, Input::Selection(data)).await {
        Ok(step) => step,
        Err(e) => {
            tracing::error!("Failed to handle callback in chat {}: {:#}", chat_id, e);
            bot.answer_callback_query(q.id.clone())
                .text(text(Language::default(), Text::Failure))
                .show_alert(true)
                .await?;
            return Ok(());
        }
    };

    match step.reply {
        Reply::Show(prompt) => {
            bot.answer_callback_query(q.id.clone()).await?;
            edit_prompt(&bot, chat_id, message.id, &prompt).await?;
        }
        Reply::Alert { text, refresh } => {
            bot.answer_callback_query(q.id.clone())
                .text(text)
                .show_alert(true)
                .await?;
            if let Some(prompt) = refresh {
                edit_prompt(&bot, chat_id, message.id, &prompt).await?;
            }
        }
        Reply::Silent => {
            bot.answer_callback_query(q.id.clone()).await?;
        }
    }

    Ok(())
}
