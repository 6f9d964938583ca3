use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

use crate::bot::dialogue::{Client, Input, Reply};
use crate::bot::handlers::send_prompt;
use crate::bot::{AppContext, Command, HandlerResult};
use crate::i18n;

pub async fn message_handler(bot: Bot, msg: Message, ctx: AppContext) -> HandlerResult {
    let (Some(text), Some(user)) = (msg.text(), msg.from()) else {
        return Ok(());
    };
    let client = Client::from(user);
    let chat_id = msg.chat.id;

    let input = match Command::parse(text, ctx.bot_username()) {
        Ok(Command::Start) => Input::Start,
        Ok(Command::Cancel) => Input::Cancel,
        Ok(Command::Help) => {
            bot.send_message(chat_id, format!("{}\n\n{}", i18n::help(), Command::descriptions()))
                .await?;
            return Ok(());
        }
        Err(_) => Input::Text(text.to_string()),
    };

    tracing::info!(
        "Message {:?} from user {} ({}) in chat {}",
        input,
        client.username.as_deref().unwrap_or("unknown"),
        client.user_id,
        chat_id
    );

    let step = ctx.advance(chat_id, &client, input).await?;

    match step.reply {
        Reply::Show(prompt) => send_prompt(&bot, chat_id, &prompt).await?,
        Reply::Alert { text, refresh } => {
            bot.send_message(chat_id, text).await?;
            if let Some(prompt) = refresh {
                send_prompt(&bot, chat_id, &prompt).await?;
            }
        }
        Reply::Silent => {}
    }

    Ok(())
}
