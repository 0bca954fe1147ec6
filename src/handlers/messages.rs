use teloxide::prelude::*;
use teloxide::types::UserId;
use std::error::Error;

use crate::bot_state::BotState;
use crate::dialogs::{Flow, Turn};
use crate::handlers::utils::{choice_keyboard, kettle_lines, REMOTE_FAILURE};
use crate::host;

pub async fn message_handler(
    bot: Bot,
    msg: Message,
    state: BotState,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    if let (Some(text), Some(user)) = (msg.text(), msg.from.as_ref()) {
        // A live dialog consumes whatever the user sends, unknown commands
        // included. Everything else gets no reply.
        if state.dialogs().is_active(user.id).await {
            return continue_dialog(&bot, &msg, &state, user.id, text).await;
        }
    }
    Ok(())
}

/// Start a flow for the sender, superseding any dialog already in flight.
pub async fn enter_dialog(
    bot: &Bot,
    msg: &Message,
    state: &BotState,
    flow: Flow,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };

    let turn = state.dialogs().begin(user.id, flow).await;
    run_turn(bot, msg, state, turn).await
}

/// Feed one message into the sender's active flow.
pub async fn continue_dialog(
    bot: &Bot,
    msg: &Message,
    state: &BotState,
    user: UserId,
    text: &str,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    match state.dialogs().advance(user, text).await {
        Some(turn) => run_turn(bot, msg, state, turn).await,
        None => Ok(()),
    }
}

async fn run_turn(
    bot: &Bot,
    msg: &Message,
    state: &BotState,
    turn: Turn,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    match turn {
        Turn::Prompt { text, choices } => {
            if choices.is_empty() {
                bot.send_message(msg.chat.id, text).await?;
            } else {
                bot.send_message(msg.chat.id, text)
                    .reply_markup(choice_keyboard(&choices))
                    .await?;
            }
        }
        Turn::End { text } => {
            bot.send_message(msg.chat.id, text).await?;
        }
        Turn::ApplyTimezone { zone } => {
            host::set_timezone(&zone).await?;
            bot.send_message(msg.chat.id, format!("🕓 Timezone set to: {}", zone))
                .await?;
        }
        Turn::ApplyKettleTemp { kettle, temp } => {
            if let Err(e) = state.brewery().set_target_temp(kettle, temp).await {
                log::error!("❌ Setting kettle {} target temp failed: {}", kettle, e);
                bot.send_message(msg.chat.id, REMOTE_FAILURE).await?;
                return Ok(());
            }

            let reply = match state.brewery().kettle_states().await {
                Ok(kettles) => format!("Kettle temp set\n{}", kettle_lines(&kettles)),
                Err(e) => {
                    log::error!("❌ Kettle state fetch after temp change failed: {}", e);
                    "Kettle temp set".to_string()
                }
            };
            bot.send_message(msg.chat.id, reply).await?;
        }
    }
    Ok(())
}
