use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use std::error::Error;

use crate::access::{guarded, OPERATORS};
use crate::bot_state::BotState;
use crate::dialogs::{Flow, CANCEL_ACK, KETTLE_1};
use crate::handlers::messages::{continue_dialog, enter_dialog};
use crate::handlers::utils::{kettle_lines, status_text, REMOTE_FAILURE};
use crate::host;
use crate::models::Role;

use crate::Command;

pub async fn command_handler(
    bot: Bot,
    msg: Message,
    cmd: Command,
    state: BotState,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    // An in-flight dialog owns the conversation, command text included; only
    // /cancel and the two dialog entry points cut through it.
    if let Some(user) = msg.from.as_ref() {
        if state.dialogs().is_active(user.id).await
            && !matches!(cmd, Command::Cancel | Command::Timezone | Command::SetKettle1)
        {
            if let Some(text) = msg.text() {
                return continue_dialog(&bot, &msg, &state, user.id, text).await;
            }
        }
    }

    match cmd {
        Command::Start => handle_start(&bot, &msg, &state).await?,
        Command::Help => handle_help(&bot, &msg).await?,
        Command::Time => {
            guarded(&bot, &msg, &state, OPERATORS, || handle_time(&bot, &msg)).await?
        }
        Command::Status => {
            guarded(&bot, &msg, &state, OPERATORS, || {
                handle_status(&bot, &msg, &state)
            })
            .await?
        }
        Command::ToggleKettle1 => {
            guarded(&bot, &msg, &state, OPERATORS, || {
                handle_toggle_kettle(&bot, &msg, &state, KETTLE_1)
            })
            .await?
        }
        Command::SetKettle1 => {
            guarded(&bot, &msg, &state, OPERATORS, || {
                enter_dialog(&bot, &msg, &state, Flow::SetKettleTemp)
            })
            .await?
        }
        Command::Timezone => {
            guarded(&bot, &msg, &state, OPERATORS, || {
                enter_dialog(&bot, &msg, &state, Flow::SetTimezone)
            })
            .await?
        }
        Command::Cancel => handle_cancel(&bot, &msg, &state).await?,
    }
    Ok(())
}

async fn handle_start(
    bot: &Bot,
    msg: &Message,
    state: &BotState,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    if let Some(user) = msg.from.as_ref() {
        if !state.db().has_user(user.id).await? {
            state
                .db()
                .insert_user(user.id, &user.full_name(), Role::Guest)
                .await?;
            log::info!("Registered new guest {} ({})", user.id, user.full_name());
        }
    }

    bot.send_message(
        msg.chat.id,
        format!(
            "I'm a bot to remote control your brewery, please type /help for info.\n\
             Please add yourself as an admin in the web interface to control the bot at: {}",
            state.brewery().base_url()
        ),
    )
    .await?;

    Ok(())
}

async fn handle_help(bot: &Bot, msg: &Message) -> Result<(), Box<dyn Error + Send + Sync>> {
    bot.send_message(msg.chat.id, format!("ℹ️ {}", Command::descriptions()))
        .await?;
    Ok(())
}

async fn handle_time(bot: &Bot, msg: &Message) -> Result<(), Box<dyn Error + Send + Sync>> {
    let output = host::run_date().await?;
    let reply = if output.trim().is_empty() {
        "(no output from date)".to_string()
    } else {
        output
    };

    bot.send_message(msg.chat.id, reply).await?;
    Ok(())
}

async fn handle_status(
    bot: &Bot,
    msg: &Message,
    state: &BotState,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let kettles = state.brewery().kettle_states().await;
    let readings = state.brewery().thermometer_readings().await;

    match (kettles, readings) {
        (Ok(kettles), Ok(readings)) => {
            bot.send_message(msg.chat.id, status_text(&kettles, &readings))
                .await?;
        }
        (Err(e), _) | (_, Err(e)) => {
            log::error!("❌ Status query against the brewery failed: {}", e);
            bot.send_message(msg.chat.id, REMOTE_FAILURE).await?;
        }
    }
    Ok(())
}

async fn handle_toggle_kettle(
    bot: &Bot,
    msg: &Message,
    state: &BotState,
    kettle: u8,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    if let Err(e) = state.brewery().toggle_automatic(kettle).await {
        log::error!("❌ Toggling kettle {} failed: {}", kettle, e);
        bot.send_message(msg.chat.id, REMOTE_FAILURE).await?;
        return Ok(());
    }

    let reply = match state.brewery().kettle_states().await {
        Ok(kettles) => format!("Kettle states:\n{}", kettle_lines(&kettles)),
        Err(e) => {
            log::error!("❌ Kettle state fetch after toggle failed: {}", e);
            format!("Kettle {} automatic mode toggled", kettle)
        }
    };

    bot.send_message(msg.chat.id, reply).await?;
    Ok(())
}

async fn handle_cancel(
    bot: &Bot,
    msg: &Message,
    state: &BotState,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };

    // Silent when there is nothing to cancel.
    if state.dialogs().cancel(user.id).await {
        bot.send_message(msg.chat.id, CANCEL_ACK).await?;
    }
    Ok(())
}
