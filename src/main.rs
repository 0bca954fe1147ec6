use teloxide::{prelude::*, utils::command::BotCommands};
use std::env;
use std::time::Duration;
use tokio::time;

mod access;
mod bot_state;
mod brewery;
mod database;
mod dialogs;
mod handlers;
mod host;
mod models;
mod timezones;

use crate::bot_state::BotState;
use crate::brewery::BreweryClient;
use crate::database::Database;
use crate::handlers::{command_handler, message_handler};

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "The following commands are available:")]
enum Command {
    #[command(description = "start working with the bot")]
    Start,
    #[command(description = "get this message")]
    Help,
    #[command(description = "print time and timezone on device")]
    Time,
    #[command(description = "check temps status")]
    Status,
    #[command(rename = "toggle_kettle_1", description = "toggle starting the first PID")]
    ToggleKettle1,
    #[command(rename = "set_kettle_1", description = "set target temp on kettle 1")]
    SetKettle1,
    #[command(description = "set the timezone (only works if sudo requires no password)")]
    Timezone,
    #[command(description = "cancel the active dialog")]
    Cancel,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenvy::dotenv().ok();
    env_logger::init();
    log::info!("Starting brewery control bot...");

    wait_for_internet().await;

    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let db = Database::new(&database_url).await?;
    db.init().await?;
    log::info!("✅ Database initialized");

    let brewery_url = env::var("BREWERY_API_URL").expect("BREWERY_API_URL must be set");
    let state = BotState::new(db, BreweryClient::new(brewery_url));

    let bot = Bot::from_env();

    let handler = dptree::entry()
        .branch(
            Update::filter_message()
                .filter_command::<Command>()
                .endpoint(command_handler),
        )
        .branch(Update::filter_message().endpoint(message_handler));

    log::info!("🚀 Starting dispatcher...");

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}

/// Block until the Telegram API answers; on a brewing rig the bot often
/// boots before the network is up.
async fn wait_for_internet() {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(1))
        .build()
        .expect("HTTP client");

    while client.get("https://api.telegram.org").send().await.is_err() {
        log::info!("Waiting for internet");
        time::sleep(Duration::from_secs(1)).await;
    }
}
