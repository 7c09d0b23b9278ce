use anyhow::{Context, Result};
use dotenv;
use env_logger;
use log::info;
use std::env;
use std::sync::Arc;
use teloxide::dispatching::dialogue::InMemStorage;
use teloxide::prelude::*;

use codetutor::bot::message_handler;
use codetutor::config::Settings;
use codetutor::dialogue::MenuState;
use codetutor::knowledge::{default_knowledge_base, default_menu_index};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    info!("Starting Codetutor Telegram Bot");

    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Get bot token from environment
    let bot_token =
        env::var("TELEGRAM_BOT_TOKEN").context("TELEGRAM_BOT_TOKEN must be set")?;

    // Build the knowledge taxonomies; a malformed dataset aborts startup
    let kb = Arc::new(default_knowledge_base()?);
    let index = Arc::new(default_menu_index()?);
    let settings = Arc::new(Settings::from_env());

    // Initialize the bot
    let bot = Bot::new(bot_token);

    info!("Bot initialized, starting dispatcher");

    let handler = Update::filter_message()
        .enter_dialogue::<Message, InMemStorage<MenuState>, MenuState>()
        .endpoint(message_handler);

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![
            InMemStorage::<MenuState>::new(),
            kb,
            index,
            settings
        ])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
