use std::sync::Arc;

use anyhow::Result;
use dotenvy::dotenv;
use teloxide::Bot;
use tracing::info;

mod config;
mod delivery;
mod dispatch;
mod event;
mod generation;
mod handlers;
mod state;
mod transport;
mod utils;

#[cfg(test)]
mod testing;

use config::Config;
use delivery::{DeliveryClient, TelegramDelivery};
use generation::{GenerationClient, StableDiffusionClient};
use state::AppState;
use utils::logging::init_logging;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let config = Config::from_env()?;
    let _guards = init_logging(&config.log_level);

    info!(mode = ?config.transport_mode, "Starting TelegramImageBot");

    let bot = Bot::new(config.bot_token.clone());
    let delivery: Arc<dyn DeliveryClient> = Arc::new(TelegramDelivery::new(bot.clone()));
    let generation: Arc<dyn GenerationClient> = Arc::new(StableDiffusionClient::new(
        config.image_api_url.clone(),
        config.image_api_token.clone(),
    ));
    let state = AppState::new(config, delivery, generation);

    transport::run(bot, state).await
}
