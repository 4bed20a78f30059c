use crate::command::CommandStrategy;
use runlog_config::Config;
use runlog_extract::Pipeline;
use runlog_providers::TesseractRecognizer;
use runlog_telegram::{TelegramBot, Tracker};
use tracing::{info, warn};

/// Input for Telegram bot command.
pub struct TelegramInput {
    /// Optional bot token (overrides config)
    pub token: Option<String>,
}

/// Strategy for running Telegram bot.
pub struct TelegramStrategy;

impl CommandStrategy for TelegramStrategy {
    type Input = TelegramInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;

        let token = if let Some(t) = input.token {
            t
        } else if !config.telegram.token.is_empty() {
            config.telegram.token.clone()
        } else {
            anyhow::bail!("Telegram bot token not configured. Set \"telegram.token\" in config");
        };

        if config.telegram.password.is_empty() {
            warn!("telegram.password is empty; nobody will be able to register");
        }

        info!("Starting Telegram bot...");

        let tracker = Tracker::open(
            config.storage.workouts_path()?,
            config.storage.users_path()?,
            config.telegram.password.clone(),
        )?;
        let pipeline = Pipeline::new(TesseractRecognizer::new(&config.ocr), &config.extraction);
        let images_dir = config.storage.images_dir()?;

        let bot = TelegramBot::new(token, tracker, pipeline, images_dir);

        info!("Telegram bot is running. Press Ctrl+C to stop.");
        bot.run().await?;

        Ok(())
    }
}
