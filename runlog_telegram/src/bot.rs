use crate::{Command, Conversations, Result, Tracker};
use runlog_extract::Pipeline;
use runlog_providers::TesseractRecognizer;
use std::{path::PathBuf, sync::Arc, time::Duration};
use teloxide::prelude::*;
use tokio::time::sleep;
use tracing::{info, warn};

/// Telegram bot wired to the workout log.
#[derive(Clone)]
pub struct TelegramBot {
    /// Teloxide bot instance
    pub bot: Bot,
    pub(crate) tracker: Arc<Tracker>,
    pub(crate) pipeline: Arc<Pipeline<TesseractRecognizer>>,
    pub(crate) conversations: Conversations,
    /// Downloaded photos live here until recognized.
    pub(crate) images_dir: PathBuf,
}

impl TelegramBot {
    #[must_use]
    pub fn new(
        token: String,
        tracker: Tracker,
        pipeline: Pipeline<TesseractRecognizer>,
        images_dir: PathBuf,
    ) -> Self {
        Self {
            bot: Bot::new(token),
            tracker: Arc::new(tracker),
            pipeline: Arc::new(pipeline),
            conversations: Conversations::new(),
            images_dir,
        }
    }

    /// Run `f` against the tracker on the blocking pool; store calls hold a
    /// lock across synchronous file writes.
    pub(crate) async fn with_tracker<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Tracker) -> T + Send + 'static,
        T: Send + 'static,
    {
        let tracker = Arc::clone(&self.tracker);
        Ok(tokio::task::spawn_blocking(move || f(&tracker)).await?)
    }

    /// Test connection to Telegram API, retrying with a linearly growing
    /// delay capped at 10s until it succeeds.
    async fn test_connection(&self) -> Result<()> {
        const INITIAL_DELAY_SECS: u64 = 2;
        const MAX_DELAY_SECS: u64 = 10;

        let mut attempt = 1u64;
        loop {
            match self.bot.get_me().await {
                Ok(me) => {
                    info!(
                        "Connected to Telegram API: @{} (id: {})",
                        me.user
                            .username
                            .clone()
                            .unwrap_or_else(|| "no username".to_string()),
                        me.user.id
                    );
                    return Ok(());
                }
                Err(e) => {
                    let delay_secs = (INITIAL_DELAY_SECS * attempt).min(MAX_DELAY_SECS);

                    warn!("Connection attempt {attempt} failed: {e}. Retrying in {delay_secs}s...");

                    if attempt == 1 {
                        warn!("This may be due to:");
                        warn!("  - Network connectivity issues");
                        warn!("  - Firewall blocking api.telegram.org");
                        warn!("  - Invalid bot token");
                    }

                    sleep(Duration::from_secs(delay_secs)).await;
                    attempt += 1;
                }
            }
        }
    }

    /// Run the bot until Ctrl+C.
    pub async fn run(self) -> Result<()> {
        use teloxide::dispatching::{Dispatcher, UpdateFilterExt};
        use teloxide::dptree;
        use teloxide::types::Update;

        self.test_connection().await?;
        tokio::fs::create_dir_all(&self.images_dir).await?;

        if let Err(e) = self.bot.set_my_commands(Command::bot_commands()).await {
            warn!("Failed to register command list: {e}");
        }

        let bot = self.bot.clone();

        let schema = dptree::entry().branch(Update::filter_message().endpoint({
            let bot_clone = self.clone();
            move |_bot: Bot, msg: Message| {
                let bot_clone = bot_clone.clone();
                async move { crate::handler::handle_message(bot_clone, msg).await }
            }
        }));

        Dispatcher::builder(bot, schema)
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;

        Ok(())
    }
}
