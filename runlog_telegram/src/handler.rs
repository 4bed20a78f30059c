use crate::report;
use crate::{
    Command, ConversationKey, ConversationState, PasswordCheck, Period, Result, TelegramBot,
};
use chrono::Local;
use runlog_core::{DateRange, UserId, YearMonth, parse_date};
use runlog_extract::ExtractError;
use std::path::Path;
use teloxide::net::Download;
use teloxide::requests::Requester;
use teloxide::types::{ChatAction, FileId, Message};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

/// Numeric id of a human sender; bots and unusable ids yield `None`.
fn sender_id(msg: &Message) -> Option<UserId> {
    let user = msg.from.as_ref()?;
    if user.is_bot {
        return None;
    }
    UserId::try_from(user.id.0).ok().filter(|id| *id != 0)
}

fn username(msg: &Message) -> &str {
    msg.from
        .as_ref()
        .and_then(|u| u.username.as_deref())
        .unwrap_or("unknown")
}

async fn reply(bot: &TelegramBot, msg: &Message, text: impl Into<String>) -> Result<()> {
    bot.bot.send_message(msg.chat.id, text).await?;
    Ok(())
}

/// Handle bot commands
pub async fn handle_command(
    bot: &TelegramBot,
    msg: &Message,
    user_id: UserId,
    cmd: Command,
) -> Result<()> {
    let group_id = msg.chat.id.0;
    let key: ConversationKey = (group_id, user_id);
    info!("[@{}] Command: {cmd:?}", username(msg));

    if cmd != Command::Help {
        bot.conversations.clear(key).await;
    }

    let authorized = bot
        .with_tracker(move |t| t.is_authorized(user_id))
        .await?;
    if !cmd.is_public() && !authorized {
        warn!("Unauthorized user {user_id} tried {cmd:?}");
        return reply(bot, msg, report::NOT_AUTHORIZED).await;
    }

    match cmd {
        Command::Start => {
            if authorized {
                let name = bot
                    .with_tracker(move |t| t.display_name(user_id))
                    .await?;
                return reply(bot, msg, report::already_registered(&name)).await;
            }
            bot.conversations
                .set(key, ConversationState::AwaitingPassword)
                .await;
            reply(bot, msg, report::ASK_PASSWORD).await
        }
        Command::Cancel => reply(bot, msg, report::CANCELLED).await,
        Command::Help => reply(bot, msg, report::help()).await,
        Command::HistoryUser => {
            let text = bot
                .with_tracker(move |t| t.user_history(group_id, user_id))
                .await?;
            reply(bot, msg, text).await
        }
        Command::HistoryAll => {
            let text = bot.with_tracker(move |t| t.group_history(group_id)).await?;
            reply(bot, msg, text).await
        }
        Command::GetDistance => {
            bot.conversations
                .set(key, ConversationState::AwaitingPeriod)
                .await;
            reply(bot, msg, report::ASK_PERIOD).await
        }
        Command::Delete => {
            bot.conversations
                .set(key, ConversationState::AwaitingDeleteDate)
                .await;
            reply(bot, msg, report::ASK_DELETE_DATE).await
        }
    }
}

/// `/start` flow: password, then display name.
async fn handle_registration(
    bot: &TelegramBot,
    msg: &Message,
    key: ConversationKey,
    state: ConversationState,
    text: &str,
) -> Result<()> {
    let user_id = key.1;
    match state {
        ConversationState::AwaitingPassword => match bot.tracker.check_password(text) {
            PasswordCheck::Accepted => {
                bot.conversations
                    .set(key, ConversationState::AwaitingName)
                    .await;
                reply(bot, msg, report::PASSWORD_ACCEPTED).await
            }
            PasswordCheck::Rejected => {
                debug!("Invalid password from user {user_id}");
                reply(bot, msg, report::PASSWORD_REJECTED).await
            }
            PasswordCheck::Disabled => {
                warn!("Registration attempted but no password is configured");
                bot.conversations.clear(key).await;
                reply(bot, msg, report::REGISTRATION_CLOSED).await
            }
        },
        _ => {
            let name = text.trim().to_string();
            if name.is_empty() {
                return reply(bot, msg, report::EMPTY_NAME).await;
            }
            bot.conversations.clear(key).await;
            let text = bot
                .with_tracker(move |t| t.register(user_id, &name))
                .await?;
            reply(bot, msg, text).await
        }
    }
}

/// Plain text continues whichever multi-step command is in progress.
async fn handle_conversation(
    bot: &TelegramBot,
    msg: &Message,
    user_id: UserId,
    text: &str,
) -> Result<()> {
    let group_id = msg.chat.id.0;
    let key: ConversationKey = (group_id, user_id);

    let Some(state) = bot.conversations.get(key).await else {
        debug!("[@{}] Ignoring text outside a conversation", username(msg));
        return Ok(());
    };

    if state.requires_authorization()
        && !bot
            .with_tracker(move |t| t.is_authorized(user_id))
            .await?
    {
        bot.conversations.clear(key).await;
        return reply(bot, msg, report::NOT_AUTHORIZED).await;
    }

    match state {
        ConversationState::AwaitingPassword | ConversationState::AwaitingName => {
            handle_registration(bot, msg, key, state, text).await
        }
        ConversationState::AwaitingDeleteDate => match parse_date(text.trim()) {
            Ok(date) => {
                bot.conversations.clear(key).await;
                let text = bot
                    .with_tracker(move |t| t.delete(group_id, user_id, date))
                    .await?;
                reply(bot, msg, text).await
            }
            Err(e) => {
                warn!("Date is not in the right form: {e}");
                reply(bot, msg, report::INVALID_DATE).await
            }
        },
        ConversationState::AwaitingPeriod => match Period::parse(text) {
            Some(period) => {
                bot.conversations.set(key, period.next_state()).await;
                let prompt = match period {
                    Period::Week => report::ASK_WEEK_RANGE,
                    Period::Month => report::ASK_MONTH,
                };
                reply(bot, msg, prompt).await
            }
            None => reply(bot, msg, report::INVALID_PERIOD).await,
        },
        ConversationState::AwaitingWeekRange => match DateRange::parse(text) {
            Ok(range) => {
                bot.conversations.clear(key).await;
                let text = bot
                    .with_tracker(move |t| t.range_totals(group_id, range))
                    .await?;
                reply(bot, msg, text).await
            }
            Err(e) => {
                warn!("Invalid date range: {e}");
                reply(bot, msg, report::INVALID_RANGE).await
            }
        },
        ConversationState::AwaitingMonth => match YearMonth::parse(text) {
            Ok(month) => {
                bot.conversations.clear(key).await;
                let text = bot
                    .with_tracker(move |t| t.month_totals(group_id, month))
                    .await?;
                reply(bot, msg, text).await
            }
            Err(e) => {
                warn!("Invalid month: {e}");
                reply(bot, msg, report::INVALID_MONTH).await
            }
        },
    }
}

async fn download_photo(bot: &TelegramBot, file_id: &FileId, dest: &Path) -> Result<()> {
    let file = bot.bot.get_file(file_id.clone()).await?;
    debug!("File download path: {}", file.path);

    tokio::fs::create_dir_all(&bot.images_dir).await?;
    let mut dst = tokio::fs::File::create(dest).await?;
    bot.bot.download_file(&file.path, &mut dst).await?;
    dst.flush().await?;
    Ok(())
}

/// Photo → download → recognize → extract → insert with today's date.
async fn handle_photo(bot: &TelegramBot, msg: &Message, user_id: UserId) -> Result<()> {
    let group_id = msg.chat.id.0;

    if !bot
        .with_tracker(move |t| t.is_authorized(user_id))
        .await?
    {
        warn!("Unauthorized user {user_id} sent a photo");
        return reply(bot, msg, report::NOT_AUTHORIZED).await;
    }

    // Largest size comes last.
    let Some(photo) = msg.photo().and_then(|sizes| sizes.last()) else {
        return reply(bot, msg, report::IMAGE_FAILED).await;
    };
    info!("[@{}] Photo received", username(msg));

    bot.bot
        .send_chat_action(msg.chat.id, ChatAction::Typing)
        .await?;

    let image_path = bot
        .images_dir
        .join(format!("{group_id}_{}_{}.jpg", user_id, msg.id.0));
    if let Err(e) = download_photo(bot, &photo.file.id, &image_path).await {
        warn!("Error downloading image file: {e}");
        return reply(bot, msg, report::IMAGE_FAILED).await;
    }

    let today = Local::now().date_naive();
    let result = bot.pipeline.process_image(&image_path, today).await;
    if let Err(e) = tokio::fs::remove_file(&image_path).await {
        warn!("Failed to remove {}: {e}", image_path.display());
    }

    let text = match result {
        Ok(details) => {
            bot.with_tracker(move |t| t.log_workout(group_id, user_id, &details))
                .await?
        }
        Err(ExtractError::Recognize(e)) => {
            warn!("Error processing image: {e}");
            report::IMAGE_FAILED.to_string()
        }
        Err(e) => {
            warn!("Error extracting workout details: {e}");
            report::EXTRACTION_FAILED.to_string()
        }
    };
    reply(bot, msg, text).await
}

/// Handle any message (commands, conversation replies, or photos)
pub async fn handle_message(bot: TelegramBot, msg: Message) -> Result<()> {
    let Some(user_id) = sender_id(&msg) else {
        warn!("Ignoring message from a bot or a sender without a usable id");
        return Ok(());
    };

    if msg.photo().is_some() {
        return handle_photo(&bot, &msg, user_id).await;
    }

    let Some(text) = msg.text() else {
        return Ok(());
    };

    if let Some(cmd) = Command::parse_from_text(text) {
        return handle_command(&bot, &msg, user_id, cmd).await;
    }

    handle_conversation(&bot, &msg, user_id, text).await
}
