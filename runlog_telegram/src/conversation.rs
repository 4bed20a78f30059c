//! Per-(chat, user) state for multi-step commands.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// `(chat id, user id)`: the same user may be mid-command in several chats.
pub type ConversationKey = (i64, i64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConversationState {
    /// `/start` asked for the shared password.
    AwaitingPassword,
    /// Password accepted, next text is the display name.
    AwaitingName,
    AwaitingDeleteDate,
    /// `/getdistance` asked WEEK or MONTH.
    AwaitingPeriod,
    AwaitingWeekRange,
    AwaitingMonth,
}

impl ConversationState {
    /// States reachable only by registered users.
    #[must_use]
    pub const fn requires_authorization(self) -> bool {
        !matches!(self, Self::AwaitingPassword | Self::AwaitingName)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Period {
    Week,
    Month,
}

impl Period {
    /// `WEEK` or `MONTH`, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.eq_ignore_ascii_case("week") {
            Some(Self::Week)
        } else if input.eq_ignore_ascii_case("month") {
            Some(Self::Month)
        } else {
            None
        }
    }

    #[must_use]
    pub const fn next_state(self) -> ConversationState {
        match self {
            Self::Week => ConversationState::AwaitingWeekRange,
            Self::Month => ConversationState::AwaitingMonth,
        }
    }
}

/// Shared conversation table; cloning shares the same table.
#[derive(Clone, Debug, Default)]
pub struct Conversations {
    states: Arc<Mutex<HashMap<ConversationKey, ConversationState>>>,
}

impl Conversations {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, key: ConversationKey) -> Option<ConversationState> {
        self.states.lock().await.get(&key).copied()
    }

    pub async fn set(&self, key: ConversationKey, state: ConversationState) {
        debug!("Conversation {key:?} -> {state:?}");
        self.states.lock().await.insert(key, state);
    }

    /// Returns the state that was active, if any.
    pub async fn clear(&self, key: ConversationKey) -> Option<ConversationState> {
        let previous = self.states.lock().await.remove(&key);
        if previous.is_some() {
            debug!("Conversation {key:?} ended");
        }
        previous
    }
}
