use teloxide::types::BotCommand;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Start,
    HistoryUser,
    HistoryAll,
    GetDistance,
    Delete,
    Cancel,
    Help,
}

impl Command {
    const ALL: [(Self, &'static str, &'static str); 7] = [
        (Self::Start, "start", "Start the bot"),
        (Self::HistoryUser, "historyuser", "Get your workout history"),
        (
            Self::HistoryAll,
            "historyall",
            "Get all workout history for the group",
        ),
        (
            Self::GetDistance,
            "getdistance",
            "Get total distance for a week range or month",
        ),
        (Self::Delete, "delete", "Delete a workout entry"),
        (Self::Cancel, "cancel", "Cancel the current operation"),
        (Self::Help, "help", "Show this help message"),
    ];

    #[must_use]
    pub fn bot_commands() -> Vec<BotCommand> {
        Self::ALL
            .iter()
            .map(|(_, name, description)| BotCommand::new(*name, *description))
            .collect()
    }

    /// Case-insensitive; a `@botname` suffix and trailing arguments are ignored.
    #[must_use]
    pub fn parse_from_text(text: &str) -> Option<Self> {
        let word = text.split_whitespace().next()?.strip_prefix('/')?;
        let name = word.split('@').next().unwrap_or(word).to_lowercase();

        Self::ALL
            .iter()
            .find(|(_, command, _)| *command == name)
            .map(|(cmd, _, _)| *cmd)
    }

    /// Commands usable before registration.
    #[must_use]
    pub const fn is_public(self) -> bool {
        matches!(self, Self::Start | Self::Cancel | Self::Help)
    }

    #[must_use]
    pub fn help_text() -> String {
        let commands: String = Self::ALL
            .iter()
            .map(|(_, name, description)| format!("/{name} - {description}\n"))
            .collect();
        format!("Commands:\n{commands}Send a workout image to log the details")
    }
}
