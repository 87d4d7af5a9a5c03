//! Operator commands, parsed with teloxide's BotCommands.

use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Operator commands:")]
pub enum Command {
    #[command(description = "start a broadcast session and pick groups.")]
    Start,
    #[command(description = "prepare to send content to the selected groups.")]
    Broadcast,
    #[command(description = "discard the current selection and content.")]
    Cancel,
    #[command(description = "show this help.")]
    Help,
}

impl Command {
    /// Parses `/cmd` or `/cmd@bot_username`.
    pub fn parse_text(text: &str, bot_username: &str) -> Option<Self> {
        Self::parse(text, bot_username).ok()
    }

    pub fn help_text() -> String {
        Self::descriptions().to_string()
    }
}
