use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Appointment bot commands:")]
pub enum Command {
    #[command(description = "Book an appointment")]
    Start,
    #[command(description = "Abort the current booking")]
    Cancel,
    #[command(description = "Display this help message")]
    Help,
}
