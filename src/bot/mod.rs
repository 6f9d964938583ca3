/// Slash commands understood by the bot
pub mod commands;
/// Shared handler context and session storage
pub mod context;
/// Booking dialogue state machine
pub mod dialogue;
/// Update handlers for messages and button presses
pub mod handlers;
/// Inline keyboards and callback payloads
pub mod keyboard;
/// Webhook endpoint and registration
pub mod webhook;

pub type HandlerResult = anyhow::Result<()>;

pub use commands::Command;
pub use context::AppContext;
pub use dialogue::{DialogueEngine, DialogueState};
