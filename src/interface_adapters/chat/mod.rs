// Chat adapter: command recognition plus the Twitch IRC listener feeding the throw queue.

pub mod command;
pub mod twitch;

pub use twitch::{ChatSettings, chat_task};
