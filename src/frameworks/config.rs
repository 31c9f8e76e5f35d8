use crate::interface_adapters::chat::ChatSettings;
use std::{env, path::PathBuf, time::Duration};

// Runtime/server constants (not gameplay tuning).

pub fn overlay_port() -> u16 {
    env::var("OVERLAY_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3010)
}

pub fn assets_dir() -> PathBuf {
    env::var("ASSETS_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("assets"))
}

pub fn chat_enabled() -> bool {
    env::var("CHAT_ENABLED")
        .ok()
        .and_then(|v| parse_flag(&v))
        .unwrap_or(true)
}

/// Twitch connection settings; `None` when chat is switched off.
pub fn chat_settings() -> Option<ChatSettings> {
    if !chat_enabled() {
        return None;
    }

    Some(ChatSettings {
        irc_url: env::var("TWITCH_IRC_URL")
            .unwrap_or_else(|_| "wss://irc-ws.chat.twitch.tv:443".to_string()),
        channel: env::var("TWITCH_CHANNEL").unwrap_or_else(|_| "kanekolumi".to_string()),
        // Anonymous read-only login.
        username: env::var("TWITCH_USERNAME").unwrap_or_else(|_| "justinfan12345".to_string()),
        password: env::var("TWITCH_PASSWORD").unwrap_or_else(|_| "oauth:1234567890".to_string()),
        reconnect_delay: chat_reconnect_delay(),
    })
}

fn chat_reconnect_delay() -> Option<Duration> {
    let millis = env::var("CHAT_RECONNECT_DELAY_MS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(5000);
    // 0 turns a disconnect into a terminal event.
    (millis > 0).then(|| Duration::from_millis(millis))
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

pub const THROW_QUEUE_CAPACITY: usize = 100;
pub const RENDER_BROADCAST_CAPACITY: usize = 128;
pub const CUE_BROADCAST_CAPACITY: usize = 16;

pub const TICK_INTERVAL: Duration = Duration::from_millis(1000 / 60);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_flag_is_recognized_then_it_parses() {
        assert_eq!(parse_flag("true"), Some(true));
        assert_eq!(parse_flag(" ON "), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("False"), Some(false));
    }

    #[test]
    fn when_flag_is_garbage_then_it_is_ignored() {
        assert_eq!(parse_flag("maybe"), None);
        assert_eq!(parse_flag(""), None);
    }
}
