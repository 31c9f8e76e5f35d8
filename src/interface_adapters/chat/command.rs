// Chat line recognition: the only part of IRC the overlay understands.

const THROW_COMMAND: &str = "!throw";

/// How the overlay reacts to one inbound chat line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatLine {
    /// Server keep-alive; must be answered with a PONG.
    Ping,
    /// A chat message asking for a throw.
    Throw,
    Other,
}

pub fn classify(line: &str) -> ChatLine {
    // Keep-alive wins over everything else on the same line.
    if line.contains("PING") {
        return ChatLine::Ping;
    }
    if is_throw_command(line) {
        return ChatLine::Throw;
    }
    ChatLine::Other
}

/// True for a channel message (`PRIVMSG`) containing `!throw` in any case.
pub fn is_throw_command(line: &str) -> bool {
    line.contains("PRIVMSG") && line.to_lowercase().contains(THROW_COMMAND)
}

/// Splits one transport frame into IRC lines; a frame may carry several.
pub fn lines(frame: &str) -> impl Iterator<Item = &str> {
    frame
        .split("\r\n")
        .flat_map(|chunk| chunk.split('\n'))
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRIVMSG: &str = ":viewer!viewer@viewer.tmi.twitch.tv PRIVMSG #channel :";

    #[test]
    fn when_privmsg_contains_throw_then_line_is_a_throw() {
        assert_eq!(classify(&format!("{PRIVMSG}!throw")), ChatLine::Throw);
        assert_eq!(classify(&format!("{PRIVMSG}go !THROW it")), ChatLine::Throw);
        assert_eq!(classify(&format!("{PRIVMSG}!Throw")), ChatLine::Throw);
    }

    #[test]
    fn when_message_is_not_a_privmsg_then_throw_is_ignored() {
        let line = ":tmi.twitch.tv NOTICE #channel :!throw";

        assert_eq!(classify(line), ChatLine::Other);
    }

    #[test]
    fn when_privmsg_lacks_command_then_line_is_other() {
        assert_eq!(classify(&format!("{PRIVMSG}hello chat")), ChatLine::Other);
        assert_eq!(classify(&format!("{PRIVMSG}throw")), ChatLine::Other);
    }

    #[test]
    fn when_line_contains_ping_then_it_is_a_keep_alive() {
        assert_eq!(classify("PING :tmi.twitch.tv"), ChatLine::Ping);
        assert_eq!(classify(&format!("{PRIVMSG}PING !throw")), ChatLine::Ping);
    }

    #[test]
    fn when_frame_has_several_lines_then_each_is_yielded() {
        let frame = format!("PING :tmi.twitch.tv\r\n{PRIVMSG}!throw\r\n");

        let parsed: Vec<ChatLine> = lines(&frame).map(classify).collect();

        assert_eq!(parsed, vec![ChatLine::Ping, ChatLine::Throw]);
    }
}
