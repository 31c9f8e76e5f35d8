// Twitch chat listener over the IRC WebSocket endpoint.

use super::command::{self, ChatLine};
use crate::use_cases::{Enqueue, ThrowSender};
use futures_util::{SinkExt, StreamExt};
use std::time::{Duration, Instant};
use tokio_tungstenite::{connect_async, tungstenite, tungstenite::Message};
use tracing::{Instrument, debug, info, info_span, warn};

const PONG: &str = "PONG :tmi.twitch.tv";

#[derive(Debug, Clone)]
pub struct ChatSettings {
    pub irc_url: String,
    pub channel: String,
    pub username: String,
    pub password: String,
    /// `None` makes a disconnect terminal.
    pub reconnect_delay: Option<Duration>,
}

#[derive(Debug)]
pub enum ChatError {
    #[allow(dead_code)]
    Ws(tungstenite::Error),
    ThrowQueueClosed,
}

impl From<tungstenite::Error> for ChatError {
    fn from(e: tungstenite::Error) -> Self {
        ChatError::Ws(e)
    }
}

/// Listens to chat for the lifetime of the process, feeding throws into the bridge.
pub async fn chat_task(settings: ChatSettings, throws: ThrowSender) {
    let span = info_span!("chat", channel = %settings.channel);
    async move {
        loop {
            match run_session(&settings, &throws).await {
                Ok(()) => info!("chat connection closed"),
                Err(ChatError::ThrowQueueClosed) => {
                    info!("throws no longer accepted; chat listener exiting");
                    return;
                }
                Err(e) => warn!(error = ?e, "chat connection failed"),
            }

            let Some(delay) = settings.reconnect_delay else {
                info!("chat reconnect disabled; listener exiting");
                return;
            };
            tokio::time::sleep(delay).await;
            info!("reconnecting to chat");
        }
    }
    .instrument(span)
    .await
}

async fn run_session(settings: &ChatSettings, throws: &ThrowSender) -> Result<(), ChatError> {
    let (mut ws, _response) = connect_async(settings.irc_url.as_str()).await?;
    info!(url = %settings.irc_url, "chat websocket connected");

    // Anonymous logins (justinfan*) accept any password.
    ws.send(Message::text(format!("PASS {}", settings.password)))
        .await?;
    ws.send(Message::text(format!("NICK {}", settings.username)))
        .await?;
    ws.send(Message::text(format!("JOIN #{}", settings.channel)))
        .await?;
    info!("joined chat channel");

    let mut last_overflow_log = None;
    while let Some(frame) = ws.next().await {
        match frame? {
            Message::Text(text) => {
                for line in command::lines(text.as_str()) {
                    if let Some(reply) = handle_line(line, throws, &mut last_overflow_log)? {
                        ws.send(Message::text(reply.to_string())).await?;
                    }
                }
            }
            Message::Close(frame) => {
                info!(?frame, "chat server closed connection");
                return Ok(());
            }
            _ => {}
        }
    }

    Ok(())
}

/// Reacts to one chat line; returns the reply to send back, if any.
fn handle_line(
    line: &str,
    throws: &ThrowSender,
    last_overflow_log: &mut Option<Instant>,
) -> Result<Option<&'static str>, ChatError> {
    match command::classify(line) {
        ChatLine::Ping => Ok(Some(PONG)),
        ChatLine::Throw => {
            info!("throw command received");
            debug!(line, "throw message");
            match throws.try_throw_logged(last_overflow_log) {
                Enqueue::Closed => Err(ChatError::ThrowQueueClosed),
                Enqueue::Queued | Enqueue::Dropped => Ok(None),
            }
        }
        ChatLine::Other => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::command_bridge;
    use tokio::net::TcpListener;
    use tokio::time::timeout;
    use tokio_tungstenite::accept_async;

    const THROW_LINE: &str = ":viewer!viewer@viewer.tmi.twitch.tv PRIVMSG #test :!THROW";

    #[test]
    fn when_throw_line_arrives_then_exactly_one_throw_is_queued() {
        let (tx, rx) = command_bridge(10);
        let mut last = None;

        let reply = handle_line(THROW_LINE, &tx, &mut last).expect("handled");

        assert_eq!(reply, None);
        assert_eq!(rx.pending(), 1);
    }

    #[test]
    fn when_ping_arrives_then_pong_is_returned_and_nothing_is_queued() {
        let (tx, rx) = command_bridge(10);
        let mut last = None;

        let reply = handle_line("PING :tmi.twitch.tv", &tx, &mut last).expect("handled");

        assert_eq!(reply, Some(PONG));
        assert_eq!(rx.pending(), 0);
    }

    #[test]
    fn when_queue_is_full_then_throw_is_dropped_without_error() {
        let (tx, rx) = command_bridge(1);
        let mut last = None;

        handle_line(THROW_LINE, &tx, &mut last).expect("first");
        handle_line(THROW_LINE, &tx, &mut last).expect("second");

        assert_eq!(rx.pending(), 1);
    }

    #[test]
    fn when_frame_loop_is_gone_then_listener_stops() {
        let (tx, rx) = command_bridge(1);
        drop(rx);
        let mut last = None;

        let result = handle_line(THROW_LINE, &tx, &mut last);

        assert!(matches!(result, Err(ChatError::ThrowQueueClosed)));
    }

    #[tokio::test]
    async fn when_connected_then_listener_logs_in_answers_ping_and_queues_throw() {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");

        let server = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.expect("accept");
            let mut ws = accept_async(stream).await.expect("handshake");

            let mut login = Vec::new();
            for _ in 0..3 {
                let msg = ws.next().await.expect("login line").expect("ws frame");
                login.push(msg.to_text().expect("text").to_string());
            }

            ws.send(Message::text("PING :tmi.twitch.tv".to_string()))
                .await
                .expect("send ping");
            let pong = ws.next().await.expect("pong").expect("ws frame");
            assert_eq!(pong.to_text().expect("text"), PONG);

            ws.send(Message::text(format!("{THROW_LINE}\r\n")))
                .await
                .expect("send throw");
            ws.close(None).await.expect("close");
            while let Some(Ok(_)) = ws.next().await {}
            login
        });

        let (tx, mut rx) = command_bridge(10);
        let settings = ChatSettings {
            irc_url: format!("ws://{addr}"),
            channel: "test".to_string(),
            username: "justinfan1".to_string(),
            password: "oauth:none".to_string(),
            reconnect_delay: None,
        };

        timeout(Duration::from_secs(5), chat_task(settings, tx))
            .await
            .expect("listener should exit once the server closes");
        let login = server.await.expect("server task");

        assert_eq!(
            login,
            vec!["PASS oauth:none", "NICK justinfan1", "JOIN #test"]
        );
        assert!(rx.try_take().is_some());
        assert!(rx.try_take().is_none());
    }
}
