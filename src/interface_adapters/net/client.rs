use crate::interface_adapters::protocol::{RenderUpdateDto, ServerMessage};
use crate::interface_adapters::state::AppState;
use crate::interface_adapters::utils::conn_id::next_conn_id;
use crate::use_cases::{CueEvent, RenderState};

use axum::{
    extract::{
        State,
        ws::{Message, Utf8Bytes, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures::SinkExt;
use std::{
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::{broadcast, watch};
use tracing::{Instrument, debug, error, info, info_span, warn};

#[derive(Debug)]
enum NetError {
    // Categorizes connection lifecycle failures so callers can decide policy.
    #[allow(dead_code)]
    Ws(axum::Error),
    #[allow(dead_code)]
    Serialization(serde_json::Error),
    RenderUpdatesClosed,
    CuesClosed,
}

impl From<axum::Error> for NetError {
    fn from(e: axum::Error) -> Self {
        NetError::Ws(e)
    }
}

enum LoopControl {
    Continue,
    Disconnect,
}

const LOG_THROTTLE: Duration = Duration::from_secs(2);

pub async fn render_update_serializer(
    mut render_rx: broadcast::Receiver<RenderState>,
    render_bytes_tx: broadcast::Sender<Utf8Bytes>,
    render_latest_tx: watch::Sender<Utf8Bytes>,
) {
    // Serialize each frame once and broadcast the shared bytes.
    loop {
        match render_rx.recv().await {
            Ok(render) => {
                let msg = ServerMessage::RenderUpdate(RenderUpdateDto::from(render));
                let txt = match serde_json::to_string(&msg) {
                    Ok(txt) => txt,
                    Err(e) => {
                        error!(error = ?e, "failed to serialize render update");
                        continue;
                    }
                };

                let bytes = Utf8Bytes::from(txt);
                // Stored even with no renderer subscribed, for the next bootstrap.
                render_latest_tx.send_replace(bytes.clone());
                let _ = render_bytes_tx.send(bytes);
            }
            Err(broadcast::error::RecvError::Lagged(n)) => {
                warn!(missed = n, "render serializer lagged; skipping to latest frame");
            }
            Err(broadcast::error::RecvError::Closed) => {
                warn!("render updates channel closed; serializer exiting");
                break;
            }
        }
    }
}

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| {
        let span = info_span!("renderer", conn_id = next_conn_id());
        handle_socket(socket, state).instrument(span)
    })
}

struct ConnCtx {
    render_rx: broadcast::Receiver<Utf8Bytes>,
    render_latest_rx: watch::Receiver<Utf8Bytes>,
    cue_rx: broadcast::Receiver<CueEvent>,

    msgs_out: u64,
    bytes_out: u64,
    lag_recovery_count: u64,
    last_lag_log: Option<Instant>,
}

async fn handle_socket(mut socket: WebSocket, state: Arc<AppState>) {
    // Subscribe before the first await so no frame is missed.
    let mut ctx = ConnCtx {
        render_rx: state.render_bytes_tx.subscribe(),
        render_latest_rx: state.render_latest_tx.subscribe(),
        cue_rx: state.cue_tx.subscribe(),
        msgs_out: 0,
        bytes_out: 0,
        lag_recovery_count: 0,
        last_lag_log: None,
    };

    if let Err(e) = bootstrap_connection(&mut socket, &state, &mut ctx).await {
        warn!(error = ?e, "failed to bootstrap renderer");
        let _ = socket.close().await;
        return;
    }
    info!("renderer connected");

    if let Err(e) = run_client_loop(&mut socket, &mut ctx).await {
        warn!(error = ?e, "renderer loop exited with error");
    }

    debug!(
        msgs_out = ctx.msgs_out,
        bytes_out = ctx.bytes_out,
        lag_recovery_count = ctx.lag_recovery_count,
        "connection stats"
    );
    info!("renderer disconnected");
}

async fn bootstrap_connection(
    socket: &mut WebSocket,
    state: &AppState,
    ctx: &mut ConnCtx,
) -> Result<(), NetError> {
    let bytes = send_message(socket, &ServerMessage::Layout(state.layout.clone())).await?;
    ctx.msgs_out += 1;
    ctx.bytes_out += bytes as u64;

    // Clone out of the watch before awaiting so the borrow is not held.
    let latest = ctx.render_latest_rx.borrow().clone();
    if !latest.is_empty() {
        let len = latest.len();
        socket.send(Message::Text(latest)).await?;
        ctx.msgs_out += 1;
        ctx.bytes_out += len as u64;
    }
    Ok(())
}

async fn send_message(socket: &mut WebSocket, msg: &ServerMessage) -> Result<usize, NetError> {
    let txt = serde_json::to_string(msg).map_err(NetError::Serialization)?;
    let bytes = txt.len();
    socket
        .send(Message::Text(txt.into()))
        .await
        .map_err(NetError::Ws)?;
    Ok(bytes)
}

fn should_log(last: &mut Option<Instant>) -> bool {
    if last.is_none_or(|at| at.elapsed() >= LOG_THROTTLE) {
        *last = Some(Instant::now());
        true
    } else {
        false
    }
}

async fn run_client_loop(socket: &mut WebSocket, ctx: &mut ConnCtx) -> Result<(), NetError> {
    loop {
        let control = tokio::select! {
            // Renderers only listen; anything they send is ignored.
            incoming = socket.recv() => match incoming {
                Some(Ok(Message::Close(_))) | None => LoopControl::Disconnect,
                Some(Ok(_)) => LoopControl::Continue,
                Some(Err(e)) => {
                    warn!(error = %e, "websocket recv error");
                    LoopControl::Disconnect
                }
            },

            render = ctx.render_rx.recv() => match render {
                Ok(bytes) => forward_bytes(bytes, socket, ctx).await,
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    if should_log(&mut ctx.last_lag_log) {
                        warn!(missed = n, "render updates lagged; sending latest frame");
                    }
                    // Resync strategy: skip straight to the latest frame.
                    let latest = ctx.render_latest_rx.borrow().clone();
                    if latest.is_empty() {
                        LoopControl::Continue
                    } else {
                        ctx.lag_recovery_count += 1;
                        forward_bytes(latest, socket, ctx).await
                    }
                }
                Err(broadcast::error::RecvError::Closed) => {
                    return Err(NetError::RenderUpdatesClosed);
                }
            },

            cue = ctx.cue_rx.recv() => match cue {
                Ok(event) => match send_message(socket, &ServerMessage::Cue(event.into())).await {
                    Ok(bytes) => {
                        ctx.msgs_out += 1;
                        ctx.bytes_out += bytes as u64;
                        LoopControl::Continue
                    }
                    Err(err) => {
                        warn!(error = ?err, "failed to send cue");
                        LoopControl::Disconnect
                    }
                },
                // Stale sounds are not worth replaying.
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    debug!(missed = n, "cues lagged; skipping");
                    LoopControl::Continue
                }
                Err(broadcast::error::RecvError::Closed) => {
                    return Err(NetError::CuesClosed);
                }
            },
        };

        if let LoopControl::Disconnect = control {
            if let Err(err) = socket.close().await.map_err(NetError::Ws) {
                debug!(error = ?err, "socket close error");
            }
            return Ok(());
        }
    }
}

async fn forward_bytes(bytes: Utf8Bytes, socket: &mut WebSocket, ctx: &mut ConnCtx) -> LoopControl {
    let len = bytes.len();
    match socket.send(Message::Text(bytes)).await.map_err(NetError::Ws) {
        Ok(()) => {
            ctx.msgs_out += 1;
            ctx.bytes_out += len as u64;
            LoopControl::Continue
        }
        Err(err) => {
            // Log unexpected send failures; disconnect will follow immediately.
            warn!(error = ?err, "failed to send render update");
            LoopControl::Disconnect
        }
    }
}
