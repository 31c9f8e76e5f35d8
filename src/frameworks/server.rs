// Framework bootstrap for the overlay runtime.

use crate::domain::ports::SilentCue;
use crate::domain::{ImpactCue, PinataState};
use crate::frameworks::config;
use crate::interface_adapters::assets::AssetCatalog;
use crate::interface_adapters::chat::{ChatSettings, chat_task};
use crate::interface_adapters::cue::BroadcastCue;
use crate::interface_adapters::net::{asset_handler, render_update_serializer, ws_handler};
use crate::interface_adapters::protocol::LayoutDto;
use crate::interface_adapters::state::AppState;
use crate::use_cases::{CueEvent, FrameConfig, RenderState, command_bridge, overlay_task};

use axum::{Router, extract::ws::Utf8Bytes, routing::get};
use std::net::SocketAddr;
use std::{io::Result, path::PathBuf, sync::Arc, time::Duration};
use tokio::sync::{broadcast, watch};

/// Everything needed to start one overlay.
#[derive(Debug, Clone)]
pub struct OverlaySettings {
    pub assets_dir: PathBuf,
    /// `None` runs the overlay without a chat listener.
    pub chat: Option<ChatSettings>,
    pub tick_interval: Duration,
    pub throw_queue_capacity: usize,
    pub render_broadcast_capacity: usize,
    pub frame: FrameConfig,
}

impl OverlaySettings {
    pub fn from_env() -> Self {
        Self {
            assets_dir: config::assets_dir(),
            chat: config::chat_settings(),
            tick_interval: config::TICK_INTERVAL,
            throw_queue_capacity: config::THROW_QUEUE_CAPACITY,
            render_broadcast_capacity: config::RENDER_BROADCAST_CAPACITY,
            frame: FrameConfig::default(),
        }
    }
}

fn init_runtime() {
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

pub async fn run(listener: tokio::net::TcpListener, settings: OverlaySettings) -> Result<()> {
    let address = listener.local_addr()?;
    let state = build_state(&settings).await?;

    let app = Router::new()
        .route("/ws", get(ws_handler))
        .route("/assets/{name}", get(asset_handler))
        .with_state(state);

    tracing::info!(%address, "listening");

    // Serve app and report errors rather than panicking
    axum::serve(listener, app).await.inspect_err(|e| {
        tracing::error!(error = %e, "server error");
    })
}

pub async fn run_with_config() -> Result<()> {
    init_runtime();

    let address = SocketAddr::from(([127, 0, 0, 1], config::overlay_port()));

    let listener = tokio::net::TcpListener::bind(address)
        .await
        .inspect_err(|e| {
            tracing::error!(%address, error = %e, "failed to bind");
        })?;

    run(listener, OverlaySettings::from_env()).await
}

async fn build_state(settings: &OverlaySettings) -> Result<Arc<AppState>> {
    // Sprites are mandatory; a load failure aborts startup here.
    let assets = AssetCatalog::load(&settings.assets_dir)
        .await
        .map_err(std::io::Error::other)?;
    let impact_sound = assets.impact_sound_url();

    // throw_tx/rx: chat throws into the single frame loop.
    let (throw_tx, throw_rx) = command_bridge(settings.throw_queue_capacity);

    // render_tx/rx: per-frame snapshots, serialized once for every renderer.
    let (render_tx, _render_rx) =
        broadcast::channel::<RenderState>(settings.render_broadcast_capacity);
    let (render_bytes_tx, _render_bytes_rx) =
        broadcast::channel::<Utf8Bytes>(settings.render_broadcast_capacity);
    let (render_latest_tx, _render_latest_rx) = watch::channel::<Utf8Bytes>(Utf8Bytes::from(""));

    let (cue_tx, _cue_rx) = broadcast::channel::<CueEvent>(config::CUE_BROADCAST_CAPACITY);
    let cue: Arc<dyn ImpactCue> = if impact_sound.is_some() {
        Arc::new(BroadcastCue::new(cue_tx.clone()))
    } else {
        Arc::new(SilentCue)
    };

    let pinata = PinataState::new(
        &settings.frame.pinata,
        &settings.frame.projectile,
        &assets.sprites(),
    );

    tokio::spawn(render_update_serializer(
        render_tx.subscribe(),
        render_bytes_tx.clone(),
        render_latest_tx.clone(),
    ));
    tokio::spawn(overlay_task(
        pinata,
        throw_rx,
        render_tx,
        cue,
        settings.frame,
        settings.tick_interval,
    ));

    match settings.chat.clone() {
        Some(chat) => {
            tokio::spawn(chat_task(chat, throw_tx));
        }
        None => tracing::info!("chat listener disabled"),
    }

    Ok(Arc::new(AppState {
        render_bytes_tx,
        render_latest_tx,
        cue_tx,
        assets: Arc::new(assets),
        layout: LayoutDto {
            screen_width: settings.frame.pinata.screen_width,
            screen_height: settings.frame.pinata.screen_height,
            max_life: settings.frame.pinata.max_life,
            impact_sound,
        },
    }))
}
