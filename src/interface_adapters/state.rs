use crate::interface_adapters::assets::AssetCatalog;
use crate::interface_adapters::protocol::LayoutDto;
use crate::use_cases::CueEvent;
use axum::extract::ws::Utf8Bytes;
use std::sync::Arc;
use tokio::sync::{broadcast, watch};

#[derive(Clone)]
pub struct AppState {
    // Serialized render updates, shared across all renderer connections.
    pub render_bytes_tx: broadcast::Sender<Utf8Bytes>,
    // Latest serialized render update for late joiners and lag recovery.
    pub render_latest_tx: watch::Sender<Utf8Bytes>,
    // Impact cues produced by the frame loop.
    pub cue_tx: broadcast::Sender<CueEvent>,
    // Sprites and sound served to renderers.
    pub assets: Arc<AssetCatalog>,
    // Static layout sent to each renderer on connect.
    pub layout: LayoutDto,
}
