use crate::interface_adapters::http::ErrorResponse;
use crate::interface_adapters::state::AppState;

use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use std::sync::Arc;
use tracing::debug;

pub async fn asset_handler(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> impl IntoResponse {
    match state.assets.get(&name) {
        Some(asset) => (
            [(header::CONTENT_TYPE, asset.content_type)],
            asset.bytes.clone(),
        )
            .into_response(),
        None => {
            debug!(name = %name, "unknown asset requested");
            (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: "asset not found".to_string(),
                }),
            )
                .into_response()
        }
    }
}
