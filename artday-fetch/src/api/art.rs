//! Art display and shuffle endpoints

use crate::gallery::GallerySnapshot;
use crate::{ApiResult, AppState};
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tracing::info;

/// GET /art
///
/// Current display and whether the shuffle trigger is available.
pub async fn current_art(State(state): State<AppState>) -> Json<GallerySnapshot> {
    Json(state.gallery.snapshot().await)
}

/// POST /art/shuffle
///
/// Runs one resolution cycle and returns the resulting display.
/// 409 while a cycle is already running.
pub async fn shuffle_art(State(state): State<AppState>) -> ApiResult<Json<GallerySnapshot>> {
    let resolution = state.shuffle().await?;
    info!(attempts = resolution.attempts(), "Shuffle finished");

    Ok(Json(state.gallery.snapshot().await))
}

/// Build art routes
pub fn art_routes() -> Router<AppState> {
    Router::new()
        .route("/art", get(current_art))
        .route("/art/shuffle", post(shuffle_art))
}
