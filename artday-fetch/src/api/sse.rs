//! Server-Sent Events for resolution progress

use crate::AppState;
use axum::{
    extract::State,
    response::sse::{Event, Sse},
};
use futures::stream::Stream;
use std::convert::Infallible;

/// GET /events - SSE stream of shuffle events
///
/// Streams ShuffleStarted, AttemptFailed, ArtResolved, ShuffleFailed and
/// TriggerChanged.
pub async fn event_stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    artday_common::sse::create_event_sse_stream("artday-fetch", &state.event_bus)
}
