//! Server-Sent Events (SSE) stream
//!
//! Streams catalog refresh and favorites events to connected clients, with
//! an initial connection status event and keep-alive heartbeats.

use axum::{
    extract::State,
    response::sse::{Event, Sse},
};
use barkboard_common::events::CatalogEvent;
use futures::stream::{Stream, StreamExt};
use std::convert::Infallible;
use std::time::Duration;
use tokio_stream::wrappers::BroadcastStream;
use tracing::{debug, warn};

use crate::AppState;

/// GET /api/events - SSE event stream
pub async fn event_stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    debug!("New SSE client connected");

    let rx = state.bus.subscribe();

    let stream = async_stream::stream! {
        // Initial connected status so clients can show link state
        yield Ok(Event::default().event("ConnectionStatus").data("connected"));

        let mut events = BroadcastStream::new(rx);
        while let Some(result) = events.next().await {
            match result {
                Ok(event) => match serde_json::to_string(&event) {
                    Ok(json) => {
                        let event_type = event_type_str(&event);
                        debug!("Broadcasting SSE event: {}", event_type);
                        yield Ok(Event::default().event(event_type).data(json));
                    }
                    Err(e) => {
                        warn!("Failed to serialize event: {}", e);
                    }
                },
                Err(e) => {
                    // Lagged receiver; skip the missed events and continue
                    warn!("SSE stream error: {:?}", e);
                }
            }
        }
    };

    Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("heartbeat"),
    )
}

/// Extract event type string from CatalogEvent
fn event_type_str(event: &CatalogEvent) -> &'static str {
    match event {
        CatalogEvent::CatalogRefreshed { .. } => "CatalogRefreshed",
        CatalogEvent::RefreshFailed { .. } => "RefreshFailed",
        CatalogEvent::FavoritesChanged { .. } => "FavoritesChanged",
    }
}
