//! Service-side rendering collaborator
//!
//! Keeps the current display and the shuffle trigger state for the HTTP API
//! and broadcasts cycle progress on the event bus.

use crate::render::{ArtworkView, Display, FailureView};
use crate::services::image_url::compose_image_url;
use crate::types::{ArtworkRecord, FetchError, ImageRecord, ResolutionListener};
use artday_common::events::{ArtdayEvent, EventBus};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

/// What `GET /art` returns
#[derive(Debug, Clone, Serialize)]
pub struct GallerySnapshot {
    pub trigger_enabled: bool,
    pub display: Option<Display>,
}

/// Current page state plus event fan-out
pub struct Gallery {
    event_bus: EventBus,
    web_base_url: String,
    target_width: u32,
    display: RwLock<Option<Display>>,
    trigger_enabled: AtomicBool,
    cycle_id: RwLock<Uuid>,
    failed_attempts: AtomicU32,
    last_error: RwLock<Option<String>>,
}

impl Gallery {
    pub fn new(event_bus: EventBus, web_base_url: impl Into<String>, target_width: u32) -> Self {
        Self {
            event_bus,
            web_base_url: web_base_url.into(),
            target_width,
            display: RwLock::new(None),
            trigger_enabled: AtomicBool::new(true),
            cycle_id: RwLock::new(Uuid::nil()),
            failed_attempts: AtomicU32::new(0),
            last_error: RwLock::new(None),
        }
    }

    pub fn trigger_enabled(&self) -> bool {
        self.trigger_enabled.load(Ordering::SeqCst)
    }

    pub async fn display(&self) -> Option<Display> {
        self.display.read().await.clone()
    }

    pub async fn snapshot(&self) -> GallerySnapshot {
        GallerySnapshot {
            trigger_enabled: self.trigger_enabled(),
            display: self.display().await,
        }
    }

    /// Last surfaced error, for diagnostics
    pub async fn last_error(&self) -> Option<String> {
        self.last_error.read().await.clone()
    }

    async fn current_cycle(&self) -> Uuid {
        *self.cycle_id.read().await
    }
}

#[async_trait::async_trait]
impl ResolutionListener for Gallery {
    async fn on_resolved(&self, artwork: &ArtworkRecord, image: &ImageRecord) {
        let view = ArtworkView::build(artwork, image, &self.web_base_url, self.target_width);
        *self.display.write().await = Some(Display::Artwork(view));
        *self.last_error.write().await = None;

        self.event_bus.emit_lossy(ArtdayEvent::ArtResolved {
            cycle_id: self.current_cycle().await,
            artwork_id: artwork.id,
            title: artwork.title.clone(),
            image_url: compose_image_url(&image.base_url, &image.path, image.width, self.target_width),
            timestamp: chrono::Utc::now(),
        });
    }

    async fn on_giving_up(&self, last_error: &FetchError) {
        *self.display.write().await = Some(Display::Failure(FailureView::from_error(last_error)));
        *self.last_error.write().await = Some(last_error.to_string());

        self.event_bus.emit_lossy(ArtdayEvent::ShuffleFailed {
            cycle_id: self.current_cycle().await,
            attempts: self.failed_attempts.load(Ordering::SeqCst),
            error: last_error.to_string(),
            timestamp: chrono::Utc::now(),
        });
    }

    async fn set_trigger_enabled(&self, enabled: bool) {
        if !enabled {
            let cycle_id = Uuid::new_v4();
            *self.cycle_id.write().await = cycle_id;
            self.failed_attempts.store(0, Ordering::SeqCst);
            self.event_bus.emit_lossy(ArtdayEvent::ShuffleStarted {
                cycle_id,
                timestamp: chrono::Utc::now(),
            });
        }

        self.trigger_enabled.store(enabled, Ordering::SeqCst);
        debug!(enabled, "Shuffle trigger changed");
        self.event_bus.emit_lossy(ArtdayEvent::TriggerChanged {
            enabled,
            timestamp: chrono::Utc::now(),
        });
    }

    async fn on_attempt_failed(&self, attempt: u32, error: &FetchError) {
        self.failed_attempts.store(attempt, Ordering::SeqCst);
        self.event_bus.emit_lossy(ArtdayEvent::AttemptFailed {
            cycle_id: self.current_cycle().await,
            attempt,
            kind: error.kind().to_string(),
            message: error.to_string(),
            timestamp: chrono::Utc::now(),
        });
    }
}
