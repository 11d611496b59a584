//! Event types for the art-of-the-day event system
//!
//! Provides the shared event definitions and the EventBus used to fan resolution
//! progress out to SSE clients.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

/// Art-of-the-day event types
///
/// Events are broadcast via EventBus and serialized for SSE transmission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ArtdayEvent {
    /// A resolution cycle started (initial load or user shuffle)
    ShuffleStarted {
        /// Cycle identifier, shared by every event of the cycle
        cycle_id: Uuid,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// One attempt of a cycle failed and will be retried or given up on
    ///
    /// Diagnostic only; the UI shows nothing until the cycle ends.
    AttemptFailed {
        cycle_id: Uuid,
        /// 1-based attempt number within the cycle
        attempt: u32,
        /// Error kind ("transport", "malformed_response", "validation")
        kind: String,
        /// Human-readable error
        message: String,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// A validated artwork/image pair was handed to rendering
    ArtResolved {
        cycle_id: Uuid,
        /// AIC artwork id
        artwork_id: u64,
        /// Artwork title, if the catalog has one
        title: Option<String>,
        /// Composed IIIF image URL
        image_url: String,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// The cycle exhausted its attempts
    ShuffleFailed {
        cycle_id: Uuid,
        /// Attempts performed
        attempts: u32,
        /// Last error only
        error: String,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Shuffle trigger enabled or disabled
    TriggerChanged {
        enabled: bool,
        timestamp: chrono::DateTime<chrono::Utc>,
    },
}

impl ArtdayEvent {
    /// SSE event name for this event
    pub fn event_type(&self) -> &'static str {
        match self {
            ArtdayEvent::ShuffleStarted { .. } => "ShuffleStarted",
            ArtdayEvent::AttemptFailed { .. } => "AttemptFailed",
            ArtdayEvent::ArtResolved { .. } => "ArtResolved",
            ArtdayEvent::ShuffleFailed { .. } => "ShuffleFailed",
            ArtdayEvent::TriggerChanged { .. } => "TriggerChanged",
        }
    }
}

/// Broadcast bus for ArtdayEvent
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<ArtdayEvent>,
    capacity: usize,
}

impl EventBus {
    /// Creates a new EventBus with specified channel capacity
    ///
    /// # Arguments
    ///
    /// * `capacity` - Number of events to buffer before dropping old events
    ///
    /// # Examples
    ///
    /// ```
    /// use artday_common::events::EventBus;
    ///
    /// let event_bus = EventBus::new(100);
    /// assert_eq!(event_bus.capacity(), 100);
    /// ```
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx, capacity }
    }

    /// Subscribe to all future events
    ///
    /// Events emitted before subscription are not received.
    pub fn subscribe(&self) -> broadcast::Receiver<ArtdayEvent> {
        self.tx.subscribe()
    }

    /// Emit an event to all subscribers
    ///
    /// Returns `Ok(subscriber_count)` if at least one subscriber exists.
    /// Returns `Err` if no subscribers are listening.
    #[allow(clippy::result_large_err)]
    pub fn emit(
        &self,
        event: ArtdayEvent,
    ) -> Result<usize, broadcast::error::SendError<ArtdayEvent>> {
        self.tx.send(event)
    }

    /// Emit an event, ignoring if no subscribers are listening
    pub fn emit_lossy(&self, event: ArtdayEvent) {
        let _ = self.tx.send(event);
    }

    /// Get the current number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Get the configured channel capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
