//! Resolution cycle controller
//!
//! Runs the fetch / validate / retry loop:
//!
//! ```text
//! Idle ──trigger──▶ Fetching ──both fetches ok──▶ Success
//!                     │  ▲
//!               error │  │ attempt < max_attempts (no backoff)
//!                     ▼  │
//!                   Retrying ──attempt == max_attempts──▶ GivingUp
//! ```
//!
//! **Guarantees per cycle:**
//! - The trigger is disabled before the first fetch and re-enabled as the last
//!   listener call on every path
//! - At most `max_attempts` artwork fetches; an image fetch only follows an
//!   accepted artwork
//! - Exactly one of `on_resolved` / `on_giving_up`
//!
//! Cycles never overlap: `resolve` borrows the resolver mutably for the whole
//! cycle.

use crate::services::candidate_selector::CandidateSelector;
use crate::types::{ArtCatalog, Candidate, FetchError, ResolutionListener, ResolvedArt};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Where the resolver is within (or between) cycles
#[derive(Debug, Clone, PartialEq)]
pub enum CycleState {
    /// No cycle has run yet
    Idle,
    /// Fetching for the given 1-based attempt
    Fetching { attempt: u32, candidate: Candidate },
    /// Attempt failed and another will follow
    Retrying { attempt: u32, last_error: FetchError },
    /// Last cycle resolved on the given attempt
    Success { attempts: u32 },
    /// Last cycle exhausted its attempts
    GivingUp { attempts: u32, last_error: FetchError },
}

impl CycleState {
    /// True while a cycle is in flight
    pub fn in_flight(&self) -> bool {
        matches!(self, CycleState::Fetching { .. } | CycleState::Retrying { .. })
    }

    /// Attempts made so far in the current cycle; 0 between cycles
    pub fn attempt_count(&self) -> u32 {
        match self {
            CycleState::Fetching { attempt, .. } => attempt.saturating_sub(1),
            CycleState::Retrying { attempt, .. } => *attempt,
            CycleState::Idle | CycleState::Success { .. } | CycleState::GivingUp { .. } => 0,
        }
    }
}

/// Terminal result of one cycle
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Resolved { art: ResolvedArt, attempts: u32 },
    GaveUp { last_error: FetchError, attempts: u32 },
}

impl Resolution {
    pub fn attempts(&self) -> u32 {
        match self {
            Resolution::Resolved { attempts, .. } | Resolution::GaveUp { attempts, .. } => *attempts,
        }
    }
}

/// Retry controller owning one cycle state and candidate stream
pub struct Resolver {
    catalog: Arc<dyn ArtCatalog>,
    selector: CandidateSelector,
    max_attempts: u32,
    state: CycleState,
}

impl Resolver {
    /// `max_attempts` is clamped to at least 1
    pub fn new(catalog: Arc<dyn ArtCatalog>, selector: CandidateSelector, max_attempts: u32) -> Self {
        Self {
            catalog,
            selector,
            max_attempts: max_attempts.max(1),
            state: CycleState::Idle,
        }
    }

    pub fn state(&self) -> &CycleState {
        &self.state
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Run one resolution cycle to Success or GivingUp
    pub async fn resolve(&mut self, listener: &dyn ResolutionListener) -> Resolution {
        listener.set_trigger_enabled(false).await;

        let mut attempt = 0;
        loop {
            attempt += 1;
            let candidate = self.selector.next_candidate();
            self.state = CycleState::Fetching { attempt, candidate };
            debug!(attempt, candidate = %candidate, "Fetching candidate");

            match self.try_candidate(candidate).await {
                Ok(art) => {
                    self.state = CycleState::Success { attempts: attempt };
                    info!(
                        attempt,
                        artwork_id = art.artwork.id,
                        "Resolution cycle succeeded"
                    );

                    listener.on_resolved(&art.artwork, &art.image).await;
                    listener.set_trigger_enabled(true).await;
                    return Resolution::Resolved { art, attempts: attempt };
                }
                Err(error) => {
                    listener.on_attempt_failed(attempt, &error).await;

                    if attempt >= self.max_attempts {
                        warn!(
                            attempts = attempt,
                            error = %error,
                            "Resolution cycle giving up"
                        );
                        self.state = CycleState::GivingUp {
                            attempts: attempt,
                            last_error: error.clone(),
                        };

                        listener.on_giving_up(&error).await;
                        listener.set_trigger_enabled(true).await;
                        return Resolution::GaveUp {
                            last_error: error,
                            attempts: attempt,
                        };
                    }

                    match &error {
                        FetchError::Validation(reason) => {
                            debug!(attempt, candidate = %candidate, %reason, "Candidate rejected, retrying")
                        }
                        _ => {
                            warn!(attempt, candidate = %candidate, error = %error, "Fetch failed, retrying")
                        }
                    }
                    self.state = CycleState::Retrying {
                        attempt,
                        last_error: error,
                    };
                }
            }
        }
    }

    /// Artwork fetch, then image fetch for an accepted artwork
    async fn try_candidate(&self, candidate: Candidate) -> Result<ResolvedArt, FetchError> {
        let artwork = self.catalog.fetch_artwork(candidate).await?;

        // fetch_artwork only returns accepted records, which always carry an image id
        let image_id = artwork.image_id.clone().ok_or(FetchError::Validation(
            crate::types::RejectReason::NoAssociatedImage,
        ))?;

        let image = self
            .catalog
            .fetch_image(&image_id, artwork.iiif_base_url.as_deref())
            .await?;
        Ok(ResolvedArt { artwork, image })
    }
}
