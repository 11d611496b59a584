//! artday-fetch library interface
//!
//! The art-of-the-day resolution core (candidate selection, AIC fetchers,
//! acceptance predicate, retry controller) and the HTTP service around it.

pub mod api;
pub mod error;
pub mod gallery;
pub mod render;
pub mod services;
pub mod types;

pub use crate::error::{ApiError, ApiResult};

use artday_common::config::ArtdayConfig;
use artday_common::events::EventBus;
use axum::Router;
use chrono::{DateTime, Utc};
use gallery::Gallery;
use services::{ArticClient, CandidateSelector, Resolution, Resolver};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;
use tracing::error;
use types::{ArtCatalog, ResolutionListener};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ArtdayConfig>,
    /// One resolver per service; held for the whole of a cycle
    pub resolver: Arc<Mutex<Resolver>>,
    /// Rendering collaborator and current display
    pub gallery: Arc<Gallery>,
    /// Event bus for SSE broadcasting
    pub event_bus: EventBus,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(
        config: ArtdayConfig,
        catalog: Arc<dyn ArtCatalog>,
        selector: CandidateSelector,
        event_bus: EventBus,
    ) -> Self {
        let resolver = Resolver::new(catalog, selector, config.max_attempts);
        let gallery = Gallery::new(
            event_bus.clone(),
            config.web_base_url.clone(),
            config.target_width,
        );

        Self {
            config: Arc::new(config),
            resolver: Arc::new(Mutex::new(resolver)),
            gallery: Arc::new(gallery),
            event_bus,
            startup_time: Utc::now(),
        }
    }

    /// State backed by the live AIC API
    pub fn from_config(config: ArtdayConfig, event_bus: EventBus) -> artday_common::Result<Self> {
        let catalog = Arc::new(ArticClient::new(&config)?);
        let selector = CandidateSelector::new(config.catalog_max_id);
        Ok(Self::new(config, catalog, selector, event_bus))
    }

    /// Run one resolution cycle
    ///
    /// Fails with `Conflict` while another cycle holds the trigger. The cycle
    /// runs on its own task so a dropped request cannot stop it half way. If
    /// that task dies, the trigger is re-enabled before the error is returned.
    pub async fn shuffle(&self) -> ApiResult<Resolution> {
        let mut resolver = self
            .resolver
            .clone()
            .try_lock_owned()
            .map_err(|_| ApiError::Conflict("Shuffle already in progress".to_string()))?;
        let gallery = self.gallery.clone();

        match tokio::spawn(async move { resolver.resolve(gallery.as_ref()).await }).await {
            Ok(resolution) => Ok(resolution),
            Err(e) => {
                error!("Shuffle task failed: {}", e);
                self.gallery.set_trigger_enabled(true).await;
                Err(ApiError::Internal(format!("Shuffle task failed: {}", e)))
            }
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .merge(api::art_routes())
        .merge(api::health_routes())
        .route("/events", get(api::event_stream))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
