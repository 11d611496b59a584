//! Core Types and Trait Definitions for artday-fetch
//!
//! Records fetched from the AIC catalog, the error taxonomy shared by both
//! fetchers, and the two seams of the resolution loop:
//! - [`ArtCatalog`]: the artwork and image metadata collaborators
//! - [`ResolutionListener`]: the rendering collaborator

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// ============================================================================
// Records
// ============================================================================

/// Tentative artwork id proposed to the catalog for one attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Candidate(pub u32);

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Dominant colour of an artwork, HSL
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DominantColor {
    /// Hue, degrees
    pub h: f64,
    /// Saturation, percent
    pub s: f64,
    /// Lightness, percent
    pub l: f64,
}

impl DominantColor {
    /// CSS colour string, e.g. `hsl(200 40% 35%)`
    pub fn to_css(&self) -> String {
        format!("hsl({} {}% {}%)", self.h, self.s, self.l)
    }
}

/// Artwork metadata as returned by the artworks endpoint
///
/// Field names follow the AIC wire format. Missing flags deserialize as
/// `false`, which the acceptance predicate rejects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtworkRecord {
    /// AIC artwork id
    pub id: u64,
    /// IIIF image identifier; absent for artworks without a photograph
    #[serde(default)]
    pub image_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub artist_display: Option<String>,
    #[serde(default)]
    pub medium_display: Option<String>,
    #[serde(default)]
    pub place_of_origin: Option<String>,
    #[serde(default)]
    pub style_title: Option<String>,
    #[serde(default)]
    pub color: Option<DominantColor>,
    /// True for works the public has rarely looked at
    #[serde(rename = "has_not_been_viewed_much", default)]
    pub viewed_rarely: bool,
    #[serde(default)]
    pub is_public_domain: bool,
    /// IIIF service base named by the artwork response (`config.iiif_url`)
    #[serde(skip)]
    pub iiif_base_url: Option<String>,
}

/// Image metadata as returned by the images endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRecord {
    /// IIIF service base (`config.iiif_url`)
    pub base_url: String,
    /// Path appended to the base (`data.iiif_url`)
    pub path: String,
    /// Source image width in pixels
    pub width: u32,
    pub alt_text: Option<String>,
    pub credit_line: Option<String>,
    pub license_text: Option<String>,
    pub license_links: Vec<String>,
}

/// A validated artwork and the image fetched for it
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedArt {
    pub artwork: ArtworkRecord,
    pub image: ImageRecord,
}

// ============================================================================
// Errors
// ============================================================================

/// Why the acceptance predicate turned a candidate down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    /// Popular work; only rarely viewed art is shown
    ViewedTooOften,
    /// Nothing to render
    NoAssociatedImage,
    /// Licensing: only public-domain works may be displayed
    NotPublicDomain,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            RejectReason::ViewedTooOften => "artwork is viewed too often",
            RejectReason::NoAssociatedImage => "artwork has no associated image",
            RejectReason::NotPublicDomain => "artwork is not in the public domain",
        };
        f.write_str(text)
    }
}

/// Failure of one fetch attempt
///
/// The resolver treats every variant the same way: retry with a new candidate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    /// Network failure or non-success HTTP status
    #[error("Network error: {0}")]
    Transport(String),

    /// Body did not match the expected record shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Structurally fine, but unsuitable for display
    #[error("Validation failed: {0}")]
    Validation(RejectReason),
}

impl FetchError {
    /// Short machine-readable kind, used in events and logs
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Transport(_) => "transport",
            FetchError::MalformedResponse(_) => "malformed_response",
            FetchError::Validation(_) => "validation",
        }
    }
}

// ============================================================================
// Collaborator traits
// ============================================================================

/// Artwork and image metadata collaborators
///
/// `fetch_artwork` returns only records that passed the acceptance predicate.
#[async_trait::async_trait]
pub trait ArtCatalog: Send + Sync {
    /// Fetch and validate the artwork for one candidate
    async fn fetch_artwork(&self, candidate: Candidate) -> Result<ArtworkRecord, FetchError>;

    /// Fetch image metadata for a validated artwork's image id
    ///
    /// `iiif_base_url` is the base the artwork response named; it becomes the
    /// record's `base_url` when present.
    async fn fetch_image(
        &self,
        image_id: &str,
        iiif_base_url: Option<&str>,
    ) -> Result<ImageRecord, FetchError>;
}

/// Rendering collaborator driven by the resolver
///
/// Per cycle the resolver calls `set_trigger_enabled(false)` first, then
/// exactly one of `on_resolved` / `on_giving_up`, then
/// `set_trigger_enabled(true)` last.
#[async_trait::async_trait]
pub trait ResolutionListener: Send + Sync {
    /// Validated, mutually consistent pair ready for display
    async fn on_resolved(&self, artwork: &ArtworkRecord, image: &ImageRecord);

    /// Attempts exhausted; `last_error` is the final attempt's error
    async fn on_giving_up(&self, last_error: &FetchError);

    /// Guard against overlapping cycles from the same trigger
    async fn set_trigger_enabled(&self, enabled: bool);

    /// Diagnostic hook for each failed attempt
    async fn on_attempt_failed(&self, _attempt: u32, _error: &FetchError) {}
}
