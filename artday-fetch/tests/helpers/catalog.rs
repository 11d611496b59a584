//! Scripted catalog and recording listener
//!
//! Both write to one shared call log so tests can assert the exact order of
//! fetches and listener callbacks.

use artday_fetch::services::acceptance;
use artday_fetch::types::{
    ArtCatalog, ArtworkRecord, Candidate, FetchError, ImageRecord, RejectReason,
    ResolutionListener,
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// One observed interaction
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    FetchArtwork(Candidate),
    FetchImage(String),
    TriggerEnabled(bool),
    Resolved { artwork: ArtworkRecord, image: ImageRecord },
    GaveUp(FetchError),
    AttemptFailed(u32),
}

/// Shared, ordered call log
#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<Call>>>);

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, call: Call) {
        self.0.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.0.lock().unwrap().clear();
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|c| pred(*c)).count()
    }

    pub fn artwork_fetches(&self) -> usize {
        self.count(|c| matches!(c, Call::FetchArtwork(_)))
    }

    pub fn image_fetches(&self) -> usize {
        self.count(|c| matches!(c, Call::FetchImage(_)))
    }
}

/// IIIF base of images whose artwork names none
pub const TEST_IIIF_BASE_URL: &str = "https://x/iiif";

/// Rarely viewed, public-domain artwork with an image
pub fn accepted_artwork(id: u64) -> ArtworkRecord {
    ArtworkRecord {
        id,
        image_id: Some(format!("img-{}", id)),
        title: Some(format!("Artwork {}", id)),
        artist_display: Some("Unknown Maker\nFrench, 19th century".to_string()),
        medium_display: Some("Oil on canvas".to_string()),
        place_of_origin: Some("France".to_string()),
        style_title: None,
        color: None,
        viewed_rarely: true,
        is_public_domain: true,
        iiif_base_url: None,
    }
}

/// Image record for an image id, served from the default test base
pub fn image_record(image_id: &str, width: u32) -> ImageRecord {
    ImageRecord {
        base_url: TEST_IIIF_BASE_URL.to_string(),
        path: format!("/{}", image_id),
        width,
        alt_text: Some("A painting".to_string()),
        credit_line: Some("Public domain".to_string()),
        license_text: Some("CC0".to_string()),
        license_links: vec!["https://creativecommons.org/publicdomain/zero/1.0/".to_string()],
    }
}

/// Catalog answering artwork fetches from a script
///
/// Scripted artwork records pass through the acceptance predicate, like the
/// live client. An exhausted script answers with a popularity rejection.
pub struct ScriptedCatalog {
    log: CallLog,
    artworks: Mutex<VecDeque<Result<ArtworkRecord, FetchError>>>,
    image_failure: Mutex<Option<FetchError>>,
    image_width: u32,
}

impl ScriptedCatalog {
    pub fn new(log: CallLog, script: Vec<Result<ArtworkRecord, FetchError>>) -> Self {
        Self {
            log,
            artworks: Mutex::new(script.into()),
            image_failure: Mutex::new(None),
            image_width: 1200,
        }
    }

    /// Catalog rejecting every candidate
    pub fn always_rejecting(log: CallLog) -> Self {
        Self::new(log, Vec::new())
    }

    /// Fail the next image fetch with `error`
    pub fn fail_next_image(self, error: FetchError) -> Self {
        *self.image_failure.lock().unwrap() = Some(error);
        self
    }

    /// Append more artwork outcomes
    pub fn extend(&self, script: Vec<Result<ArtworkRecord, FetchError>>) {
        self.artworks.lock().unwrap().extend(script);
    }
}

#[async_trait::async_trait]
impl ArtCatalog for ScriptedCatalog {
    async fn fetch_artwork(&self, candidate: Candidate) -> Result<ArtworkRecord, FetchError> {
        self.log.push(Call::FetchArtwork(candidate));

        let next = self.artworks.lock().unwrap().pop_front();
        let artwork = match next {
            Some(result) => result?,
            None => return Err(FetchError::Validation(RejectReason::ViewedTooOften)),
        };

        acceptance::check(&artwork).map_err(FetchError::Validation)?;
        Ok(artwork)
    }

    async fn fetch_image(
        &self,
        image_id: &str,
        iiif_base_url: Option<&str>,
    ) -> Result<ImageRecord, FetchError> {
        self.log.push(Call::FetchImage(image_id.to_string()));

        if let Some(error) = self.image_failure.lock().unwrap().take() {
            return Err(error);
        }
        let mut image = image_record(image_id, self.image_width);
        if let Some(base) = iiif_base_url {
            image.base_url = base.to_string();
        }
        Ok(image)
    }
}

/// Listener writing every callback to the call log
pub struct RecordingListener {
    log: CallLog,
}

impl RecordingListener {
    pub fn new(log: CallLog) -> Self {
        Self { log }
    }
}

#[async_trait::async_trait]
impl ResolutionListener for RecordingListener {
    async fn on_resolved(&self, artwork: &ArtworkRecord, image: &ImageRecord) {
        self.log.push(Call::Resolved {
            artwork: artwork.clone(),
            image: image.clone(),
        });
    }

    async fn on_giving_up(&self, last_error: &FetchError) {
        self.log.push(Call::GaveUp(last_error.clone()));
    }

    async fn set_trigger_enabled(&self, enabled: bool) {
        self.log.push(Call::TriggerEnabled(enabled));
    }

    async fn on_attempt_failed(&self, attempt: u32, _error: &FetchError) {
        self.log.push(Call::AttemptFailed(attempt));
    }
}
