//! Acceptance predicate for fetched artworks
//!
//! A candidate is shown only if it is rarely viewed, has an image, and is in the
//! public domain. Checks run in that order; the first failure is reported.

use crate::types::{ArtworkRecord, RejectReason};

/// Check an artwork against the display rules
pub fn check(artwork: &ArtworkRecord) -> Result<(), RejectReason> {
    if !artwork.viewed_rarely {
        return Err(RejectReason::ViewedTooOften);
    }

    if artwork.image_id.as_deref().map_or(true, str::is_empty) {
        return Err(RejectReason::NoAssociatedImage);
    }

    if !artwork.is_public_domain {
        return Err(RejectReason::NotPublicDomain);
    }

    Ok(())
}
