//! Test Helper Utilities
//!
//! Shared utilities for testing artday-fetch

#![allow(dead_code, unused_imports)]

pub mod catalog;
pub mod stub_aic;

pub use catalog::{
    accepted_artwork, image_record, Call, CallLog, RecordingListener, ScriptedCatalog,
    TEST_IIIF_BASE_URL,
};
pub use stub_aic::{StubAic, StubResponse};
