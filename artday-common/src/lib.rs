//! # Art of the Day Common Library
//!
//! Shared code for the art-of-the-day services including:
//! - Error and result types
//! - Configuration loading (TOML + environment + CLI priority)
//! - Event types (ArtdayEvent enum) and the broadcast EventBus
//! - SSE helpers

pub mod config;
pub mod error;
pub mod events;
pub mod sse;

pub use error::{Error, Result};
