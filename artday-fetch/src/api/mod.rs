//! HTTP API handlers

pub mod art;
pub mod health;
pub mod sse;

pub use art::art_routes;
pub use health::health_routes;
pub use sse::event_stream;
