//! Resolution services: candidate selection, AIC fetchers, acceptance, retry loop

pub mod acceptance;
pub mod artic_client;
pub mod candidate_selector;
pub mod image_url;
pub mod resolver;

pub use artic_client::ArticClient;
pub use candidate_selector::CandidateSelector;
pub use image_url::compose_image_url;
pub use resolver::{CycleState, Resolution, Resolver};
