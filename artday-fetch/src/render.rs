//! Display model for resolved art
//!
//! Turns a resolved artwork/image pair (or the last error of a failed cycle)
//! into the serialisable view the front end draws. Missing catalog text is
//! replaced by a placeholder and flagged so the page can style it.

use crate::services::image_url::compose_image_url;
use crate::types::{ArtworkRecord, FetchError, ImageRecord};
use serde::Serialize;

/// One line of display text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayLine {
    pub text: String,
    /// True when `text` is a placeholder for missing data
    pub unknown: bool,
}

/// Heading plus one or more lines
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailSection {
    pub heading: String,
    pub lines: Vec<DisplayLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LicenseView {
    pub text: DisplayLine,
    pub links: Vec<String>,
}

/// Everything needed to draw one artwork
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtworkView {
    pub artwork_id: u64,
    /// Public artwork page
    pub link: String,
    pub image_url: String,
    pub alt_text: Option<String>,
    pub title: Vec<DisplayLine>,
    pub artist: Vec<DisplayLine>,
    pub details: Vec<DetailSection>,
    pub license: LicenseView,
    /// CSS colour derived from the artwork's dominant colour
    pub accent_color: Option<String>,
}

/// Shown when a cycle gives up
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailureView {
    pub heading: String,
    pub subheading: String,
    pub error: String,
}

/// Current page content
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Display {
    Artwork(ArtworkView),
    Failure(FailureView),
}

/// Split on newlines; fall back to `placeholder` when data is absent or empty
fn display_lines(data: Option<&str>, placeholder: &str) -> Vec<DisplayLine> {
    match data.filter(|s| !s.is_empty()) {
        Some(text) => text
            .split('\n')
            .map(|line| DisplayLine {
                text: line.to_string(),
                unknown: false,
            })
            .collect(),
        None => vec![DisplayLine {
            text: placeholder.to_string(),
            unknown: true,
        }],
    }
}

/// `Unknown <field>` placeholder
fn unknown(field: &str) -> String {
    format!("Unknown {}", field)
}

fn section(heading: &str, data: Option<&str>, placeholder: &str) -> DetailSection {
    DetailSection {
        heading: heading.to_string(),
        lines: display_lines(data, placeholder),
    }
}

impl ArtworkView {
    /// Build the view for a resolved pair
    pub fn build(
        artwork: &ArtworkRecord,
        image: &ImageRecord,
        web_base_url: &str,
        target_width: u32,
    ) -> Self {
        let details = vec![
            section("Medium", artwork.medium_display.as_deref(), &unknown("Medium")),
            section(
                "Place of Origin",
                artwork.place_of_origin.as_deref(),
                &unknown("Place of Origin"),
            ),
            section("Style", artwork.style_title.as_deref(), &unknown("Style")),
            section(
                "Image Copyright",
                image.credit_line.as_deref(),
                "No credit information provided",
            ),
        ];

        let license_text = match image.license_text.as_deref().filter(|s| !s.is_empty()) {
            Some(text) => DisplayLine {
                text: text.to_string(),
                unknown: false,
            },
            None => DisplayLine {
                text: "No license information provided.".to_string(),
                unknown: true,
            },
        };

        Self {
            artwork_id: artwork.id,
            link: format!("{}{}", web_base_url, artwork.id),
            image_url: compose_image_url(&image.base_url, &image.path, image.width, target_width),
            alt_text: image.alt_text.clone(),
            title: display_lines(artwork.title.as_deref(), &unknown("Title")),
            artist: display_lines(artwork.artist_display.as_deref(), &unknown("Artist")),
            details,
            license: LicenseView {
                text: license_text,
                links: image.license_links.clone(),
            },
            accent_color: artwork.color.map(|c| c.to_css()),
        }
    }
}

impl FailureView {
    pub fn from_error(error: &FetchError) -> Self {
        Self {
            heading: "Please try again :(".to_string(),
            subheading: "Looks like something went wrong.".to_string(),
            error: error.to_string(),
        }
    }
}
