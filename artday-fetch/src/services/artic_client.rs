//! Art Institute of Chicago API client
//!
//! Artwork and image metadata fetchers behind [`ArtCatalog`]. Every request
//! carries an explicit field selection and the `AIC-User-Agent` courtesy header.
//!
//! API reference: https://api.artic.edu/docs/

use crate::services::acceptance;
use crate::types::{ArtCatalog, ArtworkRecord, Candidate, FetchError, ImageRecord};
use artday_common::config::{ArtdayConfig, LookupMode};
use artday_common::{Error, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

/// Header AIC asks API consumers to identify themselves with
pub const AIC_USER_AGENT_HEADER: &str = "AIC-User-Agent";

/// IIIF base used when neither response names `config.iiif_url`
pub const DEFAULT_IIIF_BASE_URL: &str = "https://www.artic.edu/iiif/2";

/// Fields requested from the artworks endpoint
pub const ARTWORK_FIELDS: &[&str] = &[
    "id",
    "image_id",
    "title",
    "artist_display",
    "medium_display",
    "place_of_origin",
    "style_title",
    "color",
    "has_not_been_viewed_much",
    "is_public_domain",
];

/// Fields requested from the images endpoint
pub const IMAGE_FIELDS: &[&str] = &["alt_text", "credit_line", "iiif_url", "width"];

/// Search filters: public domain, rarely viewed, has an image, one random hit
const SEARCH_PARAMS: &[&str] = &[
    "&query[function_score][query][bool][filter][][term][is_public_domain]=true",
    "&query[function_score][query][bool][filter][][term][has_not_been_viewed_much]=true",
    "&query[function_score][query][bool][filter][][exists][field]=image_id",
    "&query[function_score][boost_mode]=replace",
    "&query[function_score][random_score][field]=id",
    "&resources=artworks&boost=false&limit=1",
];

/// `?fields=a,b,c`
pub fn fields_query(fields: &[&str]) -> String {
    format!("?fields={}", fields.join(","))
}

// ============================================================================
// Wire format
// ============================================================================

#[derive(Debug, Deserialize)]
struct ApiConfig {
    iiif_url: Option<String>,
}

/// The by-id endpoint returns an object, the search endpoint an array
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ArtworkData {
    One(ArtworkRecord),
    Many(Vec<ArtworkRecord>),
}

#[derive(Debug, Deserialize)]
struct ArtworkEnvelope {
    data: ArtworkData,
    #[serde(default)]
    config: Option<ApiConfig>,
}

#[derive(Debug, Deserialize)]
struct ImageData {
    iiif_url: String,
    width: u32,
    #[serde(default)]
    alt_text: Option<String>,
    #[serde(default)]
    credit_line: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ImageInfo {
    #[serde(default)]
    license_text: Option<String>,
    #[serde(default)]
    license_links: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ImageEnvelope {
    data: ImageData,
    #[serde(default)]
    info: Option<ImageInfo>,
    #[serde(default)]
    config: Option<ApiConfig>,
}

/// Parse an artworks response body into a single record
///
/// The record keeps the response's `config.iiif_url` for the image fetch.
fn parse_artwork(body: &str) -> std::result::Result<ArtworkRecord, FetchError> {
    let envelope: ArtworkEnvelope = serde_json::from_str(body)
        .map_err(|e| FetchError::MalformedResponse(format!("artwork: {}", e)))?;

    let mut artwork = match envelope.data {
        ArtworkData::One(artwork) => artwork,
        ArtworkData::Many(artworks) => artworks.into_iter().next().ok_or_else(|| {
            FetchError::MalformedResponse("artwork search returned no results".to_string())
        })?,
    };
    artwork.iiif_base_url = envelope.config.and_then(|c| c.iiif_url);
    Ok(artwork)
}

/// Parse an images response body
///
/// Base URL priority: the artwork response's IIIF base, then the image
/// response's own `config.iiif_url`, then [`DEFAULT_IIIF_BASE_URL`].
fn parse_image(
    body: &str,
    iiif_base_url: Option<&str>,
) -> std::result::Result<ImageRecord, FetchError> {
    let envelope: ImageEnvelope = serde_json::from_str(body)
        .map_err(|e| FetchError::MalformedResponse(format!("image: {}", e)))?;

    let info = envelope.info.unwrap_or_default();
    let base_url = match iiif_base_url {
        Some(base) => base.to_string(),
        None => envelope
            .config
            .and_then(|c| c.iiif_url)
            .unwrap_or_else(|| DEFAULT_IIIF_BASE_URL.to_string()),
    };

    Ok(ImageRecord {
        base_url,
        path: envelope.data.iiif_url,
        width: envelope.data.width,
        alt_text: envelope.data.alt_text,
        credit_line: envelope.data.credit_line,
        license_text: info.license_text,
        license_links: info.license_links,
    })
}

// ============================================================================
// Client
// ============================================================================

/// AIC API client
pub struct ArticClient {
    http_client: reqwest::Client,
    api_base_url: String,
    lookup_mode: LookupMode,
    artwork_fields: String,
    image_fields: String,
}

impl ArticClient {
    /// Build a client from service configuration
    ///
    /// A request timeout is set only when `request_timeout_secs` is configured.
    pub fn new(config: &ArtdayConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let user_agent = HeaderValue::from_str(&config.user_agent)
            .map_err(|e| Error::Config(format!("Invalid user_agent: {}", e)))?;
        headers.insert(AIC_USER_AGENT_HEADER, user_agent);

        let mut builder = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers);
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let http_client = builder
            .build()
            .map_err(|e| Error::Internal(format!("HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            api_base_url: config.api_base_url.clone(),
            lookup_mode: config.lookup_mode,
            artwork_fields: fields_query(ARTWORK_FIELDS),
            image_fields: fields_query(IMAGE_FIELDS),
        })
    }

    /// Artwork request URL for a candidate
    ///
    /// In search mode the candidate seeds the random score instead of naming
    /// an artwork directly.
    pub fn artwork_url(&self, candidate: Candidate) -> String {
        match self.lookup_mode {
            LookupMode::ById => format!(
                "{}artworks/{}{}",
                self.api_base_url, candidate, self.artwork_fields
            ),
            LookupMode::Search => format!(
                "{}search{}{}&query[function_score][random_score][seed]={}",
                self.api_base_url,
                self.artwork_fields,
                SEARCH_PARAMS.concat(),
                candidate
            ),
        }
    }

    /// Image request URL for an image id
    pub fn image_url(&self, image_id: &str) -> String {
        format!("{}images/{}{}", self.api_base_url, image_id, self.image_fields)
    }

    /// GET a URL and return the body of a success response
    async fn get_text(&self, url: &str) -> std::result::Result<String, FetchError> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(FetchError::Transport(format!(
                "HTTP {}: {}",
                status.as_u16(),
                error_text
            )));
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))
    }
}

#[async_trait]
impl ArtCatalog for ArticClient {
    async fn fetch_artwork(&self, candidate: Candidate) -> std::result::Result<ArtworkRecord, FetchError> {
        let url = self.artwork_url(candidate);
        debug!(candidate = %candidate, url = %url, "Querying AIC artworks endpoint");

        let body = self.get_text(&url).await?;
        let artwork = parse_artwork(&body)?;

        acceptance::check(&artwork).map_err(FetchError::Validation)?;

        info!(
            candidate = %candidate,
            artwork_id = artwork.id,
            title = %artwork.title.as_deref().unwrap_or("Unknown"),
            "Artwork accepted"
        );

        Ok(artwork)
    }

    async fn fetch_image(
        &self,
        image_id: &str,
        iiif_base_url: Option<&str>,
    ) -> std::result::Result<ImageRecord, FetchError> {
        let url = self.image_url(image_id);
        debug!(image_id = %image_id, url = %url, "Querying AIC images endpoint");

        let body = self.get_text(&url).await?;
        parse_image(&body, iiif_base_url)
    }
}
