//! Image source resolution.
//!
//! Avatar and media fields accept either a remote http(s) URL or an embedded
//! `data:` URL; the renderer treats both uniformly. Sources are resolved to
//! decoded bytes plus intrinsic pixel dimensions *before* rasterization, so
//! the capture never samples a half-loaded image. A failed fetch or decode
//! aborts the export with an [`Error::AssetError`]; nothing is written and
//! no state changes.

use crate::{Error, Result};
use base64::Engine as _;
use reqwest::blocking::Client;
use std::time::Duration;

/// Classified image source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Remote http(s) URL
    Remote(String),
    /// Embedded data URL payload (already base64-decoded)
    Embedded { mime: String, bytes: Vec<u8> },
    /// Empty field: no image
    None,
}

impl ImageSource {
    /// Classify a raw field value. Empty strings mean "no image"; anything
    /// that is neither a data URL nor an http(s) URL is rejected.
    pub fn classify(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(ImageSource::None);
        }
        if let Some(rest) = raw.strip_prefix("data:") {
            let (header, payload) = rest
                .split_once(',')
                .ok_or_else(|| Error::AssetError("malformed data URL".to_string()))?;
            if !header.ends_with(";base64") {
                return Err(Error::AssetError(
                    "only base64 data URLs are supported".to_string(),
                ));
            }
            let mime = header.trim_end_matches(";base64").to_string();
            let bytes = base64::engine::general_purpose::STANDARD
                .decode(payload)
                .map_err(|e| Error::AssetError(format!("invalid base64 payload: {e}")))?;
            return Ok(ImageSource::Embedded { mime, bytes });
        }
        let parsed = url::Url::parse(raw)
            .map_err(|e| Error::AssetError(format!("invalid image URL {raw:?}: {e}")))?;
        match parsed.scheme() {
            "http" | "https" => Ok(ImageSource::Remote(parsed.to_string())),
            other => Err(Error::AssetError(format!(
                "unsupported image URL scheme {other:?}"
            ))),
        }
    }
}

/// A fully loaded image ready to embed in the capture.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub bytes: Vec<u8>,
    pub mime: String,
    pub width: u32,
    pub height: u32,
}

impl LoadedImage {
    fn from_bytes(bytes: Vec<u8>, mime_hint: Option<String>) -> Result<Self> {
        let decoded = image::load_from_memory(&bytes)
            .map_err(|e| Error::AssetError(format!("failed to decode image: {e}")))?;
        let mime = match mime_hint {
            Some(m) if !m.is_empty() => m,
            _ => image::guess_format(&bytes)
                .map(|f| f.to_mime_type().to_string())
                .unwrap_or_else(|_| "image/png".to_string()),
        };
        Ok(Self {
            width: decoded.width(),
            height: decoded.height(),
            bytes,
            mime,
        })
    }

    /// Re-encode the raw bytes as a data URL for embedding in the capture.
    pub fn to_data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime,
            base64::engine::general_purpose::STANDARD.encode(&self.bytes)
        )
    }
}

/// Avatar and media images resolved for one capture.
#[derive(Debug, Clone, Default)]
pub struct ResolvedAssets {
    pub avatar: Option<LoadedImage>,
    pub media: Option<LoadedImage>,
}

/// Fetches avatar/media sources ahead of rasterization.
pub struct AssetFetcher {
    client: Client,
}

impl AssetFetcher {
    /// Default timeout for remote image fetches.
    pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

    pub fn new() -> Result<Self> {
        Self::with_timeout(Duration::from_millis(Self::DEFAULT_TIMEOUT_MS))
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::ConfigError(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    /// Resolve a single field value to a loaded image, or `None` for empty.
    pub fn fetch(&self, raw: &str) -> Result<Option<LoadedImage>> {
        match ImageSource::classify(raw)? {
            ImageSource::None => Ok(None),
            ImageSource::Embedded { mime, bytes } => {
                Ok(Some(LoadedImage::from_bytes(bytes, Some(mime))?))
            }
            ImageSource::Remote(url) => {
                log::debug!("fetching image {url}");
                let resp = self
                    .client
                    .get(&url)
                    .send()
                    .map_err(|e| Error::AssetError(format!("failed to fetch {url}: {e}")))?;
                if !resp.status().is_success() {
                    return Err(Error::AssetError(format!(
                        "failed to fetch {url}: HTTP {}",
                        resp.status()
                    )));
                }
                let mime = resp
                    .headers()
                    .get(reqwest::header::CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok())
                    .map(|s| s.split(';').next().unwrap_or(s).trim().to_string());
                let bytes = resp
                    .bytes()
                    .map_err(|e| Error::AssetError(format!("failed to read {url}: {e}")))?
                    .to_vec();
                Ok(Some(LoadedImage::from_bytes(bytes, mime)?))
            }
        }
    }

    /// Resolve both image fields of a post. This is the "wait for images to
    /// finish loading" step of the capture.
    pub fn resolve(&self, profile_pic: &str, media_url: &str) -> Result<ResolvedAssets> {
        Ok(ResolvedAssets {
            avatar: self.fetch(profile_pic)?,
            media: self.fetch(media_url)?,
        })
    }
}
