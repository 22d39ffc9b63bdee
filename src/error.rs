//! Error types for the card rendering and export pipeline

use thiserror::Error;

/// Result type alias for social-snap operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while rendering or exporting a card
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid or missing configuration (e.g. the assist-service credential)
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Failed to fetch or decode an image source (avatar or media)
    #[error("Failed to load image source: {0}")]
    AssetError(String),

    /// Failed to rasterize the card
    #[error("Rendering failed: {0}")]
    RenderError(String),

    /// Failed to encode the raster to the requested format
    #[error("Encoding failed: {0}")]
    EncodeError(String),

    /// An export was requested while another capture is still in flight
    #[error("An export is already in progress")]
    ExportInProgress,

    /// Text-assist service call failed
    #[error("Text generation failed: {0}")]
    AssistError(String),

    /// Filesystem error while writing the exported file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
