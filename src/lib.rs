//! SocialSnap
//!
//! A library (plus a thin CLI) that fabricates a mock social-media post and
//! renders it as a styled card matching one of several social-network visual
//! conventions, then rasterizes the card to a PNG or JPEG image at a chosen
//! scale.
//!
//! # Pipeline
//!
//! - **Layout**: pure function of the post data and layout mode; theme never
//!   affects geometry.
//! - **Paint**: layout nodes become a display list with theme color tokens
//!   and the network accent applied; hashtags and mentions get accent spans.
//! - **Raster**: the display list (card plus padded canvas backdrop) is
//!   rendered at the requested scale and encoded to the requested format.
//!
//! # Example
//!
//! ```no_run
//! use social_snap::{Exporter, ExportSettings, Background, Layout, PostData, Theme};
//!
//! # fn main() -> social_snap::Result<()> {
//! let post = PostData::sample();
//! let exporter = Exporter::new(std::env::temp_dir())?;
//! let settings = ExportSettings::default();
//! let path = exporter.export(&post, Layout::Vertical, Theme::Light, &Background::default(), &settings)?;
//! println!("Exported to {}", path.display());
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};

pub mod error;
pub use error::{Error, Result};

pub mod assets;
pub mod assist;
pub mod background;
pub mod export;
pub mod mock;
pub mod network;
pub mod rendering;
pub mod studio;

pub use assets::{AssetFetcher, ImageSource, LoadedImage, ResolvedAssets};
pub use assist::TextAssist;
pub use background::{Background, Color};
pub use export::{export_filename, resolve_scale, ExportSettings, Exporter};
pub use network::{style_for, NetworkStyle};
pub use rendering::{render_card, snapshot, Capture, CardSnapshot};
pub use studio::Studio;

/// Social network whose visual conventions the card imitates.
///
/// `None` renders the card with no network chrome at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialNetwork {
    Instagram,
    Facebook,
    X,
    None,
}

/// Card arrangement: classic single column, or media beside the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    Vertical,
    Wide,
}

/// Card color scheme. Independent of any ambient light/dark mode of the
/// surrounding application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

/// Output image encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Png,
    Jpeg,
}

impl ExportFormat {
    /// File extension used in export filenames.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpeg",
        }
    }
}

/// All editable fields of a mock post.
///
/// Every field is always present; absence is represented by the empty
/// string. The engagement counters are intentionally free text so arbitrary
/// display formatting ("1.2K", "1,234") survives round trips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostData {
    /// Network whose chrome and stat labels the card uses
    pub network: SocialNetwork,
    /// Author display name
    pub display_name: String,
    /// Author handle; hidden when `network` is Instagram
    pub username: String,
    /// Avatar image source: http(s) URL or data URL, empty for none
    pub profile_pic: String,
    /// Body text; `#word` and `@word` tokens are highlighted at render time
    pub text: String,
    /// Media image source: http(s) URL or data URL, empty for none
    pub media_url: String,
    /// First engagement counter (likes)
    pub likes: String,
    /// Second engagement counter (comments)
    pub comments: String,
    /// Third engagement counter (retweets or shares, per network)
    pub retweets: String,
    /// Free-text relative timestamp, e.g. "1h"
    pub date: String,
    /// Draw a play-icon overlay over the media
    pub is_video: bool,
    /// Draw a verified badge next to the display name
    pub is_verified: bool,
}

impl PostData {
    /// The sample post the application seeds at startup.
    pub fn sample() -> Self {
        Self {
            network: SocialNetwork::Instagram,
            display_name: "Usuario Demo".to_string(),
            username: "@usuario_demo".to_string(),
            profile_pic: "https://picsum.photos/id/237/50/50".to_string(),
            text: "Crea imágenes increíbles de tus posts en redes sociales con SocialSnap Generator. ¡Personaliza y exporta en segundos!".to_string(),
            media_url: "https://picsum.photos/id/1062/600/400".to_string(),
            likes: "1,234".to_string(),
            comments: "56".to_string(),
            retweets: "789".to_string(),
            date: "1h".to_string(),
            is_video: false,
            is_verified: true,
        }
    }

    /// An empty post with no network chrome. Useful as a neutral base in
    /// tests and for callers that fill every field themselves.
    pub fn empty() -> Self {
        Self {
            network: SocialNetwork::None,
            display_name: String::new(),
            username: String::new(),
            profile_pic: String::new(),
            text: String::new(),
            media_url: String::new(),
            likes: String::new(),
            comments: String::new(),
            retweets: String::new(),
            date: String::new(),
            is_video: false,
            is_verified: false,
        }
    }
}

impl Default for PostData {
    fn default() -> Self {
        Self::sample()
    }
}
