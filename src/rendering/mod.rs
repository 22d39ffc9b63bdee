//! Rendering pipeline: layout -> paint -> raster.

pub mod layout;
pub mod paint;
pub mod raster;

use sha2::{Digest, Sha256};

use crate::assets::ResolvedAssets;
use crate::background::Background;
use crate::network::style_for;
use crate::{ExportFormat, Layout, PostData, Result, Theme};

/// An encoded capture of the canvas host at some scale.
#[derive(Debug, Clone)]
pub struct Capture {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub format: ExportFormat,
}

/// Run the full pipeline for one card: layout, paint, rasterize.
///
/// Pure apart from font loading; identical inputs produce identical bytes
/// within one process.
pub fn render_card(
    post: &PostData,
    layout: Layout,
    theme: Theme,
    background: &Background,
    assets: &ResolvedAssets,
    scale: f32,
    format: ExportFormat,
) -> Result<Capture> {
    let card = layout::layout_card(post, layout, assets);
    let list = paint::build_display_list(&card, post.network, theme, background);
    raster::rasterize(&list, assets, scale, format)
}

/// A textual projection of the rendered card, for tests and inspection.
#[derive(Debug, Clone, PartialEq)]
pub struct CardSnapshot {
    pub display_name: String,
    /// `None` when the network convention hides the handle
    pub username: Option<String>,
    pub body: String,
    pub stat_labels: [&'static str; 3],
    pub has_network_icon: bool,
    pub has_play_overlay: bool,
    pub has_verified_badge: bool,
}

/// Project a post to its textual card representation.
pub fn snapshot(post: &PostData) -> CardSnapshot {
    let style = style_for(post.network);
    CardSnapshot {
        display_name: post.display_name.clone(),
        username: (style.shows_username && !post.username.is_empty())
            .then(|| post.username.clone()),
        body: post.text.clone(),
        stat_labels: [
            style.stat_labels.first,
            style.stat_labels.second,
            style.stat_labels.third,
        ],
        has_network_icon: style.icon.is_some(),
        has_play_overlay: post.is_video && !post.media_url.trim().is_empty(),
        has_verified_badge: post.is_verified,
    }
}

/// Content digest of a display list, used by the golden tests. Hashing the
/// debug form keeps goldens independent of installed fonts.
pub fn display_list_digest(list: &paint::DisplayList) -> String {
    let mut hasher = Sha256::new();
    hasher.update(format!("{list:?}").as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SocialNetwork;

    #[test]
    fn snapshot_labels_follow_network() {
        let mut post = PostData::sample();
        post.network = SocialNetwork::X;
        assert_eq!(snapshot(&post).stat_labels[2], "retweets");
        post.network = SocialNetwork::Facebook;
        assert_eq!(snapshot(&post).stat_labels[2], "shares");
    }

    #[test]
    fn snapshot_hides_username_for_instagram_only() {
        let mut post = PostData::sample();
        post.network = SocialNetwork::Instagram;
        assert!(snapshot(&post).username.is_none());
        post.network = SocialNetwork::X;
        assert_eq!(snapshot(&post).username.as_deref(), Some("@usuario_demo"));
    }

    #[test]
    fn snapshot_reports_no_icon_for_chromeless_variant() {
        let mut post = PostData::sample();
        post.network = SocialNetwork::None;
        assert!(!snapshot(&post).has_network_icon);
    }

    #[test]
    fn digest_is_stable_for_equal_lists() {
        let post = PostData::sample();
        let card = layout::layout_card(&post, Layout::Vertical, &ResolvedAssets::default());
        let a = paint::build_display_list(&card, post.network, Theme::Light, &Background::default());
        let b = paint::build_display_list(&card, post.network, Theme::Light, &Background::default());
        assert_eq!(display_list_digest(&a), display_list_digest(&b));
    }
}
