//! Per-network visual conventions as a total lookup table.
//!
//! Every `SocialNetwork` value maps to a fixed descriptor (icon, accent
//! color, stat labels, chrome visibility), so adding a network is a data
//! change rather than a control-flow change. `None` maps to a degenerate
//! style with no icon.

use crate::background::Color;
use crate::SocialNetwork;

/// Vector glyphs the renderer knows how to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconGlyph {
    Instagram,
    Facebook,
    XLogo,
    Heart,
    Comment,
    Repeat,
    Play,
    Verified,
}

/// Labels for the three engagement counters, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatLabels {
    pub first: &'static str,
    pub second: &'static str,
    pub third: &'static str,
}

/// Visual convention descriptor for one network.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetworkStyle {
    /// Human-readable network name, empty for the chrome-less variant
    pub name: &'static str,
    /// Header icon; `None` renders no network chrome
    pub icon: Option<IconGlyph>,
    /// Accent color used for hashtag/mention highlighting
    pub accent: Color,
    /// Stat-row labels
    pub stat_labels: StatLabels,
    /// Whether the username line is rendered under the display name
    pub shows_username: bool,
}

const INSTAGRAM: NetworkStyle = NetworkStyle {
    name: "Instagram",
    icon: Some(IconGlyph::Instagram),
    accent: Color::rgb(0x25, 0x63, 0xeb),
    stat_labels: StatLabels { first: "likes", second: "comments", third: "shares" },
    shows_username: false,
};

const FACEBOOK: NetworkStyle = NetworkStyle {
    name: "Facebook",
    icon: Some(IconGlyph::Facebook),
    accent: Color::rgb(0x3b, 0x82, 0xf6),
    stat_labels: StatLabels { first: "likes", second: "comments", third: "shares" },
    shows_username: true,
};

const X: NetworkStyle = NetworkStyle {
    name: "X",
    icon: Some(IconGlyph::XLogo),
    accent: Color::rgb(0x60, 0xa5, 0xfa),
    stat_labels: StatLabels { first: "likes", second: "comments", third: "retweets" },
    shows_username: true,
};

const NONE: NetworkStyle = NetworkStyle {
    name: "",
    icon: None,
    accent: Color::rgb(0x25, 0x63, 0xeb),
    stat_labels: StatLabels { first: "likes", second: "comments", third: "shares" },
    shows_username: true,
};

/// Total mapping from network to its visual descriptor.
pub fn style_for(network: SocialNetwork) -> &'static NetworkStyle {
    match network {
        SocialNetwork::Instagram => &INSTAGRAM,
        SocialNetwork::Facebook => &FACEBOOK,
        SocialNetwork::X => &X,
        SocialNetwork::None => &NONE,
    }
}
