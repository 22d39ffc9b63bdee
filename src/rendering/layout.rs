//! Pure card layout.
//!
//! `layout_card` is a pure function of the post data, the layout mode and
//! the resolved image dimensions. Theme is deliberately not an input: color
//! tokens can never change geometry. Both layout strategies share the same
//! header/media/text/stats sub-layouts.

use crate::assets::ResolvedAssets;
use crate::network::{style_for, IconGlyph, NetworkStyle};
use crate::{Layout, PostData};

/// Card width in CSS pixels for the vertical layout.
pub const CARD_WIDTH: u32 = 560;
/// Minimum total width for the wide layout so media is never crushed.
pub const WIDE_MIN_WIDTH: u32 = 640;
/// Corner radius shared by the card surface and the canvas backdrop.
pub const CARD_RADIUS: u32 = 12;

const PAD: u32 = 16;
const AVATAR_SIZE: u32 = 40;
const HEADER_HEIGHT: u32 = PAD + AVATAR_SIZE + PAD;
const LINE_HEIGHT: u32 = 20;
// Estimated average glyph advance for the card's font sizes.
const CHAR_WIDTH: u32 = 8;
const BADGE_SIZE: u32 = 16;
const NETWORK_ICON_SIZE: u32 = 24;
const STAT_ICON_SIZE: u32 = 20;
const STAT_GAP: u32 = 16;
const STATS_HEIGHT: u32 = 1 + PAD + STAT_ICON_SIZE + PAD;
// Intrinsic size assumed when the media source has no resolvable dimensions.
const FALLBACK_MEDIA: (u32, u32) = (600, 400);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }
}

/// Semantic content of a laid-out node. Paint turns these into commands.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Avatar,
    DisplayName { text: String },
    VerifiedBadge,
    Username { text: String },
    NetworkIcon { glyph: IconGlyph },
    Media,
    /// Scrim plus centered play icon; its rect equals the media rect so
    /// toggling video never moves or resizes the media itself.
    PlayOverlay,
    BodyLine { text: String },
    Stat { glyph: IconGlyph, label: &'static str, value: String },
    Timestamp { text: String },
    /// Hairline separating the stats row from the content above it.
    StatsDivider,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutNode {
    pub rect: Rect,
    pub kind: NodeKind,
}

/// The laid-out card: overall CSS dimensions plus positioned nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct CardLayout {
    pub width: u32,
    pub height: u32,
    pub nodes: Vec<LayoutNode>,
}

impl CardLayout {
    /// Rect of the media block, if the card has one.
    pub fn media_rect(&self) -> Option<Rect> {
        self.nodes
            .iter()
            .find(|n| n.kind == NodeKind::Media)
            .map(|n| n.rect)
    }
}

/// Greedy word wrap against an estimated character budget, honoring
/// embedded newlines.
pub fn wrap_text(text: &str, chars_per_line: usize) -> Vec<String> {
    let budget = chars_per_line.max(1);
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut cur = String::new();
        for word in paragraph.split_whitespace() {
            if !cur.is_empty() && cur.len() + word.len() + 1 > budget {
                lines.push(std::mem::take(&mut cur));
            }
            if !cur.is_empty() {
                cur.push(' ');
            }
            cur.push_str(word);
        }
        lines.push(cur);
    }
    // Trailing empty paragraphs collapse; interior blank lines survive.
    while lines.len() > 1 && lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines
}

fn header_nodes(post: &PostData, style: &NetworkStyle, x0: i32, width: u32) -> Vec<LayoutNode> {
    let mut nodes = Vec::new();
    nodes.push(LayoutNode {
        rect: Rect::new(x0 + PAD as i32, PAD as i32, AVATAR_SIZE, AVATAR_SIZE),
        kind: NodeKind::Avatar,
    });

    let name_x = x0 + (PAD + AVATAR_SIZE + 12) as i32;
    let name_w = (post.display_name.chars().count() as u32) * CHAR_WIDTH;
    nodes.push(LayoutNode {
        rect: Rect::new(name_x, 17, name_w, LINE_HEIGHT),
        kind: NodeKind::DisplayName { text: post.display_name.clone() },
    });
    if post.is_verified {
        // Inline after the name; reserves no space when absent.
        nodes.push(LayoutNode {
            rect: Rect::new(name_x + name_w as i32 + 4, 19, BADGE_SIZE, BADGE_SIZE),
            kind: NodeKind::VerifiedBadge,
        });
    }
    if style.shows_username && !post.username.is_empty() {
        nodes.push(LayoutNode {
            rect: Rect::new(
                name_x,
                37,
                (post.username.chars().count() as u32) * CHAR_WIDTH,
                PAD,
            ),
            kind: NodeKind::Username { text: post.username.clone() },
        });
    }
    if let Some(glyph) = style.icon {
        nodes.push(LayoutNode {
            rect: Rect::new(
                x0 + (width - PAD - NETWORK_ICON_SIZE) as i32,
                ((HEADER_HEIGHT - NETWORK_ICON_SIZE) / 2) as i32,
                NETWORK_ICON_SIZE,
                NETWORK_ICON_SIZE,
            ),
            kind: NodeKind::NetworkIcon { glyph },
        });
    }
    nodes
}

/// Lay out the wrapped body text. Returns the nodes and the block height
/// (padding included); an empty block still has its padding in the wide
/// layout, matching the original card.
fn body_nodes(text: &str, x0: i32, top: i32, width: u32) -> (Vec<LayoutNode>, u32) {
    let content_w = width.saturating_sub(PAD * 2);
    let lines = if text.is_empty() {
        Vec::new()
    } else {
        wrap_text(text, (content_w / CHAR_WIDTH) as usize)
    };
    let nodes = lines
        .iter()
        .enumerate()
        .map(|(i, line)| LayoutNode {
            rect: Rect::new(
                x0 + PAD as i32,
                top + (PAD + i as u32 * LINE_HEIGHT) as i32,
                content_w,
                LINE_HEIGHT,
            ),
            kind: NodeKind::BodyLine { text: line.clone() },
        })
        .collect();
    (nodes, PAD * 2 + lines.len() as u32 * LINE_HEIGHT)
}

fn stats_nodes(
    post: &PostData,
    style: &NetworkStyle,
    x0: i32,
    top: i32,
    width: u32,
) -> Vec<LayoutNode> {
    let mut nodes = vec![LayoutNode {
        rect: Rect::new(x0, top, width, 1),
        kind: NodeKind::StatsDivider,
    }];
    let row_y = top + (1 + PAD) as i32;
    let mut x = x0 + PAD as i32;
    let stats = [
        (IconGlyph::Heart, style.stat_labels.first, &post.likes),
        (IconGlyph::Comment, style.stat_labels.second, &post.comments),
        (IconGlyph::Repeat, style.stat_labels.third, &post.retweets),
    ];
    for (glyph, label, value) in stats {
        let w = STAT_ICON_SIZE + 6 + (value.chars().count() as u32) * CHAR_WIDTH;
        nodes.push(LayoutNode {
            rect: Rect::new(x, row_y, w, STAT_ICON_SIZE),
            kind: NodeKind::Stat { glyph, label, value: value.clone() },
        });
        x += (w + STAT_GAP) as i32;
    }
    // Right-aligned, but never pushed past the row's left edge by a very
    // long timestamp.
    let date_w = (post.date.chars().count() as u32) * CHAR_WIDTH;
    nodes.push(LayoutNode {
        rect: Rect::new(
            x0 + width.saturating_sub(PAD + date_w) as i32,
            row_y,
            date_w,
            STAT_ICON_SIZE,
        ),
        kind: NodeKind::Timestamp { text: post.date.clone() },
    });
    nodes
}

fn media_nodes(post: &PostData, rect: Rect) -> Vec<LayoutNode> {
    let mut nodes = vec![LayoutNode { rect, kind: NodeKind::Media }];
    if post.is_video {
        nodes.push(LayoutNode { rect, kind: NodeKind::PlayOverlay });
    }
    nodes
}

fn media_intrinsic(assets: &ResolvedAssets) -> (u32, u32) {
    assets
        .media
        .as_ref()
        .map(|img| (img.width.max(1), img.height.max(1)))
        .unwrap_or(FALLBACK_MEDIA)
}

fn layout_vertical(post: &PostData, style: &NetworkStyle, assets: &ResolvedAssets) -> CardLayout {
    let width = CARD_WIDTH;
    let mut nodes = header_nodes(post, style, 0, width);
    let mut y = HEADER_HEIGHT as i32;

    if !post.media_url.trim().is_empty() {
        let (iw, ih) = media_intrinsic(assets);
        let media_h = ((u64::from(width) * u64::from(ih)) / u64::from(iw)) as u32;
        nodes.extend(media_nodes(post, Rect::new(0, y, width, media_h)));
        y += media_h as i32;
    }

    // The vertical card omits the text block entirely for an empty body.
    if !post.text.is_empty() {
        let (body, body_h) = body_nodes(&post.text, 0, y, width);
        nodes.extend(body);
        y += body_h as i32;
    }

    nodes.extend(stats_nodes(post, style, 0, y, width));
    CardLayout { width, height: y as u32 + STATS_HEIGHT, nodes }
}

// Wide media stretches to fill the left half, so intrinsic dimensions
// play no part here.
fn layout_wide(post: &PostData, style: &NetworkStyle) -> CardLayout {
    let width = CARD_WIDTH.max(WIDE_MIN_WIDTH);
    let half = width / 2;

    let mut nodes = header_nodes(post, style, half as i32, half);
    let (body, body_h) = body_nodes(&post.text, half as i32, HEADER_HEIGHT as i32, half);
    nodes.extend(body);

    let height = HEADER_HEIGHT + body_h + STATS_HEIGHT;
    nodes.extend(stats_nodes(
        post,
        style,
        half as i32,
        (height - STATS_HEIGHT) as i32,
        half,
    ));

    // Media fills the left half at full card height.
    if !post.media_url.trim().is_empty() {
        let media = media_nodes(post, Rect::new(0, 0, half, height));
        nodes.splice(0..0, media);
    }

    CardLayout { width, height, nodes }
}

/// Compute the card layout for the given post and layout mode.
pub fn layout_card(post: &PostData, layout: Layout, assets: &ResolvedAssets) -> CardLayout {
    let style = style_for(post.network);
    match layout {
        Layout::Vertical => layout_vertical(post, style, assets),
        Layout::Wide => layout_wide(post, style),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SocialNetwork;

    fn post() -> PostData {
        PostData::sample()
    }

    #[test]
    fn wrap_respects_budget_and_newlines() {
        let lines = wrap_text("hello world again", 11);
        assert_eq!(lines, vec!["hello world", "again"]);

        let lines = wrap_text("one\ntwo three", 20);
        assert_eq!(lines, vec!["one", "two three"]);
    }

    #[test]
    fn vertical_layout_stacks_header_media_text_stats() {
        let layout = layout_card(&post(), Layout::Vertical, &ResolvedAssets::default());
        assert_eq!(layout.width, CARD_WIDTH);

        let media = layout.media_rect().expect("media present");
        assert_eq!(media.y, HEADER_HEIGHT as i32);
        assert_eq!(media.width, CARD_WIDTH);

        let divider = layout
            .nodes
            .iter()
            .find(|n| n.kind == NodeKind::StatsDivider)
            .unwrap();
        assert!(divider.rect.y > media.y + media.height as i32);
        assert_eq!(layout.height, divider.rect.y as u32 + STATS_HEIGHT);
    }

    #[test]
    fn wide_layout_enforces_minimum_width_and_full_height_media() {
        let layout = layout_card(&post(), Layout::Wide, &ResolvedAssets::default());
        assert!(layout.width >= WIDE_MIN_WIDTH);

        let media = layout.media_rect().unwrap();
        assert_eq!(media, Rect::new(0, 0, layout.width / 2, layout.height));
    }

    #[test]
    fn empty_body_omits_text_block_in_vertical() {
        let mut p = post();
        p.text = String::new();
        let layout = layout_card(&p, Layout::Vertical, &ResolvedAssets::default());
        assert!(!layout
            .nodes
            .iter()
            .any(|n| matches!(n.kind, NodeKind::BodyLine { .. })));
    }

    #[test]
    fn username_omitted_only_for_instagram() {
        let has_username = |network: SocialNetwork| {
            let mut p = post();
            p.network = network;
            layout_card(&p, Layout::Vertical, &ResolvedAssets::default())
                .nodes
                .iter()
                .any(|n| matches!(n.kind, NodeKind::Username { .. }))
        };
        assert!(!has_username(SocialNetwork::Instagram));
        assert!(has_username(SocialNetwork::Facebook));
        assert!(has_username(SocialNetwork::X));
        assert!(has_username(SocialNetwork::None));
    }

    #[test]
    fn play_overlay_matches_media_rect_and_absence_reserves_nothing() {
        let mut p = post();
        p.is_video = false;
        let without = layout_card(&p, Layout::Vertical, &ResolvedAssets::default());
        p.is_video = true;
        let with = layout_card(&p, Layout::Vertical, &ResolvedAssets::default());

        assert_eq!(without.media_rect(), with.media_rect());
        assert_eq!(without.height, with.height);
        let overlay = with
            .nodes
            .iter()
            .find(|n| n.kind == NodeKind::PlayOverlay)
            .unwrap();
        assert_eq!(Some(overlay.rect), with.media_rect());
        assert!(!without.nodes.iter().any(|n| n.kind == NodeKind::PlayOverlay));
    }

    #[test]
    fn verified_badge_reserves_no_space_when_absent() {
        let mut p = post();
        p.is_verified = false;
        let layout = layout_card(&p, Layout::Vertical, &ResolvedAssets::default());
        assert!(!layout.nodes.iter().any(|n| n.kind == NodeKind::VerifiedBadge));
        // The name rect is identical either way.
        p.is_verified = true;
        let with = layout_card(&p, Layout::Vertical, &ResolvedAssets::default());
        let name_rect = |l: &CardLayout| {
            l.nodes
                .iter()
                .find(|n| matches!(n.kind, NodeKind::DisplayName { .. }))
                .unwrap()
                .rect
        };
        assert_eq!(name_rect(&layout), name_rect(&with));
    }

    #[test]
    fn oversized_timestamp_clamps_to_row_start() {
        let mut p = post();
        p.date = "hace muchísimo tiempo, un miércoles por la tarde, poco antes de la merienda".to_string();
        for mode in [Layout::Vertical, Layout::Wide] {
            let layout = layout_card(&p, mode, &ResolvedAssets::default());
            let ts = layout
                .nodes
                .iter()
                .find(|n| matches!(n.kind, NodeKind::Timestamp { .. }))
                .unwrap();
            assert!(ts.rect.x >= 0);
        }
    }

    #[test]
    fn layout_is_deterministic() {
        let a = layout_card(&post(), Layout::Wide, &ResolvedAssets::default());
        let b = layout_card(&post(), Layout::Wide, &ResolvedAssets::default());
        assert_eq!(a, b);
    }
}
