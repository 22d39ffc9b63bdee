//! Display-list construction.
//!
//! Turns a [`CardLayout`] into paint commands, applying the theme color
//! tokens and the network accent. This stage is pure: the same layout,
//! network, theme and background always produce the same display list, and
//! the stored post text is never modified (hashtag/mention highlighting
//! happens on span boundaries only).

use std::sync::OnceLock;

use regex::Regex;

use crate::background::{Background, Color};
use crate::network::{style_for, IconGlyph};
use crate::rendering::layout::{CardLayout, NodeKind, Rect, CARD_RADIUS};
use crate::{SocialNetwork, Theme};

/// Padding between the card and the edge of the capture region. The padded
/// backdrop, not the card, is what gets captured.
pub const CANVAS_PADDING: u32 = 48;

const NAME_FONT: u32 = 15;
const USERNAME_FONT: u32 = 13;
const BODY_FONT: u32 = 15;
const STAT_FONT: u32 = 14;

/// Theme color tokens. Colors only; geometry is owned by layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemePalette {
    pub card_bg: Color,
    pub name: Color,
    pub body: Color,
    pub secondary: Color,
    pub border: Color,
}

const LIGHT: ThemePalette = ThemePalette {
    card_bg: Color::WHITE,
    name: Color::BLACK,
    body: Color::rgb(0x37, 0x41, 0x51),
    secondary: Color::rgb(0x6b, 0x72, 0x80),
    border: Color::rgb(0xf3, 0xf4, 0xf6),
};

const DARK: ThemePalette = ThemePalette {
    card_bg: Color::BLACK,
    name: Color::WHITE,
    body: Color::rgb(0xd1, 0xd5, 0xdb),
    secondary: Color::rgb(0x9c, 0xa3, 0xaf),
    border: Color::rgb(0x1f, 0x29, 0x37),
};

pub fn palette(theme: Theme) -> &'static ThemePalette {
    match theme {
        Theme::Light => &LIGHT,
        Theme::Dark => &DARK,
    }
}

/// A run of text with one color.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSpan {
    pub text: String,
    pub color: Color,
}

/// Which resolved asset an image command draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSlot {
    Avatar,
    Media,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PaintCommand {
    Fill { rect: Rect, color: Color, radius: u32 },
    Text { x: i32, baseline: i32, size: u32, bold: bool, spans: Vec<TextSpan> },
    Image { rect: Rect, slot: ImageSlot, circular: bool },
    Icon { rect: Rect, glyph: IconGlyph, color: Color },
}

/// The capture region: backdrop, card clip and commands, in paint order.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayList {
    pub width: u32,
    pub height: u32,
    pub background: Background,
    /// Rounded clip region for the card content
    pub card: Rect,
    pub card_radius: u32,
    pub commands: Vec<PaintCommand>,
}

fn token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(#\w+|@\w+)").unwrap())
}

/// Split a line into base/accent spans around hashtag and mention tokens.
pub fn highlight_spans(text: &str, base: Color, accent: Color) -> Vec<TextSpan> {
    let mut spans = Vec::new();
    let mut last = 0;
    for m in token_re().find_iter(text) {
        if m.start() > last {
            spans.push(TextSpan { text: text[last..m.start()].to_string(), color: base });
        }
        spans.push(TextSpan { text: m.as_str().to_string(), color: accent });
        last = m.end();
    }
    if last < text.len() || spans.is_empty() {
        spans.push(TextSpan { text: text[last..].to_string(), color: base });
    }
    spans
}

fn offset(rect: Rect) -> Rect {
    Rect::new(
        rect.x + CANVAS_PADDING as i32,
        rect.y + CANVAS_PADDING as i32,
        rect.width,
        rect.height,
    )
}

fn brand_color(glyph: IconGlyph, pal: &ThemePalette) -> Color {
    match glyph {
        IconGlyph::Instagram => Color::rgb(0xe4, 0x40, 0x5f),
        IconGlyph::Facebook => Color::rgb(0x18, 0x77, 0xf2),
        // The X mark follows the card foreground, like the original's
        // fill-white / fill-black switch.
        _ => pal.name,
    }
}

const BADGE_BLUE: Color = Color::rgb(0x3b, 0x82, 0xf6);
const PLAY_SCRIM: Color = Color::rgba(0, 0, 0, 77);
const PLAY_WHITE: Color = Color::rgba(255, 255, 255, 204);
const PLAY_ICON_SIZE: u32 = 64;

/// Build the display list for a laid-out card.
pub fn build_display_list(
    layout: &CardLayout,
    network: SocialNetwork,
    theme: Theme,
    background: &Background,
) -> DisplayList {
    let pal = palette(theme);
    let accent = style_for(network).accent;
    let card = Rect::new(
        CANVAS_PADDING as i32,
        CANVAS_PADDING as i32,
        layout.width,
        layout.height,
    );

    let mut commands = vec![PaintCommand::Fill {
        rect: card,
        color: pal.card_bg,
        radius: CARD_RADIUS,
    }];

    for node in &layout.nodes {
        let rect = offset(node.rect);
        match &node.kind {
            NodeKind::Avatar => commands.push(PaintCommand::Image {
                rect,
                slot: ImageSlot::Avatar,
                circular: true,
            }),
            NodeKind::DisplayName { text } => commands.push(PaintCommand::Text {
                x: rect.x,
                baseline: rect.y + NAME_FONT as i32,
                size: NAME_FONT,
                bold: true,
                spans: vec![TextSpan { text: text.clone(), color: pal.name }],
            }),
            NodeKind::VerifiedBadge => commands.push(PaintCommand::Icon {
                rect,
                glyph: IconGlyph::Verified,
                color: BADGE_BLUE,
            }),
            NodeKind::Username { text } => commands.push(PaintCommand::Text {
                x: rect.x,
                baseline: rect.y + USERNAME_FONT as i32,
                size: USERNAME_FONT,
                bold: false,
                spans: vec![TextSpan { text: text.clone(), color: pal.secondary }],
            }),
            NodeKind::NetworkIcon { glyph } => commands.push(PaintCommand::Icon {
                rect,
                glyph: *glyph,
                color: brand_color(*glyph, pal),
            }),
            NodeKind::Media => commands.push(PaintCommand::Image {
                rect,
                slot: ImageSlot::Media,
                circular: false,
            }),
            NodeKind::PlayOverlay => {
                commands.push(PaintCommand::Fill { rect, color: PLAY_SCRIM, radius: 0 });
                let cx = rect.x + (rect.width.saturating_sub(PLAY_ICON_SIZE) / 2) as i32;
                let cy = rect.y + (rect.height.saturating_sub(PLAY_ICON_SIZE) / 2) as i32;
                commands.push(PaintCommand::Icon {
                    rect: Rect::new(cx, cy, PLAY_ICON_SIZE, PLAY_ICON_SIZE),
                    glyph: IconGlyph::Play,
                    color: PLAY_WHITE,
                });
            }
            NodeKind::BodyLine { text } => commands.push(PaintCommand::Text {
                x: rect.x,
                baseline: rect.y + BODY_FONT as i32,
                size: BODY_FONT,
                bold: false,
                spans: highlight_spans(text, pal.body, accent),
            }),
            NodeKind::StatsDivider => commands.push(PaintCommand::Fill {
                rect,
                color: pal.border,
                radius: 0,
            }),
            NodeKind::Stat { glyph, label: _, value } => {
                commands.push(PaintCommand::Icon {
                    rect: Rect::new(rect.x, rect.y, 20, 20),
                    glyph: *glyph,
                    color: pal.secondary,
                });
                commands.push(PaintCommand::Text {
                    x: rect.x + 26,
                    baseline: rect.y + STAT_FONT as i32 + 1,
                    size: STAT_FONT,
                    bold: false,
                    spans: vec![TextSpan { text: value.clone(), color: pal.secondary }],
                });
            }
            NodeKind::Timestamp { text } => commands.push(PaintCommand::Text {
                x: rect.x,
                baseline: rect.y + STAT_FONT as i32 + 1,
                size: STAT_FONT,
                bold: false,
                spans: vec![TextSpan { text: text.clone(), color: pal.secondary }],
            }),
        }
    }

    DisplayList {
        width: layout.width + CANVAS_PADDING * 2,
        height: layout.height + CANVAS_PADDING * 2,
        background: background.clone(),
        card,
        card_radius: CARD_RADIUS,
        commands,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::ResolvedAssets;
    use crate::rendering::layout::layout_card;
    use crate::{Layout, PostData};

    #[test]
    fn highlight_wraps_tokens_only() {
        let base = Color::BLACK;
        let accent = Color::rgb(0, 0, 255);
        let spans = highlight_spans("Hello #world and @friend", base, accent);
        let texts: Vec<&str> = spans.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["Hello ", "#world", " and ", "@friend"]);
        assert_eq!(spans[0].color, base);
        assert_eq!(spans[1].color, accent);
        assert_eq!(spans[2].color, base);
        assert_eq!(spans[3].color, accent);
    }

    #[test]
    fn highlight_leaves_stored_text_unchanged() {
        let text = "Hello #world and @friend".to_string();
        let before = text.clone();
        let _ = highlight_spans(&text, Color::BLACK, Color::WHITE);
        assert_eq!(text, before);
    }

    #[test]
    fn plain_text_yields_single_base_span() {
        let spans = highlight_spans("no tokens here", Color::BLACK, Color::WHITE);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].color, Color::BLACK);
    }

    #[test]
    fn display_list_is_deterministic() {
        let post = PostData::sample();
        let layout = layout_card(&post, Layout::Vertical, &ResolvedAssets::default());
        let a = build_display_list(&layout, post.network, Theme::Light, &Background::default());
        let b = build_display_list(&layout, post.network, Theme::Light, &Background::default());
        assert_eq!(a, b);
    }

    #[test]
    fn theme_changes_colors_but_not_geometry() {
        let post = PostData::sample();
        let layout = layout_card(&post, Layout::Vertical, &ResolvedAssets::default());
        let light = build_display_list(&layout, post.network, Theme::Light, &Background::default());
        let dark = build_display_list(&layout, post.network, Theme::Dark, &Background::default());

        assert_eq!(light.width, dark.width);
        assert_eq!(light.height, dark.height);
        assert_eq!(light.commands.len(), dark.commands.len());
        for (l, d) in light.commands.iter().zip(&dark.commands) {
            if let (PaintCommand::Fill { rect: lr, .. }, PaintCommand::Fill { rect: dr, .. }) = (l, d)
            {
                assert_eq!(lr, dr);
            }
        }
        assert_ne!(light.commands, dark.commands);
    }

    #[test]
    fn capture_region_includes_backdrop_padding() {
        let post = PostData::sample();
        let layout = layout_card(&post, Layout::Vertical, &ResolvedAssets::default());
        let list = build_display_list(&layout, post.network, Theme::Light, &Background::default());
        assert_eq!(list.width, layout.width + CANVAS_PADDING * 2);
        assert_eq!(list.height, layout.height + CANVAS_PADDING * 2);
        assert_eq!(list.card.x, CANVAS_PADDING as i32);
    }
}
