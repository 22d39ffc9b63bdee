//! Properties of the pure render pipeline: determinism, per-network
//! conventions, and token highlighting.

use social_snap::assets::ResolvedAssets;
use social_snap::background::{Background, Color};
use social_snap::rendering::layout::{layout_card, NodeKind};
use social_snap::rendering::paint::{build_display_list, highlight_spans};
use social_snap::rendering::{display_list_digest, snapshot};
use social_snap::{Layout, PostData, SocialNetwork, Theme};

fn post_for(network: SocialNetwork) -> PostData {
    let mut post = PostData::sample();
    post.network = network;
    post
}

#[test]
fn render_is_deterministic_across_inputs() {
    for network in [
        SocialNetwork::Instagram,
        SocialNetwork::Facebook,
        SocialNetwork::X,
        SocialNetwork::None,
    ] {
        for layout in [Layout::Vertical, Layout::Wide] {
            for theme in [Theme::Light, Theme::Dark] {
                let post = post_for(network);
                let digest = || {
                    let card = layout_card(&post, layout, &ResolvedAssets::default());
                    let list =
                        build_display_list(&card, post.network, theme, &Background::default());
                    display_list_digest(&list)
                };
                assert_eq!(digest(), digest());
            }
        }
    }
}

#[test]
fn third_stat_label_is_network_appropriate() {
    let third_label = |network: SocialNetwork| {
        let card = layout_card(&post_for(network), Layout::Vertical, &ResolvedAssets::default());
        card.nodes
            .iter()
            .filter_map(|n| match &n.kind {
                NodeKind::Stat { label, .. } => Some(*label),
                _ => None,
            })
            .nth(2)
            .expect("three stats")
    };
    assert_eq!(third_label(SocialNetwork::X), "retweets");
    assert_eq!(third_label(SocialNetwork::Instagram), "shares");
    assert_eq!(third_label(SocialNetwork::Facebook), "shares");
}

#[test]
fn chromeless_variant_renders_no_network_icon() {
    let card = layout_card(
        &post_for(SocialNetwork::None),
        Layout::Vertical,
        &ResolvedAssets::default(),
    );
    assert!(!card
        .nodes
        .iter()
        .any(|n| matches!(n.kind, NodeKind::NetworkIcon { .. })));
    assert!(!snapshot(&post_for(SocialNetwork::None)).has_network_icon);
}

#[test]
fn username_line_omitted_exactly_for_instagram() {
    for network in [
        SocialNetwork::Instagram,
        SocialNetwork::Facebook,
        SocialNetwork::X,
        SocialNetwork::None,
    ] {
        let shown = snapshot(&post_for(network)).username.is_some();
        assert_eq!(shown, network != SocialNetwork::Instagram, "{network:?}");
    }
}

#[test]
fn hashtags_and_mentions_get_accent_spans() {
    let mut post = post_for(SocialNetwork::X);
    post.text = "Hello #world and @friend".to_string();
    let stored = post.text.clone();

    let base = Color::BLACK;
    let accent = Color::rgb(0x60, 0xa5, 0xfa);
    let spans = highlight_spans(&post.text, base, accent);

    let accented: Vec<&str> = spans
        .iter()
        .filter(|s| s.color == accent)
        .map(|s| s.text.as_str())
        .collect();
    assert_eq!(accented, vec!["#world", "@friend"]);
    let plain: String = spans
        .iter()
        .filter(|s| s.color == base)
        .map(|s| s.text.as_str())
        .collect();
    assert_eq!(plain, "Hello  and ");

    // Highlighting is presentation-only; the stored text is untouched.
    assert_eq!(post.text, stored);
}

#[test]
fn background_token_flows_into_the_display_list() {
    let post = post_for(SocialNetwork::Facebook);
    let card = layout_card(&post, Layout::Vertical, &ResolvedAssets::default());
    let solid = build_display_list(
        &card,
        post.network,
        Theme::Light,
        &Background::Solid(Color::rgb(1, 2, 3)),
    );
    let gradient = build_display_list(
        &card,
        post.network,
        Theme::Light,
        &Background::preset("sunset").unwrap(),
    );
    assert_ne!(solid.background, gradient.background);
    // Geometry is unaffected by the backdrop choice.
    assert_eq!(solid.width, gradient.width);
    assert_eq!(solid.height, gradient.height);
}
