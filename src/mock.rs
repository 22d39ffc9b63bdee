//! Placeholder post generation, used when the user switches the source
//! network so the preview immediately shows plausible content.

use rand::Rng;

use crate::{PostData, SocialNetwork};

/// Group digits with commas, e.g. `1234` -> `"1,234"`.
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn network_token(network: SocialNetwork) -> &'static str {
    match network {
        SocialNetwork::Instagram => "instagram",
        SocialNetwork::Facebook => "facebook",
        SocialNetwork::X => "x",
        SocialNetwork::None => "social",
    }
}

fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Fabricate a plausible placeholder post for the given network.
pub fn mock_post(network: SocialNetwork, rng: &mut impl Rng) -> PostData {
    let token = network_token(network);
    PostData {
        network,
        display_name: format!("{} User", capitalize(token)),
        username: format!("@{token}_user"),
        profile_pic: format!("https://i.pravatar.cc/50?u={token}_user"),
        text: format!("Este es un post de ejemplo para {token}. ¡Puedes editar todo el contenido!"),
        media_url: format!("https://picsum.photos/seed/{token}post/600/400"),
        likes: format_count(rng.gen_range(100..5100)),
        comments: format_count(rng.gen_range(10..510)),
        retweets: format_count(rng.gen_range(50..1050)),
        date: format!("{}h", rng.gen_range(1..=23)),
        is_video: rng.gen_bool(0.2),
        is_verified: rng.gen_bool(0.5),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn count_formatting_groups_thousands() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_234), "1,234");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }

    #[test]
    fn mock_post_uses_network_identity() {
        let mut rng = StdRng::seed_from_u64(7);
        let post = mock_post(SocialNetwork::X, &mut rng);
        assert_eq!(post.network, SocialNetwork::X);
        assert_eq!(post.display_name, "X User");
        assert_eq!(post.username, "@x_user");
        assert!(post.media_url.contains("xpost"));
        assert!(!post.likes.is_empty());
    }

    #[test]
    fn mock_post_counters_are_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let post = mock_post(SocialNetwork::Facebook, &mut rng);
            let likes: u64 = post.likes.replace(',', "").parse().unwrap();
            assert!((100..5100).contains(&likes));
            let hours: u32 = post.date.trim_end_matches('h').parse().unwrap();
            assert!((1..=23).contains(&hours));
        }
    }
}
