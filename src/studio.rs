//! Session state: the single owner of the post and presentation settings.
//!
//! All state is created with sample defaults, lives only in memory, and is
//! mutated exclusively through these methods. Mutation is synchronous; the
//! only suspending operation is export, which the [`Exporter`] serializes.

use std::path::PathBuf;

use crate::assist::TextAssist;
use crate::background::Background;
use crate::export::{resolve_scale, ExportSettings, Exporter};
use crate::mock::mock_post;
use crate::{ExportFormat, Layout, PostData, Result, SocialNetwork, Theme};

pub struct Studio {
    post: PostData,
    layout: Layout,
    theme: Theme,
    background: Background,
    settings: ExportSettings,
    custom_scale: String,
    exporter: Exporter,
    assist: TextAssist,
}

impl Studio {
    /// Create a session with the sample post and default presentation
    /// settings, exporting into `out_dir`.
    pub fn new(out_dir: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            post: PostData::sample(),
            layout: Layout::Vertical,
            theme: Theme::Light,
            background: Background::default(),
            settings: ExportSettings::default(),
            custom_scale: "2".to_string(),
            exporter: Exporter::new(out_dir)?,
            assist: TextAssist::from_env()?,
        })
    }

    pub fn post(&self) -> &PostData {
        &self.post
    }

    /// Form fields write through here; the next render sees the new data.
    pub fn post_mut(&mut self) -> &mut PostData {
        &mut self.post
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn set_layout(&mut self, layout: Layout) {
        self.layout = layout;
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn background(&self) -> &Background {
        &self.background
    }

    pub fn set_background(&mut self, background: Background) {
        self.background = background;
    }

    pub fn settings(&self) -> &ExportSettings {
        &self.settings
    }

    /// Switching the source network regenerates mock content, except for
    /// the chrome-less variant, which keeps the current post untouched.
    pub fn set_network(&mut self, network: SocialNetwork) {
        if network == SocialNetwork::None {
            self.post.network = SocialNetwork::None;
        } else {
            self.post = mock_post(network, &mut rand::thread_rng());
        }
    }

    /// Preset scale buttons. Whichever of preset and custom is used last
    /// wins.
    pub fn set_scale_preset(&mut self, scale: f32) {
        self.settings.scale = if scale > 0.0 && scale.is_finite() { scale } else { 1.0 };
    }

    /// Free-text custom scale; lenient normalization applies.
    pub fn set_custom_scale(&mut self, input: &str) {
        self.custom_scale = input.to_string();
        self.settings.scale = resolve_scale(input);
    }

    pub fn custom_scale(&self) -> &str {
        &self.custom_scale
    }

    pub fn set_format(&mut self, format: ExportFormat) {
        self.settings.format = format;
    }

    /// Capture and save the current card. On failure the post and settings
    /// are left exactly as they were.
    pub fn export(&self) -> Result<PathBuf> {
        self.exporter.export(
            &self.post,
            self.layout,
            self.theme,
            &self.background,
            &self.settings,
        )
    }

    /// Ask the assist service for body text; the post changes only on
    /// success.
    pub fn suggest_text(&mut self) -> Result<()> {
        let text = self.assist.suggest_text()?;
        self.post.text = text;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn studio() -> Studio {
        Studio::new(std::env::temp_dir()).unwrap()
    }

    #[test]
    fn starts_with_sample_defaults() {
        let s = studio();
        assert_eq!(s.post(), &PostData::sample());
        assert_eq!(s.layout(), Layout::Vertical);
        assert_eq!(s.theme(), Theme::Light);
        assert_eq!(s.settings().scale, 2.0);
    }

    #[test]
    fn switching_to_none_keeps_content() {
        let mut s = studio();
        let before = s.post().clone();
        s.set_network(SocialNetwork::None);
        assert_eq!(s.post().network, SocialNetwork::None);
        assert_eq!(s.post().display_name, before.display_name);
        assert_eq!(s.post().text, before.text);
    }

    #[test]
    fn switching_to_a_network_regenerates_mock_content() {
        let mut s = studio();
        s.set_network(SocialNetwork::Facebook);
        assert_eq!(s.post().network, SocialNetwork::Facebook);
        assert_eq!(s.post().display_name, "Facebook User");
        assert_eq!(s.post().username, "@facebook_user");
    }

    #[test]
    fn last_scale_path_wins() {
        let mut s = studio();
        s.set_scale_preset(1.0);
        assert_eq!(s.settings().scale, 1.0);
        s.set_custom_scale("3.5");
        assert_eq!(s.settings().scale, 3.5);
        s.set_scale_preset(2.0);
        assert_eq!(s.settings().scale, 2.0);
        s.set_custom_scale("abc");
        assert_eq!(s.settings().scale, 1.0);
        assert_eq!(s.custom_scale(), "abc");
    }

    #[test]
    fn failed_suggestion_leaves_body_unchanged() {
        let mut s = studio();
        // No credential configured in the test environment.
        std::env::remove_var(crate::assist::API_KEY_VAR);
        s.assist = TextAssist::new(None).unwrap();
        let before = s.post().text.clone();
        assert!(s.suggest_text().is_err());
        assert_eq!(s.post().text, before);
    }
}
