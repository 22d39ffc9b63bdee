//! Export: scale resolution, filenames, and the capture-to-file flow.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::assets::AssetFetcher;
use crate::background::Background;
use crate::rendering::render_card;
use crate::{Error, ExportFormat, Layout, PostData, Result, Theme};

/// Output magnification and encoding selected by the user.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportSettings {
    /// Capture-time magnification; always positive
    pub scale: f32,
    pub format: ExportFormat,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self { scale: 2.0, format: ExportFormat::Png }
    }
}

/// Resolve a free-text custom scale. Leniency policy: non-numeric or
/// non-positive input normalizes to 1 instead of being rejected, so capture
/// is never attempted with a scale of zero or below.
pub fn resolve_scale(input: &str) -> f32 {
    match input.trim().parse::<f32>() {
        Ok(v) if v > 0.0 && v.is_finite() => v,
        _ => 1.0,
    }
}

fn epoch_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

/// Export filename: `social-snap-<epoch-millis>.<ext>`. Distinct per export
/// under normal clock resolution.
pub fn export_filename(format: ExportFormat) -> String {
    format!("social-snap-{}.{}", epoch_millis(), format.extension())
}

/// Captures the canvas host and writes the encoded image to disk.
///
/// A second export requested while one is still in flight is rejected with
/// [`Error::ExportInProgress`]; captures of a mutating card must not
/// overlap. Every input is borrowed immutably, so a failed export leaves
/// the post and settings untouched.
pub struct Exporter {
    fetcher: AssetFetcher,
    out_dir: PathBuf,
    in_flight: AtomicBool,
}

struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl Exporter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            fetcher: AssetFetcher::new()?,
            out_dir: out_dir.into(),
            in_flight: AtomicBool::new(false),
        })
    }

    /// Directory exported files are written to.
    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Whether a capture is currently in flight.
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    fn begin(&self) -> Result<InFlightGuard<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map_err(|_| Error::ExportInProgress)?;
        Ok(InFlightGuard(&self.in_flight))
    }

    /// Capture the card (waiting for its image sources first), encode it,
    /// and write it to the output directory. Returns the written path.
    pub fn export(
        &self,
        post: &PostData,
        layout: Layout,
        theme: Theme,
        background: &Background,
        settings: &ExportSettings,
    ) -> Result<PathBuf> {
        let _guard = self.begin()?;

        let assets = self.fetcher.resolve(&post.profile_pic, &post.media_url)?;
        let capture = render_card(
            post,
            layout,
            theme,
            background,
            &assets,
            settings.scale,
            settings.format,
        )?;

        let path = self.out_dir.join(export_filename(settings.format));
        std::fs::write(&path, &capture.data)?;
        log::debug!(
            "exported {}x{} {} to {}",
            capture.width,
            capture.height,
            settings.format.extension(),
            path.display()
        );
        Ok(path)
    }
}
