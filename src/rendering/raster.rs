//! Rasterization: display list -> SVG -> pixmap -> encoded image.
//!
//! The display list is serialized to an SVG document (fetched images are
//! embedded as base64 data URLs, so the raster never samples a half-loaded
//! image), rendered with resvg at the requested scale, and encoded to PNG or
//! JPEG. A scale of 2 turns every CSS pixel into a 2x2 block in the output.

use std::fmt::Write as _;
use std::sync::Arc;

use tiny_skia::Pixmap;

use crate::assets::ResolvedAssets;
use crate::background::{Background, Color};
use crate::network::IconGlyph;
use crate::rendering::paint::{DisplayList, ImageSlot, PaintCommand};
use crate::rendering::Capture;
use crate::{Error, ExportFormat, Result};

const PLACEHOLDER: Color = Color::rgb(0xd1, 0xd5, 0xdb);

/// 24x24 viewBox fill paths for the glyphs the renderer draws.
fn glyph_path(glyph: IconGlyph) -> &'static str {
    match glyph {
        IconGlyph::Heart => {
            "M12 21s-7.5-4.9-10-9.2C.5 8.6 2.2 4.5 6 4.5c2.2 0 3.7 1.2 6 3.6 2.3-2.4 3.8-3.6 6-3.6 3.8 0 5.5 4.1 4 7.3C19.5 16.1 12 21 12 21z"
        }
        IconGlyph::Comment => {
            "M12 2a10 10 0 0 0-8.9 14.6L2 22l5.4-1.1A10 10 0 1 0 12 2zm0 2a8 8 0 1 1-4.1 14.9l-.7-.4-2.8.6.6-2.8-.4-.7A8 8 0 0 1 12 4z"
        }
        IconGlyph::Repeat => {
            "M17 2l4 4-4 4V7H7a2 2 0 0 0-2 2v2H3V9a4 4 0 0 1 4-4h10V2zM7 22l-4-4 4-4v3h10a2 2 0 0 0 2-2v-2h2v2a4 4 0 0 1-4 4H7v3z"
        }
        IconGlyph::Play => {
            "M12 2a10 10 0 1 0 0 20 10 10 0 0 0 0-20zm-2 6.2 6.5 3.8L10 15.8V8.2z"
        }
        IconGlyph::Verified => {
            "M12 1.5l2.6 2 3.3-.3 1 3.1 2.9 1.7-1.3 3 1.3 3-2.9 1.7-1 3.1-3.3-.3-2.6 2-2.6-2-3.3.3-1-3.1L2.2 14l1.3-3-1.3-3 2.9-1.7 1-3.1 3.3.3L12 1.5zm-1.2 13.6 5.5-5.5-1.4-1.4-4.1 4.1-1.7-1.7-1.4 1.4 3.1 3.1z"
        }
        IconGlyph::Instagram => {
            "M7 2h10a5 5 0 0 1 5 5v10a5 5 0 0 1-5 5H7a5 5 0 0 1-5-5V7a5 5 0 0 1 5-5zm0 2a3 3 0 0 0-3 3v10a3 3 0 0 0 3 3h10a3 3 0 0 0 3-3V7a3 3 0 0 0-3-3H7zm5 3.5A5.5 5.5 0 1 1 6.5 13 5.5 5.5 0 0 1 12 7.5zm0 2A3.5 3.5 0 1 0 15.5 13 3.5 3.5 0 0 0 12 9.5zM17.8 5a1.2 1.2 0 1 1-1.2 1.2A1.2 1.2 0 0 1 17.8 5z"
        }
        IconGlyph::Facebook => {
            "M22 12a10 10 0 1 0-11.6 9.9v-7H7.9V12h2.5V9.8c0-2.5 1.5-3.9 3.8-3.9 1.1 0 2.2.2 2.2.2v2.5h-1.3c-1.2 0-1.6.8-1.6 1.6V12h2.8l-.4 2.9h-2.4v7A10 10 0 0 0 22 12z"
        }
        IconGlyph::XLogo => {
            "M18.2 2H21l-6.6 7.6L22.2 22h-6.1l-4.8-6.3L5.8 22H3l7.1-8.1L2 2h6.2l4.3 5.7L18.2 2zm-1.1 18h1.7L7 3.9H5.2L17.1 20z"
        }
    }
}

fn escape_xml(input: &str) -> String {
    let mut s = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => s.push_str("&amp;"),
            '<' => s.push_str("&lt;"),
            '>' => s.push_str("&gt;"),
            '"' => s.push_str("&quot;"),
            '\'' => s.push_str("&apos;"),
            _ => s.push(ch),
        }
    }
    s
}

fn fill_attrs(color: Color) -> String {
    if color.a == 255 {
        format!("fill=\"{}\"", color.to_css())
    } else {
        format!(
            "fill=\"#{:02x}{:02x}{:02x}\" fill-opacity=\"{:.3}\"",
            color.r,
            color.g,
            color.b,
            f32::from(color.a) / 255.0
        )
    }
}

/// Serialize the display list to a standalone SVG document.
pub fn build_svg(list: &DisplayList, assets: &ResolvedAssets) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" xmlns:xlink=\"http://www.w3.org/1999/xlink\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">",
        w = list.width,
        h = list.height
    );

    // Defs: backdrop gradient and the rounded card clip.
    let _ = writeln!(out, "<defs>");
    if let Background::Gradient(g) = &list.background {
        let _ = writeln!(
            out,
            "  <linearGradient id=\"backdrop\" x1=\"0\" y1=\"0\" x2=\"1\" y2=\"0\">"
        );
        let n = g.stops.len().max(2) - 1;
        for (i, stop) in g.stops.iter().enumerate() {
            let _ = writeln!(
                out,
                "    <stop offset=\"{:.3}\" stop-color=\"{}\"/>",
                i as f32 / n as f32,
                stop.to_css()
            );
        }
        let _ = writeln!(out, "  </linearGradient>");
    }
    let _ = writeln!(
        out,
        "  <clipPath id=\"card\"><rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" rx=\"{}\"/></clipPath>",
        list.card.x, list.card.y, list.card.width, list.card.height, list.card_radius
    );
    let mut clip_id = 0usize;
    for cmd in &list.commands {
        if let PaintCommand::Image { rect, circular: true, .. } = cmd {
            let _ = writeln!(
                out,
                "  <clipPath id=\"circle{}\"><circle cx=\"{}\" cy=\"{}\" r=\"{}\"/></clipPath>",
                clip_id,
                rect.x + (rect.width / 2) as i32,
                rect.y + (rect.height / 2) as i32,
                rect.width / 2,
            );
            clip_id += 1;
        }
    }
    let _ = writeln!(out, "</defs>");

    // Backdrop: the padded canvas host is the capture target.
    let backdrop_fill = match &list.background {
        Background::Solid(c) => fill_attrs(*c),
        Background::Gradient(_) => "fill=\"url(#backdrop)\"".to_string(),
    };
    let _ = writeln!(
        out,
        "<rect width=\"{}\" height=\"{}\" rx=\"{}\" {}/>",
        list.width, list.height, list.card_radius, backdrop_fill
    );

    // Card content, clipped to the rounded card region.
    let _ = writeln!(out, "<g clip-path=\"url(#card)\">");
    let mut circle = 0usize;
    for cmd in &list.commands {
        match cmd {
            PaintCommand::Fill { rect, color, radius } => {
                let _ = writeln!(
                    out,
                    "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" rx=\"{}\" {}/>",
                    rect.x,
                    rect.y,
                    rect.width,
                    rect.height,
                    radius,
                    fill_attrs(*color)
                );
            }
            PaintCommand::Text { x, baseline, size, bold, spans } => {
                let weight = if *bold { " font-weight=\"bold\"" } else { "" };
                let _ = write!(
                    out,
                    "  <text x=\"{x}\" y=\"{baseline}\" font-family=\"sans-serif\" font-size=\"{size}\"{weight}>"
                );
                for span in spans {
                    let _ = write!(
                        out,
                        "<tspan fill=\"{}\">{}</tspan>",
                        span.color.to_css(),
                        escape_xml(&span.text)
                    );
                }
                let _ = writeln!(out, "</text>");
            }
            PaintCommand::Image { rect, slot, circular } => {
                let asset = match slot {
                    ImageSlot::Avatar => assets.avatar.as_ref(),
                    ImageSlot::Media => assets.media.as_ref(),
                };
                let clip = if *circular {
                    let attr = format!(" clip-path=\"url(#circle{circle})\"");
                    circle += 1;
                    attr
                } else {
                    String::new()
                };
                match asset {
                    Some(img) => {
                        let _ = writeln!(
                            out,
                            "  <image x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" preserveAspectRatio=\"xMidYMid slice\"{} xlink:href=\"{}\"/>",
                            rect.x,
                            rect.y,
                            rect.width,
                            rect.height,
                            clip,
                            img.to_data_url()
                        );
                    }
                    None => {
                        let _ = writeln!(
                            out,
                            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"{} {}/>",
                            rect.x,
                            rect.y,
                            rect.width,
                            rect.height,
                            clip,
                            fill_attrs(PLACEHOLDER)
                        );
                    }
                }
            }
            PaintCommand::Icon { rect, glyph, color } => {
                let scale = f64::from(rect.width) / 24.0;
                let _ = writeln!(
                    out,
                    "  <g transform=\"translate({} {}) scale({:.4})\"><path d=\"{}\" {}/></g>",
                    rect.x,
                    rect.y,
                    scale,
                    glyph_path(*glyph),
                    fill_attrs(*color)
                );
            }
        }
    }
    let _ = writeln!(out, "</g>");
    let _ = writeln!(out, "</svg>");
    out
}

/// Render the display list at `scale` and encode it per `format`.
///
/// Callers must pass a positive scale; the exporter's scale resolution
/// guarantees this for user input.
pub fn rasterize(
    list: &DisplayList,
    assets: &ResolvedAssets,
    scale: f32,
    format: ExportFormat,
) -> Result<Capture> {
    if !(scale > 0.0) {
        return Err(Error::RenderError(format!("invalid scale {scale}")));
    }

    let svg = build_svg(list, assets);
    log::debug!(
        "rasterizing {}x{} CSS px at scale {scale} ({} bytes of SVG)",
        list.width,
        list.height,
        svg.len()
    );

    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();
    let mut opt = usvg::Options::default();
    opt.fontdb = Arc::new(db);

    let tree = usvg::Tree::from_data(svg.as_bytes(), &opt)
        .map_err(|e| Error::RenderError(format!("failed to build render tree: {e}")))?;

    let px_w = (list.width as f32 * scale).ceil() as u32;
    let px_h = (list.height as f32 * scale).ceil() as u32;
    let mut pixmap = Pixmap::new(px_w, px_h)
        .ok_or_else(|| Error::RenderError(format!("cannot allocate {px_w}x{px_h} pixmap")))?;
    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );

    let data = match format {
        ExportFormat::Png => pixmap
            .encode_png()
            .map_err(|e| Error::EncodeError(format!("PNG encoding failed: {e}")))?,
        ExportFormat::Jpeg => encode_jpeg(&pixmap)?,
    };

    Ok(Capture { width: px_w, height: px_h, data, format })
}

/// JPEG has no alpha channel: composite over white, encode at max quality.
fn encode_jpeg(pixmap: &Pixmap) -> Result<Vec<u8>> {
    let mut rgb = Vec::with_capacity(pixmap.pixels().len() * 3);
    for px in pixmap.pixels() {
        let c = px.demultiply();
        let over_white = |v: u8, a: u8| -> u8 {
            let blended = u16::from(v) * u16::from(a) / 255 + 255 - u16::from(a);
            blended.min(255) as u8
        };
        rgb.push(over_white(c.red(), c.alpha()));
        rgb.push(over_white(c.green(), c.alpha()));
        rgb.push(over_white(c.blue(), c.alpha()));
    }

    let mut out = Vec::new();
    let mut encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, 100);
    encoder
        .encode(
            &rgb,
            pixmap.width(),
            pixmap.height(),
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| Error::EncodeError(format!("JPEG encoding failed: {e}")))?;
    Ok(out)
}
