//! Canvas backdrop style tokens: solid colors, gradient presets, and custom
//! colors picked by the user.

use serde::{Deserialize, Serialize};

/// An RGBA color. Serialized as `#rrggbb` / `#rrggbbaa` hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    /// CSS color string: `#rrggbb` for opaque colors, `rgba(...)` otherwise.
    pub fn to_css(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!(
                "rgba({},{},{},{:.3})",
                self.r,
                self.g,
                self.b,
                f32::from(self.a) / 255.0
            )
        }
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` hex notation.
    pub fn parse(s: &str) -> Option<Self> {
        let hex = s.trim().strip_prefix('#').filter(|h| h.is_ascii())?;
        let channel = |i: usize| u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).ok();
        match hex.len() {
            3 => {
                let nibble = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok();
                let (r, g, b) = (nibble(0)?, nibble(1)?, nibble(2)?);
                Some(Color::rgb(r * 17, g * 17, b * 17))
            }
            6 => Some(Color::rgb(channel(0)?, channel(1)?, channel(2)?)),
            8 => Some(Color::rgba(channel(0)?, channel(1)?, channel(2)?, channel(3)?)),
            _ => None,
        }
    }
}

impl From<Color> for String {
    fn from(c: Color) -> String {
        if c.a == 255 {
            format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", c.r, c.g, c.b, c.a)
        }
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        Color::parse(&s).ok_or_else(|| format!("invalid color: {s:?}"))
    }
}

/// A left-to-right gradient with two or three stops.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gradient {
    pub stops: Vec<Color>,
}

/// Backdrop fill applied to the canvas surface behind the card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Background {
    Solid(Color),
    Gradient(Gradient),
}

/// The predefined gradient swatches offered by the picker.
pub const GRADIENT_PRESETS: &[(&str, &[Color])] = &[
    ("sunset", &[Color::rgb(0xef, 0x44, 0x44), Color::rgb(0xf9, 0x73, 0x16)]),
    (
        "ocean",
        &[
            Color::rgb(0x86, 0xef, 0xac),
            Color::rgb(0x3b, 0x82, 0xf6),
            Color::rgb(0x93, 0x33, 0xea),
        ],
    ),
    (
        "twilight",
        &[
            Color::rgb(0x37, 0x41, 0x51),
            Color::rgb(0x11, 0x18, 0x27),
            Color::rgb(0x00, 0x00, 0x00),
        ],
    ),
    ("emerald", &[Color::rgb(0x10, 0xb9, 0x81), Color::rgb(0x65, 0xa3, 0x0d)]),
    ("purple", &[Color::rgb(0x8b, 0x5c, 0xf6), Color::rgb(0xa8, 0x55, 0xf7)]),
    ("pink", &[Color::rgb(0xd9, 0x46, 0xef), Color::rgb(0xec, 0x48, 0x99)]),
];

impl Background {
    /// Look up a named gradient preset (case-insensitive).
    pub fn preset(name: &str) -> Option<Self> {
        let wanted = name.trim().to_ascii_lowercase();
        GRADIENT_PRESETS
            .iter()
            .find(|(n, _)| *n == wanted)
            .map(|(_, stops)| Background::Gradient(Gradient { stops: stops.to_vec() }))
    }

    /// Resolve a user-supplied token: a preset name or a hex color.
    pub fn parse(token: &str) -> Option<Self> {
        Self::preset(token).or_else(|| Color::parse(token).map(Background::Solid))
    }
}

impl Default for Background {
    /// The picker's initial swatch: a neutral light gray.
    fn default() -> Self {
        Background::Solid(Color::rgb(0xe5, 0xe7, 0xeb))
    }
}
