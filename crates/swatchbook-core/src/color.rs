//! Color codec: hex strings, RGB and HSV.
//!
//! Every palette color is a [`HexColor`], which can only hold a fully defined
//! 6-digit value. Partial or malformed user input goes through
//! [`sanitize_hex`] and [`normalize_hex`] instead of being rejected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of hex digits in a color.
pub const HEX_DIGITS: usize = 6;

/// Luminance threshold below which a color counts as dark.
const DARK_LUMINANCE_THRESHOLD: f64 = 0.5;

/// Errors from strict color parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("Invalid hex color: {0:?}")]
    InvalidHex(String),
}

/// An 8-bit RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels normalized to `[0, 1]`.
    pub fn to_unit(self) -> (f64, f64, f64) {
        (
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
        )
    }
}

/// Hue in degrees `[0, 360)`, saturation and value in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Hsv {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

impl Hsv {
    pub const fn new(h: f64, s: f64, v: f64) -> Self {
        Self { h, s, v }
    }

    /// Convert to a hex color.
    pub fn to_hex(self) -> HexColor {
        hsv_to_hex(self.h, self.s, self.v)
    }

    /// Fully saturated, full-value color for this hue.
    ///
    /// Front ends paint the saturation/value field with this as the
    /// right-hand gradient stop.
    pub fn pure_hue_hex(h: f64) -> HexColor {
        hsv_to_hex(h, 1.0, 1.0)
    }
}

/// A fully defined 6-digit color.
///
/// Displays as `#RRGGBB`; serializes the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(Rgb);

impl HexColor {
    pub const BLACK: HexColor = HexColor(Rgb::new(0, 0, 0));
    pub const WHITE: HexColor = HexColor(Rgb::new(255, 255, 255));

    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(Rgb::new(r, g, b))
    }

    /// Strictly parse a 6-digit hex color, with or without a leading `#`.
    pub fn parse(s: &str) -> Result<Self, ColorError> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if !is_valid_hex(digits) {
            return Err(ColorError::InvalidHex(s.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| ColorError::InvalidHex(s.to_string()))
        };
        Ok(Self::from_rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn rgb(self) -> Rgb {
        self.0
    }

    /// Upper-case digits without the `#` (storage and clipboard form).
    pub fn to_bare(self) -> String {
        format!("{:02X}{:02X}{:02X}", self.0.r, self.0.g, self.0.b)
    }

    /// Lower-case digits without the `#` (URL form).
    pub fn to_url(self) -> String {
        format!("{:02x}{:02x}{:02x}", self.0.r, self.0.g, self.0.b)
    }

    pub fn to_hsv(self) -> Hsv {
        hex_to_hsv(self)
    }

    pub fn luminance(self) -> f64 {
        relative_luminance(self)
    }

    pub fn is_dark(self) -> bool {
        is_dark_color(self)
    }
}

impl From<Rgb> for HexColor {
    fn from(rgb: Rgb) -> Self {
        Self(rgb)
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_bare())
    }
}

impl FromStr for HexColor {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for HexColor {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.to_string()
    }
}

/// Overlay ink that stays readable on a given background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ink {
    /// Light text for dark backgrounds.
    Light,
    /// Dark text for light backgrounds.
    Dark,
}

impl Ink {
    pub fn for_background(background: HexColor) -> Self {
        if background.is_dark() {
            Ink::Light
        } else {
            Ink::Dark
        }
    }
}

/// Strip everything outside `[0-9A-Fa-f]`, upper-case, keep at most 6 digits.
pub fn sanitize_hex(input: &str) -> String {
    input
        .chars()
        .filter(char::is_ascii_hexdigit)
        .take(HEX_DIGITS)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Right-pad sanitized input with `0` up to 6 digits.
///
/// A partially typed value like `"3F"` becomes `#3F0000`.
pub fn normalize_hex(partial: &str) -> HexColor {
    let mut digits = sanitize_hex(partial);
    while digits.len() < HEX_DIGITS {
        digits.push('0');
    }
    // Sanitized and padded, so this always holds six hex digits.
    HexColor::parse(&digits).unwrap_or(HexColor::BLACK)
}

/// True iff `s` is exactly six hex digits.
pub fn is_valid_hex(s: &str) -> bool {
    s.len() == HEX_DIGITS && s.chars().all(|c| c.is_ascii_hexdigit())
}

/// Standard RGB to HSV conversion. Achromatic colors get hue 0.
pub fn hex_to_hsv(hex: HexColor) -> Hsv {
    let (r, g, b) = hex.rgb().to_unit();
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let mut h = if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * (((g - b) / delta) % 6.0)
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };
    if h < 0.0 {
        h += 360.0;
    }

    let s = if max == 0.0 { 0.0 } else { delta / max };
    Hsv::new(h, s, max)
}

/// Six-sector HSV to RGB conversion.
pub fn hsv_to_hex(h: f64, s: f64, v: f64) -> HexColor {
    let s = s.clamp(0.0, 1.0);
    let v = v.clamp(0.0, 1.0);
    let c = v * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = if h < 60.0 {
        (c, x, 0.0)
    } else if h < 120.0 {
        (x, c, 0.0)
    } else if h < 180.0 {
        (0.0, c, x)
    } else if h < 240.0 {
        (0.0, x, c)
    } else if h < 300.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    let channel = |n: f64| ((n + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    HexColor::from_rgb(channel(r), channel(g), channel(b))
}

/// `0.2126 R + 0.7152 G + 0.0722 B` over normalized channels.
pub fn relative_luminance(hex: HexColor) -> f64 {
    let (r, g, b) = hex.rgb().to_unit();
    0.2126 * r + 0.7152 * g + 0.0722 * b
}

pub fn is_dark_color(hex: HexColor) -> bool {
    relative_luminance(hex) < DARK_LUMINANCE_THRESHOLD
}

/// Per-channel average, rounding halves up.
pub fn average_hex(a: HexColor, b: HexColor) -> HexColor {
    let avg = |x: u8, y: u8| ((u16::from(x) + u16::from(y) + 1) / 2) as u8;
    let (a, b) = (a.rgb(), b.rgb());
    HexColor::from_rgb(avg(a.r, b.r), avg(a.g, b.g), avg(a.b, b.b))
}

/// Round to a fixed number of decimal places, halves away from zero.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
