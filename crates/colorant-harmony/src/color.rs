//! Conversions between sRGB, HSV, OKLab and OKLCH, and the perceptual difference metric used
//! throughout the engine.
//!
//! All channels are `f64`. sRGB channels are normalized to `[0, 1]`; nothing in here clamps
//! implicitly except [`clip_to_srgb`].

use palette::convert::FromColorUnclamped;
use palette::{encoding, Hsv, Oklab, OklabHue, Oklch, RgbHue, Srgb};

use crate::{Error, Result};

pub const HUE_CIRCLE_MAX: f64 = 360.0;
pub const HUE_DIFFERENCE_MAX: f64 = 180.0;

/// HSV representation with an undefined hue for achromatic colors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HsvColor {
    /// Degrees in `[0, 360)`, `None` when `r == g == b`.
    pub hue: Option<f64>,
    pub saturation: f64,
    pub value: f64,
}

impl HsvColor {
    /// Hue used for arithmetic. Achromatic colors sit at 0.
    pub fn hue_or_zero(&self) -> f64 {
        self.hue.unwrap_or(0.0)
    }
}

pub fn to_hsv(rgb: Srgb<f64>) -> HsvColor {
    let hsv = Hsv::<encoding::Srgb, f64>::from_color_unclamped(rgb);
    let achromatic = rgb.red == rgb.green && rgb.green == rgb.blue;

    HsvColor {
        hue: (!achromatic).then(|| normalize_hue(hsv.hue.into_positive_degrees())),
        saturation: hsv.saturation,
        value: hsv.value,
    }
}

pub fn hsv_to_srgb(hue: f64, saturation: f64, value: f64) -> Srgb<f64> {
    let hsv = Hsv::<encoding::Srgb, f64>::new(RgbHue::from_degrees(hue), saturation, value);
    Srgb::from_color_unclamped(hsv)
}

pub fn to_oklab(rgb: Srgb<f64>) -> Oklab<f64> {
    Oklab::from_color_unclamped(rgb)
}

pub fn to_oklch(rgb: Srgb<f64>) -> Oklch<f64> {
    Oklch::from_color_unclamped(to_oklab(rgb))
}

pub fn oklab_to_oklch(color: Oklab<f64>) -> Oklch<f64> {
    Oklch::from_color_unclamped(color)
}

/// Converts without clamping, so the result may fall outside `[0, 1]`.
pub fn oklab_to_srgb(color: Oklab<f64>) -> Srgb<f64> {
    Srgb::from_color_unclamped(color)
}

pub fn oklch_to_oklab(color: Oklch<f64>) -> Oklab<f64> {
    Oklab::from_color_unclamped(color)
}

/// Converts without clamping, so the result may fall outside `[0, 1]`.
pub fn oklch_to_srgb(color: Oklch<f64>) -> Srgb<f64> {
    oklab_to_srgb(oklch_to_oklab(color))
}

pub fn oklch(l: f64, chroma: f64, hue: f64) -> Oklch<f64> {
    Oklch::new(l, chroma, OklabHue::from_degrees(hue))
}

/// Hue of an OKLCH color in `[0, 360)`. Colors without chroma report 0.
pub fn oklch_hue(color: Oklch<f64>) -> f64 {
    if color.chroma == 0.0 {
        0.0
    } else {
        normalize_hue(color.hue.into_positive_degrees())
    }
}

/// Clamps each sRGB channel into `[0, 1]`.
pub fn clamp_srgb(rgb: Srgb<f64>) -> Srgb<f64> {
    Srgb::new(
        rgb.red.clamp(0.0, 1.0),
        rgb.green.clamp(0.0, 1.0),
        rgb.blue.clamp(0.0, 1.0),
    )
}

/// Round-trips an OKLab color through sRGB clamped to `[0, 1]`, so the result is displayable.
pub fn clip_to_srgb(color: Oklab<f64>) -> Oklab<f64> {
    to_oklab(clamp_srgb(oklab_to_srgb(color)))
}

/// Component-wise average of two OKLab colors.
pub fn oklab_midpoint(a: Oklab<f64>, b: Oklab<f64>) -> Oklab<f64> {
    Oklab::new((a.l + b.l) / 2.0, (a.a + b.a) / 2.0, (a.b + b.b) / 2.0)
}

/// Euclidean distance in OKLCH.
///
/// The hue channel contributes `2 * sqrt(c1 * c2) * sin(dh / 2)`, so the metric is symmetric and
/// does not blow up around the hue seam. Colors with zero chroma contribute no hue term.
pub fn delta_e_ok(color1: Oklch<f64>, color2: Oklch<f64>) -> f64 {
    let dl = color1.l - color2.l;
    let dc = color1.chroma - color2.chroma;
    let dh = hue_chroma_difference(color1, color2);

    (dl * dl + dc * dc + dh * dh).sqrt()
}

fn hue_chroma_difference(color1: Oklch<f64>, color2: Oklch<f64>) -> f64 {
    if color1.chroma == 0.0 || color2.chroma == 0.0 {
        return 0.0;
    }

    let h1 = color1.hue.into_positive_degrees();
    let h2 = color2.hue.into_positive_degrees();
    let half_angle = ((h2 - h1) / 2.0).to_radians();

    2.0 * (color1.chroma * color2.chroma).sqrt() * half_angle.sin()
}

pub fn delta_e_oklab(color1: Oklab<f64>, color2: Oklab<f64>) -> f64 {
    delta_e_ok(oklab_to_oklch(color1), oklab_to_oklch(color2))
}

pub fn delta_e_rgb(color1: Srgb<f64>, color2: Srgb<f64>) -> f64 {
    delta_e_ok(to_oklch(color1), to_oklch(color2))
}

/// Reduces any angle into `[0, 360)`.
pub fn normalize_hue(hue: f64) -> f64 {
    let reduced = hue.rem_euclid(HUE_CIRCLE_MAX);

    // rem_euclid can round tiny negative inputs up to exactly 360
    if reduced >= HUE_CIRCLE_MAX {
        0.0
    } else {
        reduced + 0.0
    }
}

/// Shortest angular distance between two hues, in `[0, 180]`.
pub fn hue_distance(h1: f64, h2: f64) -> f64 {
    let diff = (h1 - h2).abs() % HUE_CIRCLE_MAX;

    if diff > HUE_DIFFERENCE_MAX {
        HUE_CIRCLE_MAX - diff
    } else {
        diff
    }
}

/// Upper-case `#RRGGBB`.
pub fn to_hex(rgb: Srgb<f64>) -> String {
    let r = (rgb.red * 255.0).round().clamp(0.0, 255.0) as u8;
    let g = (rgb.green * 255.0).round().clamp(0.0, 255.0) as u8;
    let b = (rgb.blue * 255.0).round().clamp(0.0, 255.0) as u8;

    format!("#{:02X}{:02X}{:02X}", r, g, b)
}

/// Parses `#RRGGBB` or `#RGB`. The leading `#` is optional.
pub fn parse_hex(input: &str) -> Result<Srgb<f64>> {
    let hex = input.trim().trim_start_matches('#');

    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(Error::InvalidHex(input.to_owned()));
    }

    let expanded = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect::<String>(),
        6 => hex.to_owned(),
        _ => return Err(Error::InvalidHex(input.to_owned())),
    };

    let channel = |i: usize| {
        u8::from_str_radix(&expanded[i..i + 2], 16)
            .map(|v| v as f64 / 255.0)
            .map_err(|_| Error::InvalidHex(input.to_owned()))
    };

    Ok(Srgb::new(channel(0)?, channel(2)?, channel(4)?))
}
