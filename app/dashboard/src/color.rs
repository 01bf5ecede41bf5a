//! FILENAME: app/dashboard/src/color.rs
// PURPOSE: Sequential colour maps for table gradients.

use palette::color_difference::Wcag21RelativeContrast;
use palette::{LinSrgb, Mix, Srgb};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn from_hex(hex: u32) -> Self {
        Rgb {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
        }
    }

    pub fn to_hex(&self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }

    /// CSS form, `#rrggbb`.
    pub fn to_css(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    fn to_srgb(self) -> Srgb<f32> {
        Srgb::new(self.r, self.g, self.b).into_format()
    }

    fn from_srgb(color: Srgb<f32>) -> Self {
        let c: Srgb<u8> = color.into_format();
        Rgb {
            r: c.red,
            g: c.green,
            b: c.blue,
        }
    }

    /// Blend towards `other` by `t`, in linear light.
    pub fn mix(self, other: Rgb, t: f32) -> Rgb {
        let a: LinSrgb<f32> = self.to_srgb().into_linear();
        let b: LinSrgb<f32> = other.to_srgb().into_linear();
        Rgb::from_srgb(Srgb::from_linear(a.mix(b, t)))
    }

    /// WCAG relative luminance in `0.0..=1.0`.
    pub fn relative_luminance(&self) -> f32 {
        self.to_srgb().relative_luminance().luma
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

/// Text on backgrounds darker than this switches to a light colour.
const TEXT_LUMINANCE_THRESHOLD: f32 = 0.408;
pub const DARK_TEXT: Rgb = Rgb::from_hex(0x000000);
pub const LIGHT_TEXT: Rgb = Rgb::from_hex(0xF1F1F1);

const BLUES: [u32; 9] = [
    0xF7FBFF, 0xDEEBF7, 0xC6DBEF, 0x9ECAE1, 0x6BAED6, 0x4292C6, 0x2171B5, 0x08519C, 0x08306B,
];
const ORANGES: [u32; 9] = [
    0xFFF5EB, 0xFEE6CE, 0xFDD0A2, 0xFDAE6B, 0xFD8D3C, 0xF16913, 0xD94801, 0xA63603, 0x7F2704,
];
const CIVIDIS: [u32; 10] = [
    0x00224E, 0x123570, 0x3B496C, 0x575D6D, 0x707173, 0x8A8779, 0xA69D75, 0xC4B56C, 0xE4CF5B,
    0xFEE838,
];

/// Named sequential colour maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorScale {
    Blues,
    Oranges,
    Cividis,
}

impl ColorScale {
    fn stops(&self) -> &'static [u32] {
        match self {
            ColorScale::Blues => &BLUES,
            ColorScale::Oranges => &ORANGES,
            ColorScale::Cividis => &CIVIDIS,
        }
    }

    /// Colour at position `t`, clamped to `0.0..=1.0`.
    pub fn at(&self, t: f64) -> Rgb {
        let stops = self.stops();
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let scaled = t * (stops.len() - 1) as f64;
        let lower = scaled.floor() as usize;
        let upper = (lower + 1).min(stops.len() - 1);
        let t = (scaled - lower as f64) as f32;
        Rgb::from_hex(stops[lower]).mix(Rgb::from_hex(stops[upper]), t)
    }

    /// Colour for `value` with the map stretched over `[min, max]`.
    /// A degenerate range maps everything to the lowest colour.
    pub fn for_value(&self, value: f64, min: f64, max: f64) -> Rgb {
        let range = max - min;
        if range <= 0.0 || !range.is_finite() {
            return self.at(0.0);
        }
        self.at((value - min) / range)
    }
}

/// Readable text colour for a background.
pub fn text_color_for(background: Rgb) -> Rgb {
    if background.relative_luminance() < TEXT_LUMINANCE_THRESHOLD {
        LIGHT_TEXT
    } else {
        DARK_TEXT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_match_first_and_last_stop() {
        assert_eq!(ColorScale::Blues.at(0.0), Rgb::from_hex(0xF7FBFF));
        assert_eq!(ColorScale::Blues.at(1.0), Rgb::from_hex(0x08306B));
        assert_eq!(ColorScale::Oranges.at(2.0), Rgb::from_hex(0x7F2704));
        assert_eq!(ColorScale::Cividis.at(-1.0), Rgb::from_hex(0x00224E));
    }

    #[test]
    fn values_stretch_over_range() {
        let low = ColorScale::Blues.for_value(10.0, 10.0, 20.0);
        let high = ColorScale::Blues.for_value(20.0, 10.0, 20.0);
        assert_eq!(low, ColorScale::Blues.at(0.0));
        assert_eq!(high, ColorScale::Blues.at(1.0));
        assert_eq!(ColorScale::Blues.for_value(5.0, 5.0, 5.0), ColorScale::Blues.at(0.0));
    }

    #[test]
    fn midpoint_interpolates() {
        // Halfway between the 5th and 6th of 9 stops is t = 0.5625
        let mid = ColorScale::Blues.at(4.5 / 8.0);
        assert_eq!(mid, Rgb::from_hex(0x6BAED6).mix(Rgb::from_hex(0x4292C6), 0.5));
        assert!(mid.g > 0x92 && mid.g < 0xAE, "{}", mid);
        assert!(mid.b > 0xC6 && mid.b < 0xD6, "{}", mid);
    }

    #[test]
    fn luminance_spans_black_to_white() {
        assert!(Rgb::from_hex(0x000000).relative_luminance().abs() < 1e-6);
        assert!((Rgb::from_hex(0xFFFFFF).relative_luminance() - 1.0).abs() < 1e-6);
        let mid_grey = Rgb::from_hex(0x777777).relative_luminance();
        assert!((mid_grey - 0.184).abs() < 0.002, "{}", mid_grey);
    }

    #[test]
    fn dark_backgrounds_get_light_text() {
        assert_eq!(text_color_for(Rgb::from_hex(0x08306B)), LIGHT_TEXT);
        assert_eq!(text_color_for(Rgb::from_hex(0xF7FBFF)), DARK_TEXT);
    }

    #[test]
    fn css_and_hex_forms() {
        let c = Rgb::from_hex(0x08519C);
        assert_eq!(c.to_css(), "#08519c");
        assert_eq!(c.to_hex(), 0x08519C);
    }
}
