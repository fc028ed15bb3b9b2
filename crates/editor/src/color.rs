//! Hex color parsing and HSL conversion.
//!
//! Channels are sRGB floats in `[0, 1]`. Hue is normalised to `[0, 1)`.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("invalid hex color '{0}'")]
    InvalidHex(String),
}

/// RGB color with channels in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// Hue/saturation/lightness, all in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Rgb {
    /// Parse `#rrggbb` or `#rgb` (leading `#` optional, case-insensitive)
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let invalid = || ColorError::InvalidHex(hex.to_string());
        let digits = hex.trim().trim_start_matches('#');
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let (r, g, b) = match digits.len() {
            6 => (
                u8::from_str_radix(&digits[0..2], 16).map_err(|_| invalid())?,
                u8::from_str_radix(&digits[2..4], 16).map_err(|_| invalid())?,
                u8::from_str_radix(&digits[4..6], 16).map_err(|_| invalid())?,
            ),
            3 => {
                let nibble = |i: usize| {
                    u8::from_str_radix(&digits[i..i + 1], 16)
                        .map(|n| n * 17)
                        .map_err(|_| invalid())
                };
                (nibble(0)?, nibble(1)?, nibble(2)?)
            }
            _ => return Err(invalid()),
        };

        Ok(Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
        })
    }

    /// Lowercase `#rrggbb`
    pub fn to_hex(&self) -> String {
        let channel = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            channel(self.r),
            channel(self.g),
            channel(self.b)
        )
    }

    pub fn to_hsl(&self) -> Hsl {
        let max = self.r.max(self.g).max(self.b);
        let min = self.r.min(self.g).min(self.b);
        let l = (min + max) / 2.0;

        if min == max {
            return Hsl { h: 0.0, s: 0.0, l };
        }

        let delta = max - min;
        let s = if l <= 0.5 {
            delta / (max + min)
        } else {
            delta / (2.0 - max - min)
        };

        let h = if max == self.r {
            (self.g - self.b) / delta + if self.g < self.b { 6.0 } else { 0.0 }
        } else if max == self.g {
            (self.b - self.r) / delta + 2.0
        } else {
            (self.r - self.g) / delta + 4.0
        };

        Hsl { h: h / 6.0, s, l }
    }
}

impl Hsl {
    pub fn to_rgb(&self) -> Rgb {
        let h = self.h.rem_euclid(1.0);
        let s = self.s.clamp(0.0, 1.0);
        let l = self.l.clamp(0.0, 1.0);

        if s == 0.0 {
            return Rgb { r: l, g: l, b: l };
        }

        let p = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let q = 2.0 * l - p;

        Rgb {
            r: hue_to_channel(q, p, h + 1.0 / 3.0),
            g: hue_to_channel(q, p, h),
            b: hue_to_channel(q, p, h - 1.0 / 3.0),
        }
    }
}

fn hue_to_channel(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        return p + (q - p) * 6.0 * t;
    }
    if t < 0.5 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return p + (q - p) * 6.0 * (2.0 / 3.0 - t);
    }
    p
}

/// Parse and re-emit a color as lowercase `#rrggbb`
pub fn normalize_hex(hex: &str) -> Result<String, ColorError> {
    Rgb::from_hex(hex).map(|c| c.to_hex())
}

/// Retarget `original` into the hue family of `target`.
///
/// Takes the target hue, saturation `max(target.s, original.s * 0.5)` and
/// keeps the original lightness, so shading across a set survives.
pub fn shift_hue_preserving_lightness(original: Hsl, target: Hsl) -> Hsl {
    Hsl {
        h: target.h,
        s: target.s.max(original.s * 0.5),
        l: original.l,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_parse_long_and_short_hex() {
        let c = Rgb::from_hex("#FF0000").unwrap();
        assert_eq!(c, Rgb { r: 1.0, g: 0.0, b: 0.0 });
        assert_eq!(Rgb::from_hex("#0f0").unwrap().to_hex(), "#00ff00");
        assert_eq!(Rgb::from_hex("33ff00").unwrap().to_hex(), "#33ff00");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Rgb::from_hex("").is_err());
        assert!(Rgb::from_hex("#12345").is_err());
        assert!(Rgb::from_hex("#gg0000").is_err());
        assert!(Rgb::from_hex("red").is_err());
        assert!(Rgb::from_hex("#ff00ff00").is_err());
    }

    #[test]
    fn test_primary_hues() {
        let red = Rgb::from_hex("#ff0000").unwrap().to_hsl();
        assert!(approx(red.h, 0.0) && approx(red.s, 1.0) && approx(red.l, 0.5));

        let green = Rgb::from_hex("#00ff00").unwrap().to_hsl();
        assert!(approx(green.h, 1.0 / 3.0));

        let blue = Rgb::from_hex("#0000ff").unwrap().to_hsl();
        assert!(approx(blue.h, 2.0 / 3.0));
    }

    #[test]
    fn test_grey_has_no_saturation() {
        let grey = Rgb::from_hex("#808080").unwrap().to_hsl();
        assert_eq!(grey.h, 0.0);
        assert_eq!(grey.s, 0.0);
        assert_eq!(grey.to_rgb().to_hex(), "#808080");
    }

    #[test]
    fn test_hsl_round_trip_through_hex() {
        for hex in shared::PALETTE {
            let back = Rgb::from_hex(hex).unwrap().to_hsl().to_rgb().to_hex();
            assert_eq!(back, hex);
        }
    }

    #[test]
    fn test_shift_keeps_original_lightness() {
        let original = Rgb::from_hex("#112233").unwrap().to_hsl();
        let target = Rgb::from_hex("#ff0000").unwrap().to_hsl();
        let shifted = shift_hue_preserving_lightness(original, target);

        assert_eq!(shifted.h, target.h);
        assert_eq!(shifted.s, target.s.max(original.s * 0.5));
        assert_eq!(shifted.l, original.l);
        assert_eq!(shifted.to_rgb().to_hex(), "#440000");
    }

    #[test]
    fn test_shift_blends_saturation_from_original() {
        // Desaturated target keeps half of the original saturation.
        let original = Rgb::from_hex("#ff0000").unwrap().to_hsl();
        let target = Rgb::from_hex("#808080").unwrap().to_hsl();
        let shifted = shift_hue_preserving_lightness(original, target);
        assert!(approx(shifted.s, 0.5));
    }
}
