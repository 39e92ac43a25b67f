//! Hex color parsing and the `#RRGGBBAA` stroke-style encoding.
//!
//! Particles carry their stroke color as an 8-digit hex string, built from a
//! 6-digit base hue plus an alpha byte (see [`add_alpha`]). Surfaces that
//! rasterize themselves parse those strings back with [`Rgba8::from_hex`].

use crate::error::EngineError;

/// sRGB color with components in [0, 1], used for opaque backgrounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Srgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// 8-bit RGBA color as written in a `#RRGGBBAA` stroke style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Srgb {
    /// Parses a hex color string like "#ff00aa" or "ff00aa" (case insensitive).
    ///
    /// Returns `EngineError::InvalidColor` if the input is not a valid 6-digit hex color.
    pub fn from_hex(hex: &str) -> Result<Srgb, EngineError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 {
            return Err(EngineError::InvalidColor(format!(
                "expected 6 hex digits, got {}",
                digits.len()
            )));
        }
        let c = Rgba8::from_hex(hex)?;
        Ok(Srgb {
            r: c.r as f64 / 255.0,
            g: c.g as f64 / 255.0,
            b: c.b as f64 / 255.0,
        })
    }

    /// Quantizes to 8 bits per channel with full opacity.
    pub fn to_rgba8(self) -> Rgba8 {
        Rgba8 {
            r: quantize(self.r),
            g: quantize(self.g),
            b: quantize(self.b),
            a: 255,
        }
    }
}

impl Rgba8 {
    /// Opaque white, the default stroke style of a fresh surface.
    pub const WHITE: Rgba8 = Rgba8 {
        r: 255,
        g: 255,
        b: 255,
        a: 255,
    };

    /// Parses `#RRGGBB` or `#RRGGBBAA` (leading `#` optional, case insensitive).
    ///
    /// Six-digit input is treated as fully opaque.
    pub fn from_hex(hex: &str) -> Result<Rgba8, EngineError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 && digits.len() != 8 {
            return Err(EngineError::InvalidColor(format!(
                "expected 6 or 8 hex digits, got {}",
                digits.len()
            )));
        }
        let channel = |i: usize, name: &str| {
            digits
                .get(i..i + 2)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or_else(|| EngineError::InvalidColor(format!("invalid {name} component in '{hex}'")))
        };
        Ok(Rgba8 {
            r: channel(0, "red")?,
            g: channel(2, "green")?,
            b: channel(4, "blue")?,
            a: if digits.len() == 8 {
                channel(6, "alpha")?
            } else {
                255
            },
        })
    }
}

/// Appends an alpha byte to a 6-digit hex color.
///
/// `opacity` is clamped to [0, 1], scaled to 0..=255, rounded, and written as
/// two uppercase hex digits: `add_alpha("#FFB84C", 1.0) == "#FFB84CFF"`.
pub fn add_alpha(base: &str, opacity: f64) -> String {
    format!("{base}{:02X}", quantize(opacity))
}

fn quantize(c: f64) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_alpha_full_opacity() {
        assert_eq!(add_alpha("#FFB84C", 1.0), "#FFB84CFF");
    }

    #[test]
    fn add_alpha_zero_opacity() {
        assert_eq!(add_alpha("#FFB84C", 0.0), "#FFB84C00");
    }

    #[test]
    fn add_alpha_pads_small_values_to_two_digits() {
        // 0.02 * 255 = 5.1 -> 5
        assert_eq!(add_alpha("#2CD3E1", 0.02), "#2CD3E105");
    }

    #[test]
    fn add_alpha_clamps_out_of_range_opacity() {
        assert_eq!(add_alpha("#A459D1", 3.0), "#A459D1FF");
        assert_eq!(add_alpha("#A459D1", -1.0), "#A459D100");
    }

    #[test]
    fn add_alpha_rounds_half_up() {
        // 0.5 * 255 = 127.5 -> 128 = 0x80
        assert_eq!(add_alpha("#F266AB", 0.5), "#F266AB80");
    }

    #[test]
    fn rgba8_parses_eight_digit_hex() {
        let c = Rgba8::from_hex("#FFB84C80").unwrap();
        assert_eq!(
            c,
            Rgba8 {
                r: 0xFF,
                g: 0xB8,
                b: 0x4C,
                a: 0x80
            }
        );
    }

    #[test]
    fn rgba8_six_digit_hex_is_opaque() {
        let c = Rgba8::from_hex("2cd3e1").unwrap();
        assert_eq!(c.a, 255);
        assert_eq!(c.r, 0x2C);
    }

    #[test]
    fn rgba8_rejects_wrong_length() {
        assert!(matches!(
            Rgba8::from_hex("#FFF"),
            Err(EngineError::InvalidColor(_))
        ));
    }

    #[test]
    fn rgba8_rejects_non_hex_digits() {
        assert!(Rgba8::from_hex("#GG0000FF").is_err());
    }

    #[test]
    fn rgba8_rejects_multibyte_input_without_panicking() {
        assert!(Rgba8::from_hex("#ééé").is_err());
    }

    #[test]
    fn rgba8_parsing_is_case_insensitive() {
        assert_eq!(
            Rgba8::from_hex("#a459d1cc").unwrap(),
            Rgba8::from_hex("#A459D1CC").unwrap()
        );
    }

    #[test]
    fn srgb_from_hex_parses_components() {
        let c = Srgb::from_hex("#ff0000").unwrap();
        assert!((c.r - 1.0).abs() < f64::EPSILON);
        assert!(c.g.abs() < f64::EPSILON);
        assert!(c.b.abs() < f64::EPSILON);
    }

    #[test]
    fn srgb_from_hex_rejects_alpha_suffix() {
        assert!(Srgb::from_hex("#ff0000ff").is_err());
    }

    #[test]
    fn srgb_to_rgba8_is_opaque_and_exact() {
        let c = Srgb::from_hex("#ABCDEF").unwrap().to_rgba8();
        assert_eq!(
            c,
            Rgba8 {
                r: 0xAB,
                g: 0xCD,
                b: 0xEF,
                a: 255
            }
        );
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn add_alpha_output_parses_back(
                r: u8,
                g: u8,
                b: u8,
                opacity in 0.0_f64..=1.0,
            ) {
                let base = format!("#{r:02X}{g:02X}{b:02X}");
                let encoded = add_alpha(&base, opacity);
                prop_assert_eq!(encoded.len(), 9);
                let c = Rgba8::from_hex(&encoded).unwrap();
                prop_assert_eq!((c.r, c.g, c.b), (r, g, b));
                prop_assert_eq!(c.a, (opacity * 255.0).round() as u8);
            }
        }
    }
}
