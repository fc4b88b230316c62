use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::error::{Error, Result};

static HEX_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#?([[:xdigit:]]{3}|[[:xdigit:]]{6})$").unwrap());

/// A color with an alpha channel, printed in CSS notation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

pub fn is_hex_color(value: &str) -> bool {
    HEX_REGEX.is_match(value.trim())
}

/// Converts a 3 or 6 digit hex color (with or without `#`) into an [`Rgba`].
///
/// Malformed colors are rejected with [`Error::InvalidColor`]. The alpha is clamped
/// to `[0, 1]`; a NaN alpha is rejected as well.
pub fn hex_to_rgba(hex: &str, alpha: f64) -> Result<Rgba> {
    let caps = HEX_REGEX
        .captures(hex.trim())
        .ok_or_else(|| Error::InvalidColor(hex.to_string()))?;
    if alpha.is_nan() {
        return Err(Error::InvalidColor(format!("{} (alpha is not a number)", hex)));
    }

    let digits = &caps[1];
    let expanded: String = if digits.len() == 3 {
        digits.chars().flat_map(|c| [c, c]).collect()
    } else {
        digits.to_string()
    };

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&expanded[range], 16).map_err(|_| Error::InvalidColor(hex.to_string()))
    };

    Ok(Rgba {
        r: channel(0..2)?,
        g: channel(2..4)?,
        b: channel(4..6)?,
        a: alpha.clamp(0.0, 1.0),
    })
}
