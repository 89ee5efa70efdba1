/// Edge Coordinate Decoder
///
/// Numeric tokens are either plain decimals (`-120.5`) or `#`-prefixed hex
/// fixed-point values (`#FFFF9C.8`). Both are in TWIPS.

use super::types::{MAX_COORD_TWIPS, TWIPS_PER_PIXEL};

/// Integer parts this wide or wider are two's complement.
const SIGNED_HEX_MIN_DIGITS: usize = 6;

/// Parse a numeric token into TWIPS. Unparsable text yields `NaN`.
pub fn parse_twips(token: &str) -> f64 {
    match token.strip_prefix('#') {
        Some(hex) => parse_hex(hex),
        None => token.parse::<f64>().unwrap_or(f64::NAN),
    }
}

fn parse_hex(text: &str) -> f64 {
    let (int_part, frac_part) = match text.find('.') {
        Some(idx) => (&text[..idx], &text[idx + 1..]),
        None => (text, ""),
    };

    let mut int_value = 0.0;
    for c in int_part.chars() {
        match c.to_digit(16) {
            Some(d) => int_value = int_value * 16.0 + d as f64,
            None => return f64::NAN,
        }
    }

    let digits = int_part.len();
    if digits >= SIGNED_HEX_MIN_DIGITS {
        let range = 16f64.powi(digits as i32);
        if int_value >= range / 2.0 {
            int_value -= range;
        }
    }

    let mut frac_value = 0.0;
    let mut scale = 1.0 / 16.0;
    for c in frac_part.chars() {
        match c.to_digit(16) {
            Some(d) => {
                frac_value += d as f64 * scale;
                scale /= 16.0;
            }
            None => return f64::NAN,
        }
    }

    int_value + frac_value
}

/// Decode a numeric token to pixels, rejecting `NaN` and out-of-range values.
pub fn decode_coordinate(token: &str) -> Option<f64> {
    let twips = parse_twips(token);
    if !twips.is_finite() || twips.abs() > MAX_COORD_TWIPS {
        return None;
    }
    Some(twips / TWIPS_PER_PIXEL)
}
