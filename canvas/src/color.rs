//! Hex color parsing and alpha application for zone fills.

#[cfg(test)]
#[path = "color_test.rs"]
mod color_test;

/// Parse `#RGB` or `#RRGGBB` values into RGB channels.
#[must_use]
pub fn parse_hex_rgb(raw: &str) -> Option<(u8, u8, u8)> {
    let hex = raw.trim().strip_prefix('#')?;
    let digits: String = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 => hex.to_owned(),
        _ => return None,
    };
    let value = digits
        .chars()
        .try_fold(0_u32, |acc, c| Some((acc << 4) | c.to_digit(16)?))?;
    let [_, r, g, b] = value.to_be_bytes();
    Some((r, g, b))
}

/// Apply a uniform `alpha` to a hex color, producing a CSS `rgba(...)` string.
///
/// Channels keep their order. Input that is not a `#RGB`/`#RRGGBB` color is
/// returned unchanged.
#[must_use]
pub fn hex_with_alpha(hex: &str, alpha: f64) -> String {
    match parse_hex_rgb(hex) {
        Some((r, g, b)) => format!("rgba({r},{g},{b},{alpha})"),
        None => hex.to_owned(),
    }
}
