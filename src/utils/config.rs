// Centralized display constants for Tessera

/// Discord embed colors
pub mod colors {
    /// Discord blurple, used when the configured color cannot be parsed
    pub const DEFAULT: u32 = 0x5865F2;
}

/// Parse a "#RRGGBB" color string into an embed color value.
/// Malformed input falls back to the default instead of failing the render.
pub fn parse_embed_color(raw: &str) -> u32 {
    let hex = raw.trim().trim_start_matches('#');
    if hex.len() == 6 {
        u32::from_str_radix(hex, 16).unwrap_or(colors::DEFAULT)
    } else {
        colors::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_embed_color() {
        assert_eq!(parse_embed_color("#112233"), 0x112233);
        assert_eq!(parse_embed_color("5865F2"), 0x5865F2);
        assert_eq!(parse_embed_color(" #FF0000 "), 0xFF0000);
    }

    #[test]
    fn test_parse_embed_color_fallback() {
        assert_eq!(parse_embed_color(""), colors::DEFAULT);
        assert_eq!(parse_embed_color("#12"), colors::DEFAULT);
        assert_eq!(parse_embed_color("#GGGGGG"), colors::DEFAULT);
        assert_eq!(parse_embed_color("not a color"), colors::DEFAULT);
    }
}
