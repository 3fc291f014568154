//! Icon identifier to terminal glyph mapping

/// Identifier used for valid steps when no success icon is configured
pub const DEFAULT_SUCCESS_ICON: &str = "check";

/// Identifier used for invalid steps when no error icon is configured
pub const DEFAULT_ERROR_ICON: &str = "warning";

/// Get the glyph for an icon identifier.
/// Unknown identifiers are rendered as-is so callers can pass glyphs directly.
pub fn glyph_for_icon(name: &str) -> &str {
    match name {
        "check" => "✓",
        "check-circle" => "✔",
        "warning" => "⚠",
        "close" | "x" => "✗",
        "close-circle" => "✖",
        "info" => "ℹ",
        "star" => "★",
        "lock" => "🔒",
        "home" => "⌂",
        "user" => "☺",
        "cart" => "🛒",
        "gear" | "settings" => "⚙",
        "flag" => "⚑",
        "dot" => "●",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_icons_have_glyphs() {
        assert_eq!(glyph_for_icon(DEFAULT_SUCCESS_ICON), "✓");
        assert_eq!(glyph_for_icon(DEFAULT_ERROR_ICON), "⚠");
    }

    #[test]
    fn test_unknown_icon_passes_through() {
        assert_eq!(glyph_for_icon("☂"), "☂");
        assert_eq!(glyph_for_icon("custom"), "custom");
    }
}
