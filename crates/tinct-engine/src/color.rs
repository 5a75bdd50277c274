//! Hex color compositing.
//!
//! Theme colors are `#RRGGBB` (opaque) or `#RRGGBBAA` (with an alpha
//! channel). Nothing here blends colors numerically: "compositing" a color
//! means replacing its alpha channel with a two-digit suffix, and inferring
//! alpha is the exact inverse of that.
//!
//! ```rust
//! use tinct_engine::color::{composite, infer_alpha, strip_alpha};
//!
//! assert_eq!(composite("#1a1b26", "e6"), "#1A1B26E6");
//! assert_eq!(strip_alpha("#1A1B26E6"), "#1A1B26");
//! assert_eq!(infer_alpha("#1A1B26E6", "#1a1b26").as_deref(), Some("E6"));
//! ```
//!
//! Invalid input degrades to a no-op rather than an error: callers treat an
//! unchanged or empty result as "rule does not apply".

/// Fully transparent black, used for chrome keys that should not paint.
pub const TRANSPARENT: &str = "#00000000";

/// Alpha digits reported for an opaque color that matches its base exactly.
pub const OPAQUE_ALPHA: &str = "FF";

fn is_hex(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Returns the six hex digits of `color` without `#` or alpha, if it has that shape.
fn rgb_digits(color: &str) -> Option<&str> {
    let digits = color.strip_prefix('#').unwrap_or(color);
    if !is_hex(digits) {
        return None;
    }
    match digits.len() {
        6 | 8 => Some(&digits[..6]),
        _ => None,
    }
}

/// Replaces the alpha channel of `base` with `alpha`.
///
/// Any existing alpha on `base` is dropped first, so compositing never
/// stacks. The result is uppercase with a leading `#`. When `alpha` is not
/// exactly two hex digits, or `base` does not reduce to six hex digits, the
/// input is returned unchanged.
pub fn composite(base: &str, alpha: &str) -> String {
    if alpha.len() != 2 || !is_hex(alpha) {
        return base.to_string();
    }
    match rgb_digits(base) {
        Some(rgb) => format!("#{}{}", rgb, alpha).to_ascii_uppercase(),
        None => base.to_string(),
    }
}

/// Drops the alpha channel of an 8-digit color.
///
/// Anything that is not an 8-digit hex color comes back unchanged.
pub fn strip_alpha(color: &str) -> String {
    let digits = color.strip_prefix('#').unwrap_or(color);
    if digits.len() == 8 && is_hex(digits) {
        return format!("#{}", &digits[..6]);
    }
    color.to_string()
}

/// Recovers the alpha digits that turn `base` into `composited`.
///
/// Succeeds only when both colors share the same RGB digits
/// (case-insensitively). A 6-digit `composited` that equals the base reports
/// [`OPAQUE_ALPHA`].
///
/// The digits come back uppercase, so `infer_alpha(&composite(b, a), b)`
/// recovers `a` up to case.
pub fn infer_alpha(composited: &str, base: &str) -> Option<String> {
    let base = rgb_digits(base)?;
    let value = composited.strip_prefix('#').unwrap_or(composited);
    if !is_hex(value) {
        return None;
    }
    match value.len() {
        8 if value[..6].eq_ignore_ascii_case(base) => Some(value[6..].to_ascii_uppercase()),
        6 if value.eq_ignore_ascii_case(base) => Some(OPAQUE_ALPHA.to_string()),
        _ => None,
    }
}

/// Uppercases a 6- or 8-digit hex color. Anything else comes back unchanged.
pub fn normalize(color: &str) -> String {
    let digits = color.strip_prefix('#').unwrap_or(color);
    if is_hex(digits) && matches!(digits.len(), 6 | 8) {
        return color.to_ascii_uppercase();
    }
    color.to_string()
}

/// Whether two colors share the same RGB digits, ignoring alpha and case.
pub fn same_hue(a: &str, b: &str) -> bool {
    strip_alpha(a).eq_ignore_ascii_case(&strip_alpha(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_composite_appends_alpha() {
        assert_eq!(composite("#1a1b26", "e6"), "#1A1B26E6");
    }

    #[test]
    fn test_composite_replaces_existing_alpha() {
        assert_eq!(composite("#1A1B26E6", "80"), "#1A1B2680");
    }

    #[test]
    fn test_composite_without_hash() {
        assert_eq!(composite("ffffff", "10"), "#FFFFFF10");
    }

    #[test]
    fn test_composite_invalid_alpha_is_noop() {
        assert_eq!(composite("#1a1b26", ""), "#1a1b26");
        assert_eq!(composite("#1a1b26", "e"), "#1a1b26");
        assert_eq!(composite("#1a1b26", "zz"), "#1a1b26");
    }

    #[test]
    fn test_composite_invalid_base_is_noop() {
        assert_eq!(composite("#fff", "80"), "#fff");
        assert_eq!(composite("", "80"), "");
        assert_eq!(composite("#gggggg", "80"), "#gggggg");
    }

    #[test]
    fn test_strip_alpha() {
        assert_eq!(strip_alpha("#1A1B26E6"), "#1A1B26");
        assert_eq!(strip_alpha("#1A1B26"), "#1A1B26");
        assert_eq!(strip_alpha("1A1B26E6"), "#1A1B26");
        assert_eq!(strip_alpha(""), "");
    }

    #[test]
    fn test_infer_alpha_from_composite() {
        assert_eq!(infer_alpha("#1a1b26e6", "#1A1B26").as_deref(), Some("E6"));
    }

    #[test]
    fn test_infer_alpha_opaque_match() {
        assert_eq!(infer_alpha("#1A1B26", "#1a1b26").as_deref(), Some("FF"));
    }

    #[test]
    fn test_infer_alpha_base_with_alpha() {
        assert_eq!(infer_alpha("#1A1B2640", "#1A1B26E6").as_deref(), Some("40"));
    }

    #[test]
    fn test_infer_alpha_mismatch() {
        assert_eq!(infer_alpha("#FFFFFF40", "#1A1B26"), None);
        assert_eq!(infer_alpha("#FFFFFF", "#1A1B26"), None);
        assert_eq!(infer_alpha("#1A1B26E6", ""), None);
    }

    #[test]
    fn test_infer_alpha_is_uppercase() {
        let composited = composite("#1a1b26", "e6");
        assert_eq!(infer_alpha(&composited, "#1a1b26").as_deref(), Some("E6"));
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("#1a1b26"), "#1A1B26");
        assert_eq!(normalize("#1a1b26e6"), "#1A1B26E6");
        assert_eq!(normalize("#fff"), "#fff");
        assert_eq!(normalize("love"), "love");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_same_hue() {
        assert!(same_hue("#1a1b26", "#1A1B26E6"));
        assert!(!same_hue("#1a1b27", "#1A1B26E6"));
    }
}
