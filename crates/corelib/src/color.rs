//! CSS-style `rgb()` / `rgba()` color strings.

/// Opaque black, used when a color string does not parse.
pub const BLACK: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

/// Parse `rgb(r, g, b)` or `rgba(r, g, b, a)` into normalized RGBA.
///
/// Channels are integers in 0..=255, alpha is a float clamped to [0, 1]
/// and defaults to 1.
pub fn parse_css_color(s: &str) -> Option<[f32; 4]> {
    let s = s.trim();
    let inner = s
        .strip_prefix("rgba(")
        .or_else(|| s.strip_prefix("rgb("))?
        .strip_suffix(')')?;

    let mut fields = inner.split(',').map(str::trim);
    let mut channel = || -> Option<f32> { Some(fields.next()?.parse::<u8>().ok()? as f32 / 255.0) };
    let (r, g, b) = (channel()?, channel()?, channel()?);

    let a = match fields.next() {
        Some(alpha) => alpha.parse::<f32>().ok().filter(|a| a.is_finite())?.clamp(0.0, 1.0),
        None => 1.0,
    };
    if fields.next().is_some() {
        return None;
    }

    Some([r, g, b, a])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_and_rgba() {
        assert_eq!(parse_css_color("rgb(255, 0, 51)"), Some([1.0, 0.0, 0.2, 1.0]));
        assert_eq!(parse_css_color("rgba(0,0,0,0.5)"), Some([0.0, 0.0, 0.0, 0.5]));
        assert_eq!(parse_css_color("  rgb( 0 ,255,  0 )  "), Some([0.0, 1.0, 0.0, 1.0]));
    }

    #[test]
    fn alpha_is_clamped() {
        assert_eq!(parse_css_color("rgba(0, 0, 0, 3)"), Some([0.0, 0.0, 0.0, 1.0]));
    }

    #[test]
    fn garbage_is_rejected() {
        for s in [
            "",
            "black",
            "#ff0000",
            "rgb(1, 2)",
            "rgb(1, 2, 3, 4, 5)",
            "rgb(256, 0, 0)",
            "rgb(-1, 0, 0)",
            "rgb(1, 2, 3",
            "rgba(1, 2, 3, nan)",
        ] {
            assert_eq!(parse_css_color(s), None, "{s:?}");
        }
    }
}
