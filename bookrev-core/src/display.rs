//! Pure display helpers shared by the CLI views
//!
//! No state, no side effects: ratings become star strings, timestamps
//! become human dates, long review text gets truncated for table cells.

use chrono::{DateTime, Utc};

const FILLED_STAR: char = '★';
const HALF_STAR: char = '⯪';
const EMPTY_STAR: char = '☆';

/// Render a rating in [0, 5] as exactly five star glyphs
///
/// Whole stars are filled, a single half glyph marks any fractional
/// remainder, and the rest are empty. Out-of-range inputs are clamped.
pub fn render_stars(rating: f32) -> String {
    let rating = if rating.is_nan() {
        0.0
    } else {
        rating.clamp(0.0, 5.0)
    };

    let filled = rating.floor() as usize;
    let half = rating.fract() != 0.0;

    let mut stars = String::with_capacity(5 * FILLED_STAR.len_utf8());
    for _ in 0..filled {
        stars.push(FILLED_STAR);
    }
    if half {
        stars.push(HALF_STAR);
    }
    for _ in 0..(5 - filled - usize::from(half)) {
        stars.push(EMPTY_STAR);
    }

    stars
}

/// Format a server timestamp for display
///
/// Display-only; the stored value is never rewritten.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%m/%d/%Y, %I:%M %p").to_string()
}

/// Truncate text to `max` characters, appending an ellipsis when cut
///
/// Returns the input unchanged when it fits. Counts Unicode scalar
/// values, not bytes, so multibyte text is never split mid-character.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }

    let mut out: String = text.chars().take(max).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn glyph_count(s: &str) -> usize {
        s.chars().count()
    }

    #[test]
    fn test_stars_always_five_glyphs() {
        for rating in [0.0, 0.5, 1.0, 2.3, 3.0, 4.5, 4.99, 5.0] {
            assert_eq!(glyph_count(&render_stars(rating)), 5, "rating {}", rating);
        }
    }

    #[test]
    fn test_whole_rating_has_no_half_glyph() {
        assert_eq!(render_stars(3.0), "★★★☆☆");
        assert_eq!(render_stars(5.0), "★★★★★");
        assert_eq!(render_stars(0.0), "☆☆☆☆☆");
    }

    #[test]
    fn test_fractional_rating_has_exactly_one_half_glyph() {
        let stars = render_stars(3.5);
        assert_eq!(stars, "★★★⯪☆");
        assert_eq!(stars.chars().filter(|c| *c == '⯪').count(), 1);

        // Any nonzero remainder produces the half glyph, not just .5
        assert_eq!(render_stars(2.1), "★★⯪☆☆");
    }

    #[test]
    fn test_out_of_range_ratings_clamped() {
        assert_eq!(render_stars(-1.0), "☆☆☆☆☆");
        assert_eq!(render_stars(7.2), "★★★★★");
        assert_eq!(render_stars(f32::NAN), "☆☆☆☆☆");
    }

    #[test]
    fn test_truncate_within_budget_unchanged() {
        assert_eq!(truncate("short", 50), "short");
        assert_eq!(truncate("exact", 5), "exact");
        assert_eq!(truncate("", 10), "");
    }

    #[test]
    fn test_truncate_over_budget_is_max_plus_one_chars() {
        let long = "a".repeat(60);
        let cut = truncate(&long, 50);
        assert_eq!(cut.chars().count(), 51);
        assert!(cut.ends_with('…'));
    }

    #[test]
    fn test_truncate_zero_budget() {
        assert_eq!(truncate("anything", 0), "…");
        assert_eq!(truncate("", 0), "");
    }

    #[test]
    fn test_truncate_counts_chars_not_bytes() {
        let cut = truncate("célé", 3);
        assert_eq!(cut, "cél…");
    }

    #[test]
    fn test_format_timestamp() {
        let ts = Utc.with_ymd_and_hms(2024, 11, 2, 14, 30, 0).unwrap();
        assert_eq!(format_timestamp(&ts), "11/02/2024, 02:30 PM");
    }
}
