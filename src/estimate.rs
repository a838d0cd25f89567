//! Text-driven cell dimension estimation.
//!
//! Width comes from the longest explicit line of text times a per-family
//! character-width ratio; height prefers a host-side measurement and
//! falls back to a quantized line-count table.

use crate::host::TextMeasurer;
use crate::types::FontSpec;

/// Smallest estimated cell width.
pub const MIN_CELL_WIDTH: f32 = 30.0;

/// Largest estimated cell width.
pub const MAX_CELL_WIDTH: f32 = 200.0;

/// Horizontal padding added on top of the measured text width.
const CELL_PADDING: f32 = 12.0;

/// Widening factor applied when the text contains wide-script characters.
const WIDE_SCRIPT_FACTOR: f32 = 1.1;

/// Average advance per character as a fraction of the font size, by
/// family. Families not listed use [`DEFAULT_CHAR_RATIO`].
const CHAR_RATIOS: [(&str, f32); 7] = [
    ("Arial", 0.55),
    ("Helvetica", 0.55),
    ("Calibri", 0.50),
    ("Segoe UI", 0.52),
    ("Times New Roman", 0.50),
    ("Courier New", 0.60),
    ("Verdana", 0.58),
];

/// Fallback advance ratio for unknown font families.
const DEFAULT_CHAR_RATIO: f32 = 0.55;

/// Quantized row heights by line count (index = number of lines).
const LINE_COUNT_HEIGHTS: [f32; 5] = [20.0, 20.0, 34.0, 48.0, 62.0];

/// Line-height factor for counts beyond the quantized table.
const LINE_HEIGHT_FACTOR: f32 = 1.2;

/// Estimated width needed to show `text` on one line per explicit break.
///
/// The longest line's character count times the family's advance ratio,
/// widened by 10% for wide scripts, padded, and clamped between
/// [`MIN_CELL_WIDTH`] and [`MAX_CELL_WIDTH`].
pub fn estimate_cell_width(text: &str, font: &FontSpec) -> f32 {
    let longest = text.lines().map(|l| l.chars().count()).max().unwrap_or(0);
    let mut width = longest as f32 * font.size * char_ratio(&font.family);
    if text.chars().any(is_wide_char) {
        width *= WIDE_SCRIPT_FACTOR;
    }
    (width + CELL_PADDING).clamp(MIN_CELL_WIDTH, MAX_CELL_WIDTH)
}

/// Number of visual lines `text` takes when wrapped into `cell_width`.
///
/// Counts explicit breaks, then wraps each line by an estimated
/// characters-per-line; empty lines count as one.
pub fn estimate_line_count(text: &str, cell_width: f32, font: &FontSpec) -> usize {
    let available = (cell_width - CELL_PADDING).max(0.0);
    let per_char = font.size * 0.7;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let chars_per_line = ((available / per_char).floor() as usize).max(1);

    let mut lines = 0usize;
    for line in text.split('\n') {
        let len = line.chars().count();
        if len == 0 {
            lines += 1;
        } else {
            lines += len.div_ceil(chars_per_line);
        }
    }
    lines.max(1)
}

/// Estimated height needed for `text` in a cell `cell_width` wide.
///
/// Prefers a direct text-bound measurement from the host; otherwise a
/// quantized lookup by line count, with a line-count estimate (floored
/// at the table's last entry) beyond the table.
pub fn estimate_required_height(
    text: &str,
    cell_width: f32,
    font: &FontSpec,
    measurer: &dyn TextMeasurer,
) -> f32 {
    if let Some(measured) = measurer.measure_height(text, font, cell_width) {
        return measured;
    }

    let lines = if text.is_empty() {
        0
    } else {
        estimate_line_count(text, cell_width, font)
    };
    match LINE_COUNT_HEIGHTS.get(lines) {
        Some(h) => *h,
        None => {
            let last = LINE_COUNT_HEIGHTS.last().copied().unwrap_or(0.0);
            (lines as f32 * font.size * LINE_HEIGHT_FACTOR).max(last)
        }
    }
}

fn char_ratio(family: &str) -> f32 {
    CHAR_RATIOS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(family))
        .map(|(_, ratio)| *ratio)
        .unwrap_or(DEFAULT_CHAR_RATIO)
}

/// Wide-script (CJK and fullwidth) character check.
fn is_wide_char(c: char) -> bool {
    matches!(u32::from(c),
        0x1100..=0x115F          // Hangul Jamo
        | 0x2E80..=0x303E        // CJK radicals, punctuation
        | 0x3041..=0x33FF        // kana, CJK compat
        | 0x3400..=0x4DBF        // CJK ext A
        | 0x4E00..=0x9FFF        // CJK unified
        | 0xAC00..=0xD7A3        // Hangul syllables
        | 0xF900..=0xFAFF        // CJK compat ideographs
        | 0xFF00..=0xFF60        // fullwidth forms
    )
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::host::NoMeasurer;

    fn arial(size: f32) -> FontSpec {
        FontSpec {
            family: "Arial".to_string(),
            size,
        }
    }

    #[test]
    fn test_width_uses_longest_line() {
        let font = arial(12.0);
        let one = estimate_cell_width("abcdefgh", &font);
        let multi = estimate_cell_width("ab\nabcdefgh\ncd", &font);
        assert_eq!(one, multi);
    }

    #[test]
    fn test_width_clamped() {
        let font = arial(12.0);
        assert_eq!(estimate_cell_width("", &font), MIN_CELL_WIDTH);
        assert_eq!(estimate_cell_width("x", &font), MIN_CELL_WIDTH);
        let long = "a".repeat(500);
        assert_eq!(estimate_cell_width(&long, &font), MAX_CELL_WIDTH);
    }

    #[test]
    fn test_unknown_family_uses_default_ratio() {
        let known = arial(12.0);
        let unknown = FontSpec {
            family: "Comic Serif Pro".to_string(),
            size: 12.0,
        };
        // Arial and the default share a ratio, so estimates agree
        assert_eq!(
            estimate_cell_width("hello world", &known),
            estimate_cell_width("hello world", &unknown)
        );
    }

    #[test]
    fn test_wide_script_widens() {
        let font = arial(12.0);
        let narrow = estimate_cell_width("aaaaaaaaaaaaaaa", &font);
        let wide = estimate_cell_width("aaaaaaaaaaaaaa\u{6f22}", &font);
        assert!(wide > narrow);
    }

    #[test]
    fn test_line_count_wraps_and_counts_empties() {
        let font = arial(10.0);
        // available 58, per_char 7 -> 8 chars per line
        let test_cases = [
            ("", 1),
            ("short", 1),
            ("12345678", 1),
            ("123456789", 2),
            ("one\n\ntwo", 3),
            ("1234567812345678\nx", 3),
        ];
        for (text, expected) in test_cases {
            assert_eq!(estimate_line_count(text, 70.0, &font), expected, "{text:?}");
        }
    }

    #[test]
    fn test_height_quantized_fallback() {
        let font = arial(10.0);
        assert_eq!(
            estimate_required_height("", 70.0, &font, &NoMeasurer),
            20.0
        );
        assert_eq!(
            estimate_required_height("short", 70.0, &font, &NoMeasurer),
            20.0
        );
        assert_eq!(
            estimate_required_height("one\ntwo", 70.0, &font, &NoMeasurer),
            34.0
        );
        assert_eq!(
            estimate_required_height("a\nb\nc\nd", 70.0, &font, &NoMeasurer),
            62.0
        );
    }

    #[test]
    fn test_height_beyond_table_scales_with_lines() {
        let font = arial(10.0);
        let text = "a\nb\nc\nd\ne\nf\ng\nh";
        let h = estimate_required_height(text, 70.0, &font, &NoMeasurer);
        assert_eq!(h, 8.0 * 10.0 * 1.2);
    }

    #[test]
    fn test_height_prefers_measurer() {
        struct Fixed;
        impl TextMeasurer for Fixed {
            fn measure_height(&self, _: &str, _: &FontSpec, _: f32) -> Option<f32> {
                Some(123.0)
            }
        }
        let font = arial(10.0);
        assert_eq!(
            estimate_required_height("anything", 70.0, &font, &Fixed),
            123.0
        );
    }
}
