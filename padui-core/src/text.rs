//! Text measurement and greedy word wrapping.

/// Width measurement of a single line of text.
///
/// The menu layout only ever needs widths; backends provide real metrics via
/// [crate::text_render::TextRenderContext] while headless tests use
/// [FixedMeasure].
pub trait TextMeasure {
    /// Measured width of `text` at `font_size` in the given font family
    /// (`None` meaning the default family).
    fn measure_width(&self, text: &str, family: Option<&str>, font_size: f32) -> f32;
}

/// A deterministic measurer assigning every character a fixed fraction of the
/// font size. Used by the recording backend and headless tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedMeasure {
    /// Advance per character, as a fraction of the font size.
    pub advance: f32,
}

impl Default for FixedMeasure {
    fn default() -> Self {
        Self { advance: 0.5 }
    }
}

impl TextMeasure for FixedMeasure {
    fn measure_width(&self, text: &str, _family: Option<&str>, font_size: f32) -> f32 {
        text.chars().count() as f32 * font_size * self.advance
    }
}

/// Greedy word wrap.
///
/// Splits on single spaces and accumulates words until the candidate line
/// (including its trailing space) measures wider than `max_width`. The first
/// word of a line is never broken, so a single over-wide word produces an
/// over-wide line. Produced lines keep their trailing space; measurement of
/// candidate lines includes it, so with a monotonic measurer no line other
/// than a single-word line exceeds `max_width`.
pub fn wrap_text(
    measure: &dyn TextMeasure,
    text: &str,
    family: Option<&str>,
    font_size: f32,
    max_width: f32,
) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for (index, word) in text.split(' ').enumerate() {
        let test_line = format!("{line}{word} ");
        let test_width = measure.measure_width(&test_line, family, font_size);

        if test_width > max_width && index > 0 {
            lines.push(line);
            line = format!("{word} ");
        } else {
            line = test_line;
        }
    }

    lines.push(line);
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measure() -> FixedMeasure {
        // 1px per char at font size 2, for easy arithmetic.
        FixedMeasure { advance: 0.5 }
    }

    #[test]
    fn test_short_text_is_one_line() {
        let lines = wrap_text(&measure(), "hello world", None, 2.0, 100.0);
        assert_eq!(lines, vec!["hello world ".to_string()]);
    }

    #[test]
    fn test_wraps_to_multiple_lines() {
        // Each char is 1px: "aaaa bbbb " is 10px, over the 8px max.
        let lines = wrap_text(&measure(), "aaaa bbbb cccc", None, 2.0, 8.0);
        assert_eq!(
            lines,
            vec![
                "aaaa ".to_string(),
                "bbbb ".to_string(),
                "cccc ".to_string()
            ]
        );
    }

    #[test]
    fn test_no_line_exceeds_max_width() {
        let m = measure();
        let text = "one two three four five six seven eight nine ten";
        let max_width = 12.0;
        let lines = wrap_text(&m, text, None, 2.0, max_width);

        assert!(lines.len() > 1);
        for line in &lines {
            assert!(m.measure_width(line, None, 2.0) <= max_width, "{line:?}");
        }
    }

    #[test]
    fn test_first_word_never_breaks() {
        // A single word wider than the max stays on its line.
        let lines = wrap_text(&measure(), "incomprehensibilities a", None, 2.0, 4.0);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "incomprehensibilities ");
    }

    #[test]
    fn test_empty_text_is_one_empty_line() {
        let lines = wrap_text(&measure(), "", None, 2.0, 10.0);
        assert_eq!(lines, vec![" ".to_string()]);
    }
}
