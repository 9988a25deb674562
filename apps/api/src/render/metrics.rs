//! Static character-width tables for the base-14 font families.
//!
//! Widths are in em units (thousandths of the font size, stored as floats at
//! 1em). The tables carry the standard AFM widths for the regular faces;
//! bold faces are approximated with a per-family scale factor, which is
//! accurate enough for greedy word-wrap decisions at resume text sizes.
//! All tables cover ASCII 0x20..=0x7E; other codepoints fall back to the
//! family's average character width.

use crate::render::style::FontFamily;

/// Width table for one font family. Index = (char as usize) - 32.
pub struct FontMetricTable {
    widths: [f32; 95],
    /// Fallback width for codepoints outside 0x20..=0x7E.
    average_char_width: f32,
    /// Multiplier applied when measuring the bold face.
    bold_factor: f32,
}

impl FontMetricTable {
    /// Measures the rendered width of `s` in points at `size`.
    pub fn measure(&self, s: &str, size: f32, bold: bool) -> f32 {
        let em: f32 = s
            .chars()
            .map(|c| {
                let code = c as usize;
                if (32..=126).contains(&code) {
                    self.widths[code - 32]
                } else {
                    self.average_char_width
                }
            })
            .sum();
        let factor = if bold { self.bold_factor } else { 1.0 };
        em * factor * size
    }

    /// Greedy word-wrap of `s` into lines no wider than `max_width` points.
    ///
    /// A single word wider than the line is placed on its own line untrimmed
    /// (the renderer never truncates content). Empty input yields no lines.
    pub fn wrap(&self, s: &str, size: f32, bold: bool, max_width: f32) -> Vec<String> {
        let mut lines = Vec::new();
        let mut current = String::new();
        let mut current_width = 0.0_f32;
        let space_width = self.measure(" ", size, bold);

        for word in s.split_whitespace() {
            let word_width = self.measure(word, size, bold);
            if current.is_empty() {
                current.push_str(word);
                current_width = word_width;
            } else if current_width + space_width + word_width > max_width {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
                current_width = word_width;
            } else {
                current.push(' ');
                current.push_str(word);
                current_width += space_width + word_width;
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
        lines
    }
}

/// Helvetica (AFM widths / 1000).
static HELVETICA_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.278, 0.355, 0.556, 0.556, 0.889, 0.667, 0.191, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.278, 0.278, 0.584, 0.584, 0.584, 0.556, 1.015,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.667, 0.667, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.500, 0.667, 0.556, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.278, 0.278, 0.278, 0.469, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.556, 0.500, 0.556, 0.556, 0.278, 0.556, 0.556, 0.222, 0.222, 0.500, 0.222, 0.833,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.556, 0.556, 0.556, 0.556, 0.333, 0.500, 0.278, 0.556, 0.500, 0.722, 0.500, 0.500, 0.500,
        // {      |      }      ~
        0.334, 0.260, 0.334, 0.584,
    ],
    average_char_width: 0.513,
    bold_factor: 1.08,
};

/// Times-Roman (AFM widths / 1000).
static TIMES_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.250, 0.333, 0.408, 0.500, 0.500, 0.833, 0.778, 0.180, 0.333, 0.333, 0.500, 0.564, 0.250, 0.333, 0.250, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500,
        // :      ;      <      =      >      ?      @
        0.278, 0.278, 0.564, 0.564, 0.564, 0.444, 0.921,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.722, 0.667, 0.667, 0.722, 0.611, 0.556, 0.722, 0.722, 0.333, 0.389, 0.722, 0.611, 0.889,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.722, 0.556, 0.722, 0.667, 0.556, 0.611, 0.722, 0.722, 0.944, 0.722, 0.722, 0.611,
        // [      \      ]      ^      _      `
        0.333, 0.278, 0.333, 0.469, 0.500, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.444, 0.500, 0.444, 0.500, 0.444, 0.333, 0.500, 0.500, 0.278, 0.278, 0.500, 0.278, 0.778,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.500, 0.500, 0.500, 0.500, 0.333, 0.389, 0.278, 0.500, 0.500, 0.722, 0.500, 0.500, 0.444,
        // {      |      }      ~
        0.480, 0.200, 0.480, 0.541,
    ],
    average_char_width: 0.488,
    bold_factor: 1.05,
};

/// Courier is fixed pitch: every glyph is 600/1000, bold included.
static COURIER_TABLE: FontMetricTable = FontMetricTable {
    widths: [0.600; 95],
    average_char_width: 0.600,
    bold_factor: 1.0,
};

/// Returns the static metric table for a font family.
pub fn metrics_for(font: FontFamily) -> &'static FontMetricTable {
    match font {
        FontFamily::Helvetica => &HELVETICA_TABLE,
        FontFamily::Times => &TIMES_TABLE,
        FontFamily::Courier => &COURIER_TABLE,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_empty_is_zero() {
        let m = metrics_for(FontFamily::Helvetica);
        assert_eq!(m.measure("", 10.0, false), 0.0);
    }

    #[test]
    fn test_measure_scales_with_size() {
        let m = metrics_for(FontFamily::Helvetica);
        let at_10 = m.measure("Rust", 10.0, false);
        let at_20 = m.measure("Rust", 20.0, false);
        assert!((at_20 - at_10 * 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_bold_wider_than_regular() {
        let m = metrics_for(FontFamily::Helvetica);
        assert!(m.measure("Rust", 10.0, true) > m.measure("Rust", 10.0, false));
    }

    #[test]
    fn test_courier_is_fixed_pitch() {
        let m = metrics_for(FontFamily::Courier);
        // "iiii" and "WWWW" are equal width in a monospace face.
        assert_eq!(m.measure("iiii", 10.0, false), m.measure("WWWW", 10.0, false));
        // Bold is the same width.
        assert_eq!(m.measure("Rust", 10.0, true), m.measure("Rust", 10.0, false));
    }

    #[test]
    fn test_times_narrower_than_helvetica() {
        let text = "Professional summary paragraph";
        let helvetica = metrics_for(FontFamily::Helvetica).measure(text, 10.0, false);
        let times = metrics_for(FontFamily::Times).measure(text, 10.0, false);
        assert!(times < helvetica);
    }

    #[test]
    fn test_wrap_empty_yields_no_lines() {
        let m = metrics_for(FontFamily::Helvetica);
        assert!(m.wrap("", 10.0, false, 200.0).is_empty());
        assert!(m.wrap("   ", 10.0, false, 200.0).is_empty());
    }

    #[test]
    fn test_wrap_short_text_single_line() {
        let m = metrics_for(FontFamily::Helvetica);
        let lines = m.wrap("Shipped X", 10.0, false, 200.0);
        assert_eq!(lines, vec!["Shipped X"]);
    }

    #[test]
    fn test_wrap_preserves_all_words_in_order() {
        let m = metrics_for(FontFamily::Helvetica);
        let text = "Led migration of a monolithic billing system to event-driven \
                    services handling two million transactions per day";
        let lines = m.wrap(text, 10.0, false, 150.0);
        assert!(lines.len() > 1);
        let rejoined = lines.join(" ");
        assert_eq!(rejoined, text.split_whitespace().collect::<Vec<_>>().join(" "));
    }

    #[test]
    fn test_wrap_never_exceeds_width_except_long_words() {
        let m = metrics_for(FontFamily::Helvetica);
        let lines = m.wrap("alpha beta gamma delta epsilon zeta", 10.0, false, 80.0);
        for line in &lines {
            if line.contains(' ') {
                assert!(m.measure(line, 10.0, false) <= 80.0 + 1e-3);
            }
        }
    }

    #[test]
    fn test_wrap_oversized_word_gets_own_line() {
        let m = metrics_for(FontFamily::Helvetica);
        let lines = m.wrap("a pneumonoultramicroscopicsilicovolcanoconiosis b", 10.0, false, 60.0);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "pneumonoultramicroscopicsilicovolcanoconiosis");
    }
}
