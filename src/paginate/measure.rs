//! Text measurement surfaces.

use super::Typography;

/// A facility answering "how tall is this text at this typography and width?".
///
/// Live rendering surfaces implement this; when none is available the
/// paginator falls back to character budgeting.
pub trait TextMeasurer: Send + Sync {
    /// Whether the surface can measure right now.
    fn is_available(&self) -> bool {
        true
    }

    /// Rendered height in pixels, or `None` when measurement failed.
    fn measure_height(&self, text: &str, typography: &Typography, width: f32) -> Option<f32>;
}

/// Deterministic approximation of a rendered text block.
///
/// Wraps greedily on spaces using a fixed per-character advance; wide
/// (CJK) characters take a full em and may break anywhere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMeasurer {
    /// Advance of a narrow character as a fraction of the font size
    pub narrow_advance: f32,
    /// Advance of a wide character as a fraction of the font size
    pub wide_advance: f32,
}

impl MonospaceMeasurer {
    /// Create a measurer with explicit advances.
    pub fn new(narrow_advance: f32, wide_advance: f32) -> Self {
        Self {
            narrow_advance,
            wide_advance,
        }
    }

    fn char_width(&self, c: char, font_size: f32) -> f32 {
        if is_wide_char(c) {
            self.wide_advance * font_size
        } else {
            self.narrow_advance * font_size
        }
    }

    fn line_count(&self, line: &str, font_size: f32, width: f32) -> usize {
        let space = self.char_width(' ', font_size);
        let mut lines = 1;
        let mut used = 0.0;

        for word in line.split(' ').filter(|w| !w.is_empty()) {
            let word_width: f32 = word.chars().map(|c| self.char_width(c, font_size)).sum();
            let gap = if used > 0.0 { space } else { 0.0 };

            if used + gap + word_width <= width {
                used += gap + word_width;
            } else if word_width <= width {
                lines += 1;
                used = word_width;
            } else {
                // Break inside the word
                if used > 0.0 {
                    used += gap;
                }
                for c in word.chars() {
                    let cw = self.char_width(c, font_size);
                    if used + cw > width && used > 0.0 {
                        lines += 1;
                        used = 0.0;
                    }
                    used += cw;
                }
            }
        }
        lines
    }
}

impl Default for MonospaceMeasurer {
    fn default() -> Self {
        Self::new(0.55, 1.0)
    }
}

impl TextMeasurer for MonospaceMeasurer {
    fn measure_height(&self, text: &str, typography: &Typography, width: f32) -> Option<f32> {
        if !(width > 0.0) || !(typography.font_size > 0.0) {
            return None;
        }
        let lines: usize = text
            .split('\n')
            .map(|line| self.line_count(line.trim_end_matches('\r'), typography.font_size, width))
            .sum();
        Some(lines as f32 * typography.line_height_px())
    }
}

/// Check for characters rendered at full width.
pub(crate) fn is_wide_char(c: char) -> bool {
    matches!(c,
        '\u{1100}'..='\u{11FF}'   // Hangul Jamo
        | '\u{2E80}'..='\u{9FFF}' // CJK radicals through unified ideographs, kana
        | '\u{AC00}'..='\u{D7AF}' // Hangul syllables
        | '\u{F900}'..='\u{FAFF}' // CJK compatibility ideographs
        | '\u{FF00}'..='\u{FF60}' // Fullwidth forms
        | '\u{20000}'..='\u{2FFFF}'
    )
}
