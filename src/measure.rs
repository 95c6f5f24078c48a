//! Glyph measurement and running line-width bookkeeping.

use std::sync::Arc;

/// Character width hook used for line fitting and label badge sizing.
pub trait TextMeasurer: Send + Sync {
    /// Rendered advance of one character in pixels.
    fn char_width_px(&self, ch: char) -> f32;

    /// Rendered width of `text`.
    ///
    /// Default sums per-character advances.
    fn text_width_px(&self, text: &str) -> f32 {
        text.chars().map(|ch| self.char_width_px(ch)).sum()
    }
}

/// Proportional width model for when no font backend is wired in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeuristicMeasurer {
    /// Font size in pixels.
    pub size_px: f32,
    /// Extra advance added after every visible character.
    pub letter_spacing: f32,
}

impl HeuristicMeasurer {
    /// Measurer for a font size with no letter spacing.
    pub fn new(size_px: f32) -> Self {
        Self {
            size_px,
            letter_spacing: 0.0,
        }
    }

    /// Create a shared measurer trait object.
    pub fn shared(size_px: f32) -> Arc<dyn TextMeasurer> {
        Arc::new(Self::new(size_px))
    }
}

impl Default for HeuristicMeasurer {
    fn default() -> Self {
        Self::new(16.0)
    }
}

impl TextMeasurer for HeuristicMeasurer {
    fn char_width_px(&self, ch: char) -> f32 {
        if ch.is_control() && ch != '\t' {
            return 0.0;
        }
        proportional_glyph_em_width(ch) * self.size_px + self.letter_spacing
    }
}

/// Fixed-advance measurer; every visible character has the same width.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonoMeasurer {
    /// Advance of one character in pixels.
    pub advance_px: f32,
}

impl MonoMeasurer {
    /// Measurer with the given advance.
    pub fn new(advance_px: f32) -> Self {
        Self { advance_px }
    }

    /// Create a shared measurer trait object.
    pub fn shared(advance_px: f32) -> Arc<dyn TextMeasurer> {
        Arc::new(Self::new(advance_px))
    }
}

impl TextMeasurer for MonoMeasurer {
    fn char_width_px(&self, ch: char) -> f32 {
        if ch.is_control() {
            0.0
        } else {
            self.advance_px
        }
    }
}

fn proportional_glyph_em_width(ch: char) -> f32 {
    match ch {
        ' ' => 0.32,
        '\t' => 1.28,
        '\u{00A0}' => 0.32,
        'i' | 'l' | 'I' | '|' | '!' => 0.24,
        '.' | ',' | ':' | ';' | '\'' | '"' | '`' => 0.23,
        '-' | '\u{2010}' | '\u{2011}' | '\u{2012}' | '\u{2013}' | '\u{2014}' => 0.34,
        '(' | ')' | '[' | ']' | '{' | '}' => 0.30,
        'f' | 't' | 'j' | 'r' => 0.34,
        'm' | 'w' | 'M' | 'W' | '@' | '%' | '&' | '#' => 0.74,
        c if c.is_ascii_digit() => 0.52,
        c if c.is_ascii_uppercase() => 0.64,
        c if c.is_ascii_lowercase() => 0.52,
        c if c.is_whitespace() => 0.32,
        c if c.is_ascii_punctuation() => 0.42,
        // CJK and other wide scripts.
        c if ('\u{1100}'..='\u{115F}').contains(&c)
            || ('\u{2E80}'..='\u{A4CF}').contains(&c)
            || ('\u{AC00}'..='\u{D7A3}').contains(&c)
            || ('\u{F900}'..='\u{FAFF}').contains(&c)
            || ('\u{FF00}'..='\u{FF60}').contains(&c) =>
        {
            1.0
        }
        _ => 0.56,
    }
}

/// Running width of the line currently being filled.
pub trait WidthBudget {
    /// Forget everything added since the last reset.
    fn reset(&mut self);

    /// Account one character's rendered width.
    fn add(&mut self, ch: char);

    /// Whether no character was added since the last reset.
    fn is_empty(&self) -> bool;

    /// Whether `width() + extra_px` exceeds the maximum line width.
    fn is_full(&self, extra_px: f32) -> bool {
        self.width() + extra_px > self.max_width()
    }

    /// Accumulated width in pixels.
    fn width(&self) -> f32;

    /// Maximum line width in pixels.
    fn max_width(&self) -> f32;
}

/// [`WidthBudget`] backed by a [`TextMeasurer`].
#[derive(Clone)]
pub struct WidthManager {
    max_width: f32,
    width: f32,
    chars: usize,
    measurer: Arc<dyn TextMeasurer>,
}

impl core::fmt::Debug for WidthManager {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WidthManager")
            .field("max_width", &self.max_width)
            .field("width", &self.width)
            .field("chars", &self.chars)
            .finish()
    }
}

impl WidthManager {
    /// Create a tracker for lines of at most `max_width` pixels.
    pub fn new(max_width: f32, measurer: Arc<dyn TextMeasurer>) -> Self {
        Self {
            max_width: max_width.max(0.0),
            width: 0.0,
            chars: 0,
            measurer,
        }
    }

    /// Measurer used for character widths.
    pub fn measurer(&self) -> &Arc<dyn TextMeasurer> {
        &self.measurer
    }
}

impl WidthBudget for WidthManager {
    fn reset(&mut self) {
        self.width = 0.0;
        self.chars = 0;
    }

    fn add(&mut self, ch: char) {
        self.width += self.measurer.char_width_px(ch);
        self.chars += 1;
    }

    fn is_empty(&self) -> bool {
        self.chars == 0
    }

    fn width(&self) -> f32 {
        self.width
    }

    fn max_width(&self) -> f32 {
        self.max_width
    }
}
