use core::ops::Range;

use crate::error::LayoutError;

/// One visual line of wrapped text as a half-open, document-relative window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TextLine {
    start_offset: usize,
    end_offset: usize,
}

impl TextLine {
    /// Create a line window, rejecting `start_offset > end_offset`.
    pub fn new(start_offset: usize, end_offset: usize) -> Result<Self, LayoutError> {
        if start_offset > end_offset {
            return Err(LayoutError::InvalidLine {
                start: start_offset,
                end: end_offset,
            });
        }
        Ok(Self {
            start_offset,
            end_offset,
        })
    }

    pub(crate) fn from_bounds(start_offset: usize, end_offset: usize) -> Self {
        debug_assert!(start_offset <= end_offset);
        Self {
            start_offset,
            end_offset,
        }
    }

    /// First character of the line.
    pub fn start_offset(&self) -> usize {
        self.start_offset
    }

    /// One past the last character of the line.
    pub fn end_offset(&self) -> usize {
        self.end_offset
    }

    /// Number of characters on the line.
    pub fn len(&self) -> usize {
        self.end_offset - self.start_offset
    }

    /// Whether the line holds no characters (blank line between hard breaks).
    pub fn is_empty(&self) -> bool {
        self.start_offset == self.end_offset
    }

    /// Offsets as a range.
    pub fn range(&self) -> Range<usize> {
        self.start_offset..self.end_offset
    }

    /// The line's slice of `text`, which must be the text the line was split from.
    pub fn slice<'t>(&self, text: &'t str) -> &'t str {
        let mut indices = text
            .char_indices()
            .map(|(idx, _)| idx)
            .chain(core::iter::once(text.len()));
        let start = indices.nth(self.start_offset).unwrap_or(text.len());
        let end = if self.is_empty() {
            start
        } else {
            indices.nth(self.len() - 1).unwrap_or(text.len())
        };
        &text[start..end]
    }
}

/// Line-splitting configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutConfig {
    /// Maximum rendered width of one line in pixels.
    pub max_line_width: f32,
}

impl LayoutConfig {
    /// Convenience for a viewport width.
    pub fn for_width(max_line_width: f32) -> Self {
        Self { max_line_width }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            max_line_width: 640.0,
        }
    }
}
