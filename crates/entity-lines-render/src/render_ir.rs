use entity_lines::Entity;
use serde::{Deserialize, Serialize};

/// Horizontal text direction of a rendered line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Left to right.
    #[default]
    Ltr,
    /// Right to left; range read order is reversed.
    Rtl,
}

impl Direction {
    /// Whether ranges read back to front.
    pub fn is_rtl(self) -> bool {
        matches!(self, Self::Rtl)
    }
}

/// Horizontal pixel interval an entity occupies on one line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PixelRange {
    /// Left edge.
    pub x1: f32,
    /// Right edge.
    pub x2: f32,
}

impl PixelRange {
    /// Create a range; edges are swapped if given out of order.
    pub fn new(x1: f32, x2: f32) -> Self {
        if x2 < x1 {
            Self { x1: x2, x2: x1 }
        } else {
            Self { x1, x2 }
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> f32 {
        self.x2 - self.x1
    }

    /// Range as an `(x1, x2)` tuple.
    pub fn as_interval(&self) -> (f32, f32) {
        (self.x1, self.x2)
    }
}

/// Iterator over a [`RangeList`] in read order.
pub enum RangeIter<'a> {
    /// Storage order.
    Forward(core::slice::Iter<'a, PixelRange>),
    /// Reversed storage order (right-to-left).
    Reversed(core::iter::Rev<core::slice::Iter<'a, PixelRange>>),
}

impl<'a> Iterator for RangeIter<'a> {
    type Item = &'a PixelRange;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Forward(iter) => iter.next(),
            Self::Reversed(iter) => iter.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Self::Forward(iter) => iter.size_hint(),
            Self::Reversed(iter) => iter.size_hint(),
        }
    }
}

impl ExactSizeIterator for RangeIter<'_> {}

/// Pixel ranges of one entity on one line.
///
/// Storage keeps the order ranges were added in; [`iter`](Self::iter) reads
/// them back to front for right-to-left lines. [`first`](Self::first) always
/// returns the first stored range.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RangeList {
    items: Vec<PixelRange>,
    direction: Direction,
}

impl RangeList {
    /// Empty list for `direction`.
    pub fn new(direction: Direction) -> Self {
        Self {
            items: Vec::with_capacity(1),
            direction,
        }
    }

    /// Append a range.
    pub fn add(&mut self, x1: f32, x2: f32) {
        self.items.push(PixelRange::new(x1, x2));
    }

    /// Ranges in read order.
    pub fn iter(&self) -> RangeIter<'_> {
        if self.direction.is_rtl() {
            RangeIter::Reversed(self.items.iter().rev())
        } else {
            RangeIter::Forward(self.items.iter())
        }
    }

    /// First stored range, independent of direction.
    pub fn first(&self) -> Option<&PixelRange> {
        self.items.first()
    }

    /// Ranges in storage order.
    pub fn as_slice(&self) -> &[PixelRange] {
        &self.items
    }

    /// Read direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Number of ranges.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether no range was recorded (the text node produced no rectangles).
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a> IntoIterator for &'a RangeList {
    type Item = &'a PixelRange;
    type IntoIter = RangeIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Drawable geometry of one entity on one line.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeometricEntity {
    /// Entity being drawn.
    pub entity: Entity,
    /// Horizontal extents on this line.
    pub ranges: RangeList,
    /// Y of the underline, relative to the line's annotation band.
    pub line_y: f32,
    /// Y of the label caption baseline.
    pub text_y: f32,
}

/// Vertical geometry of stacked annotation rows.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeometryConfig {
    /// Underline stroke thickness.
    pub line_thickness_px: f32,
    /// Label caption font size.
    pub font_size_px: f32,
    /// Gap below each stacked row.
    pub row_gap_px: f32,
    /// Gap between the underline and the caption's vertical center.
    pub label_gap_px: f32,
}

impl GeometryConfig {
    /// Defaults with a caption font size.
    pub fn for_font_size(font_size_px: f32) -> Self {
        Self {
            font_size_px,
            ..Self::default()
        }
    }

    /// Underline Y for `level`.
    pub fn line_y(&self, level: usize) -> f32 {
        self.line_thickness_px
            + (self.line_thickness_px + self.font_size_px + self.row_gap_px) * level as f32
    }

    /// Caption Y for an underline at `line_y`.
    pub fn text_y(&self, line_y: f32) -> f32 {
        line_y + self.font_size_px / 2.0 + self.label_gap_px
    }
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            line_thickness_px: 2.0,
            font_size_px: 16.0,
            row_gap_px: 8.0,
            label_gap_px: 5.0,
        }
    }
}
