use entity_lines::TextMeasurer;

use crate::render_ir::Direction;

/// Client rectangle edges reported by the platform text layout.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ClientRect {
    /// Left edge in viewport pixels.
    pub left: f32,
    /// Right edge in viewport pixels.
    pub right: f32,
}

/// Rendered text primitive holding exactly one visual line.
///
/// Browser backends map this to an SVG `<text>` element and DOM ranges;
/// headless callers use [`MeasuredTextElement`].
pub trait TextElement {
    /// Total rendered advance; `0.0` when nothing was laid out.
    fn rendered_text_length(&self) -> f32;

    /// Character length of the element's text node, if it has one.
    fn text_content_len(&self) -> Option<usize>;

    /// Rectangles covering the line-relative character span `[start, end)`.
    ///
    /// More than one rectangle is returned when the span crosses inline box
    /// boundaries.
    fn client_rects(&self, start: usize, end: usize) -> Vec<ClientRect>;
}

/// [`TextElement`] positioned by a [`TextMeasurer`] instead of a browser.
pub struct MeasuredTextElement {
    prefix: Vec<f32>,
    origin_x: f32,
    direction: Direction,
    box_breaks: Vec<usize>,
}

impl MeasuredTextElement {
    /// Lay out `text` starting at `origin_x`.
    pub fn new(text: &str, measurer: &dyn TextMeasurer, origin_x: f32) -> Self {
        let mut prefix = Vec::with_capacity(text.len() + 1);
        let mut x = 0.0f32;
        prefix.push(x);
        for ch in text.chars() {
            x += measurer.char_width_px(ch);
            prefix.push(x);
        }
        Self {
            prefix,
            origin_x,
            direction: Direction::Ltr,
            box_breaks: Vec::new(),
        }
    }

    /// Mirror glyph positions for right-to-left text.
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Character offsets where inline boxes begin; spans crossing one of
    /// them report one rectangle per box.
    pub fn with_box_breaks(mut self, mut breaks: Vec<usize>) -> Self {
        breaks.sort_unstable();
        breaks.dedup();
        self.box_breaks = breaks;
        self
    }

    fn char_len(&self) -> usize {
        self.prefix.len() - 1
    }

    fn total(&self) -> f32 {
        self.prefix.last().copied().unwrap_or(0.0)
    }

    fn rect(&self, start: usize, end: usize) -> ClientRect {
        let (a, b) = (self.prefix[start], self.prefix[end]);
        match self.direction {
            Direction::Ltr => ClientRect {
                left: self.origin_x + a,
                right: self.origin_x + b,
            },
            Direction::Rtl => ClientRect {
                left: self.origin_x + self.total() - b,
                right: self.origin_x + self.total() - a,
            },
        }
    }
}

impl TextElement for MeasuredTextElement {
    fn rendered_text_length(&self) -> f32 {
        self.total()
    }

    fn text_content_len(&self) -> Option<usize> {
        Some(self.char_len())
    }

    fn client_rects(&self, start: usize, end: usize) -> Vec<ClientRect> {
        let end = end.min(self.char_len());
        let start = start.min(end);
        if start == end {
            return vec![self.rect(start, end)];
        }
        let mut rects = Vec::with_capacity(1);
        let mut seg_start = start;
        for &brk in self.box_breaks.iter().filter(|b| **b > start && **b < end) {
            rects.push(self.rect(seg_start, brk));
            seg_start = brk;
        }
        rects.push(self.rect(seg_start, end));
        rects
    }
}
