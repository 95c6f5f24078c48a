//! Entity-aware word wrapping.
//!
//! A line breaks before character `i` when:
//!
//! 1. `i` is a CR or LF (hard break; CRLF counts as one terminator),
//! 2. a word starts at `i`, fits on an empty line, but not on this one,
//! 3. the line is already over budget, or, when entities cover `i`, adding the
//!    widest of their label badges would push it over budget.
//!
//! Rule 3 keeps a badge from being cut at the right edge of the viewport.

use std::collections::BTreeMap;
use std::iter::Peekable;
use std::str::Chars;

use smallvec::SmallVec;

use crate::entity::{Entities, Entity};
use crate::label::{LabelId, LabelMetrics};
use crate::line::TextLine;
use crate::measure::WidthBudget;

/// Source of visual line boundaries.
pub trait LineSplitter {
    /// Lazy iterator returned by [`split`](Self::split).
    type Lines<'s>: Iterator<Item = TextLine>
    where
        Self: 's;

    /// Split `text` into lines starting at character `start_offset`.
    fn split<'s>(
        &'s mut self,
        text: &'s str,
        start_offset: usize,
        entities: &'s Entities,
    ) -> Self::Lines<'s>;

    /// Drop memoized per-text state.
    fn reset(&mut self);
}

/// Width of each non-whitespace run, keyed by the run's start offset.
#[derive(Clone, Debug, Default)]
struct ChunkWidths {
    fingerprint: Option<(u32, usize)>,
    char_len: usize,
    widths: BTreeMap<usize, f32>,
}

impl ChunkWidths {
    fn clear(&mut self) {
        self.fingerprint = None;
        self.char_len = 0;
        self.widths.clear();
    }

    fn is_current(&self, fingerprint: (u32, usize)) -> bool {
        self.fingerprint == Some(fingerprint)
    }

    fn get(&self, offset: usize) -> Option<f32> {
        self.widths.get(&offset).copied()
    }
}

fn fingerprint(text: &str) -> (u32, usize) {
    (crc32fast::hash(text.as_bytes()), text.len())
}

/// Greedy line splitter that reserves room for label badges.
#[derive(Debug)]
pub struct TextLineSplitter<B, L> {
    budget: B,
    labels: L,
    chunks: ChunkWidths,
}

impl<B, L> TextLineSplitter<B, L>
where
    B: WidthBudget,
    L: LabelMetrics,
{
    /// Create a splitter over a width tracker and label lookup.
    pub fn new(budget: B, labels: L) -> Self {
        Self {
            budget,
            labels,
            chunks: ChunkWidths::default(),
        }
    }

    /// Label lookup in use.
    pub fn labels(&self) -> &L {
        &self.labels
    }

    /// Split `text` into lines starting at character `start_offset`.
    ///
    /// The returned iterator is lazy; dropping it early costs nothing.
    pub fn split<'s>(
        &'s mut self,
        text: &'s str,
        start_offset: usize,
        entities: &'s Entities,
    ) -> LineSplit<'s, B, L> {
        self.calculate_chunk_widths(text);
        self.budget.reset();
        let mut chars = text.chars().peekable();
        // Fast-forward to the start offset; splitting begins mid-document.
        for _ in 0..start_offset {
            if chars.next().is_none() {
                break;
            }
        }
        let len = self.chunks.char_len;
        LineSplit {
            splitter: self,
            chars,
            entities: entities.as_slice(),
            next_entity: 0,
            active: SmallVec::new(),
            offset: start_offset.min(len),
            line_start: start_offset.min(len),
            len,
        }
    }

    /// Forget the memoized word widths.
    pub fn reset(&mut self) {
        self.chunks.clear();
    }

    fn calculate_chunk_widths(&mut self, text: &str) {
        let fp = fingerprint(text);
        if self.chunks.is_current(fp) {
            return;
        }
        self.chunks.clear();
        let mut inside_word = false;
        let mut start = 0usize;
        let mut len = 0usize;
        self.budget.reset();
        for (i, ch) in text.chars().enumerate() {
            len = i + 1;
            match (inside_word, ch.is_whitespace()) {
                (false, false) => {
                    inside_word = true;
                    start = i;
                    self.budget.reset();
                    self.budget.add(ch);
                }
                (false, true) => {}
                (true, false) => self.budget.add(ch),
                (true, true) => {
                    inside_word = false;
                    self.chunks.widths.insert(start, self.budget.width());
                }
            }
        }
        if inside_word {
            self.chunks.widths.insert(start, self.budget.width());
        }
        self.budget.reset();
        self.chunks.char_len = len;
        self.chunks.fingerprint = Some(fp);
        log::debug!(
            "memoized {} word widths for {} chars (crc={:08x})",
            self.chunks.widths.len(),
            len,
            fp.0
        );
    }

    fn needs_soft_break(&self, offset: usize, labels: &[LabelId]) -> bool {
        if self.budget.is_empty() {
            // Breaking before anything is placed would only emit an empty line.
            return false;
        }
        if let Some(word_width) = self.chunks.get(offset) {
            let is_short_word = word_width <= self.budget.max_width();
            if is_short_word && self.budget.is_full(word_width) {
                return true;
            }
        }
        if labels.is_empty() {
            self.budget.is_full(0.0)
        } else {
            self.budget.is_full(self.labels.max_width_among(&labels))
        }
    }
}

impl<B, L> LineSplitter for TextLineSplitter<B, L>
where
    B: WidthBudget,
    L: LabelMetrics,
{
    type Lines<'s>
        = LineSplit<'s, B, L>
    where
        Self: 's;

    fn split<'s>(
        &'s mut self,
        text: &'s str,
        start_offset: usize,
        entities: &'s Entities,
    ) -> Self::Lines<'s> {
        TextLineSplitter::split(self, text, start_offset, entities)
    }

    fn reset(&mut self) {
        TextLineSplitter::reset(self);
    }
}

/// Lazy iterator over the lines of one [`TextLineSplitter::split`] call.
pub struct LineSplit<'s, B, L> {
    splitter: &'s mut TextLineSplitter<B, L>,
    chars: Peekable<Chars<'s>>,
    entities: &'s [Entity],
    // Entities before this index have been seen by `advance_entities`.
    next_entity: usize,
    // `(end_offset, label)` of the entities covering the current offset.
    active: SmallVec<[(usize, LabelId); 4]>,
    offset: usize,
    line_start: usize,
    len: usize,
}

impl<B, L> LineSplit<'_, B, L> {
    /// Bring `active` up to date for `offset`; offsets only grow.
    fn advance_entities(&mut self, offset: usize) {
        while let Some(entity) = self.entities.get(self.next_entity) {
            if entity.start_offset > offset {
                break;
            }
            if entity.end_offset > offset {
                self.active.push((entity.end_offset, entity.label));
            }
            self.next_entity += 1;
        }
        self.active.retain(|(end, _)| *end > offset);
    }

    fn active_labels(&self) -> SmallVec<[LabelId; 4]> {
        self.active.iter().map(|(_, label)| *label).collect()
    }
}

impl<B, L> Iterator for LineSplit<'_, B, L>
where
    B: WidthBudget,
    L: LabelMetrics,
{
    type Item = TextLine;

    fn next(&mut self) -> Option<TextLine> {
        while let Some(ch) = self.chars.next() {
            let i = self.offset;
            self.offset += 1;

            if ch == '\n' || ch == '\r' {
                let line = TextLine::from_bounds(self.line_start, i);
                if ch == '\r' && self.chars.peek() == Some(&'\n') {
                    self.chars.next();
                    self.offset += 1;
                }
                self.line_start = self.offset;
                self.splitter.budget.reset();
                log::trace!("hard break -> {:?}", line);
                return Some(line);
            }

            self.advance_entities(i);
            let labels = self.active_labels();
            if self.splitter.needs_soft_break(i, &labels) {
                let line = TextLine::from_bounds(self.line_start, i);
                self.line_start = i;
                self.splitter.budget.reset();
                self.splitter.budget.add(ch);
                log::trace!("soft break -> {:?}", line);
                return Some(line);
            }
            self.splitter.budget.add(ch);
        }

        if !self.splitter.budget.is_empty() && self.line_start < self.len {
            let line = TextLine::from_bounds(self.line_start, self.len);
            self.line_start = self.len;
            self.splitter.budget.reset();
            log::trace!("final line -> {:?}", line);
            return Some(line);
        }
        None
    }
}

impl<B, L> core::iter::FusedIterator for LineSplit<'_, B, L>
where
    B: WidthBudget,
    L: LabelMetrics,
{
}
