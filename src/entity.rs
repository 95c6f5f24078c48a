use core::ops::Range;

use crate::label::LabelId;

/// Stable identifier of an annotated span.
pub type EntityId = u64;

/// Labeled span over document character offsets.
///
/// Offsets are half-open and count `char`s from the start of the document,
/// not from the start of any visual line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entity {
    /// Identifier used for level bookkeeping.
    pub id: EntityId,
    /// First covered character.
    pub start_offset: usize,
    /// One past the last covered character.
    pub end_offset: usize,
    /// Label shown in the entity's badge.
    pub label: LabelId,
}

impl Entity {
    /// Create an entity.
    pub fn new(id: EntityId, start_offset: usize, end_offset: usize, label: LabelId) -> Self {
        Self {
            id,
            start_offset,
            end_offset,
            label,
        }
    }

    /// Whether `offset` falls inside the span.
    pub fn covers(&self, offset: usize) -> bool {
        self.start_offset <= offset && offset < self.end_offset
    }

    /// Whether the span shares at least one character with `[start, end)`.
    pub fn intersects(&self, start: usize, end: usize) -> bool {
        self.start_offset < end && start < self.end_offset
    }

    /// Offsets as a range.
    pub fn range(&self) -> Range<usize> {
        self.start_offset..self.end_offset
    }
}

/// Entities of one document, ordered by start offset.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Entities {
    items: Vec<Entity>,
    // Longest span; bounds how far back a lookup has to scan.
    max_len: usize,
}

impl Entities {
    /// Build the collection; entities are sorted by `(start_offset, id)` so
    /// callers get a stable order for level assignment.
    pub fn new(mut items: Vec<Entity>) -> Self {
        items.sort_by_key(|e| (e.start_offset, e.id));
        let max_len = items
            .iter()
            .map(|e| e.end_offset.saturating_sub(e.start_offset))
            .max()
            .unwrap_or(0);
        Self { items, max_len }
    }

    /// Empty collection.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of entities.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether there are no entities.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All entities in start-offset order.
    pub fn as_slice(&self) -> &[Entity] {
        &self.items
    }

    /// Iterate entities in start-offset order.
    pub fn iter(&self) -> core::slice::Iter<'_, Entity> {
        self.items.iter()
    }

    /// Entities covering `offset`.
    pub fn at(&self, offset: usize) -> impl Iterator<Item = &Entity> + '_ {
        self.window(offset, offset + 1)
            .iter()
            .filter(move |e| e.covers(offset))
    }

    /// Entities sharing at least one character with `[start, end)`, in order.
    pub fn intersecting(&self, start: usize, end: usize) -> impl Iterator<Item = &Entity> + '_ {
        self.window(start, end)
            .iter()
            .filter(move |e| e.intersects(start, end))
    }

    /// Candidates for `[start, end)`: nothing starting at or after `end` can
    /// reach it, nor anything starting more than `max_len` before `start`.
    fn window(&self, start: usize, end: usize) -> &[Entity] {
        let lower = start.saturating_sub(self.max_len);
        let from = self.items.partition_point(|e| e.start_offset < lower);
        let upto = self.items.partition_point(|e| e.start_offset < end);
        &self.items[from..upto.max(from)]
    }
}

impl From<Vec<Entity>> for Entities {
    fn from(items: Vec<Entity>) -> Self {
        Self::new(items)
    }
}

impl<'a> IntoIterator for &'a Entities {
    type Item = &'a Entity;
    type IntoIter = core::slice::Iter<'a, Entity>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
