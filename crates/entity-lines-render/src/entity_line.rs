//! Geometry of the entities crossing one rendered line.

use entity_lines::{Entity, Interval, LabelMetrics, LayoutError, LevelResolver, TextLine};

use crate::render_ir::{Direction, GeometricEntity, GeometryConfig, RangeList};
use crate::text_element::TextElement;

/// Entities intersecting one [`TextLine`], ready to be measured against its
/// rendered element.
#[derive(Clone, Debug)]
pub struct EntityLine {
    entities: Vec<Entity>,
    text_line: TextLine,
    cfg: GeometryConfig,
}

impl EntityLine {
    /// Keep the entities of `entities` that share a character with `text_line`,
    /// in their given order.
    pub fn new<'a, I>(entities: I, text_line: TextLine, cfg: GeometryConfig) -> Self
    where
        I: IntoIterator<Item = &'a Entity>,
    {
        let entities = entities
            .into_iter()
            .filter(|e| e.intersects(text_line.start_offset(), text_line.end_offset()))
            .copied()
            .collect();
        Self {
            entities,
            text_line,
            cfg,
        }
    }

    /// Line window.
    pub fn text_line(&self) -> TextLine {
        self.text_line
    }

    /// Entities on this line.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Clear `levels`, then compute geometry for every entity on the line.
    pub fn render<L, R>(
        &self,
        element: &dyn TextElement,
        labels: &L,
        levels: &mut R,
        direction: Direction,
    ) -> Result<Vec<GeometricEntity>, LayoutError>
    where
        L: LabelMetrics + ?Sized,
        R: LevelResolver + ?Sized,
    {
        if element.rendered_text_length() == 0.0 {
            return Ok(Vec::new());
        }
        levels.clear();
        self.layout(element, labels, levels, direction)
    }

    /// Like [`render`](Self::render) but keeps earlier registrations in
    /// `levels`, so entities spanning several lines can keep one row.
    ///
    /// Entities that started on an earlier line are re-registered with
    /// [`LevelResolver::carry_over`].
    pub fn layout<L, R>(
        &self,
        element: &dyn TextElement,
        labels: &L,
        levels: &mut R,
        direction: Direction,
    ) -> Result<Vec<GeometricEntity>, LayoutError>
    where
        L: LabelMetrics + ?Sized,
        R: LevelResolver + ?Sized,
    {
        // Checked again here since callers may skip `render`.
        if element.rendered_text_length() == 0.0 {
            return Ok(Vec::new());
        }
        let mut out = Vec::with_capacity(self.entities.len());
        for entity in &self.entities {
            let ranges = self.create_ranges(element, entity, direction);
            let label_width = labels.width_of(entity.label).unwrap_or_else(|| {
                log::warn!(
                    "entity {} references unknown label {}",
                    entity.id,
                    entity.label
                );
                0.0
            });
            let intervals: Vec<Interval> = ranges
                .as_slice()
                .iter()
                .enumerate()
                .map(|(idx, r)| {
                    if idx == 0 {
                        // The badge hangs off the first range.
                        (r.x1, r.x2.max(r.x1 + label_width))
                    } else {
                        (r.x1, r.x2)
                    }
                })
                .collect();
            if entity.start_offset < self.text_line.start_offset() {
                levels.carry_over(entity.id, &intervals);
            } else {
                levels.update(entity.id, &intervals);
            }
            let level = levels.fetch_level(entity.id)?;
            let line_y = self.cfg.line_y(level);
            let text_y = self.cfg.text_y(line_y);
            out.push(GeometricEntity {
                entity: *entity,
                ranges,
                line_y,
                text_y,
            });
        }
        Ok(out)
    }

    fn create_ranges(
        &self,
        element: &dyn TextElement,
        entity: &Entity,
        direction: Direction,
    ) -> RangeList {
        let mut ranges = RangeList::new(direction);
        let line_start = self.text_line.start_offset();
        let s = entity.start_offset.max(line_start) - line_start;
        let e = entity.end_offset.min(self.text_line.end_offset()) - line_start;
        match element.text_content_len() {
            Some(len) if len >= e => {}
            stale => {
                log::warn!(
                    "text element for line {:?} is stale (content_len={:?}, span end={}); entity {} degrades to an empty range",
                    self.text_line,
                    stale,
                    e,
                    entity.id
                );
                ranges.add(0.0, 0.0);
                return ranges;
            }
        }
        for rect in element.client_rects(s, e) {
            ranges.add(rect.left, rect.right);
        }
        ranges
    }
}
