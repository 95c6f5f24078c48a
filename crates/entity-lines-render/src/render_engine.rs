use std::sync::Arc;

use entity_lines::{
    Entities, EntityId, HeuristicMeasurer, LabelMetrics, LayoutConfig, LayoutError, LevelResolver,
    TextLine, TextLineSplitter, TextMeasurer, WidthManager,
};
use serde::Serialize;

use crate::entity_line::EntityLine;
use crate::render_ir::{Direction, GeometricEntity, GeometryConfig};
use crate::text_element::MeasuredTextElement;

/// How long one leveling pass lasts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelScope {
    /// Levels are recomputed for every line.
    #[default]
    PerLine,
    /// One pass per document; an entity wrapping onto the next line keeps its
    /// row there unless something on that line forces it elsewhere. Entities
    /// that ended on earlier lines no longer take up rows.
    PerDocument,
}

/// Render engine options.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderEngineOptions {
    /// Line splitting configuration.
    pub layout: LayoutConfig,
    /// Stacked row geometry.
    pub geometry: GeometryConfig,
    /// Leveling pass scope.
    pub level_scope: LevelScope,
    /// Text direction of every line.
    pub direction: Direction,
    /// X of each line's first glyph.
    pub origin_x: f32,
}

impl RenderEngineOptions {
    /// Defaults for a viewport width.
    pub fn for_width(max_line_width: f32) -> Self {
        Self {
            layout: LayoutConfig::for_width(max_line_width),
            ..Self::default()
        }
    }
}

impl Default for RenderEngineOptions {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            geometry: GeometryConfig::default(),
            level_scope: LevelScope::default(),
            direction: Direction::default(),
            origin_x: 0.0,
        }
    }
}

/// Geometry of every entity on one visual line.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RenderedLine {
    /// Line window.
    pub line: TextLine,
    /// Entity geometry in document order.
    pub entities: Vec<GeometricEntity>,
}

/// All lines of one document render.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RenderedDocument {
    /// Lines in visual order.
    pub lines: Vec<RenderedLine>,
}

impl RenderedDocument {
    /// Every geometric entity, line by line.
    pub fn geometric_entities(&self) -> impl Iterator<Item = &GeometricEntity> + '_ {
        self.lines.iter().flat_map(|l| l.entities.iter())
    }

    /// JSON for a drawing layer.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Headless text → lines → entity geometry pipeline.
#[derive(Clone)]
pub struct RenderEngine {
    opts: RenderEngineOptions,
    measurer: Arc<dyn TextMeasurer>,
}

impl core::fmt::Debug for RenderEngine {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RenderEngine")
            .field("opts", &self.opts)
            .finish_non_exhaustive()
    }
}

impl RenderEngine {
    /// Create an engine measuring glyphs with the heuristic width model at
    /// the geometry font size.
    pub fn new(opts: RenderEngineOptions) -> Self {
        Self {
            opts,
            measurer: HeuristicMeasurer::shared(opts.geometry.font_size_px),
        }
    }

    /// Install a text measurer used for both splitting and positioning.
    pub fn with_text_measurer(mut self, measurer: Arc<dyn TextMeasurer>) -> Self {
        self.measurer = measurer;
        self
    }

    /// Engine options.
    pub fn options(&self) -> &RenderEngineOptions {
        &self.opts
    }

    /// A splitter wired to this engine's width budget.
    pub fn splitter<L: LabelMetrics>(&self, labels: L) -> TextLineSplitter<WidthManager, L> {
        entity_lines::splitter_for(self.opts.layout, self.measurer.clone(), labels)
    }

    /// Render a whole document and collect the lines.
    pub fn render_document<L, R>(
        &self,
        text: &str,
        entities: &Entities,
        labels: &L,
        levels: &mut R,
    ) -> Result<RenderedDocument, LayoutError>
    where
        L: LabelMetrics + ?Sized,
        R: LevelResolver + ?Sized,
    {
        let mut doc = RenderedDocument::default();
        self.render_document_with(text, entities, labels, levels, |line| {
            doc.lines.push(line)
        })?;
        Ok(doc)
    }

    /// Render a whole document and stream each line; returns the line count.
    pub fn render_document_with<L, R, F>(
        &self,
        text: &str,
        entities: &Entities,
        labels: &L,
        levels: &mut R,
        mut on_line: F,
    ) -> Result<usize, LayoutError>
    where
        L: LabelMetrics + ?Sized,
        R: LevelResolver + ?Sized,
        F: FnMut(RenderedLine),
    {
        let byte_offsets: Vec<usize> = text
            .char_indices()
            .map(|(idx, _)| idx)
            .chain(core::iter::once(text.len()))
            .collect();
        let direction = self.opts.direction;
        if self.opts.level_scope == LevelScope::PerDocument {
            levels.clear();
        }
        log::debug!(
            "render document: {} chars, {} entities, scope={:?}",
            byte_offsets.len() - 1,
            entities.len(),
            self.opts.level_scope
        );

        let mut splitter = self.splitter(labels);
        let mut count = 0usize;
        let mut previous: Vec<EntityId> = Vec::new();
        for line in splitter.split(text, 0, entities) {
            let slice = &text[byte_offsets[line.start_offset()]..byte_offsets[line.end_offset()]];
            let element = MeasuredTextElement::new(slice, self.measurer.as_ref(), self.opts.origin_x)
                .with_direction(direction);
            let entity_line = EntityLine::new(
                entities.intersecting(line.start_offset(), line.end_offset()),
                line,
                self.opts.geometry,
            );
            let geometric = match self.opts.level_scope {
                LevelScope::PerLine => entity_line.render(&element, labels, levels, direction)?,
                LevelScope::PerDocument => {
                    // Only entities continuing onto this line keep a registration.
                    for id in previous.drain(..) {
                        let continues = entity_line.entities().iter().any(|e| e.id == id);
                        if !continues {
                            levels.remove(id);
                        }
                    }
                    previous.extend(entity_line.entities().iter().map(|e| e.id));
                    entity_line.layout(&element, labels, levels, direction)?
                }
            };
            on_line(RenderedLine {
                line,
                entities: geometric,
            });
            count += 1;
        }
        log::debug!("render document: {} lines", count);
        Ok(count)
    }
}
