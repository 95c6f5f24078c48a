//! Entity-aware line splitting and overlap leveling for annotated text.
//!
//! The crate turns flat text plus labeled spans into visual line windows
//! ([`TextLineSplitter`]) and assigns stacking rows to spans whose extents
//! collide ([`LevelManager`]). Pixel geometry per rendered line lives in
//! `entity-lines-render`.

#![cfg_attr(
    not(test),
    deny(
        clippy::disallowed_methods,
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::panic_in_result_fn,
        clippy::todo,
        clippy::unimplemented
    )
)]

mod entity;
mod error;
mod label;
mod level;
mod line;
mod measure;
mod splitter;

pub use entity::{Entities, Entity, EntityId};
pub use error::LayoutError;
pub use label::{Label, LabelId, LabelList, LabelMetrics};
pub use level::{Interval, LevelManager, LevelResolver};
pub use line::{LayoutConfig, TextLine};
pub use measure::{HeuristicMeasurer, MonoMeasurer, TextMeasurer, WidthBudget, WidthManager};
pub use splitter::{LineSplit, LineSplitter, TextLineSplitter};

use std::sync::Arc;

/// Splitter over the standard width tracker for `cfg`.
pub fn splitter_for<L: LabelMetrics>(
    cfg: LayoutConfig,
    measurer: Arc<dyn TextMeasurer>,
    labels: L,
) -> TextLineSplitter<WidthManager, L> {
    TextLineSplitter::new(WidthManager::new(cfg.max_line_width, measurer), labels)
}
