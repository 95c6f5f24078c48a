//! Per-line entity geometry for `entity-lines`.
//!
//! [`EntityLine`] turns the entities crossing one rendered line into pixel
//! ranges and stacked underline/caption coordinates. [`RenderEngine`] runs the
//! whole text → lines → geometry pipeline headlessly.

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

mod entity_line;
mod render_engine;
mod render_ir;
mod text_element;

pub use entity_line::EntityLine;
pub use render_engine::{
    LevelScope, RenderEngine, RenderEngineOptions, RenderedDocument, RenderedLine,
};
pub use render_ir::{
    Direction, GeometricEntity, GeometryConfig, PixelRange, RangeIter, RangeList,
};
pub use text_element::{ClientRect, MeasuredTextElement, TextElement};
