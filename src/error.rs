//! Error type shared by the splitter, leveling, and geometry layers.

use core::fmt;

use crate::entity::EntityId;

/// Layout error.
///
/// Rendering input that is merely stale never produces an error; these
/// variants signal broken call sequencing that tests should catch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LayoutError {
    /// A level was fetched for an entity that was not registered in the
    /// current resolver pass.
    LevelNotAssigned {
        /// Entity whose level was requested.
        entity: EntityId,
    },
    /// A line window with `start > end` was supplied.
    InvalidLine {
        /// Line start offset.
        start: usize,
        /// Line end offset.
        end: usize,
    },
}

impl LayoutError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::LevelNotAssigned { .. } => "LEVEL_NOT_ASSIGNED",
            Self::InvalidLine { .. } => "INVALID_LINE",
        }
    }
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LevelNotAssigned { entity } => write!(
                f,
                "{}: no level assigned to entity {} in the current pass",
                self.code(),
                entity
            ),
            Self::InvalidLine { start, end } => write!(
                f,
                "{}: line start {} is past line end {}",
                self.code(),
                start,
                end
            ),
        }
    }
}

impl std::error::Error for LayoutError {}
