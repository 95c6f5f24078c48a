//! Stacking rows for entities whose horizontal extents collide.

use std::collections::BTreeMap;

use smallvec::SmallVec;

use crate::entity::EntityId;
use crate::error::LayoutError;

/// Horizontal pixel interval `(x1, x2)`.
pub type Interval = (f32, f32);

/// Assigns non-colliding levels to entities.
pub trait LevelResolver {
    /// Forget every registration.
    fn clear(&mut self);

    /// Register (or re-register) `entity` with the intervals it occupies.
    fn update(&mut self, entity: EntityId, intervals: &[Interval]);

    /// Level assigned to `entity` in the current pass.
    fn fetch_level(&self, entity: EntityId) -> Result<usize, LayoutError>;

    /// Drop `entity`'s registration; unknown ids are ignored.
    fn remove(&mut self, entity: EntityId);

    /// Re-register an entity continuing from the previous line. It keeps its
    /// level when that level is free for `intervals`; otherwise, or when it
    /// was not registered, this behaves like [`update`](Self::update).
    fn carry_over(&mut self, entity: EntityId, intervals: &[Interval]) {
        self.update(entity, intervals);
    }
}

#[derive(Clone, Debug)]
struct Registration {
    level: usize,
    intervals: SmallVec<[Interval; 2]>,
}

/// Lowest-free-row leveling.
///
/// Each entity lands on the smallest level where none of its intervals
/// intersect an interval of another entity on that level. Touching intervals
/// (`a.x2 == b.x1`) do not collide.
#[derive(Clone, Debug, Default)]
pub struct LevelManager {
    entities: BTreeMap<EntityId, Registration>,
    rows: Vec<Vec<EntityId>>,
}

impl LevelManager {
    /// Empty manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of occupied levels.
    pub fn depth(&self) -> usize {
        self.rows.iter().rposition(|row| !row.is_empty()).map_or(0, |i| i + 1)
    }

    /// Number of registered entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    fn unregister(&mut self, entity: EntityId) {
        if let Some(old) = self.entities.remove(&entity) {
            if let Some(row) = self.rows.get_mut(old.level) {
                row.retain(|id| *id != entity);
            }
        }
    }

    fn row_is_free(&self, level: usize, intervals: &[Interval]) -> bool {
        let Some(row) = self.rows.get(level) else {
            return true;
        };
        row.iter()
            .filter_map(|id| self.entities.get(id))
            .all(|other| !any_overlap(&other.intervals, intervals))
    }

    fn place(&mut self, entity: EntityId, level: usize, intervals: &[Interval]) {
        if self.rows.len() <= level {
            self.rows.resize_with(level + 1, Vec::new);
        }
        self.rows[level].push(entity);
        self.entities.insert(
            entity,
            Registration {
                level,
                intervals: intervals.iter().copied().collect(),
            },
        );
        log::trace!("entity {} -> level {}", entity, level);
    }
}

impl LevelResolver for LevelManager {
    fn clear(&mut self) {
        self.entities.clear();
        self.rows.clear();
    }

    fn update(&mut self, entity: EntityId, intervals: &[Interval]) {
        self.unregister(entity);
        let mut level = 0usize;
        while !self.row_is_free(level, intervals) {
            level += 1;
        }
        self.place(entity, level, intervals);
    }

    fn fetch_level(&self, entity: EntityId) -> Result<usize, LayoutError> {
        self.entities
            .get(&entity)
            .map(|r| r.level)
            .ok_or(LayoutError::LevelNotAssigned { entity })
    }

    fn remove(&mut self, entity: EntityId) {
        self.unregister(entity);
    }

    fn carry_over(&mut self, entity: EntityId, intervals: &[Interval]) {
        let Some(previous) = self.entities.get(&entity).map(|r| r.level) else {
            self.update(entity, intervals);
            return;
        };
        self.unregister(entity);
        if self.row_is_free(previous, intervals) {
            self.place(entity, previous, intervals);
        } else {
            self.update(entity, intervals);
        }
    }
}

fn any_overlap(a: &[Interval], b: &[Interval]) -> bool {
    a.iter()
        .any(|&(a1, a2)| b.iter().any(|&(b1, b2)| a1 < b2 && b1 < a2))
}
