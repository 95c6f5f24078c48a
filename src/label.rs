use std::collections::BTreeMap;

use crate::measure::TextMeasurer;

/// Identifier of a label definition.
pub type LabelId = u32;

/// Horizontal padding around a measured badge caption.
const BADGE_PADDING_PX: f32 = 8.0;

/// Label definition with its rendered badge width.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Label {
    /// Identifier referenced by entities.
    pub id: LabelId,
    /// Badge caption.
    pub text: String,
    /// Rendered badge width in pixels.
    pub width: f32,
}

impl Label {
    /// Create a label with a known badge width.
    pub fn new(id: LabelId, text: impl Into<String>, width: f32) -> Self {
        Self {
            id,
            text: text.into(),
            width,
        }
    }
}

/// Badge-width lookup consulted when breaking lines and leveling entities.
pub trait LabelMetrics {
    /// Badge width for `label`, if the label is known.
    fn width_of(&self, label: LabelId) -> Option<f32>;

    /// Widest badge among `labels`; unknown labels count as zero.
    fn max_width_among(&self, labels: &[LabelId]) -> f32 {
        labels
            .iter()
            .filter_map(|id| self.width_of(*id))
            .fold(0.0, f32::max)
    }
}

/// Label definitions of one document.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LabelList {
    labels: BTreeMap<LabelId, Label>,
}

impl LabelList {
    /// Build from label definitions. A later duplicate id replaces an earlier one.
    pub fn new(labels: impl IntoIterator<Item = Label>) -> Self {
        Self {
            labels: labels.into_iter().map(|l| (l.id, l)).collect(),
        }
    }

    /// Build from `(id, caption)` pairs, sizing each badge with `measurer`.
    pub fn measured<'a, I>(labels: I, measurer: &dyn TextMeasurer) -> Self
    where
        I: IntoIterator<Item = (LabelId, &'a str)>,
    {
        Self::new(labels.into_iter().map(|(id, text)| {
            let width = measurer.text_width_px(text) + BADGE_PADDING_PX;
            Label::new(id, text, width)
        }))
    }

    /// Label by id.
    pub fn get_by_id(&self, id: LabelId) -> Option<&Label> {
        self.labels.get(&id)
    }

    /// Widest badge among `labels` (`0.0` when none are known).
    pub fn max_label_width(&self, labels: &[LabelId]) -> f32 {
        self.max_width_among(labels)
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the list holds no labels.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl LabelMetrics for LabelList {
    fn width_of(&self, label: LabelId) -> Option<f32> {
        self.get_by_id(label).map(|l| l.width)
    }
}

impl<T: LabelMetrics + ?Sized> LabelMetrics for &T {
    fn width_of(&self, label: LabelId) -> Option<f32> {
        (**self).width_of(label)
    }

    fn max_width_among(&self, labels: &[LabelId]) -> f32 {
        (**self).max_width_among(labels)
    }
}
