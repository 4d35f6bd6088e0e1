//! Per-feature record of what a generation pass submitted.

use crate::model::FeatureId;

/// Ordered, set-once map from feature to the enabled value it was submitted with.
///
/// The first write for a feature wins; later writes for the same feature are
/// ignored. Iteration follows insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionRecord {
    entries: Vec<(FeatureId, bool)>,
}

impl SubmissionRecord {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `enabled` for `feature` unless the feature is already present.
    ///
    /// Returns `true` if the value was stored.
    pub fn set_once(&mut self, feature: FeatureId, enabled: bool) -> bool {
        if self.get(feature).is_some() {
            return false;
        }
        self.entries.push((feature, enabled));
        true
    }

    /// Returns the recorded value of `feature`.
    pub fn get(&self, feature: FeatureId) -> Option<bool> {
        self.entries
            .iter()
            .find(|(recorded, _)| *recorded == feature)
            .map(|(_, enabled)| *enabled)
    }

    /// Iterates recorded features in submission order.
    pub fn iter(&self) -> impl Iterator<Item = (FeatureId, bool)> + '_ {
        self.entries.iter().copied()
    }

    /// Number of recorded features.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was submitted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
