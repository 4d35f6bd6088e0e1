//! The command emitted for one batch of objects.

use super::feature::FeatureId;

/// Request to set `feature` to `enabled` on a bounded batch of objects.
///
/// Produced by the command generator and handed to the host's executor,
/// which owns it from then on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleCommand<O> {
    feature: FeatureId,
    enabled: bool,
    objects: Vec<O>,
}

impl<O> ToggleCommand<O> {
    /// Creates a new toggle command.
    pub fn new(feature: FeatureId, enabled: bool, objects: Vec<O>) -> Self {
        Self {
            feature,
            enabled,
            objects,
        }
    }

    /// The feature to toggle.
    pub fn feature(&self) -> FeatureId {
        self.feature
    }

    /// The desired state.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// The objects of this batch, in enumeration order.
    pub fn objects(&self) -> &[O] {
        &self.objects
    }

    /// Consumes the command, returning its objects.
    pub fn into_objects(self) -> Vec<O> {
        self.objects
    }
}
