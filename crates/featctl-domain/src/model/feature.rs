//! Feature identifiers and the registry describing them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// A togglable monitoring behavior of a host or service.
///
/// The wire name doubles as the form field name and as the column name of the
/// monitored object's current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FeatureId {
    #[serde(rename = "active_checks_enabled")]
    ActiveChecks,
    #[serde(rename = "passive_checks_enabled")]
    PassiveChecks,
    #[serde(rename = "notifications_enabled")]
    Notifications,
    #[serde(rename = "event_handler_enabled")]
    EventHandler,
    #[serde(rename = "flapping_enabled")]
    FlapDetection,
}

impl FeatureId {
    /// All features in declaration order.
    pub const ALL: [FeatureId; 5] = [
        FeatureId::ActiveChecks,
        FeatureId::PassiveChecks,
        FeatureId::Notifications,
        FeatureId::EventHandler,
        FeatureId::FlapDetection,
    ];

    /// Returns the stable wire name of this feature.
    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureId::ActiveChecks => "active_checks_enabled",
            FeatureId::PassiveChecks => "passive_checks_enabled",
            FeatureId::Notifications => "notifications_enabled",
            FeatureId::EventHandler => "event_handler_enabled",
            FeatureId::FlapDetection => "flapping_enabled",
        }
    }
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeatureId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FeatureId::ALL
            .into_iter()
            .find(|feature| feature.as_str() == s)
            .ok_or_else(|| DomainError::UnknownFeature {
                name: s.to_string(),
            })
    }
}

/// Label and permission of a single feature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSpec {
    /// The feature this entry describes.
    pub id: FeatureId,
    /// Untranslated display label (e.g., "Active Checks").
    pub label: &'static str,
    /// Permission required to toggle the feature on an object.
    pub permission: &'static str,
}

const FEATURES: [FeatureSpec; 5] = [
    FeatureSpec {
        id: FeatureId::ActiveChecks,
        label: "Active Checks",
        permission: "icingadb/command/feature/object/active-checks",
    },
    FeatureSpec {
        id: FeatureId::PassiveChecks,
        label: "Passive Checks",
        permission: "icingadb/command/feature/object/passive-checks",
    },
    FeatureSpec {
        id: FeatureId::Notifications,
        label: "Notifications",
        permission: "icingadb/command/feature/object/notifications",
    },
    FeatureSpec {
        id: FeatureId::EventHandler,
        label: "Event Handler",
        permission: "icingadb/command/feature/object/event-handler",
    },
    FeatureSpec {
        id: FeatureId::FlapDetection,
        label: "Flap Detection",
        permission: "icingadb/command/feature/object/flap-detection",
    },
];

/// Fixed lookup table of all togglable features.
///
/// The registry never changes after construction. Iteration order is the
/// declaration order, which also drives command and notification order.
#[derive(Debug, Clone, Copy)]
pub struct FeatureRegistry {
    features: &'static [FeatureSpec],
}

impl Default for FeatureRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureRegistry {
    /// Creates the registry of the five object features.
    pub const fn new() -> Self {
        Self {
            features: &FEATURES,
        }
    }

    /// Iterates features in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &'static FeatureSpec> {
        self.features.iter()
    }

    /// Calls `f` with label and permission of every feature, in order.
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(FeatureId, &'static str, &'static str),
    {
        for spec in self.features {
            f(spec.id, spec.label, spec.permission);
        }
    }

    /// Looks up a feature by identifier.
    pub fn get(&self, id: FeatureId) -> Option<&'static FeatureSpec> {
        self.features.iter().find(|spec| spec.id == id)
    }

    /// Number of registered features.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}
