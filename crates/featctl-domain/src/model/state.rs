//! Aggregate feature state of a target and the values submitted for it.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

use super::feature::FeatureId;

/// Combined state of a feature across all targeted objects.
///
/// The numeric values match the representation used by the monitoring
/// database summaries: 0 = off for all, 1 = on for all, 2 = mixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum AggregateState {
    #[default]
    Off,
    On,
    Mixed,
}

impl AggregateState {
    /// Returns the numeric representation (0, 1 or 2).
    pub fn as_u8(self) -> u8 {
        match self {
            AggregateState::Off => 0,
            AggregateState::On => 1,
            AggregateState::Mixed => 2,
        }
    }

    /// Returns the boolean state, or `None` if the objects disagree.
    pub fn as_bool(self) -> Option<bool> {
        match self {
            AggregateState::Off => Some(false),
            AggregateState::On => Some(true),
            AggregateState::Mixed => None,
        }
    }

    /// Whether the targeted objects disagree on this feature.
    pub fn is_mixed(self) -> bool {
        self == AggregateState::Mixed
    }

    /// Folds another object's flag into this aggregate.
    fn merge(self, enabled: bool) -> Self {
        match (self.as_bool(), enabled) {
            (Some(current), enabled) if current == enabled => self,
            _ => AggregateState::Mixed,
        }
    }
}

impl From<bool> for AggregateState {
    fn from(enabled: bool) -> Self {
        if enabled {
            AggregateState::On
        } else {
            AggregateState::Off
        }
    }
}

impl From<AggregateState> for u8 {
    fn from(state: AggregateState) -> Self {
        state.as_u8()
    }
}

impl TryFrom<u8> for AggregateState {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(AggregateState::Off),
            1 => Ok(AggregateState::On),
            2 => Ok(AggregateState::Mixed),
            value => Err(DomainError::InvalidAggregateState { value }),
        }
    }
}

/// Access to the current per-object flag of each feature.
///
/// Implemented by the host's monitored object type so aggregates can be
/// computed from a selection.
pub trait FeatureFlags {
    /// Whether `feature` is currently enabled on this object.
    fn feature_enabled(&self, feature: FeatureId) -> bool;
}

/// Aggregate state of every feature for one target (single object or set).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FeatureStatus {
    states: [AggregateState; 5],
}

impl FeatureStatus {
    /// Creates a status with every feature off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the aggregate of `feature`, builder style.
    pub fn with(mut self, feature: FeatureId, state: AggregateState) -> Self {
        self.set(feature, state);
        self
    }

    /// Sets the aggregate of `feature`.
    pub fn set(&mut self, feature: FeatureId, state: AggregateState) {
        self.states[feature as usize] = state;
    }

    /// Returns the aggregate of `feature`.
    pub fn get(&self, feature: FeatureId) -> AggregateState {
        self.states[feature as usize]
    }

    /// Status of a single object; never mixed.
    pub fn for_object<O: FeatureFlags + ?Sized>(object: &O) -> Self {
        let mut status = Self::new();
        for feature in FeatureId::ALL {
            status.set(feature, object.feature_enabled(feature).into());
        }
        status
    }

    /// Status of a selection of objects.
    ///
    /// An empty selection reports every feature as off.
    pub fn from_objects<'a, O, I>(objects: I) -> Self
    where
        O: FeatureFlags + 'a,
        I: IntoIterator<Item = &'a O>,
    {
        let mut objects = objects.into_iter();
        let Some(first) = objects.next() else {
            return Self::new();
        };

        let mut status = Self::for_object(first);
        for object in objects {
            for feature in FeatureId::ALL {
                let merged = status.get(feature).merge(object.feature_enabled(feature));
                status.set(feature, merged);
            }
        }
        status
    }
}

/// Value read back from a feature's form control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SubmittedValue {
    /// Sentinel of the tri-state control; the feature is not touched.
    #[default]
    LeaveUnchanged,
    Off,
    On,
}

impl SubmittedValue {
    /// Option key of the leave-unchanged sentinel.
    pub const LEAVE_UNCHANGED: &'static str = "noop";

    /// Parses a tri-state option key (`noop`, `0` or `1`).
    pub fn parse_option(feature: FeatureId, raw: &str) -> DomainResult<Self> {
        match raw {
            Self::LEAVE_UNCHANGED => Ok(SubmittedValue::LeaveUnchanged),
            "0" => Ok(SubmittedValue::Off),
            "1" => Ok(SubmittedValue::On),
            other => Err(DomainError::InvalidSubmittedValue {
                feature: feature.to_string(),
                value: other.to_string(),
            }),
        }
    }

    /// Returns the option key this value is submitted as.
    pub fn option_key(self) -> &'static str {
        match self {
            SubmittedValue::LeaveUnchanged => Self::LEAVE_UNCHANGED,
            SubmittedValue::Off => "0",
            SubmittedValue::On => "1",
        }
    }

    /// The desired state, or `None` for leave-unchanged.
    pub fn as_enabled(self) -> Option<bool> {
        match self {
            SubmittedValue::LeaveUnchanged => None,
            SubmittedValue::Off => Some(false),
            SubmittedValue::On => Some(true),
        }
    }

    /// Whether submitting this value changes a target with the given aggregate.
    ///
    /// Leave-unchanged never changes anything. Otherwise the value is compared
    /// numerically with the aggregate, so any explicit value differs from mixed.
    pub fn differs_from(self, prior: AggregateState) -> bool {
        match self.as_enabled() {
            None => false,
            Some(enabled) => u8::from(enabled) != prior.as_u8(),
        }
    }
}

impl From<bool> for SubmittedValue {
    fn from(enabled: bool) -> Self {
        if enabled {
            SubmittedValue::On
        } else {
            SubmittedValue::Off
        }
    }
}

/// Submitted value of every feature; unset features are left unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SubmittedValues {
    values: [SubmittedValue; 5],
}

impl SubmittedValues {
    /// Creates a submission leaving every feature unchanged.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of `feature`, builder style.
    pub fn with(mut self, feature: FeatureId, value: SubmittedValue) -> Self {
        self.set(feature, value);
        self
    }

    /// Sets the value of `feature`.
    pub fn set(&mut self, feature: FeatureId, value: SubmittedValue) {
        self.values[feature as usize] = value;
    }

    /// Returns the value of `feature`.
    pub fn get(&self, feature: FeatureId) -> SubmittedValue {
        self.values[feature as usize]
    }
}
