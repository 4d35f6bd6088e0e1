//! Feature toggle model types.
//!
//! This module contains:
//! - The fixed feature registry
//! - Aggregate and submitted feature state
//! - The toggle command emitted per batch

mod command;
mod feature;
mod state;
#[cfg(test)]
mod state_proptest;

pub use command::ToggleCommand;
pub use feature::{FeatureId, FeatureRegistry, FeatureSpec};
pub use state::{AggregateState, FeatureFlags, FeatureStatus, SubmittedValue, SubmittedValues};
