//! Domain error types for feature toggling.

use thiserror::Error;

/// Domain-specific errors for feature toggling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Feature name does not match any registered feature.
    #[error("unknown feature: {name}")]
    UnknownFeature { name: String },

    /// Aggregate state value outside of 0 (off), 1 (on) and 2 (mixed).
    #[error("invalid aggregate state: {value}")]
    InvalidAggregateState { value: u8 },

    /// Submitted value is neither the leave-unchanged sentinel nor 0/1.
    #[error("invalid submitted value for '{feature}': {value}")]
    InvalidSubmittedValue { feature: String, value: String },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
