//! Data types for toggle form submissions.

use std::collections::HashMap;

use async_trait::async_trait;
use featctl_domain::{DomainError, SubmissionRecord, ToggleCommand};

/// Raw form fields keyed by field name.
pub type FormInput = HashMap<String, String>;

/// Executes toggle commands against the monitored system.
///
/// Called once per batch; the next batch is only generated after the
/// returned future completes. Retry and timeout policy belong here.
#[async_trait]
pub trait CommandExecutor<O: Send + Sync>: Send + Sync {
    /// Sends one batch.
    async fn execute(&self, command: &ToggleCommand<O>) -> Result<(), ExecutionError>;
}

/// Opaque failure reported by a [`CommandExecutor`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("command execution failed: {message}")]
pub struct ExecutionError {
    /// Executor-specific failure detail.
    pub message: String,
}

impl ExecutionError {
    /// Creates a new execution error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors binding submitted input to the form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    /// A checkbox received something other than a checked/unchecked value.
    #[error("invalid checkbox value for '{field}': {value}")]
    InvalidCheckbox { field: String, value: String },

    /// A select received a key that is not one of its options.
    #[error("invalid option: {0}")]
    InvalidOption(#[from] DomainError),

    /// The form was submitted before its controls were assembled.
    #[error("form has not been assembled")]
    NotAssembled,
}

/// Outcome of a fully successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitReport {
    /// Number of batches sent to the executor.
    pub commands_sent: usize,
    /// Number of success messages emitted.
    pub notifications: usize,
    /// Features submitted, with the value of their first batch.
    pub record: SubmissionRecord,
}

/// Errors during submission.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    /// Input could not be bound to the form.
    #[error(transparent)]
    Form(#[from] FormError),

    /// At least one batch failed; no success messages were emitted.
    #[error("{failed} of {attempted} commands failed, first error: {first}")]
    Execution {
        failed: usize,
        attempted: usize,
        first: ExecutionError,
    },
}

/// Result type for submissions.
pub type SubmitResult<T> = Result<T, SubmitError>;
