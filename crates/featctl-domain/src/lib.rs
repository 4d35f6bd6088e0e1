//! featctl-domain: Core logic for toggling monitoring features
//!
//! This crate contains the request-independent pieces of the feature toggle form:
//! - Feature registry (identifier, label, permission)
//! - Aggregate feature state and submitted values
//! - Lazy, permission-filtered, batched command generation
//! - Success message selection
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │               featctl-domain                 │
//! ├─────────────────────────────────────────────┤
//! │  model/      - Features, state, commands    │
//! │  traits.rs   - Host collaborator seams      │
//! │  generator/  - Batched command pipeline     │
//! │  notifier.rs - Success message lookup       │
//! └─────────────────────────────────────────────┘
//! ```

pub mod error;
pub mod generator;
pub mod model;
pub mod notifier;
pub mod traits;

// Re-export commonly used types at the crate root
pub use error::{DomainError, DomainResult};
pub use generator::{
    CommandGenerator, CommandStream, PlannedToggle, SubmissionRecord, DEFAULT_BATCH_SIZE,
};
pub use model::{
    AggregateState, FeatureFlags, FeatureId, FeatureRegistry, FeatureSpec, FeatureStatus,
    SubmittedValue, SubmittedValues, ToggleCommand,
};
pub use notifier::{message_for, message_for_name, ResultNotifier, INVALID_FEATURE_MESSAGE};
pub use traits::{
    from_fn, FromFn, NoTranslation, NotificationSink, ObjectSource, PermissionCheck, Translate,
};
