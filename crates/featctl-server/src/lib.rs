//! featctl-server: Form handling for toggling object features
//!
//! This crate contains the request layer the host web framework drives:
//! - Toggle form rendering (checkbox or tri-state select per feature)
//! - Submission binding and command execution
//! - Success notification
//! - Configuration management
//! - Structured logging setup
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │               featctl-server                 │
//! ├─────────────────────────────────────────────┤
//! │  config.rs      - Configuration management  │
//! │  handlers/      - Form handlers             │
//! │    toggle/        - Object feature toggles  │
//! │  observability/ - Logging setup             │
//! └─────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod handlers;
pub mod observability;

// Re-exports for convenience
pub use config::{ConfigLoadError, FormConfig};
pub use handlers::toggle::{
    CommandExecutor, EditTarget, ExecutionError, FormControl, FormError, SubmitError,
    SubmitReport, ToggleFeaturesForm,
};
