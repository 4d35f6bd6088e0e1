//! Form for toggling monitoring features on one or many objects.
//!
//! The form renders one control per registered feature:
//!
//! 1. **Checkbox**: the targeted objects agree on the feature; the box reflects it
//! 2. **Tri-state select**: the objects disagree; the default option leaves the
//!    feature unchanged
//!
//! On submission, changed features are turned into batched toggle commands,
//! executed one batch at a time, and reported with one success message per
//! feature if every batch succeeded.

mod controls;
mod form;
mod types;

pub use controls::{
    Checkbox, FormControl, SelectOption, SubmittedValueProvider, TriStateSelect,
    AUTOSUBMIT_CLASS, INDETERMINATE_CLASS,
};
pub use form::{EditTarget, ToggleFeaturesForm};
pub use types::{
    CommandExecutor, ExecutionError, FormError, FormInput, SubmitError, SubmitReport, SubmitResult,
};
