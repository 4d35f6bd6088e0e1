//! Form controls rendered per feature.

use featctl_domain::{FeatureId, SubmittedValue};

use super::types::FormError;

/// Class making the host submit the form as soon as a control changes.
pub const AUTOSUBMIT_CLASS: &str = "autosubmit";

/// Wrapper class of a control whose targets disagree.
pub const INDETERMINATE_CLASS: &str = "indeterminate";

/// Reads the value a control currently holds.
pub trait SubmittedValueProvider {
    /// The control's value as a submission.
    fn current_value(&self) -> SubmittedValue;
}

/// Binary toggle for a feature the targeted objects agree on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkbox {
    /// Field name, equal to the feature's wire name.
    pub name: FeatureId,
    /// Translated label.
    pub label: String,
    /// Read-only when the requester may not toggle the feature.
    pub disabled: bool,
    /// Current value; initially the aggregate state.
    pub checked: bool,
}

impl Checkbox {
    fn bind(&mut self, raw: Option<&str>) -> Result<(), FormError> {
        self.checked = match raw {
            None => false,
            Some("y" | "1" | "on" | "true") => true,
            Some("n" | "0" | "off" | "false" | "") => false,
            Some(other) => {
                return Err(FormError::InvalidCheckbox {
                    field: self.name.to_string(),
                    value: other.to_string(),
                })
            }
        };
        Ok(())
    }
}

impl SubmittedValueProvider for Checkbox {
    fn current_value(&self) -> SubmittedValue {
        SubmittedValue::from(self.checked)
    }
}

/// One entry of a [`TriStateSelect`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    /// Submitted key (`noop`, `0` or `1`).
    pub key: &'static str,
    /// Translated label.
    pub label: String,
}

/// Selector for a feature the targeted objects disagree on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriStateSelect {
    /// Field name, equal to the feature's wire name.
    pub name: FeatureId,
    /// Translated label.
    pub label: String,
    /// Translated hint that the targets hold multiple values.
    pub description: String,
    /// Leave unchanged, disable all, enable all.
    pub options: Vec<SelectOption>,
    /// Read-only when the requester may not toggle the feature.
    pub disabled: bool,
    /// Current value; initially leave-unchanged.
    pub value: SubmittedValue,
}

impl TriStateSelect {
    fn bind(&mut self, raw: Option<&str>) -> Result<(), FormError> {
        self.value = match raw {
            None => SubmittedValue::LeaveUnchanged,
            Some(raw) => SubmittedValue::parse_option(self.name, raw)?,
        };
        Ok(())
    }
}

impl SubmittedValueProvider for TriStateSelect {
    fn current_value(&self) -> SubmittedValue {
        self.value
    }
}

/// A rendered control of the toggle form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormControl {
    Checkbox(Checkbox),
    Select(TriStateSelect),
}

impl FormControl {
    /// The feature this control toggles.
    pub fn feature(&self) -> FeatureId {
        match self {
            FormControl::Checkbox(checkbox) => checkbox.name,
            FormControl::Select(select) => select.name,
        }
    }

    /// Field name of the control.
    pub fn name(&self) -> &'static str {
        self.feature().as_str()
    }

    /// Translated label of the control.
    pub fn label(&self) -> &str {
        match self {
            FormControl::Checkbox(checkbox) => &checkbox.label,
            FormControl::Select(select) => &select.label,
        }
    }

    /// Whether the control is read-only.
    pub fn is_disabled(&self) -> bool {
        match self {
            FormControl::Checkbox(checkbox) => checkbox.disabled,
            FormControl::Select(select) => select.disabled,
        }
    }

    /// Classes of the control element.
    pub fn classes(&self) -> &'static [&'static str] {
        &[AUTOSUBMIT_CLASS]
    }

    /// Classes of the element wrapping the control.
    pub fn wrapper_classes(&self) -> &'static [&'static str] {
        match self {
            FormControl::Checkbox(_) => &[],
            FormControl::Select(_) => &[INDETERMINATE_CLASS],
        }
    }

    /// Applies the submitted raw value; `None` means the field was absent.
    ///
    /// Disabled controls ignore input and keep their rendered value.
    pub fn bind(&mut self, raw: Option<&str>) -> Result<(), FormError> {
        if self.is_disabled() {
            return Ok(());
        }
        match self {
            FormControl::Checkbox(checkbox) => checkbox.bind(raw),
            FormControl::Select(select) => select.bind(raw),
        }
    }
}

impl SubmittedValueProvider for FormControl {
    fn current_value(&self) -> SubmittedValue {
        match self {
            FormControl::Checkbox(checkbox) => checkbox.current_value(),
            FormControl::Select(select) => select.current_value(),
        }
    }
}
