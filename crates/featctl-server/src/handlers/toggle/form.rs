//! Toggle form implementation.

use featctl_domain::{
    AggregateState, CommandGenerator, FeatureRegistry, FeatureStatus, NotificationSink,
    ObjectSource, PermissionCheck, ResultNotifier, SubmittedValue, SubmittedValues, Translate,
};
use tracing::{info, warn};

use super::controls::{
    Checkbox, FormControl, SelectOption, SubmittedValueProvider, TriStateSelect,
};
use super::types::{
    CommandExecutor, ExecutionError, FormError, FormInput, SubmitError, SubmitReport,
    SubmitResult,
};
use crate::config::CommandSettings;

/// What the form is editing.
#[derive(Debug)]
pub enum EditTarget<'a, O: ?Sized> {
    /// A single object; controls are disabled where permission is missing.
    Single(&'a O),
    /// A selection; permission is checked per object when commands are generated.
    Multiple,
}

impl<O: ?Sized> Clone for EditTarget<'_, O> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<O: ?Sized> Copy for EditTarget<'_, O> {}

/// Form toggling the monitoring features of one object or a selection.
///
/// Lifecycle: [`assemble`](Self::assemble) the controls, let the host render
/// them, [`bind`](Self::bind) the submitted input, then [`submit`](Self::submit).
pub struct ToggleFeaturesForm<'a, T: ?Sized> {
    registry: FeatureRegistry,
    status: FeatureStatus,
    generator: CommandGenerator,
    translator: &'a T,
    controls: Vec<FormControl>,
}

impl<'a, T> ToggleFeaturesForm<'a, T>
where
    T: Translate + ?Sized,
{
    /// Creates a form for a target whose aggregate state is `status`.
    pub fn new(status: FeatureStatus, translator: &'a T) -> Self {
        let registry = FeatureRegistry::new();
        Self {
            registry,
            status,
            generator: CommandGenerator::new(registry),
            translator,
            controls: Vec::new(),
        }
    }

    /// Applies configured command settings.
    pub fn with_settings(mut self, settings: &CommandSettings) -> Self {
        self.generator = self.generator.with_batch_size(settings.batch_size);
        self
    }

    /// The aggregate state the form was created with.
    pub fn status(&self) -> &FeatureStatus {
        &self.status
    }

    /// The assembled controls, in registry order.
    pub fn controls(&self) -> &[FormControl] {
        &self.controls
    }

    /// Builds one control per feature.
    ///
    /// A mixed aggregate yields a tri-state select defaulting to leave-unchanged,
    /// any other aggregate a checkbox holding that state.
    pub fn assemble<O, P>(&mut self, target: EditTarget<'_, O>, permissions: &P)
    where
        O: ?Sized,
        P: PermissionCheck<O> + ?Sized,
    {
        let translator = self.translator;
        let tr = |text: &str| translator.translate(text).into_owned();
        let single = match target {
            EditTarget::Single(object) => Some(object),
            EditTarget::Multiple => None,
        };

        self.controls = self
            .registry
            .iter()
            .map(|spec| {
                let disabled =
                    single.is_some_and(|object| !permissions.is_granted(spec.permission, object));
                let state = self.status.get(spec.id);

                if state.is_mixed() {
                    FormControl::Select(TriStateSelect {
                        name: spec.id,
                        label: tr(spec.label),
                        description: tr("Multiple Values"),
                        options: vec![
                            SelectOption {
                                key: SubmittedValue::LeaveUnchanged.option_key(),
                                label: tr("Leave Unchanged"),
                            },
                            SelectOption {
                                key: SubmittedValue::Off.option_key(),
                                label: tr("Disable All"),
                            },
                            SelectOption {
                                key: SubmittedValue::On.option_key(),
                                label: tr("Enable All"),
                            },
                        ],
                        disabled,
                        value: SubmittedValue::LeaveUnchanged,
                    })
                } else {
                    FormControl::Checkbox(Checkbox {
                        name: spec.id,
                        label: tr(spec.label),
                        disabled,
                        checked: state == AggregateState::On,
                    })
                }
            })
            .collect();
    }

    /// Applies submitted input to the controls.
    ///
    /// Fields missing from `input` count as an unchecked checkbox or an
    /// untouched select.
    pub fn bind(&mut self, input: &FormInput) -> Result<(), FormError> {
        if self.controls.is_empty() {
            return Err(FormError::NotAssembled);
        }
        for control in &mut self.controls {
            let raw = input.get(control.name()).map(String::as_str);
            control.bind(raw)?;
        }
        Ok(())
    }

    /// Values currently held by the controls.
    pub fn submitted_values(&self) -> SubmittedValues {
        self.controls
            .iter()
            .fold(SubmittedValues::new(), |values, control| {
                values.with(control.feature(), control.current_value())
            })
    }

    /// Generates and executes the toggle commands, then reports success.
    ///
    /// Batches are executed strictly one after another. A failing batch does
    /// not stop the remaining ones, but suppresses every success message.
    pub async fn submit<S, P, E, N>(
        &self,
        source: &S,
        permissions: &P,
        executor: &E,
        sink: &mut N,
    ) -> SubmitResult<SubmitReport>
    where
        S: ObjectSource + ?Sized,
        S::Object: Send + Sync,
        P: PermissionCheck<S::Object> + ?Sized,
        E: CommandExecutor<S::Object> + ?Sized,
        N: NotificationSink + ?Sized,
    {
        if self.controls.is_empty() {
            return Err(FormError::NotAssembled.into());
        }

        let submitted = self.submitted_values();
        let mut stream = self
            .generator
            .generate(&submitted, &self.status, source, permissions);

        let mut attempted = 0;
        let mut errors: Vec<ExecutionError> = Vec::new();
        for command in stream.by_ref() {
            attempted += 1;
            if let Err(err) = executor.execute(&command).await {
                warn!(
                    feature = %command.feature(),
                    enabled = command.enabled(),
                    objects = command.objects().len(),
                    error = %err,
                    "toggle command failed"
                );
                errors.push(err);
            }
        }

        let record = stream.into_record();
        let failed = errors.len();
        let notifications =
            ResultNotifier::new(self.translator).notify(&record, failed == 0, sink);

        info!(
            attempted,
            failed,
            features = record.len(),
            "processed feature toggle submission"
        );

        match errors.into_iter().next() {
            Some(first) => Err(SubmitError::Execution {
                failed,
                attempted,
                first,
            }),
            None => Ok(SubmitReport {
                commands_sent: attempted,
                notifications,
                record,
            }),
        }
    }
}
