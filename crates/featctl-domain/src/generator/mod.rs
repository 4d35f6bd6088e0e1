//! Batched, permission-filtered toggle command generation.
//!
//! A submission is translated into a lazy sequence of [`ToggleCommand`]s:
//!
//! 1. **Planning**: features are visited in registry order; a feature is skipped
//!    when its submitted value is leave-unchanged or numerically equal to the
//!    prior aggregate state.
//! 2. **Filtering**: for every planned feature a fresh cursor over the target
//!    objects is opened and objects lacking the feature's permission are dropped.
//! 3. **Batching**: granted objects are cut into batches of at most
//!    `batch_size` objects, one command per batch.
//!
//! The resulting [`CommandStream`] is forward-only. Each call to `next()` pulls
//! exactly as many objects from the cursor as the next batch needs, so callers
//! should execute a command before asking for the next one.

mod record;

#[cfg(test)]
mod tests;

use std::iter::{Fuse, FusedIterator};

use tracing::{debug, trace};

use crate::model::{FeatureRegistry, FeatureSpec, FeatureStatus, SubmittedValues, ToggleCommand};
use crate::traits::{ObjectSource, PermissionCheck};

pub use record::SubmissionRecord;

/// Default upper bound of objects per command.
///
/// Large selections are split so a single command never carries more objects
/// than the executor can handle within its request timeout.
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// A feature that will be toggled by a generation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedToggle {
    /// The feature to toggle.
    pub spec: &'static FeatureSpec,
    /// The state it is toggled to.
    pub enabled: bool,
}

/// Translates submitted values into batched toggle commands.
#[derive(Debug, Clone, Copy)]
pub struct CommandGenerator {
    registry: FeatureRegistry,
    batch_size: usize,
}

impl Default for CommandGenerator {
    fn default() -> Self {
        Self::new(FeatureRegistry::new())
    }
}

impl CommandGenerator {
    /// Creates a generator over `registry` with the default batch size.
    pub fn new(registry: FeatureRegistry) -> Self {
        Self {
            registry,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    /// Sets the maximum number of objects per command (at least 1).
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Returns the maximum number of objects per command.
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Returns the features whose submitted value changes the target, in
    /// registry order.
    pub fn plan(&self, submitted: &SubmittedValues, status: &FeatureStatus) -> Vec<PlannedToggle> {
        self.registry
            .iter()
            .filter_map(|spec| {
                let value = submitted.get(spec.id);
                let prior = status.get(spec.id);
                if !value.differs_from(prior) {
                    trace!(feature = %spec.id, ?value, ?prior, "feature left unchanged");
                    return None;
                }
                value
                    .as_enabled()
                    .map(|enabled| PlannedToggle { spec, enabled })
            })
            .collect()
    }

    /// Starts a generation pass.
    ///
    /// No objects are enumerated until the returned stream is polled.
    pub fn generate<'a, S, P>(
        &self,
        submitted: &SubmittedValues,
        status: &FeatureStatus,
        source: &'a S,
        permissions: &'a P,
    ) -> CommandStream<'a, S, P>
    where
        S: ObjectSource + ?Sized,
        P: PermissionCheck<S::Object> + ?Sized,
    {
        CommandStream {
            source,
            permissions,
            batch_size: self.batch_size,
            pending: self.plan(submitted, status).into_iter(),
            active: None,
            record: SubmissionRecord::new(),
            emitted: 0,
        }
    }
}

/// The cursor of the feature currently being batched.
struct ActivePass<'a, S>
where
    S: ObjectSource + ?Sized + 'a,
{
    toggle: PlannedToggle,
    cursor: Fuse<S::Cursor<'a>>,
}

/// Lazy, single-pass sequence of toggle commands.
///
/// There is no way to restart a stream; once exhausted it keeps returning
/// `None`. The [`SubmissionRecord`] is complete only after exhaustion.
pub struct CommandStream<'a, S, P>
where
    S: ObjectSource + ?Sized + 'a,
    P: ?Sized,
{
    source: &'a S,
    permissions: &'a P,
    batch_size: usize,
    pending: std::vec::IntoIter<PlannedToggle>,
    active: Option<ActivePass<'a, S>>,
    record: SubmissionRecord,
    emitted: usize,
}

impl<'a, S, P> CommandStream<'a, S, P>
where
    S: ObjectSource + ?Sized + 'a,
    P: ?Sized,
{
    /// Features submitted so far, with the value of their first batch.
    pub fn record(&self) -> &SubmissionRecord {
        &self.record
    }

    /// Consumes the stream, returning the submission record.
    pub fn into_record(self) -> SubmissionRecord {
        self.record
    }

    /// Number of commands produced so far.
    pub fn emitted(&self) -> usize {
        self.emitted
    }
}

impl<'a, S, P> Iterator for CommandStream<'a, S, P>
where
    S: ObjectSource + ?Sized + 'a,
    P: PermissionCheck<S::Object> + ?Sized,
{
    type Item = ToggleCommand<S::Object>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(pass) = self.active.as_mut() {
                let permission = pass.toggle.spec.permission;
                let permissions = self.permissions;
                let batch: Vec<S::Object> = pass
                    .cursor
                    .by_ref()
                    .filter(|object| permissions.is_granted(permission, object))
                    .take(self.batch_size)
                    .collect();

                if !batch.is_empty() {
                    let feature = pass.toggle.spec.id;
                    let enabled = pass.toggle.enabled;
                    self.record.set_once(feature, enabled);
                    self.emitted += 1;
                    debug!(
                        feature = %feature,
                        enabled,
                        objects = batch.len(),
                        "emitting toggle batch"
                    );
                    return Some(ToggleCommand::new(feature, enabled, batch));
                }

                trace!(feature = %pass.toggle.spec.id, "no more granted objects");
                self.active = None;
            }

            let toggle = self.pending.next()?;
            self.active = Some(ActivePass {
                toggle,
                cursor: self.source.cursor().fuse(),
            });
        }
    }
}

impl<'a, S, P> FusedIterator for CommandStream<'a, S, P>
where
    S: ObjectSource + ?Sized + 'a,
    P: PermissionCheck<S::Object> + ?Sized,
{
}
