//! Success messages for toggled features.

use tracing::debug;

use crate::generator::SubmissionRecord;
use crate::model::FeatureId;
use crate::traits::{NotificationSink, Translate};

/// Message shown for a feature name that is not registered.
pub const INVALID_FEATURE_MESSAGE: &str = "Invalid feature option";

/// Success message per (feature, enabled) pair.
const MESSAGES: [(FeatureId, bool, &str); 10] = [
    (FeatureId::ActiveChecks, true, "Enabled active checks successfully"),
    (FeatureId::ActiveChecks, false, "Disabled active checks successfully"),
    (FeatureId::PassiveChecks, true, "Enabled passive checks successfully"),
    (FeatureId::PassiveChecks, false, "Disabled passive checks successfully"),
    (FeatureId::Notifications, true, "Enabled notifications successfully"),
    (FeatureId::Notifications, false, "Disabled notifications successfully"),
    (FeatureId::EventHandler, true, "Enabled event handler successfully"),
    (FeatureId::EventHandler, false, "Disabled event handler successfully"),
    (FeatureId::FlapDetection, true, "Enabled flap detection successfully"),
    (FeatureId::FlapDetection, false, "Disabled flap detection successfully"),
];

/// Returns the untranslated success message for `feature` toggled to `enabled`.
pub fn message_for(feature: FeatureId, enabled: bool) -> &'static str {
    MESSAGES
        .iter()
        .find(|(id, state, _)| *id == feature && *state == enabled)
        .map_or(INVALID_FEATURE_MESSAGE, |(_, _, message)| *message)
}

/// Like [`message_for`], keyed by the feature's wire name.
pub fn message_for_name(feature: &str, enabled: bool) -> &'static str {
    feature
        .parse::<FeatureId>()
        .map_or(INVALID_FEATURE_MESSAGE, |id| message_for(id, enabled))
}

/// Reports the outcome of a submission to the user.
pub struct ResultNotifier<'a, T: ?Sized> {
    translator: &'a T,
}

impl<'a, T> ResultNotifier<'a, T>
where
    T: Translate + ?Sized,
{
    /// Creates a notifier translating messages with `translator`.
    pub fn new(translator: &'a T) -> Self {
        Self { translator }
    }

    /// Emits one success message per recorded feature, in submission order.
    ///
    /// Nothing is emitted when execution failed; error reporting belongs to the
    /// caller. Returns the number of messages emitted.
    pub fn notify<N>(&self, record: &SubmissionRecord, succeeded: bool, sink: &mut N) -> usize
    where
        N: NotificationSink + ?Sized,
    {
        if !succeeded {
            debug!(features = record.len(), "execution failed, suppressing notifications");
            return 0;
        }

        for (feature, enabled) in record.iter() {
            let message = self.translator.translate(message_for(feature, enabled));
            sink.success(&message);
        }
        record.len()
    }
}
