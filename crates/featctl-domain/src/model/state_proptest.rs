//! Property-based tests for aggregate state computation.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::model::{AggregateState, FeatureFlags, FeatureId, FeatureStatus, SubmittedValue};

    #[derive(Debug, Clone)]
    struct Object {
        active_checks: bool,
    }

    impl FeatureFlags for Object {
        fn feature_enabled(&self, feature: FeatureId) -> bool {
            feature == FeatureId::ActiveChecks && self.active_checks
        }
    }

    /// Strategy to generate non-empty selections of objects
    fn selection_strategy() -> impl Strategy<Value = Vec<Object>> {
        prop::collection::vec(any::<bool>(), 1..50).prop_map(|flags| {
            flags
                .into_iter()
                .map(|active_checks| Object { active_checks })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn test_aggregate_is_mixed_iff_objects_disagree(objects in selection_strategy()) {
            let status = FeatureStatus::from_objects(&objects);
            let all_on = objects.iter().all(|o| o.active_checks);
            let all_off = objects.iter().all(|o| !o.active_checks);

            let expected = if all_on {
                AggregateState::On
            } else if all_off {
                AggregateState::Off
            } else {
                AggregateState::Mixed
            };
            prop_assert_eq!(status.get(FeatureId::ActiveChecks), expected);
            // Features no object has enabled are off
            prop_assert_eq!(status.get(FeatureId::Notifications), AggregateState::Off);
        }

        #[test]
        fn test_resubmitting_current_state_is_noop(enabled in any::<bool>()) {
            let prior = AggregateState::from(enabled);
            prop_assert!(!SubmittedValue::from(enabled).differs_from(prior));
            prop_assert!(SubmittedValue::from(!enabled).differs_from(prior));
        }
    }
}
