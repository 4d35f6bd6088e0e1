//! Tests for the command generator.

use std::cell::Cell;
use std::collections::HashSet;

use proptest::prelude::*;

use super::*;
use crate::model::{AggregateState, FeatureId, SubmittedValue, ToggleCommand};
use crate::traits::from_fn;

// ============================================================
// Test Helpers
// ============================================================

/// Permission oracle denying a fixed set of (permission, object) pairs.
struct DenyList {
    denied: HashSet<(&'static str, u32)>,
    calls: Cell<usize>,
}

impl DenyList {
    fn allow_all() -> Self {
        Self {
            denied: HashSet::new(),
            calls: Cell::new(0),
        }
    }

    fn deny(mut self, feature: FeatureId, object: u32) -> Self {
        let permission = FeatureRegistry::new().get(feature).unwrap().permission;
        self.denied.insert((permission, object));
        self
    }
}

impl PermissionCheck<u32> for DenyList {
    fn is_granted(&self, permission: &str, object: &u32) -> bool {
        self.calls.set(self.calls.get() + 1);
        !self
            .denied
            .iter()
            .any(|(p, o)| *p == permission && o == object)
    }
}

fn objects(n: u32) -> Vec<u32> {
    (1..=n).collect()
}

fn collect(
    submitted: SubmittedValues,
    status: FeatureStatus,
    source: &[u32],
    permissions: &DenyList,
) -> (Vec<ToggleCommand<u32>>, SubmissionRecord) {
    let mut stream = CommandGenerator::default().generate(&submitted, &status, source, permissions);
    let commands: Vec<_> = stream.by_ref().collect();
    (commands, stream.into_record())
}

// ============================================================
// Section 1: Skipping unchanged features
// ============================================================

#[test]
fn test_leave_unchanged_emits_nothing() {
    let status = FeatureStatus::new().with(FeatureId::Notifications, AggregateState::Mixed);
    let submitted =
        SubmittedValues::new().with(FeatureId::Notifications, SubmittedValue::LeaveUnchanged);

    let (commands, record) = collect(submitted, status, &objects(2), &DenyList::allow_all());

    assert!(commands.is_empty());
    assert!(record.is_empty());
}

#[test]
fn test_resubmitting_prior_state_emits_nothing() {
    let status = FeatureStatus::new()
        .with(FeatureId::ActiveChecks, AggregateState::On)
        .with(FeatureId::PassiveChecks, AggregateState::Off);
    let submitted = SubmittedValues::new()
        .with(FeatureId::ActiveChecks, SubmittedValue::On)
        .with(FeatureId::PassiveChecks, SubmittedValue::Off);

    let (commands, record) = collect(submitted, status, &objects(5), &DenyList::allow_all());

    assert!(commands.is_empty());
    assert!(record.is_empty());
}

#[test]
fn test_explicit_value_on_mixed_target_is_emitted() {
    let status = FeatureStatus::new().with(FeatureId::EventHandler, AggregateState::Mixed);
    let submitted = SubmittedValues::new().with(FeatureId::EventHandler, SubmittedValue::Off);

    let (commands, record) = collect(submitted, status, &objects(2), &DenyList::allow_all());

    assert_eq!(
        commands,
        vec![ToggleCommand::new(FeatureId::EventHandler, false, vec![1, 2])]
    );
    assert_eq!(record.get(FeatureId::EventHandler), Some(false));
}

#[test]
fn test_plan_follows_registry_order() {
    let status = FeatureStatus::new();
    let submitted = SubmittedValues::new()
        .with(FeatureId::FlapDetection, SubmittedValue::On)
        .with(FeatureId::ActiveChecks, SubmittedValue::On)
        .with(FeatureId::Notifications, SubmittedValue::On);

    let plan = CommandGenerator::default().plan(&submitted, &status);
    let ids: Vec<_> = plan.iter().map(|toggle| toggle.spec.id).collect();

    assert_eq!(
        ids,
        vec![
            FeatureId::ActiveChecks,
            FeatureId::Notifications,
            FeatureId::FlapDetection
        ]
    );
}

// ============================================================
// Section 2: Permission filtering
// ============================================================

#[test]
fn test_denied_objects_are_dropped() {
    let status = FeatureStatus::new().with(FeatureId::FlapDetection, AggregateState::On);
    let submitted = SubmittedValues::new().with(FeatureId::FlapDetection, SubmittedValue::Off);
    let permissions = DenyList::allow_all().deny(FeatureId::FlapDetection, 2);

    let (commands, _) = collect(submitted, status, &objects(3), &permissions);

    assert_eq!(
        commands,
        vec![ToggleCommand::new(FeatureId::FlapDetection, false, vec![1, 3])]
    );
}

#[test]
fn test_permission_is_checked_per_feature() {
    let submitted = SubmittedValues::new()
        .with(FeatureId::ActiveChecks, SubmittedValue::On)
        .with(FeatureId::PassiveChecks, SubmittedValue::On);
    let permissions = DenyList::allow_all().deny(FeatureId::ActiveChecks, 1);

    let (commands, _) = collect(submitted, FeatureStatus::new(), &objects(2), &permissions);

    assert_eq!(commands.len(), 2);
    assert_eq!(commands[0].objects(), &[2]);
    assert_eq!(commands[1].objects(), &[1, 2]);
}

#[test]
fn test_fully_denied_feature_does_not_disturb_others() {
    let submitted = SubmittedValues::new()
        .with(FeatureId::ActiveChecks, SubmittedValue::On)
        .with(FeatureId::Notifications, SubmittedValue::On)
        .with(FeatureId::FlapDetection, SubmittedValue::On);
    let permissions = DenyList::allow_all()
        .deny(FeatureId::Notifications, 1)
        .deny(FeatureId::Notifications, 2);

    let (commands, record) = collect(submitted, FeatureStatus::new(), &objects(2), &permissions);

    let features: Vec<_> = commands.iter().map(|c| c.feature()).collect();
    assert_eq!(
        features,
        vec![FeatureId::ActiveChecks, FeatureId::FlapDetection]
    );
    // No batch, no record
    assert_eq!(record.get(FeatureId::Notifications), None);
    assert_eq!(record.len(), 2);
}

// ============================================================
// Section 3: Batching
// ============================================================

#[test]
fn test_large_selection_is_split_into_batches() {
    let source = objects(2500);
    let submitted = SubmittedValues::new().with(FeatureId::ActiveChecks, SubmittedValue::On);

    let (commands, record) = collect(submitted, FeatureStatus::new(), &source, &DenyList::allow_all());

    let sizes: Vec<_> = commands.iter().map(|c| c.objects().len()).collect();
    assert_eq!(sizes, vec![1000, 1000, 500]);

    let flattened: Vec<u32> = commands.into_iter().flat_map(|c| c.into_objects()).collect();
    assert_eq!(flattened, source);
    assert_eq!(record.len(), 1);
}

#[test]
fn test_exact_multiple_of_batch_size_has_no_empty_tail() {
    let submitted = SubmittedValues::new().with(FeatureId::ActiveChecks, SubmittedValue::On);

    let (commands, _) = collect(
        submitted,
        FeatureStatus::new(),
        &objects(2000),
        &DenyList::allow_all(),
    );

    assert_eq!(commands.len(), 2);
    assert!(commands.iter().all(|c| c.objects().len() == 1000));
}

#[test]
fn test_custom_batch_size() {
    let submitted = SubmittedValues::new().with(FeatureId::PassiveChecks, SubmittedValue::On);
    let source = objects(7);
    let permissions = DenyList::allow_all();

    let commands: Vec<_> = CommandGenerator::default()
        .with_batch_size(3)
        .generate(&submitted, &FeatureStatus::new(), &source, &permissions)
        .collect();

    let sizes: Vec<_> = commands.iter().map(|c| c.objects().len()).collect();
    assert_eq!(sizes, vec![3, 3, 1]);
}

#[test]
fn test_zero_batch_size_is_clamped() {
    assert_eq!(CommandGenerator::default().with_batch_size(0).batch_size(), 1);
}

// ============================================================
// Section 4: Laziness and submission record
// ============================================================

#[test]
fn test_nothing_is_enumerated_before_polling() {
    let opened = Cell::new(0);
    let source = from_fn(|| {
        opened.set(opened.get() + 1);
        0..3u32
    });
    let submitted = SubmittedValues::new().with(FeatureId::ActiveChecks, SubmittedValue::On);
    let permissions = |_: &str, _: &u32| true;

    let mut stream =
        CommandGenerator::default().generate(&submitted, &FeatureStatus::new(), &source, &permissions);
    assert_eq!(opened.get(), 0);

    assert!(stream.next().is_some());
    assert_eq!(opened.get(), 1);
}

#[test]
fn test_batches_pull_only_what_they_need() {
    let source = objects(10);
    let permissions = DenyList::allow_all();
    let submitted = SubmittedValues::new().with(FeatureId::ActiveChecks, SubmittedValue::On);

    let mut stream = CommandGenerator::default()
        .with_batch_size(4)
        .generate(&submitted, &FeatureStatus::new(), &source, &permissions);

    stream.next();
    assert_eq!(permissions.calls.get(), 4);
    stream.next();
    assert_eq!(permissions.calls.get(), 8);
}

#[test]
fn test_each_feature_opens_a_fresh_cursor() {
    let opened = Cell::new(0);
    let source = from_fn(|| {
        opened.set(opened.get() + 1);
        0..2u32
    });
    let submitted = SubmittedValues::new()
        .with(FeatureId::ActiveChecks, SubmittedValue::On)
        .with(FeatureId::EventHandler, SubmittedValue::On);
    let permissions = |_: &str, _: &u32| true;

    let commands: Vec<_> = CommandGenerator::default()
        .generate(&submitted, &FeatureStatus::new(), &source, &permissions)
        .collect();

    assert_eq!(opened.get(), 2);
    assert_eq!(commands[0].objects(), commands[1].objects());
}

#[test]
fn test_exhausted_stream_stays_exhausted() {
    let source = objects(1);
    let permissions = DenyList::allow_all();
    let submitted = SubmittedValues::new().with(FeatureId::ActiveChecks, SubmittedValue::On);

    let mut stream =
        CommandGenerator::default().generate(&submitted, &FeatureStatus::new(), &source, &permissions);

    assert!(stream.next().is_some());
    assert!(stream.next().is_none());
    assert!(stream.next().is_none());
    assert_eq!(stream.emitted(), 1);
}

#[test]
fn test_record_is_set_once_per_feature() {
    let source = objects(3000);
    let permissions = DenyList::allow_all();
    let submitted = SubmittedValues::new().with(FeatureId::Notifications, SubmittedValue::Off);
    let status = FeatureStatus::new().with(FeatureId::Notifications, AggregateState::On);

    let mut stream = CommandGenerator::default().generate(&submitted, &status, &source, &permissions);

    stream.next();
    assert_eq!(stream.record().get(FeatureId::Notifications), Some(false));
    let remaining = stream.by_ref().count();
    assert_eq!(remaining, 2);
    assert_eq!(
        stream.record().iter().collect::<Vec<_>>(),
        vec![(FeatureId::Notifications, false)]
    );
}

// ============================================================
// Section 5: Properties
// ============================================================

proptest! {
    #[test]
    fn prop_batches_are_bounded_and_cover_granted_objects(
        n in 0u32..2500,
        batch_size in 1usize..1200,
        denied_every in 2u32..10,
    ) {
        let source = objects(n);
        let permissions = |_: &str, object: &u32| object % denied_every != 0;
        let submitted = SubmittedValues::new().with(FeatureId::ActiveChecks, SubmittedValue::On);

        let commands: Vec<_> = CommandGenerator::default()
            .with_batch_size(batch_size)
            .generate(&submitted, &FeatureStatus::new(), &source, &permissions)
            .collect();

        for command in &commands {
            prop_assert!(!command.objects().is_empty());
            prop_assert!(command.objects().len() <= batch_size);
            prop_assert!(command.objects().iter().all(|o| o % denied_every != 0));
        }

        let granted: Vec<u32> = source.iter().copied().filter(|o| o % denied_every != 0).collect();
        prop_assert_eq!(commands.len(), granted.len().div_ceil(batch_size));

        let flattened: Vec<u32> = commands.into_iter().flat_map(|c| c.into_objects()).collect();
        prop_assert_eq!(flattened, granted);
    }
}
