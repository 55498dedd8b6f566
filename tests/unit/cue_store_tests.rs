/*!
 * Tests for cue editing, fine-tuning and export exclusions
 */

use subedit::cue_store::{BoundaryPolicy, Cue, CueStore, Edge, ExclusionPolicy, NeighborAdjustment};
use subedit::errors::EditError;

use crate::common::assert_seconds_eq;

fn cues(rows: &[(f64, f64, &str)]) -> Vec<Cue> {
    rows.iter().map(|&(start, end, text)| Cue::new(start, end, text)).collect()
}

fn store_with(rows: &[(f64, f64, &str)]) -> CueStore {
    let mut store = CueStore::new();
    store.replace_all(cues(rows));
    store
}

fn texts(store: &CueStore) -> Vec<&str> {
    store.cues().iter().map(|cue| cue.text.as_str()).collect()
}

#[test]
fn test_editText_shouldTrimAndReplace() {
    let mut store = store_with(&[(1.0, 2.0, "old")]);

    assert_eq!(store.edit_text(0, "  new text \n"), Ok(true));
    assert_eq!(store.cues()[0].text, "new text");
}

#[test]
fn test_editText_withOutOfRangeIndex_shouldFail() {
    let mut store = store_with(&[(1.0, 2.0, "only")]);

    assert_eq!(
        store.edit_text(3, "x"),
        Err(EditError::IndexOutOfRange { index: 3, len: 1 })
    );
}

#[test]
fn test_delete_shouldShiftLaterCues() {
    let mut store = store_with(&[(0.0, 1.0, "a"), (1.0, 2.0, "b"), (2.0, 3.0, "c")]);

    let removed = store.delete(1).unwrap();

    assert_eq!(removed.text, "b");
    assert_eq!(texts(&store), vec!["a", "c"]);
}

#[test]
fn test_split_withReferenceExample_shouldProduceTwoCues() {
    let mut store = store_with(&[(1.0, 3.0, "Hi")]);

    store.split(0, 2.0, "Hi").unwrap();

    assert_eq!(store.cues(), &[Cue::new(1.0, 2.0, "Hi"), Cue::new(2.0, 3.0, "Hi")][..]);
}

#[test]
fn test_split_atBoundaries_shouldBeRejectedWithoutChange() {
    let mut store = store_with(&[(1.0, 3.0, "Hi")]);

    for at in [1.0, 3.0, 0.5, 4.0, f64::NAN] {
        assert!(matches!(store.split(0, at, "x"), Err(EditError::SplitOutOfRange { .. })));
    }
    assert_eq!(store.len(), 1);
    assert_eq!(store.cues()[0], Cue::new(1.0, 3.0, "Hi"));
}

#[test]
fn test_split_shouldKeepOrderAndDurationSum() {
    let mut store = store_with(&[(0.0, 1.0, "a"), (1.0, 5.0, "b"), (5.0, 6.0, "c")]);

    store.split(1, 2.5, "b2").unwrap();

    assert_eq!(texts(&store), vec!["a", "b", "b2", "c"]);
    assert_seconds_eq(store.cues()[1].duration() + store.cues()[2].duration(), 4.0);
    assert!(store.cues().windows(2).all(|pair| pair[0].start <= pair[1].start));
}

#[test]
fn test_fineTune_startStep_shouldMovePreviousEnd() {
    let mut store = store_with(&[(1.0, 3.0, "a"), (3.0, 5.0, "b")]);

    let outcome = store.fine_tune(1, Edge::Start, -0.1).unwrap();

    assert_seconds_eq(store.cues()[1].start, 2.9);
    assert_seconds_eq(store.cues()[0].end, 2.9);
    assert!(matches!(outcome.neighbor, NeighborAdjustment::Adjusted { index: 0, .. }));
}

#[test]
fn test_fineTune_endStep_shouldMoveNextStart() {
    let mut store = store_with(&[(1.0, 3.0, "a"), (3.0, 5.0, "b")]);

    store.fine_tune(0, Edge::End, 0.1).unwrap();

    assert_seconds_eq(store.cues()[0].end, 3.1);
    assert_seconds_eq(store.cues()[1].start, 3.1);
}

#[test]
fn test_fineTune_crossingPreviousStart_shouldLeaveNeighbourAlone() {
    let mut store = store_with(&[(1.0, 3.0, "a"), (3.0, 5.0, "b")]);

    let outcome = store.fine_tune(1, Edge::Start, -2.5).unwrap();

    assert_seconds_eq(store.cues()[1].start, 0.5);
    assert_seconds_eq(store.cues()[0].end, 3.0);
    assert_eq!(outcome.neighbor, NeighborAdjustment::Rejected { index: 0 });
}

#[test]
fn test_fineTune_shouldClampAtZeroAndAtOwnEnd() {
    let mut store = store_with(&[(0.05, 1.0, "a")]);

    store.fine_tune(0, Edge::Start, -0.1).unwrap();
    assert_seconds_eq(store.cues()[0].start, 0.0);

    store.fine_tune(0, Edge::Start, 5.0).unwrap();
    assert_seconds_eq(store.cues()[0].start, 1.0);

    store.fine_tune(0, Edge::End, -5.0).unwrap();
    assert_seconds_eq(store.cues()[0].end, 1.0);
}

#[test]
fn test_fineTune_withRevalidatePolicy_shouldReportRemainingOverlaps() {
    let mut store = CueStore::with_policies(ExclusionPolicy::Remap, BoundaryPolicy::Revalidate);
    store.replace_all(cues(&[(0.0, 2.0, "a"), (2.0, 4.0, "b"), (4.0, 6.0, "c")]));

    let outcome = store.fine_tune(0, Edge::End, 2.5).unwrap();

    assert_eq!(outcome.neighbor, NeighborAdjustment::Rejected { index: 1 });
    assert_eq!(outcome.overlaps.len(), 1);
    assert_eq!(outcome.overlaps[0].first, 0);
    assert_seconds_eq(outcome.overlaps[0].amount, 2.5);
}

#[test]
fn test_toggleExclude_twice_shouldRestoreFullExport() {
    let mut store = store_with(&[(0.0, 1.0, "a"), (1.0, 2.0, "b"), (2.0, 3.0, "c")]);

    assert!(store.toggle_exclude(1));
    let included: Vec<&str> = store.included_cues().map(|cue| cue.text.as_str()).collect();
    assert_eq!(included, vec!["a", "c"]);

    assert!(!store.toggle_exclude(1));
    assert_eq!(store.included_cues().count(), 3);
}

#[test]
fn test_delete_withRemapPolicy_shouldKeepExclusionOnSameCue() {
    let mut store = store_with(&[(0.0, 1.0, "a"), (1.0, 2.0, "b"), (2.0, 3.0, "c")]);
    store.toggle_exclude(2);

    store.delete(0).unwrap();

    assert!(store.is_excluded(1));
    let included: Vec<&str> = store.included_cues().map(|cue| cue.text.as_str()).collect();
    assert_eq!(included, vec!["b"]);
}

#[test]
fn test_delete_ofExcludedCue_shouldDropExclusion() {
    let mut store = store_with(&[(0.0, 1.0, "a"), (1.0, 2.0, "b")]);
    store.toggle_exclude(0);

    store.delete(0).unwrap();

    assert!(store.exclusions().is_empty());
}

#[test]
fn test_split_withRemapPolicy_shouldShiftLaterExclusions() {
    let mut store = store_with(&[(0.0, 2.0, "a"), (2.0, 3.0, "b")]);
    store.toggle_exclude(1);

    store.split(0, 1.0, "a2").unwrap();

    assert_eq!(store.exclusions().iter().copied().collect::<Vec<_>>(), vec![2]);
}

#[test]
fn test_split_ofExcludedCue_shouldExcludeBothHalves() {
    let mut store = store_with(&[(0.0, 2.0, "a")]);
    store.toggle_exclude(0);

    store.split(0, 1.0, "a2").unwrap();

    assert_eq!(store.included_cues().count(), 0);
}

#[test]
fn test_delete_withRetainPolicy_shouldLeaveIndicesUntouched() {
    let mut store = CueStore::with_policies(ExclusionPolicy::Retain, BoundaryPolicy::Adjacent);
    store.replace_all(cues(&[(0.0, 1.0, "a"), (1.0, 2.0, "b"), (2.0, 3.0, "c")]));
    store.toggle_exclude(2);

    store.delete(0).unwrap();

    // the stale index now points past the end
    assert!(store.is_excluded(2));
    assert_eq!(store.included_cues().count(), 2);
}

#[test]
fn test_replaceAll_shouldClearExclusions() {
    let mut store = store_with(&[(0.0, 1.0, "a")]);
    store.toggle_exclude(0);

    store.replace_all(cues(&[(5.0, 6.0, "z")]));

    assert!(!store.is_excluded(0));
    assert_eq!(store.cues()[0].text, "z");
}
