/*!
 * Tests for active cue tracking and the notes panel
 */

use subedit::cue_store::Cue;
use subedit::notes::NotesPanel;
use subedit::playback_sync::{PlaybackSync, active_cue};

use crate::common::assert_seconds_eq;

fn cues() -> Vec<Cue> {
    vec![
        Cue::new(1.0, 3.0, "Hello"),
        Cue::new(3.0, 5.0, "World"),
        Cue::new(8.0, 9.0, "Later"),
    ]
}

#[test]
fn test_activeCue_insideWindow_shouldReturnIndex() {
    assert_eq!(active_cue(&cues(), 1.5), Some(0));
    assert_eq!(active_cue(&cues(), 8.5), Some(2));
}

#[test]
fn test_activeCue_onSharedBoundary_shouldPickFirstMatch() {
    assert_eq!(active_cue(&cues(), 3.0), Some(0));
}

#[test]
fn test_activeCue_inGapOrBeforeStart_shouldReturnNone() {
    assert_eq!(active_cue(&cues(), 0.5), None);
    assert_eq!(active_cue(&cues(), 6.0), None);
    assert_eq!(active_cue(&[], 1.0), None);
}

#[test]
fn test_activeCue_withUnsortedCues_shouldScanInOrder() {
    let unsorted = vec![Cue::new(10.0, 12.0, "b"), Cue::new(0.0, 11.0, "a")];

    assert_eq!(active_cue(&unsorted, 10.5), Some(0));
}

#[test]
fn test_playbackSync_shouldReportChangesOnly() {
    let cues = cues();
    let mut sync = PlaybackSync::new();

    let first = sync.update(&cues, 1.5);
    let same = sync.update(&cues, 2.0);
    let gap = sync.update(&cues, 6.0);

    assert!(first.changed);
    assert_eq!(first.active, Some(0));
    assert!(!same.changed);
    assert!(gap.changed);
    assert_eq!(gap.active, None);
    assert_seconds_eq(sync.current_time(), 6.0);
}

#[test]
fn test_notesPanel_add_shouldRequireTextAndTime() {
    let mut panel = NotesPanel::new();

    assert!(panel.add("Check lip sync", "00:01:23"));
    assert!(!panel.add("   ", "00:01:24"));
    assert!(!panel.add("No time", ""));

    assert_eq!(panel.notes().len(), 1);
    assert_eq!(panel.notes()[0].text, "Check lip sync");
}

#[test]
fn test_notesPanel_jumpTarget_shouldParseClockText() {
    let mut panel = NotesPanel::new();
    panel.add("intro", "01:30");
    panel.add("bad", "soon");

    assert_seconds_eq(panel.jump_target(0).unwrap(), 90.0);
    assert_eq!(panel.jump_target(1), None);
    assert_eq!(panel.jump_target(5), None);
}
