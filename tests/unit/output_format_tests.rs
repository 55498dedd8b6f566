/*!
 * Tests for SRT export and WebVTT caption output
 */

use anyhow::Result;
use subedit::app_config::ExportConfig;
use subedit::caption_track::to_webvtt;
use subedit::cue_store::{Cue, CueStore};
use subedit::srt_exporter::{SrtExporter, to_srt};
use subedit::srt_parser::parse_srt;

use crate::common::{self, SAMPLE_SRT};

/// Test that parsing an export gives the same cues back within a millisecond
#[test]
fn test_exportThenParse_shouldRoundTripWithinOneMillisecond() {
    let original = vec![
        Cue::new(0.0, 1.2345, "first"),
        Cue::new(1.2345, 61.0006, "second\nwith two lines"),
        Cue::new(3600.0, 3601.999, "third"),
    ];

    let parsed = parse_srt(&to_srt(&original));

    assert_eq!(parsed.len(), original.len());
    for (before, after) in original.iter().zip(&parsed) {
        assert!((before.start - after.start).abs() <= 0.001);
        assert!((before.end - after.end).abs() <= 0.001);
        assert_eq!(before.text, after.text);
    }
}

#[test]
fn test_toSrt_withParsedSample_shouldReproduceFile() {
    let cues = parse_srt(SAMPLE_SRT);

    assert_eq!(to_srt(&cues), format!("{}\n", SAMPLE_SRT));
}

#[test]
fn test_export_shouldNumberSequentiallyAfterExclusions() {
    let mut store = CueStore::new();
    store.replace_all(parse_srt(SAMPLE_SRT));
    store.toggle_exclude(0);

    let artifact = SrtExporter::default().export(&store);

    assert!(artifact.content.starts_with("1\n00:00:04,000 --> 00:00:09,000\nIt contains"));
    assert!(artifact.content.contains("\n\n2\n00:00:10,000 --> 00:00:14,000\n"));
    assert_eq!(artifact.cue_count, 2);
}

#[test]
fn test_export_withEverythingExcluded_shouldBeEmpty() {
    let mut store = CueStore::new();
    store.replace_all(vec![Cue::new(0.0, 1.0, "a")]);
    store.toggle_exclude(0);

    let artifact = SrtExporter::default().export(&store);

    assert_eq!(artifact.content, "");
    assert_eq!(artifact.cue_count, 0);
}

#[test]
fn test_saveTo_shouldWriteConfiguredFileName() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let mut store = CueStore::new();
    store.replace_all(vec![Cue::new(0.0, 1.0, "saved")]);
    let exporter = SrtExporter::new(ExportConfig {
        file_name: "fixed.srt".to_string(),
        ..ExportConfig::default()
    });

    let path = exporter.export(&store).save_to(temp_dir.path())?;

    assert_eq!(path, temp_dir.path().join("fixed.srt"));
    assert_eq!(std::fs::read_to_string(path)?, "1\n00:00:00,000 --> 00:00:01,000\nsaved\n\n");
    Ok(())
}

#[test]
fn test_toWebvtt_shouldIncludeExcludedCuesAndDotSeparators() {
    let mut store = CueStore::new();
    store.replace_all(parse_srt(SAMPLE_SRT));
    store.toggle_exclude(1);

    let vtt = to_webvtt(store.cues());

    assert!(vtt.starts_with("WEBVTT\n\n00:00:01.000 --> 00:00:04.000\n"));
    assert!(vtt.contains("00:00:04.000 --> 00:00:09.000\nIt contains multiple entries.\n\n"));
    assert!(!vtt.contains(','));
}
