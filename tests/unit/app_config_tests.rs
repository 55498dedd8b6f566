/*!
 * Tests for application configuration functionality
 */

use anyhow::Result;
use subedit::app_config::{Config, LogLevel};
use subedit::cue_store::{BoundaryPolicy, ExclusionPolicy};
use subedit::srt_parser::SeparatorPolicy;

use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.editor.fine_tune_step_secs, 0.1);
    assert_eq!(config.editor.separator_policy, SeparatorPolicy::Lenient);
    assert_eq!(config.editor.exclusion_policy, ExclusionPolicy::Remap);
    assert_eq!(config.editor.boundary_policy, BoundaryPolicy::Adjacent);

    assert_eq!(config.caption.kind, "subtitles");
    assert_eq!(config.caption.language, "en");
    assert!(config.caption.default_enabled);
    assert_eq!(config.caption.mime, "text/vtt");

    assert_eq!(config.export.file_name, "subtitles.srt");
    assert_eq!(config.export.mime, "text/plain;charset=utf-8");

    assert_eq!(config.log_level, LogLevel::Info);
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    config.editor.fine_tune_step_secs = -0.1;
    assert!(config.validate().is_err());
    config.editor.fine_tune_step_secs = f64::NAN;
    assert!(config.validate().is_err());
    config.editor.fine_tune_step_secs = 0.05;
    assert!(config.validate().is_ok());

    config.caption.language = "zz".to_string();
    assert!(config.validate().is_err());
    config.caption.language = "fr".to_string();

    config.caption.kind = "karaoke".to_string();
    assert!(config.validate().is_err());
    config.caption.kind = "captions".to_string();

    config.export.file_name = "../escape.srt".to_string();
    assert!(config.validate().is_err());
    config.export.file_name = " ".to_string();
    assert!(config.validate().is_err());
    config.export.file_name = "fixed.srt".to_string();

    assert!(config.validate().is_ok());
}

/// Test that a partial JSON file falls back to defaults for missing fields
#[test]
fn test_deserialize_withPartialJson_shouldFillDefaults() -> Result<()> {
    let config: Config = serde_json::from_str(
        r#"{
            "editor": { "fine_tune_step_secs": 0.5, "exclusion_policy": "retain" },
            "log_level": "debug"
        }"#,
    )?;

    assert_eq!(config.editor.fine_tune_step_secs, 0.5);
    assert_eq!(config.editor.exclusion_policy, ExclusionPolicy::Retain);
    assert_eq!(config.editor.separator_policy, SeparatorPolicy::Lenient);
    assert_eq!(config.caption.language, "en");
    assert_eq!(config.log_level, LogLevel::Debug);
    Ok(())
}

/// Test that a missing config file is created with defaults and then reloaded
#[test]
fn test_loadOrCreate_withMissingFile_shouldWriteDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("subedit.json");

    let created = Config::load_or_create(&path)?;
    assert!(path.exists());

    let reloaded = Config::load_or_create(&path)?;
    assert_eq!(reloaded.export.file_name, created.export.file_name);
    assert_eq!(reloaded.editor.fine_tune_step_secs, created.editor.fine_tune_step_secs);
    Ok(())
}

#[test]
fn test_loadOrCreate_withBrokenJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "subedit.json", "{ not json")?;

    assert!(Config::load_or_create(&path).is_err());
    Ok(())
}

#[test]
fn test_logLevel_toLevelFilter_shouldMatchLogCrate() {
    assert_eq!(LogLevel::Warn.to_level_filter(), log::LevelFilter::Warn);
    assert_eq!(LogLevel::Trace.to_level_filter(), log::LevelFilter::Trace);
}
