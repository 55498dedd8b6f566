use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::cue_store::{BoundaryPolicy, ExclusionPolicy};
use crate::srt_parser::SeparatorPolicy;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Editing behaviour
    #[serde(default)]
    pub editor: EditorConfig,

    /// Caption track attributes
    #[serde(default)]
    pub caption: CaptionConfig,

    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Editing behaviour and consistency policies
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EditorConfig {
    /// Seconds moved by one arrow key press while fine-tuning
    #[serde(default = "default_fine_tune_step_secs")]
    pub fine_tune_step_secs: f64,

    /// How end timestamps written with `,` are read
    #[serde(default)]
    pub separator_policy: SeparatorPolicy,

    /// How exclusions follow deletes and splits
    #[serde(default)]
    pub exclusion_policy: ExclusionPolicy,

    /// Whether fine-tunes re-check the whole sequence for overlaps
    #[serde(default)]
    pub boundary_policy: BoundaryPolicy,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            fine_tune_step_secs: default_fine_tune_step_secs(),
            separator_policy: SeparatorPolicy::default(),
            exclusion_policy: ExclusionPolicy::default(),
            boundary_policy: BoundaryPolicy::default(),
        }
    }
}

/// Attributes of the caption track handed to the player
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CaptionConfig {
    // @field: Track kind
    #[serde(default = "default_caption_kind")]
    pub kind: String,

    // @field: Track language (ISO 639)
    #[serde(default = "default_caption_language")]
    pub language: String,

    // @field: Track label, derived from the language when absent
    #[serde(default)]
    pub label: Option<String>,

    // @field: Shown without user action
    #[serde(default = "default_true")]
    pub default_enabled: bool,

    // @field: MIME type of the generated track
    #[serde(default = "default_caption_mime")]
    pub mime: String,
}

impl Default for CaptionConfig {
    fn default() -> Self {
        Self {
            kind: default_caption_kind(),
            language: default_caption_language(),
            label: None,
            default_enabled: true,
            mime: default_caption_mime(),
        }
    }
}

/// Export settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ExportConfig {
    /// File name of the exported subtitles
    #[serde(default = "default_export_file_name")]
    pub file_name: String,

    /// MIME type of the exported subtitles
    #[serde(default = "default_export_mime")]
    pub mime: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            file_name: default_export_file_name(),
            mime: default_export_mime(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Matching filter for the `log` crate
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Track kinds a player understands
const CAPTION_KINDS: [&str; 5] = ["subtitles", "captions", "descriptions", "chapters", "metadata"];

fn default_fine_tune_step_secs() -> f64 {
    0.1
}

fn default_caption_kind() -> String {
    "subtitles".to_string()
}

fn default_caption_language() -> String {
    "en".to_string()
}

fn default_caption_mime() -> String {
    "text/vtt".to_string()
}

fn default_export_file_name() -> String {
    "subtitles.srt".to_string()
}

fn default_export_mime() -> String {
    "text/plain;charset=utf-8".to_string()
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let step = self.editor.fine_tune_step_secs;
        if !step.is_finite() || step <= 0.0 {
            return Err(anyhow!("Fine-tune step must be a positive number of seconds, got {}", step));
        }

        crate::language_utils::validate_language_code(&self.caption.language)?;

        if !CAPTION_KINDS.contains(&self.caption.kind.as_str()) {
            return Err(anyhow!(
                "Invalid caption kind '{}', expected one of: {}",
                self.caption.kind,
                CAPTION_KINDS.join(", ")
            ));
        }

        let file_name = self.export.file_name.trim();
        if file_name.is_empty() {
            return Err(anyhow!("Export file name must not be empty"));
        }
        if file_name.contains(['/', '\\']) {
            return Err(anyhow!("Export file name must not contain a path: {}", file_name));
        }

        Ok(())
    }

    /// Load the configuration from `path`, writing a default one first if
    /// the file does not exist yet
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config file: {}", path.display()))?;

            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            return Ok(config);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write default config to file: {}", path.display()))?;

        Ok(config)
    }
}
