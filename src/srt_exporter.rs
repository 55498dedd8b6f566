use std::path::{Path, PathBuf};

use anyhow::Result;
use log::info;

use crate::app_config::ExportConfig;
use crate::cue_store::{Cue, CueStore};
use crate::file_utils::FileManager;
use crate::timecode::{format_timestamp, Separator};

// @module: Corrected SRT export

/// Serialize cues as SRT, numbered from 1 in iteration order
pub fn to_srt<'a>(cues: impl IntoIterator<Item = &'a Cue>) -> String {
    let mut srt = String::new();
    for (i, cue) in cues.into_iter().enumerate() {
        srt.push_str(&format!(
            "{}\n{} --> {}\n{}\n\n",
            i + 1,
            format_timestamp(cue.start, Separator::Comma),
            format_timestamp(cue.end, Separator::Comma),
            cue.text
        ));
    }
    srt
}

/// A file ready to be saved by the user
#[derive(Debug, Clone, PartialEq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub mime: String,
    pub content: String,
    /// Number of cues written
    pub cue_count: usize,
}

impl ExportArtifact {
    /// Save the artifact under `dir` using its file name
    pub fn save_to<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf> {
        let path = dir.as_ref().join(&self.file_name);
        FileManager::write_to_file(&path, &self.content)?;
        info!("Saved {} cues to {}", self.cue_count, path.display());
        Ok(path)
    }
}

/// Builds SRT downloads from a cue store, leaving excluded cues out
#[derive(Debug, Clone, Default)]
pub struct SrtExporter {
    config: ExportConfig,
}

impl SrtExporter {
    pub fn new(config: ExportConfig) -> Self {
        SrtExporter { config }
    }

    pub fn export(&self, store: &CueStore) -> ExportArtifact {
        let content = to_srt(store.included_cues());
        let cue_count = store.included_cues().count();

        ExportArtifact {
            file_name: self.config.file_name.clone(),
            mime: self.config.mime.clone(),
            content,
            cue_count,
        }
    }
}
