use anyhow::{Context, Result, anyhow};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::cue_store::Cue;
use crate::edit_script::{self, ScriptReport};
use crate::file_utils::{FileManager, FileType};
use crate::playback_sync;
use crate::session::EditorSession;
use crate::timecode;

// @module: Application controller for the command line workflows

/// Counts from a conversion run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertSummary {
    pub converted: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Convert an SRT file, or every SRT file under a directory, into a WebVTT
    /// file next to the source
    pub async fn convert(&self, input: &Path, force_overwrite: bool) -> Result<ConvertSummary> {
        let start_time = std::time::Instant::now();

        if FileManager::dir_exists(input) {
            return self.convert_folder(input, force_overwrite).await;
        }
        if !FileManager::file_exists(input) {
            return Err(anyhow!("Input path does not exist: {:?}", input));
        }

        let mut summary = ConvertSummary::default();
        match self.convert_file(input, force_overwrite).await? {
            Some(path) => {
                info!("Success: {:?} ({})", path, Self::format_duration(start_time.elapsed()));
                summary.converted += 1;
            }
            None => summary.skipped += 1,
        }
        Ok(summary)
    }

    async fn convert_folder(&self, input_dir: &Path, force_overwrite: bool) -> Result<ConvertSummary> {
        let start_time = std::time::Instant::now();

        let srt_files = FileManager::find_files(input_dir, "srt")?;
        if srt_files.is_empty() {
            return Err(anyhow!("No subtitle files found in directory: {:?}", input_dir));
        }

        let folder_pb = ProgressBar::new(srt_files.len() as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        folder_pb.set_style(template_result.progress_chars("#>-"));

        let mut summary = ConvertSummary::default();
        for srt_file in &srt_files {
            let file_name = srt_file
                .file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());
            folder_pb.set_message(format!("Converting: {}", file_name));

            match self.convert_file(srt_file, force_overwrite).await {
                Ok(Some(_)) => summary.converted += 1,
                Ok(None) => summary.skipped += 1,
                Err(e) => {
                    error!("Error converting file {}: {}", file_name, e);
                    summary.failed += 1;
                }
            }
            folder_pb.inc(1);
        }
        folder_pb.finish_with_message("Folder conversion complete");

        info!(
            "Folder conversion completed in {}: {} converted, {} skipped, {} errors",
            Self::format_duration(start_time.elapsed()),
            summary.converted,
            summary.skipped,
            summary.failed
        );
        Ok(summary)
    }

    // @returns: Output path, or None when an existing output was kept
    async fn convert_file(&self, input_file: &Path, force_overwrite: bool) -> Result<Option<PathBuf>> {
        let output_dir = input_file.parent().unwrap_or(Path::new("."));
        let output_path = FileManager::generate_output_path(input_file, output_dir, "vtt");
        if output_path.exists() && !force_overwrite {
            warn!("Skipping {:?}, output already exists (use -f to force overwrite)", output_path);
            return Ok(None);
        }

        let session = self.open_session(input_file).await?;
        let webvtt = session
            .caption_text()
            .ok_or_else(|| anyhow!("No caption track generated for {:?}", input_file))?;
        FileManager::write_to_file(&output_path, webvtt)?;

        debug!("Wrote {:?}", output_path);
        Ok(Some(output_path))
    }

    /// Re-export a subtitle file without the cues at `exclude` (0-based).
    /// Returns the written path, or None when an existing file was kept.
    pub async fn export(
        &self,
        input: &Path,
        output_dir: Option<&Path>,
        exclude: &[usize],
        force_overwrite: bool,
    ) -> Result<Option<PathBuf>> {
        let mut session = self.open_session(input).await?;

        for &index in exclude {
            if index >= session.cues().len() {
                warn!("Ignoring exclusion of cue {}, file has {} cues", index + 1, session.cues().len());
                continue;
            }
            if !session.store().is_excluded(index) {
                session.toggle_exclude(index);
            }
        }

        self.save_export(&session, input, output_dir, force_overwrite)
    }

    /// Run an edit script against a subtitle file and export the result
    pub async fn apply_script(
        &self,
        input: &Path,
        script_path: &Path,
        output_dir: Option<&Path>,
        force_overwrite: bool,
    ) -> Result<(ScriptReport, Option<PathBuf>)> {
        let script = FileManager::read_to_string_async(script_path).await?;
        let commands = edit_script::parse_script(&script)
            .with_context(|| format!("Invalid edit script: {:?}", script_path))?;

        let mut session = self.open_session(input).await?;
        let report = edit_script::apply_script(&mut session, &commands);
        info!(
            "Edit script: {} applied, {} without effect, {} rejected",
            report.applied,
            report.ignored,
            report.rejected.len()
        );

        let saved = self.save_export(&session, input, output_dir, force_overwrite)?;
        Ok((report, saved))
    }

    /// Find the cue shown at a clock time such as `00:01:02.500` or `62.5`
    pub async fn locate(&self, input: &Path, time: &str) -> Result<Option<(usize, Cue)>> {
        let seconds = timecode::parse_clock(time)?;
        let session = self.open_session(input).await?;

        Ok(playback_sync::active_cue(session.cues(), seconds).map(|index| (index, session.cues()[index].clone())))
    }

    async fn open_session(&self, input: &Path) -> Result<EditorSession> {
        match FileManager::detect_file_type(input)? {
            FileType::Subtitle => {}
            FileType::Video => return Err(anyhow!("Expected a subtitle file, got a video: {:?}", input)),
            FileType::Unknown => warn!("{:?} does not look like an SRT file, trying anyway", input),
        }

        let mut session = EditorSession::new(&self.config);
        let count = session
            .load_subtitle_file(input)
            .await
            .with_context(|| format!("Failed to load subtitles from {:?}", input))?;
        if count == 0 {
            warn!("No cues found in {:?}", input);
        }
        Ok(session)
    }

    fn save_export(
        &self,
        session: &EditorSession,
        input: &Path,
        output_dir: Option<&Path>,
        force_overwrite: bool,
    ) -> Result<Option<PathBuf>> {
        let output_dir = match output_dir {
            Some(dir) => dir.to_path_buf(),
            None => input.parent().unwrap_or(Path::new(".")).to_path_buf(),
        };

        let artifact = session.export();
        let target = output_dir.join(&artifact.file_name);
        if target.exists() && !force_overwrite {
            warn!("Skipping export, {:?} already exists (use -f to force overwrite)", target);
            return Ok(None);
        }

        let path = artifact.save_to(&output_dir)?;
        debug!("Export of {:?} written to {:?}", input, path);
        Ok(Some(path))
    }

    fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let minutes = total_seconds / 60;
        let seconds = total_seconds % 60;

        if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
