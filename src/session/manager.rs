/*!
 * Editor session: the single owner of the cue sequence and everything derived
 * from it.
 *
 * This module handles:
 * - Loading subtitles as one atomic replacement
 * - Routing edits through the cue store and refreshing the caption track
 * - The editing mode state machine and keyboard subscriptions
 * - Releasing resource handles on replacement and teardown
 */

use anyhow::Result;
use log::{debug, info, warn};
use std::path::Path;

use crate::app_config::Config;
use crate::caption_track::{CaptionTrack, CaptionTrackGenerator};
use crate::cue_store::{Cue, CueStore, Edge, FineTuneOutcome};
use crate::errors::{AppError, EditError};
use crate::file_utils::FileManager;
use crate::notes::NotesPanel;
use crate::playback_sync::{PlaybackSync, SyncUpdate};
use crate::resources::{BlobBody, BlobRegistry, ResourceHandle, ResourceStore};
use crate::srt_exporter::{ExportArtifact, SrtExporter};
use crate::srt_parser::SrtParser;
use crate::timecode::{self, Separator};

use super::models::{ArrowKey, EditMode, KeySubscription};

/// Fallback MIME type for videos with an unknown extension
const GENERIC_VIDEO_MIME: &str = "application/octet-stream";

/// One editing session over a loaded subtitle file
pub struct EditorSession<S: ResourceStore = BlobRegistry> {
    store: CueStore,
    parser: SrtParser,
    captions: CaptionTrackGenerator,
    exporter: SrtExporter,
    resources: S,
    notes: NotesPanel,
    playback: PlaybackSync,
    mode: EditMode,
    captions_shown: bool,
    fine_tune_enabled: bool,
    fine_tune_step: f64,
    key_subscription: Option<u64>,
    next_subscription_id: u64,
    video: Option<ResourceHandle>,
}

impl EditorSession<BlobRegistry> {
    /// Create a session backed by an in-memory blob registry
    pub fn new(config: &Config) -> Self {
        Self::with_resources(config, BlobRegistry::default())
    }
}

impl<S: ResourceStore> EditorSession<S> {
    /// Create a session that registers its resources in `resources`
    pub fn with_resources(config: &Config, resources: S) -> Self {
        let editor = &config.editor;
        EditorSession {
            store: CueStore::with_policies(editor.exclusion_policy, editor.boundary_policy),
            parser: SrtParser::new(editor.separator_policy),
            captions: CaptionTrackGenerator::new(config.caption.clone()),
            exporter: SrtExporter::new(config.export.clone()),
            resources,
            notes: NotesPanel::new(),
            playback: PlaybackSync::new(),
            mode: EditMode::Idle,
            captions_shown: true,
            fine_tune_enabled: false,
            fine_tune_step: editor.fine_tune_step_secs,
            key_subscription: None,
            next_subscription_id: 1,
            video: None,
        }
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Replace the cue sequence with the cues parsed from `content`.
    ///
    /// Exclusions, the editing mode and keyboard subscriptions are reset and a
    /// new caption track is generated. Returns the number of cues loaded.
    pub fn load_subtitles(&mut self, content: &str) -> usize {
        let cues = self.parser.parse(content);
        let count = cues.len();

        self.store.replace_all(cues);
        self.mode = EditMode::Idle;
        self.playback.reset();
        if self.key_subscription.take().is_some() {
            debug!("Keyboard subscription invalidated by subtitle load");
        }
        self.refresh_track();

        info!("Loaded {} subtitle cues", count);
        count
    }

    /// Read a subtitle file and load it; the session only changes once the
    /// whole file has been read
    pub async fn load_subtitle_file<P: AsRef<Path>>(&mut self, path: P) -> Result<usize> {
        let content = FileManager::read_to_string_async(path).await?;
        Ok(self.load_subtitles(&content))
    }

    /// Register a video file for the player, releasing the previous one
    pub fn attach_video<P: AsRef<Path>>(&mut self, path: P) -> Result<&ResourceHandle, AppError> {
        let path = path.as_ref();
        if !FileManager::file_exists(path) {
            return Err(AppError::File(format!("Video file does not exist: {}", path.display())));
        }

        let mime = FileManager::video_mime(path).unwrap_or(GENERIC_VIDEO_MIME);
        let handle = self.resources.create(BlobBody::File(path.to_path_buf()), mime);
        if let Some(previous) = self.video.take() {
            self.resources.release(&previous);
        }

        debug!("Attached video {} as {}", path.display(), handle);
        Ok(&*self.video.insert(handle))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn cues(&self) -> &[Cue] {
        self.store.cues()
    }

    pub fn store(&self) -> &CueStore {
        &self.store
    }

    pub fn mode(&self) -> &EditMode {
        &self.mode
    }

    /// The track to attach to the player; none while captions are hidden
    pub fn caption_track(&self) -> Option<&CaptionTrack> {
        if !self.captions_shown {
            return None;
        }
        self.captions.current()
    }

    /// WebVTT text behind the current caption track
    pub fn caption_text(&self) -> Option<&str> {
        let track = self.captions.current()?;
        self.resources.resolve(&track.handle)?.text()
    }

    pub fn video(&self) -> Option<&ResourceHandle> {
        self.video.as_ref()
    }

    pub fn resources(&self) -> &S {
        &self.resources
    }

    pub fn notes(&self) -> &NotesPanel {
        &self.notes
    }

    pub fn notes_mut(&mut self) -> &mut NotesPanel {
        &mut self.notes
    }

    pub fn captions_shown(&self) -> bool {
        self.captions_shown
    }

    pub fn fine_tune_enabled(&self) -> bool {
        self.fine_tune_enabled
    }

    /// Player time to seek to when a cue is clicked
    pub fn jump_target(&self, index: usize) -> Option<f64> {
        self.store.get(index).map(|cue| cue.start)
    }

    // =========================================================================
    // Direct edits
    // =========================================================================

    /// Replace a cue's text; blank text is ignored and returns `Ok(false)`
    pub fn edit_text(&mut self, index: usize, text: &str) -> Result<bool, EditError> {
        let changed = self.store.edit_text(index, text)?;
        if changed {
            self.refresh_track();
        }
        Ok(changed)
    }

    /// Delete a cue. Any selection is dropped since indices shift.
    pub fn delete(&mut self, index: usize) -> Result<Cue, EditError> {
        let removed = self.store.delete(index)?;
        self.mode = EditMode::Idle;
        self.refresh_track();
        Ok(removed)
    }

    /// Split a cue at `at` seconds, the new second half carrying `tail_text`
    pub fn split(&mut self, index: usize, at: f64, tail_text: &str) -> Result<(), EditError> {
        self.store.split(index, at, tail_text)?;
        self.mode = EditMode::Idle;
        self.refresh_track();
        Ok(())
    }

    /// Move one boundary of a cue by `delta` seconds
    pub fn fine_tune(&mut self, index: usize, edge: Edge, delta: f64) -> Result<FineTuneOutcome, EditError> {
        let outcome = self.store.fine_tune(index, edge, delta)?;
        self.refresh_track();
        Ok(outcome)
    }

    /// Toggle export exclusion. The caption track keeps showing excluded cues.
    pub fn toggle_exclude(&mut self, index: usize) -> bool {
        self.store.toggle_exclude(index)
    }

    // =========================================================================
    // Text editing mode
    // =========================================================================

    /// Start editing a cue's text; the draft starts as the current text
    pub fn begin_edit(&mut self, index: usize) -> Result<(), EditError> {
        let cue = self.cue_at(index)?;
        self.mode = EditMode::Editing {
            index,
            draft: cue.text.clone(),
        };
        Ok(())
    }

    pub fn update_draft(&mut self, text: &str) -> Result<(), EditError> {
        match &mut self.mode {
            EditMode::Editing { draft, .. } => {
                *draft = text.to_string();
                Ok(())
            }
            other => Err(EditError::WrongMode {
                action: "update the draft",
                mode: other.to_string(),
            }),
        }
    }

    /// Save the draft and return to idle. Returns whether the text changed.
    pub fn save_edit(&mut self) -> Result<bool, EditError> {
        let (index, draft) = match std::mem::take(&mut self.mode) {
            EditMode::Editing { index, draft } => (index, draft),
            other => {
                let mode = other.to_string();
                self.mode = other;
                return Err(EditError::WrongMode {
                    action: "save an edit",
                    mode,
                });
            }
        };

        self.edit_text(index, &draft)
    }

    /// Leave editing mode without saving
    pub fn cancel_edit(&mut self) {
        if matches!(self.mode, EditMode::Editing { .. }) {
            self.mode = EditMode::Idle;
        }
    }

    // =========================================================================
    // Split mode
    // =========================================================================

    /// Start splitting a cue; returns the suggested split time, which is the
    /// cue's end formatted as `HH:MM:SS.mmm`
    pub fn begin_split(&mut self, index: usize) -> Result<String, EditError> {
        let suggestion = timecode::format_timestamp(self.cue_at(index)?.end, Separator::Dot);
        self.mode = EditMode::Splitting { index };
        Ok(suggestion)
    }

    /// Finish a split with the time typed by the user.
    ///
    /// Blank input cancels and returns `Ok(false)`. Without `tail_text` the new
    /// cue repeats the original text. The session is idle afterwards whatever
    /// the outcome.
    pub fn confirm_split(&mut self, input: &str, tail_text: Option<&str>) -> Result<bool, EditError> {
        let index = match std::mem::take(&mut self.mode) {
            EditMode::Splitting { index } => index,
            other => {
                let mode = other.to_string();
                self.mode = other;
                return Err(EditError::WrongMode {
                    action: "confirm a split",
                    mode,
                });
            }
        };

        if input.trim().is_empty() {
            debug!("Split of cue {} cancelled", index + 1);
            return Ok(false);
        }

        let at = timecode::parse_clock(input)?;
        let tail = match tail_text {
            Some(text) => text.to_string(),
            None => self.cue_at(index)?.text.clone(),
        };

        self.split(index, at, &tail)?;
        Ok(true)
    }

    pub fn cancel_split(&mut self) {
        if matches!(self.mode, EditMode::Splitting { .. }) {
            self.mode = EditMode::Idle;
        }
    }

    // =========================================================================
    // Fine-tune mode and keyboard
    // =========================================================================

    /// Show or hide the caption track on the player. The track keeps being
    /// regenerated while hidden.
    pub fn toggle_captions(&mut self) -> bool {
        self.captions_shown = !self.captions_shown;
        debug!("Captions {}", if self.captions_shown { "shown" } else { "hidden" });
        self.captions_shown
    }

    /// Show or hide the fine-tune panel; either way the selected boundary is cleared
    pub fn toggle_fine_tune_panel(&mut self) -> bool {
        self.fine_tune_enabled = !self.fine_tune_enabled;
        if matches!(self.mode, EditMode::FineTuning { .. }) {
            self.mode = EditMode::Idle;
        }
        self.fine_tune_enabled
    }

    /// Select a boundary for the arrow keys. Returns `Ok(false)` while the
    /// fine-tune panel is hidden.
    pub fn begin_fine_tune(&mut self, index: usize, edge: Edge) -> Result<bool, EditError> {
        if !self.fine_tune_enabled {
            return Ok(false);
        }
        self.cue_at(index)?;
        self.mode = EditMode::FineTuning { index, edge };
        Ok(true)
    }

    /// Attach a keyboard listener; any earlier token stops working
    pub fn subscribe_keys(&mut self) -> KeySubscription {
        let id = self.next_subscription_id;
        self.next_subscription_id += 1;
        self.key_subscription = Some(id);
        KeySubscription { id }
    }

    /// Detach a keyboard listener. Returns false if it was no longer live.
    pub fn unsubscribe_keys(&mut self, subscription: KeySubscription) -> bool {
        if self.key_subscription == Some(subscription.id) {
            self.key_subscription = None;
            true
        } else {
            false
        }
    }

    /// Handle an arrow key from a listener.
    ///
    /// Ignored unless the subscription is live, the panel is shown and a
    /// boundary is selected.
    pub fn handle_key(&mut self, subscription: &KeySubscription, key: ArrowKey) -> Option<FineTuneOutcome> {
        if self.key_subscription != Some(subscription.id) {
            debug!("Ignoring key from a stale keyboard subscription");
            return None;
        }
        if !self.fine_tune_enabled {
            return None;
        }
        let EditMode::FineTuning { index, edge } = self.mode else {
            return None;
        };

        match self.fine_tune(index, edge, key.delta(self.fine_tune_step)) {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                warn!("Fine-tune dropped: {}", e);
                self.mode = EditMode::Idle;
                None
            }
        }
    }

    // =========================================================================
    // Playback, export, teardown
    // =========================================================================

    /// Feed the player's current time
    pub fn tick(&mut self, time: f64) -> SyncUpdate {
        self.playback.update(self.store.cues(), time)
    }

    /// Build the SRT download from the non-excluded cues
    pub fn export(&self) -> ExportArtifact {
        self.exporter.export(&self.store)
    }

    /// Detach listeners and release every resource the session holds
    pub fn teardown(&mut self) {
        self.key_subscription = None;
        self.mode = EditMode::Idle;
        self.captions.release(&mut self.resources);
        if let Some(video) = self.video.take() {
            self.resources.release(&video);
        }
        debug!("Session torn down, {} resource(s) still live", self.resources.live_count());
    }

    fn cue_at(&self, index: usize) -> Result<&Cue, EditError> {
        self.store.get(index).ok_or(EditError::IndexOutOfRange {
            index,
            len: self.store.len(),
        })
    }

    fn refresh_track(&mut self) {
        self.captions.generate(self.store.cues(), &mut self.resources);
    }
}
