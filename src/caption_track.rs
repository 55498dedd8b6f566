use log::debug;

use crate::app_config::CaptionConfig;
use crate::cue_store::Cue;
use crate::language_utils;
use crate::resources::{BlobBody, ResourceHandle, ResourceStore};
use crate::timecode::{format_timestamp, Separator};

// @module: WebVTT caption track for the player

/// Serialize every cue, excluded or not, as WebVTT text
pub fn to_webvtt(cues: &[Cue]) -> String {
    let mut vtt = String::from("WEBVTT\n\n");
    for cue in cues {
        vtt.push_str(&format!(
            "{} --> {}\n{}\n\n",
            format_timestamp(cue.start, Separator::Dot),
            format_timestamp(cue.end, Separator::Dot),
            cue.text
        ));
    }
    vtt
}

/// A caption track as attached to the video player
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionTrack {
    /// Handle of the WebVTT resource
    pub handle: ResourceHandle,
    /// Track kind, `subtitles` by default
    pub kind: String,
    /// Language code of the track
    pub language: String,
    /// Human readable label
    pub label: String,
    /// Whether the player shows it without user action
    pub default_enabled: bool,
}

/// Produces caption tracks and releases the one it replaces
#[derive(Debug)]
pub struct CaptionTrackGenerator {
    config: CaptionConfig,
    language: String,
    label: String,
    current: Option<CaptionTrack>,
}

impl CaptionTrackGenerator {
    pub fn new(config: CaptionConfig) -> Self {
        let label = config.label.clone().unwrap_or_else(|| {
            language_utils::get_language_name(&config.language)
                .unwrap_or_else(|_| config.language.clone())
        });
        let language = language_utils::normalize_track_language(&config.language)
            .unwrap_or_else(|_| config.language.clone());

        CaptionTrackGenerator {
            config,
            language,
            label,
            current: None,
        }
    }

    /// Render the cues into a fresh resource and release the previous one
    pub fn generate<S: ResourceStore>(&mut self, cues: &[Cue], store: &mut S) -> &CaptionTrack {
        let handle = store.create(BlobBody::Text(to_webvtt(cues)), &self.config.mime);
        debug!("Generated caption track {} for {} cues", handle, cues.len());

        let track = CaptionTrack {
            handle,
            kind: self.config.kind.clone(),
            language: self.language.clone(),
            label: self.label.clone(),
            default_enabled: self.config.default_enabled,
        };

        if let Some(previous) = self.current.take() {
            store.release(&previous.handle);
        }

        self.current.insert(track)
    }

    /// Release the current track, if any
    pub fn release<S: ResourceStore>(&mut self, store: &mut S) {
        if let Some(track) = self.current.take() {
            store.release(&track.handle);
        }
    }

    pub fn current(&self) -> Option<&CaptionTrack> {
        self.current.as_ref()
    }
}
