use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::timecode;

// @module: Free-form notes pinned to playback times

/// A note entered in the side panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// Time as typed by the user, e.g. `00:01:23`
    pub time: String,
    pub text: String,
}

/// Notes list; independent of the cue sequence
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotesPanel {
    notes: Vec<Note>,
}

impl NotesPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a note. Ignored when the text is blank or no time was given.
    pub fn add(&mut self, text: &str, time: &str) -> bool {
        if text.trim().is_empty() || time.is_empty() {
            debug!("Ignoring note without text or time");
            return false;
        }

        self.notes.push(Note {
            time: time.to_string(),
            text: text.to_string(),
        });
        true
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Playback position in seconds for the note at `index`.
    ///
    /// `None` when there is no such note or its time cannot be read.
    pub fn jump_target(&self, index: usize) -> Option<f64> {
        let note = self.notes.get(index)?;
        match timecode::parse_clock(&note.time) {
            Ok(seconds) => Some(seconds),
            Err(e) => {
                warn!("Cannot jump to note {}: {}", index + 1, e);
                None
            }
        }
    }
}
