use log::trace;

use crate::cue_store::Cue;

// @module: Playback timestamp to active cue

/// Index of the first cue whose window contains `time`.
///
/// Cues are scanned in order and are not required to be sorted.
pub fn active_cue(cues: &[Cue], time: f64) -> Option<usize> {
    cues.iter().position(|cue| cue.contains(time))
}

/// Result of feeding one timing update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncUpdate {
    /// Cue to highlight, if any
    pub active: Option<usize>,
    /// Whether the highlight moved since the previous update
    pub changed: bool,
}

/// Follows the player clock and reports which cue to highlight
#[derive(Debug, Clone, Default)]
pub struct PlaybackSync {
    current_time: f64,
    active: Option<usize>,
}

impl PlaybackSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the player's current time
    pub fn update(&mut self, cues: &[Cue], time: f64) -> SyncUpdate {
        self.current_time = time;
        let active = active_cue(cues, time);
        let changed = active != self.active;
        if changed {
            trace!("Active cue {:?} -> {:?} at {:.3}s", self.active, active, time);
        }
        self.active = active;
        SyncUpdate { active, changed }
    }

    /// Forget the last highlight, e.g. after loading new subtitles
    pub fn reset(&mut self) {
        self.current_time = 0.0;
        self.active = None;
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }
}
