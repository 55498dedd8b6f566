/*!
 * Session-specific state types.
 */

use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use serde::{Deserialize, Serialize};

use crate::cue_store::Edge;

/// What the user is currently doing with the cue list
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EditMode {
    /// Nothing selected
    #[default]
    Idle,
    /// Text of a cue is being edited; `draft` holds the unsaved text
    Editing { index: usize, draft: String },
    /// Waiting for a split time for a cue
    Splitting { index: usize },
    /// Arrow keys move one boundary of a cue
    FineTuning { index: usize, edge: Edge },
}

impl fmt::Display for EditMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditMode::Idle => write!(f, "idle"),
            EditMode::Editing { index, .. } => write!(f, "editing cue {}", index + 1),
            EditMode::Splitting { index } => write!(f, "splitting cue {}", index + 1),
            EditMode::FineTuning { index, edge } => {
                write!(f, "fine-tuning the {} of cue {}", edge, index + 1)
            }
        }
    }
}

/// Keys that drive fine-tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrowKey {
    /// Move the boundary earlier
    Left,
    /// Move the boundary later
    Right,
}

impl ArrowKey {
    /// Signed offset for one key press
    pub fn delta(self, step: f64) -> f64 {
        match self {
            ArrowKey::Left => -step,
            ArrowKey::Right => step,
        }
    }
}

impl FromStr for ArrowKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "arrowleft" | "left" => Ok(Self::Left),
            "arrowright" | "right" => Ok(Self::Right),
            _ => Err(anyhow!("Not a fine-tune key: {}", s)),
        }
    }
}

/// Token for a keyboard listener attached to a session.
///
/// Only the most recent token of a session is live; loading new subtitles or
/// tearing the session down invalidates it.
#[derive(Debug, PartialEq, Eq)]
pub struct KeySubscription {
    pub(crate) id: u64,
}
