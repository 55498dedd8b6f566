/*!
 * Batch edits for the command line.
 *
 * An edit script is a JSON array of operations applied in order through an
 * editor session, the same way a user would apply them one by one:
 *
 * ```json
 * [
 *   { "op": "edit_text", "index": 0, "text": "Hello there" },
 *   { "op": "split", "index": 1, "at": "00:00:04.200", "text": "second half" },
 *   { "op": "fine_tune", "index": 2, "edge": "start", "keys": ["left", "left"] },
 *   { "op": "toggle_exclude", "index": 3 },
 *   { "op": "delete", "index": 4 }
 * ]
 * ```
 */

use anyhow::{Context, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::cue_store::Edge;
use crate::resources::ResourceStore;
use crate::session::{ArrowKey, EditorSession};

/// One scripted operation. Indices are 0-based positions at the time the
/// operation runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditCommand {
    /// Replace a cue's text
    EditText { index: usize, text: String },
    /// Remove a cue
    Delete { index: usize },
    /// Split a cue at a clock time; the new half repeats the text unless given
    Split {
        index: usize,
        at: String,
        #[serde(default)]
        text: Option<String>,
    },
    /// Press arrow keys with one boundary selected
    FineTune {
        index: usize,
        edge: Edge,
        keys: Vec<ArrowKey>,
    },
    /// Toggle export exclusion
    ToggleExclude { index: usize },
    /// Add a note to the notes panel
    AddNote { time: String, text: String },
}

/// Outcome of running a script
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScriptReport {
    /// Operations that changed something
    pub applied: usize,
    /// Operations that were valid but had nothing to do
    pub ignored: usize,
    /// Rejected operations: position in the script and reason
    pub rejected: Vec<(usize, String)>,
}

/// Parse a JSON edit script
pub fn parse_script(json: &str) -> Result<Vec<EditCommand>> {
    serde_json::from_str(json).context("Failed to parse edit script")
}

/// Apply every command in order. A rejected command is logged and skipped;
/// the rest still run.
pub fn apply_script<S: ResourceStore>(session: &mut EditorSession<S>, commands: &[EditCommand]) -> ScriptReport {
    let mut report = ScriptReport::default();

    for (position, command) in commands.iter().enumerate() {
        match apply_command(session, command) {
            Ok(true) => report.applied += 1,
            Ok(false) => {
                debug!("Operation {} had no effect: {:?}", position + 1, command);
                report.ignored += 1;
            }
            Err(reason) => {
                warn!("Operation {} rejected: {}", position + 1, reason);
                report.rejected.push((position, reason));
            }
        }
    }

    report
}

fn apply_command<S: ResourceStore>(session: &mut EditorSession<S>, command: &EditCommand) -> Result<bool, String> {
    match command {
        EditCommand::EditText { index, text } => {
            session.begin_edit(*index).map_err(|e| e.to_string())?;
            session.update_draft(text).map_err(|e| e.to_string())?;
            session.save_edit().map_err(|e| e.to_string())
        }
        EditCommand::Delete { index } => session
            .delete(*index)
            .map(|_| true)
            .map_err(|e| e.to_string()),
        EditCommand::Split { index, at, text } => {
            session.begin_split(*index).map_err(|e| e.to_string())?;
            session
                .confirm_split(at, text.as_deref())
                .map_err(|e| e.to_string())
        }
        EditCommand::FineTune { index, edge, keys } => {
            let panel_was_shown = session.fine_tune_enabled();
            if !panel_was_shown {
                session.toggle_fine_tune_panel();
            }
            let selected = session.begin_fine_tune(*index, *edge);
            if let Err(e) = selected {
                if !panel_was_shown {
                    session.toggle_fine_tune_panel();
                }
                return Err(e.to_string());
            }

            let subscription = session.subscribe_keys();
            let pressed = keys
                .iter()
                .filter(|key| session.handle_key(&subscription, **key).is_some())
                .count();
            session.unsubscribe_keys(subscription);
            if !panel_was_shown {
                session.toggle_fine_tune_panel();
            }

            Ok(pressed > 0)
        }
        EditCommand::ToggleExclude { index } => {
            session.toggle_exclude(*index);
            Ok(true)
        }
        EditCommand::AddNote { time, text } => Ok(session.notes_mut().add(text, time)),
    }
}
