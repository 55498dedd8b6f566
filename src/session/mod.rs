/*!
 * Editing session for one loaded subtitle file.
 *
 * This module provides:
 * - The editing mode state machine (idle, editing, splitting, fine-tuning)
 * - Keyboard subscription tokens scoped to the session's lifetime
 * - Caption track regeneration after every change to the cue sequence
 */

pub mod manager;
pub mod models;

// Re-export main types
pub use manager::EditorSession;
pub use models::{ArrowKey, EditMode, KeySubscription};
