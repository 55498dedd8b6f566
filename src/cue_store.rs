use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::errors::EditError;
use crate::timecode::{format_timestamp, Separator};

// @module: Authoritative in-memory cue sequence and its edit operations

// @struct: Single timed subtitle cue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cue {
    // @field: Start time in seconds
    pub start: f64,

    // @field: End time in seconds
    pub end: f64,

    // @field: Cue text, may be empty
    pub text: String,
}

impl Cue {
    /// Create a new cue
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Cue {
            start,
            end,
            text: text.into(),
        }
    }

    /// Length of the cue in seconds
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Whether `time` falls inside the cue, both bounds inclusive
    pub fn contains(&self, time: f64) -> bool {
        time >= self.start && time <= self.end
    }

    /// Start time formatted for display (`HH:MM:SS.mmm`)
    pub fn format_start_time(&self) -> String {
        format_timestamp(self.start, Separator::Dot)
    }

    /// End time formatted for display (`HH:MM:SS.mmm`)
    pub fn format_end_time(&self) -> String {
        format_timestamp(self.end, Separator::Dot)
    }
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} --> {}: {}",
            self.format_start_time(),
            self.format_end_time(),
            self.text
        )
    }
}

/// Which boundary of a cue a fine-tune adjusts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    Start,
    End,
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Edge::Start => write!(f, "start"),
            Edge::End => write!(f, "end"),
        }
    }
}

impl FromStr for Edge {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "start" => Ok(Self::Start),
            "end" => Ok(Self::End),
            _ => Err(anyhow!("Invalid cue edge: {}", s)),
        }
    }
}

/// How exclusion indices follow structural edits (delete and split)
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExclusionPolicy {
    /// Shift indices so each exclusion stays on the cue it was set on
    #[default]
    Remap,
    /// Leave indices untouched; they may then point at a different cue
    Retain,
}

/// What a fine-tune checks after adjusting the immediate neighbour
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryPolicy {
    /// Only the neighbour on the edited side is touched
    #[default]
    Adjacent,
    /// Same neighbour rule, then the whole sequence is scanned for overlaps
    Revalidate,
}

/// Pair of consecutive cues whose time ranges overlap
#[derive(Debug, Clone, PartialEq)]
pub struct Overlap {
    /// Index of the earlier cue
    pub first: usize,
    /// Index of the following cue
    pub second: usize,
    /// Overlap in seconds
    pub amount: f64,
}

/// Effect of a fine-tune on the neighbouring cue
#[derive(Debug, Clone, PartialEq)]
pub enum NeighborAdjustment {
    /// No neighbour on that side, or its boundary already matched
    Unchanged,
    /// The neighbour's boundary was moved to stay contiguous
    Adjusted { index: usize, value: f64 },
    /// The neighbour was left alone because the edit crossed it
    Rejected { index: usize },
}

/// Result of a fine-tune step
#[derive(Debug, Clone, PartialEq)]
pub struct FineTuneOutcome {
    /// Edited cue index
    pub index: usize,
    /// Edited boundary
    pub edge: Edge,
    /// Start of the edited cue after the step
    pub start: f64,
    /// End of the edited cue after the step
    pub end: f64,
    /// What happened to the neighbour
    pub neighbor: NeighborAdjustment,
    /// Overlaps left in the sequence, only filled under `BoundaryPolicy::Revalidate`
    pub overlaps: Vec<Overlap>,
}

/// Ordered cue sequence together with the set of cues excluded from export
#[derive(Debug, Clone, Default)]
pub struct CueStore {
    cues: Vec<Cue>,
    exclusions: BTreeSet<usize>,
    exclusion_policy: ExclusionPolicy,
    boundary_policy: BoundaryPolicy,
}

impl CueStore {
    /// Create an empty store with default policies
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store with explicit policies
    pub fn with_policies(exclusion_policy: ExclusionPolicy, boundary_policy: BoundaryPolicy) -> Self {
        CueStore {
            cues: Vec::new(),
            exclusions: BTreeSet::new(),
            exclusion_policy,
            boundary_policy,
        }
    }

    /// Replace the whole sequence at once, dropping all exclusions
    pub fn replace_all(&mut self, cues: Vec<Cue>) {
        debug!("Replacing cue sequence: {} -> {} cues", self.cues.len(), cues.len());
        self.cues = cues;
        self.exclusions.clear();
    }

    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    pub fn get(&self, index: usize) -> Option<&Cue> {
        self.cues.get(index)
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    fn check_index(&self, index: usize) -> Result<(), EditError> {
        if index < self.cues.len() {
            Ok(())
        } else {
            Err(EditError::IndexOutOfRange {
                index,
                len: self.cues.len(),
            })
        }
    }

    /// Replace the text of a cue.
    ///
    /// Returns `Ok(false)` without touching the cue when the trimmed text is empty.
    pub fn edit_text(&mut self, index: usize, new_text: &str) -> Result<bool, EditError> {
        self.check_index(index)?;

        let trimmed = new_text.trim();
        if trimmed.is_empty() {
            debug!("Ignoring empty text for cue {}", index);
            return Ok(false);
        }

        self.cues[index].text = trimmed.to_string();
        Ok(true)
    }

    /// Remove a cue; later cues move down by one
    pub fn delete(&mut self, index: usize) -> Result<Cue, EditError> {
        self.check_index(index)?;

        let removed = self.cues.remove(index);
        if self.exclusion_policy == ExclusionPolicy::Remap {
            self.exclusions = self
                .exclusions
                .iter()
                .filter(|&&i| i != index)
                .map(|&i| if i > index { i - 1 } else { i })
                .collect();
        }

        debug!("Deleted cue {} ({})", index, removed);
        Ok(removed)
    }

    /// Split a cue at `at` seconds.
    ///
    /// The original cue keeps its text and ends at `at`; a new cue from `at`
    /// to the old end carrying `tail_text` is inserted right after it. An
    /// excluded cue passes its exclusion on to the new tail under
    /// `ExclusionPolicy::Remap`.
    pub fn split(&mut self, index: usize, at: f64, tail_text: impl Into<String>) -> Result<(), EditError> {
        self.check_index(index)?;

        let cue = &self.cues[index];
        if !(at > cue.start && at < cue.end) {
            return Err(EditError::SplitOutOfRange {
                at,
                start: cue.start,
                end: cue.end,
            });
        }

        let tail = Cue::new(at, cue.end, tail_text);
        self.cues[index].end = at;
        self.cues.insert(index + 1, tail);

        if self.exclusion_policy == ExclusionPolicy::Remap {
            let was_excluded = self.exclusions.contains(&index);
            let mut shifted: BTreeSet<usize> = self
                .exclusions
                .iter()
                .map(|&i| if i > index { i + 1 } else { i })
                .collect();
            if was_excluded {
                shifted.insert(index + 1);
            }
            self.exclusions = shifted;
        }

        debug!("Split cue {} at {:.3}s", index, at);
        Ok(())
    }

    /// Move one boundary of a cue by `delta` seconds.
    ///
    /// The edited cue is clamped to `0 <= start <= end`. Afterwards only the
    /// neighbour on the edited side is made contiguous: for `Edge::Start` the
    /// previous cue's end follows the new start if that start is still after
    /// the previous cue's start; for `Edge::End` the next cue's start follows
    /// the new end if that end is still before the next cue's end. A crossing
    /// edit leaves the neighbour untouched and is logged.
    pub fn fine_tune(&mut self, index: usize, edge: Edge, delta: f64) -> Result<FineTuneOutcome, EditError> {
        self.check_index(index)?;

        let delta = if delta.is_finite() { delta } else { 0.0 };
        let cue = &mut self.cues[index];
        match edge {
            Edge::Start => cue.start = (cue.start + delta).max(0.0).min(cue.end),
            Edge::End => cue.end = (cue.end + delta).max(cue.start),
        }
        let (start, end) = (cue.start, cue.end);

        let neighbor = match edge {
            Edge::Start if index > 0 => {
                let prev_index = index - 1;
                let prev = &mut self.cues[prev_index];
                if start > prev.start {
                    prev.end = start;
                    NeighborAdjustment::Adjusted { index: prev_index, value: start }
                } else if start < prev.start {
                    warn!(
                        "Start of cue {} is before the start of cue {}; adjust the previous cue first",
                        index + 1,
                        prev_index + 1
                    );
                    NeighborAdjustment::Rejected { index: prev_index }
                } else {
                    NeighborAdjustment::Unchanged
                }
            }
            Edge::End if index + 1 < self.cues.len() => {
                let next_index = index + 1;
                let next = &mut self.cues[next_index];
                if end < next.end {
                    next.start = end;
                    NeighborAdjustment::Adjusted { index: next_index, value: end }
                } else if end > next.end {
                    warn!(
                        "End of cue {} is past the end of cue {}; adjust the next cue first",
                        index + 1,
                        next_index + 1
                    );
                    NeighborAdjustment::Rejected { index: next_index }
                } else {
                    NeighborAdjustment::Unchanged
                }
            }
            _ => NeighborAdjustment::Unchanged,
        };

        let overlaps = match self.boundary_policy {
            BoundaryPolicy::Adjacent => Vec::new(),
            BoundaryPolicy::Revalidate => {
                let found = self.overlaps();
                if !found.is_empty() {
                    warn!("{} overlapping cue pair(s) remain after fine-tune", found.len());
                }
                found
            }
        };

        Ok(FineTuneOutcome {
            index,
            edge,
            start,
            end,
            neighbor,
            overlaps,
        })
    }

    /// Toggle export exclusion for an index. Returns whether it is now excluded.
    ///
    /// The index is not checked against the sequence length.
    pub fn toggle_exclude(&mut self, index: usize) -> bool {
        if self.exclusions.remove(&index) {
            false
        } else {
            self.exclusions.insert(index);
            true
        }
    }

    pub fn is_excluded(&self, index: usize) -> bool {
        self.exclusions.contains(&index)
    }

    pub fn exclusions(&self) -> &BTreeSet<usize> {
        &self.exclusions
    }

    pub fn clear_exclusions(&mut self) {
        self.exclusions.clear();
    }

    /// Cues that take part in export, in order
    pub fn included_cues(&self) -> impl Iterator<Item = &Cue> {
        self.cues
            .iter()
            .enumerate()
            .filter(|(i, _)| !self.exclusions.contains(i))
            .map(|(_, cue)| cue)
    }

    /// Consecutive cue pairs where the earlier one ends after the next one starts
    pub fn overlaps(&self) -> Vec<Overlap> {
        self.cues
            .windows(2)
            .enumerate()
            .filter(|(_, pair)| pair[0].end > pair[1].start)
            .map(|(i, pair)| Overlap {
                first: i,
                second: i + 1,
                amount: pair[0].end - pair[1].start,
            })
            .collect()
    }
}
