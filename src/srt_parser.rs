use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::cue_store::Cue;
use crate::errors::TimecodeError;
use crate::timecode::parse_timestamp;

// @module: SRT text to cue sequence

// @const: One SRT block: index line, timing line, text, blank-line terminator
static SRT_BLOCK_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\d+\n(\d{2}:\d{2}:\d{2}[.,]\d{3}) --> (\d{2}:\d{2}:\d{2}[.,]\d{3})\n([\s\S]*?)\n{2,}",
    )
    .unwrap()
});

/// How the fractional separator of the end timestamp is read
///
/// Start timestamps always accept `.` and `,`.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SeparatorPolicy {
    /// End timestamps accept `.` and `,` as well
    #[default]
    Lenient,
    /// End timestamps only honour `.`; a `,` fraction is dropped, keeping whole seconds
    Legacy,
}

/// Parser for SRT subtitle text
#[derive(Debug, Clone, Copy, Default)]
pub struct SrtParser {
    separator_policy: SeparatorPolicy,
}

impl SrtParser {
    pub fn new(separator_policy: SeparatorPolicy) -> Self {
        SrtParser { separator_policy }
    }

    /// Parse SRT text into cues in file order.
    ///
    /// Blocks that do not match the expected layout are skipped. Empty or
    /// malformed input gives an empty sequence.
    pub fn parse(&self, content: &str) -> Vec<Cue> {
        // CRLF files and a missing trailing blank line are both common
        let mut normalized = content.replace("\r\n", "\n");
        normalized.push_str("\n\n");

        let cues: Vec<Cue> = SRT_BLOCK_REGEX
            .captures_iter(&normalized)
            .filter_map(|caps| {
                let start = parse_timestamp(&caps[1]);
                let end = self.end_seconds(&caps[2]);
                match (start, end) {
                    (Ok(start), Ok(end)) => Some(Cue::new(start, end, caps[3].trim())),
                    (Err(e), _) | (_, Err(e)) => {
                        debug!("Skipping SRT block: {}", e);
                        None
                    }
                }
            })
            .collect();

        let blocks = normalized
            .split("\n\n")
            .filter(|block| !block.trim().is_empty())
            .count();
        if blocks > cues.len() {
            debug!("Skipped {} SRT block(s) that did not match", blocks - cues.len());
        }

        let overlap_count = cues
            .windows(2)
            .filter(|pair| pair[0].end > pair[1].start)
            .count();
        if overlap_count > 0 {
            warn!("Found {} overlapping subtitle entries", overlap_count);
        }

        debug!("Parsed {} cues", cues.len());
        cues
    }

    /// Read the end timestamp according to the separator policy
    fn end_seconds(&self, text: &str) -> Result<f64, TimecodeError> {
        let seconds = parse_timestamp(text)?;
        if self.separator_policy == SeparatorPolicy::Legacy && text.contains(',') {
            return Ok(seconds.floor());
        }
        Ok(seconds)
    }
}

/// Parse SRT text with the default (lenient) separator handling
pub fn parse_srt(content: &str) -> Vec<Cue> {
    SrtParser::default().parse(content)
}
