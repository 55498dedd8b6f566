use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::TimecodeError;

// @module: Timestamp parsing and formatting shared by the parser, the exporters and the editor

// @const: Full cue timestamp, either fractional separator
static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{2,}):(\d{2}):(\d{2})[.,](\d{3})$").unwrap()
});

/// Fractional separator used when formatting a timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Separator {
    /// `.` as used by WebVTT and the editor display
    Dot,
    /// `,` as required by SRT
    Comma,
}

impl Separator {
    fn as_char(self) -> char {
        match self {
            Separator::Dot => '.',
            Separator::Comma => ',',
        }
    }
}

/// Format seconds as `HH:MM:SS{sep}mmm`, rounded to the nearest millisecond.
///
/// Negative and NaN inputs format as zero. Hours are not wrapped at 24.
pub fn format_timestamp(seconds: f64, separator: Separator) -> String {
    let ms = (seconds.max(0.0) * 1000.0).round() as u64;
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let secs = (ms % 60_000) / 1_000;
    let millis = ms % 1_000;

    format!(
        "{:02}:{:02}:{:02}{}{:03}",
        hours,
        minutes,
        secs,
        separator.as_char(),
        millis
    )
}

/// Parse a `HH:MM:SS.mmm` or `HH:MM:SS,mmm` timestamp to seconds
pub fn parse_timestamp(text: &str) -> Result<f64, TimecodeError> {
    let trimmed = text.trim();
    let caps = TIMESTAMP_REGEX
        .captures(trimmed)
        .ok_or_else(|| TimecodeError::InvalidFormat(trimmed.to_string()))?;

    let number = |idx: usize| -> Result<u64, TimecodeError> {
        let component = &caps[idx];
        component.parse().map_err(|_| TimecodeError::InvalidNumber {
            component: component.to_string(),
            input: trimmed.to_string(),
        })
    };

    let hours = number(1)?;
    let minutes = number(2)?;
    let seconds = number(3)?;
    let millis = number(4)?;

    if minutes >= 60 || seconds >= 60 {
        return Err(TimecodeError::OutOfRange(trimmed.to_string()));
    }

    Ok(hours_minutes_seconds(hours, minutes, seconds as f64 + millis as f64 / 1000.0))
}

/// Parse a clock typed by a user into seconds.
///
/// Accepts `HH:MM:SS(.fff)`, `MM:SS(.fff)` and bare seconds. The fraction may
/// use either `.` or `,`.
pub fn parse_clock(text: &str) -> Result<f64, TimecodeError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(TimecodeError::InvalidFormat(String::new()));
    }

    let parts: Vec<&str> = trimmed.split(':').collect();
    if parts.len() > 3 {
        return Err(TimecodeError::InvalidFormat(trimmed.to_string()));
    }

    let invalid_number = |component: &str| TimecodeError::InvalidNumber {
        component: component.to_string(),
        input: trimmed.to_string(),
    };

    let (last, leading) = parts
        .split_last()
        .ok_or_else(|| TimecodeError::InvalidFormat(trimmed.to_string()))?;

    let seconds_text = last.trim().replace(',', ".");
    let seconds: f64 = seconds_text
        .parse()
        .map_err(|_| invalid_number(*last))?;
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(invalid_number(*last));
    }

    let mut whole = Vec::with_capacity(leading.len());
    for component in leading {
        let value: u64 = component.trim().parse().map_err(|_| invalid_number(*component))?;
        whole.push(value);
    }

    match whole.as_slice() {
        [] => Ok(seconds),
        [minutes] => {
            if seconds >= 60.0 {
                return Err(TimecodeError::OutOfRange(trimmed.to_string()));
            }
            Ok(hours_minutes_seconds(0, *minutes, seconds))
        }
        [hours, minutes] => {
            if *minutes >= 60 || seconds >= 60.0 {
                return Err(TimecodeError::OutOfRange(trimmed.to_string()));
            }
            Ok(hours_minutes_seconds(*hours, *minutes, seconds))
        }
        _ => Err(TimecodeError::InvalidFormat(trimmed.to_string())),
    }
}

/// Combine clock components as `H*3600 + M*60 + S`
fn hours_minutes_seconds(hours: u64, minutes: u64, seconds: f64) -> f64 {
    hours as f64 * 3600.0 + minutes as f64 * 60.0 + seconds
}
