use anyhow::{Result, anyhow};
use isolang::Language;

// @module: Language utilities for caption track languages
//
// A caption track's language is an ISO 639-1 code where one exists and the
// ISO 639-2/T code otherwise. These helpers validate user-supplied codes and
// derive display labels.

/// Map ISO 639-2/B codes to their ISO 639-2/T counterparts
fn bibliographic_to_terminology(code: &str) -> Option<&'static str> {
    let mapped = match code {
        "fre" => "fra",
        "ger" => "deu",
        "dut" => "nld",
        "gre" => "ell",
        "chi" => "zho",
        "cze" => "ces",
        "ice" => "isl",
        "alb" => "sqi",
        "arm" => "hye",
        "baq" => "eus",
        "bur" => "mya",
        "per" => "fas",
        "geo" => "kat",
        "may" => "msa",
        "mac" => "mkd",
        "rum" => "ron",
        "slo" => "slk",
        "wel" => "cym",
        _ => return None,
    };
    Some(mapped)
}

/// Resolve a 2- or 3-letter code to an isolang language
fn lookup(code: &str) -> Result<Language> {
    let normalized_code = code.trim().to_lowercase();

    let language = match normalized_code.len() {
        2 => Language::from_639_1(&normalized_code),
        3 => {
            let part2t = bibliographic_to_terminology(&normalized_code).unwrap_or(normalized_code.as_str());
            Language::from_639_3(part2t)
        }
        _ => None,
    };

    language.ok_or_else(|| anyhow!("Invalid language code: {}", code))
}

/// Validate that a code is a known ISO 639-1 or ISO 639-2 code
pub fn validate_language_code(code: &str) -> Result<()> {
    lookup(code).map(|_| ())
}

/// Normalize a code to the form used as a caption track language:
/// ISO 639-1 if the language has one, ISO 639-2/T otherwise
pub fn normalize_track_language(code: &str) -> Result<String> {
    let language = lookup(code)?;
    Ok(language
        .to_639_1()
        .map(str::to_string)
        .unwrap_or_else(|| language.to_639_3().to_string()))
}

/// Get the English language name for a code, used as the default track label
pub fn get_language_name(code: &str) -> Result<String> {
    Ok(lookup(code)?.to_name().to_string())
}
