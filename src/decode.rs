//! Decoder for question banks shared as (optionally armored) Base64 text.

use crate::bank::parse_question_bank;
use crate::error::{ExamError, Result};
use crate::export::write_question_bank;
use crate::models::QuestionBank;
use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use regex::Regex;
use std::path::{Path, PathBuf};

lazy_static::lazy_static! {
    static ref ARMOR_BEGIN: Regex = Regex::new(r"(?i)-----BEGIN.*?-----").expect("valid regex");
    static ref ARMOR_END: Regex = Regex::new(r"(?i)-----END.*?-----").expect("valid regex");
    static ref WHITESPACE: Regex = Regex::new(r"\s+").expect("valid regex");
    static ref CONTROL_CHARS: Regex =
        Regex::new(r"[\x00-\x08\x0B\x0C\x0E-\x1F]").expect("valid regex");
}

/// Standard alphabet, padding optional, stray trailing bits ignored.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

pub fn strip_armor(input: &str) -> String {
    let without_begin = ARMOR_BEGIN.replace_all(input, "");
    let without_end = ARMOR_END.replace_all(&without_begin, "");
    WHITESPACE.replace_all(&without_end, "").into_owned()
}

/// Removes control characters except tab, line feed and carriage return.
pub fn strip_control_chars(text: &str) -> String {
    CONTROL_CHARS.replace_all(text, "").into_owned()
}

/// Returns the cleaned JSON text together with the bank it parses to.
pub fn decode_bundle(input: &str) -> Result<(String, QuestionBank)> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ExamError::EmptyBundle);
    }

    let clean = strip_armor(trimmed);
    let bytes = LENIENT.decode(clean.as_bytes())?;
    let decoded = String::from_utf8_lossy(&bytes);
    let text = strip_control_chars(decoded.trim_start_matches('\u{feff}'));

    let bank = parse_question_bank(&text).map_err(|e| ExamError::InvalidBundle(e.to_string()))?;
    Ok((text, bank))
}

/// Decodes and writes the result under `dir` without replacing an existing bank.
pub fn decode_to_file(input: &str, dir: &Path) -> Result<PathBuf> {
    let (text, bank) = decode_bundle(input)?;
    let path = write_question_bank(&text, dir)?;
    crate::logger::log(&format!(
        "Decoded bundle with {} questions to {}",
        bank.questions.len(),
        path.display()
    ));
    Ok(path)
}
