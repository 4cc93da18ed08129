//! Reading time estimation

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}

/// Default reading speed
pub const WORDS_PER_MINUTE: usize = 200;

/// Count the pieces produced by splitting `text` on runs of whitespace
///
/// Leading and trailing whitespace yield an empty piece each, and the empty
/// string is a single (empty) piece, so the count is never zero.
pub fn word_count(text: &str) -> usize {
    WHITESPACE_RUN.split(text).count()
}

/// Estimated minutes to read `text`: `ceil(words / words_per_minute)`
pub fn reading_minutes(text: &str, words_per_minute: usize) -> usize {
    word_count(text).div_ceil(words_per_minute.max(1))
}

/// Badge label, e.g. `"2 MIN READ"`
pub fn reading_time_label(text: &str, words_per_minute: usize) -> String {
    format!("{} MIN READ", reading_minutes(text, words_per_minute))
}
