//! Storage key naming
//!
//! Turns an uploaded file name into a URL-safe object key:
//!
//! ```text
//! "Crème Brûlée.JPG", width 400  →  "creme-brulee-400-17291234567891234.jpg"
//! ```
//!
//! The base name is transliterated to ASCII, lower-cased and reduced to
//! `[a-z0-9 -]`, with whitespace runs collapsed into single hyphens. Uniqueness
//! comes only from the trailing tick, which is strictly increasing within the
//! process. Distinct names may therefore collide on the slug part.

use regex::Regex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;

static LAST_TICK: AtomicU64 = AtomicU64::new(0);

static INVALID_CHARS: OnceLock<Regex> = OnceLock::new();
static WHITESPACE_RUNS: OnceLock<Regex> = OnceLock::new();

fn invalid_chars() -> &'static Regex {
    INVALID_CHARS.get_or_init(|| Regex::new(r"[^a-z0-9\s-]").expect("static regex is valid"))
}

fn whitespace_runs() -> &'static Regex {
    WHITESPACE_RUNS.get_or_init(|| Regex::new(r"\s+").expect("static regex is valid"))
}

/// Returns the next tick of the process-wide naming clock.
///
/// Ticks are 100 ns units since the Unix epoch. Two calls never return the
/// same value, even from different threads within the same clock reading.
pub fn next_tick() -> u64 {
    let now = wall_clock_ticks();
    let mut last = LAST_TICK.load(Ordering::Relaxed);
    loop {
        let next = now.max(last + 1);
        match LAST_TICK.compare_exchange_weak(last, next, Ordering::AcqRel, Ordering::Relaxed) {
            Ok(_) => return next,
            Err(actual) => last = actual,
        }
    }
}

fn wall_clock_ticks() -> u64 {
    let now = chrono::Utc::now();
    let nanos = now
        .timestamp_nanos_opt()
        .unwrap_or_else(|| now.timestamp_micros().saturating_mul(1_000));
    (nanos.max(0) / 100) as u64
}

/// Strips any client-side directory prefix (`/` or `\` separated).
///
/// Some browsers submit the full local path as the upload's file name.
pub fn file_name_only(name: &str) -> &str {
    name.rsplit(&['/', '\\'][..]).next().unwrap_or(name)
}

/// Splits a file name into its stem and extension (without the dot).
///
/// A trailing dot yields no extension.
pub fn split_extension(file_name: &str) -> (&str, Option<&str>) {
    match file_name.rfind('.') {
        Some(idx) if idx + 1 < file_name.len() => (&file_name[..idx], Some(&file_name[idx + 1..])),
        Some(idx) => (&file_name[..idx], None),
        None => (file_name, None),
    }
}

/// Converts free text into a slug made of `[a-z0-9-]`.
///
/// Characters with no ASCII approximation are dropped. The result may be empty.
pub fn slugify(text: &str) -> String {
    let ascii = deunicode::deunicode(text).to_lowercase();
    let stripped = invalid_chars().replace_all(&ascii, "");
    let collapsed = whitespace_runs().replace_all(&stripped, " ");
    collapsed.trim().replace(' ', "-")
}

fn sanitize_extension(extension: &str) -> Option<String> {
    let cleaned: String = extension
        .to_ascii_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect();
    (!cleaned.is_empty()).then_some(cleaned)
}

/// Builds a unique storage key for `original_file_name`.
///
/// A `width` greater than zero is embedded before the tick so derivatives of
/// the same upload stay recognizable. The key never comes out empty: when the
/// base name slugs away entirely only the width and tick remain.
pub fn make_key(original_file_name: &str, width: Option<u32>) -> String {
    let (stem, extension) = split_extension(file_name_only(original_file_name));

    let mut parts: Vec<String> = Vec::with_capacity(3);
    let slug = slugify(stem);
    if !slug.is_empty() {
        parts.push(slug);
    }
    if let Some(width) = width.filter(|w| *w > 0) {
        parts.push(width.to_string());
    }
    parts.push(next_tick().to_string());

    let mut key = parts.join("-");
    if let Some(extension) = extension.and_then(sanitize_extension) {
        key.push('.');
        key.push_str(&extension);
    }
    key
}
