// Pure step helpers - no side effects

use crate::config::FormatFilter;

/// Keep only the patterns whose extension satisfies `format`, preserving
/// their declared order. The recipe's own list is never modified.
pub fn narrow_patterns(patterns: &[String], format: &FormatFilter) -> Vec<String> {
    patterns
        .iter()
        .filter(|p| format.accepts_pattern(p))
        .cloned()
        .collect()
}

/// Last path component of a `/`-separated archive or listing entry.
pub fn entry_basename(entry: &str) -> &str {
    entry.rsplit('/').next().unwrap_or(entry)
}
