// Pure helpers for file handling - no side effects

pub mod pattern;
pub mod sanitize;

pub use pattern::{GlobPattern, MatchMode, compile_patterns, matches_any};
pub use sanitize::sanitize_filename;
