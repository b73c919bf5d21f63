// Compiled glob patterns (no I/O)

use glob::{MatchOptions, Pattern};

use crate::error::{ExtractError, Result};

/// How wildcards treat the `/` separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Path globbing: `*` and `?` stay inside one component, `**` spans directories.
    Path,
    /// fnmatch: `*` and `?` also match `/`.
    Name,
}

impl MatchMode {
    pub fn options(self) -> MatchOptions {
        MatchOptions {
            case_sensitive: true,
            require_literal_separator: self == MatchMode::Path,
            require_literal_leading_dot: false,
        }
    }
}

/// A compiled glob pattern.
#[derive(Debug, Clone)]
pub struct GlobPattern {
    pattern: Pattern,
    mode: MatchMode,
}

impl GlobPattern {
    pub fn new(pattern: &str, mode: MatchMode) -> Result<Self> {
        let pattern = Pattern::new(pattern).map_err(|source| ExtractError::Glob {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self { pattern, mode })
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.matches_with(text, self.mode.options())
    }

    pub fn as_str(&self) -> &str {
        self.pattern.as_str()
    }
}

/// Compile a list of fnmatch patterns.
pub fn compile_patterns(patterns: &[String]) -> Result<Vec<GlobPattern>> {
    patterns
        .iter()
        .map(|p| GlobPattern::new(p, MatchMode::Name))
        .collect()
}

/// True if `text` matches any of `patterns`.
pub fn matches_any(patterns: &[GlobPattern], text: &str) -> bool {
    patterns.iter().any(|p| p.is_match(text))
}
