use std::path::{Path, PathBuf};

/// Which file extension the filespec step should prefer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormatFilter {
    #[default]
    All,
    Extension(String),
}

impl FormatFilter {
    /// `*` (or nothing) means every format; otherwise an extension with or
    /// without its leading dot.
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim().trim_start_matches('.');
        if trimmed.is_empty() || trimmed == "*" {
            FormatFilter::All
        } else {
            FormatFilter::Extension(trimmed.to_lowercase())
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, FormatFilter::All)
    }

    /// Whether the extension of a glob pattern matches this filter
    /// (case-insensitive).
    pub fn accepts_pattern(&self, pattern: &str) -> bool {
        match self {
            FormatFilter::All => true,
            FormatFilter::Extension(ext) => Path::new(pattern)
                .extension()
                .is_some_and(|e| e.to_string_lossy().to_lowercase() == *ext),
        }
    }
}

/// Global, read-only settings for one invocation.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Parent of the per-game output directories.
    pub output_path: PathBuf,
    /// Steam library folders (each containing `steamapps/`), in search order.
    pub library_roots: Vec<PathBuf>,
    /// Appended to the game name in the album tag.
    pub album_suffix: String,
    pub format: FormatFilter,
    pub overwrite: bool,
    /// Re-run games whose output directory already exists.
    pub rescan: bool,
    /// Minimum duration in seconds of recognized audio to keep.
    pub min_duration: u32,
}

impl Settings {
    pub fn album_for(&self, game_name: &str) -> String {
        format!("{}{}", game_name, self.album_suffix)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_path: PathBuf::new(),
            library_roots: Vec::new(),
            album_suffix: " [VGMX]".to_string(),
            format: FormatFilter::All,
            overwrite: false,
            rescan: false,
            min_duration: 30,
        }
    }
}
