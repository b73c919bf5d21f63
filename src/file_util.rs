//! File utilities shared by every extraction step
//!
//! Duration checks, album tagging, guarded copy/move, glob expansion and
//! empty-directory pruning.

pub mod audio;
pub mod operations;
pub mod pure;

pub use audio::{meets_min_duration, tag_file};
pub use operations::{
    copy_and_tag, glob_files, glob_has_match, glob_paths, move_and_tag, move_file,
    relative_slash_path, remove_empty_ancestors, remove_empty_dir_tree,
};
pub use pure::{GlobPattern, MatchMode, compile_patterns, matches_any, sanitize_filename};
