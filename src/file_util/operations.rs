// File operations used by the extraction steps

use std::path::{Path, PathBuf};

use tracing::debug;

use super::audio::tag_file;
use super::pure::MatchMode;
use crate::error::{ExtractError, Result};

/// Resolve the final destination for `src`, refusing to clobber existing
/// files unless `overwrite` is set.
///
/// An existing directory as `dst` receives the file under its own name;
/// otherwise the parent directories of `dst` are created.
fn resolve_destination(src: &Path, dst: &Path, overwrite: bool) -> Result<PathBuf> {
    let dst = if dst.is_dir() {
        let name = src
            .file_name()
            .ok_or_else(|| ExtractError::Config(format!("{} has no file name", src.display())))?;
        dst.join(name)
    } else {
        if let Some(parent) = dst.parent()
            && !parent.is_dir()
        {
            std::fs::create_dir_all(parent).map_err(|e| ExtractError::io(parent, e))?;
        }
        dst.to_path_buf()
    };

    if !overwrite && dst.exists() {
        return Err(ExtractError::AlreadyExists(dst));
    }
    Ok(dst)
}

/// Copy `src` to `dst`, returning the path written.
pub fn copy_file(src: &Path, dst: &Path, overwrite: bool) -> Result<PathBuf> {
    let dst = resolve_destination(src, dst, overwrite)?;
    std::fs::copy(src, &dst).map_err(|e| ExtractError::io(src, e))?;
    Ok(dst)
}

/// Move `src` to `dst`, returning the path written.
///
/// Falls back to copy + delete when a rename is not possible (different
/// filesystems).
pub fn move_file(src: &Path, dst: &Path, overwrite: bool) -> Result<PathBuf> {
    let dst = resolve_destination(src, dst, overwrite)?;
    if std::fs::rename(src, &dst).is_err() {
        std::fs::copy(src, &dst).map_err(|e| ExtractError::io(src, e))?;
        std::fs::remove_file(src).map_err(|e| ExtractError::io(src, e))?;
    }
    Ok(dst)
}

pub fn copy_and_tag(src: &Path, dst: &Path, album: &str, overwrite: bool) -> Result<PathBuf> {
    let dst = copy_file(src, dst, overwrite)?;
    tag_file(&dst, album)?;
    Ok(dst)
}

pub fn move_and_tag(src: &Path, dst: &Path, album: &str, overwrite: bool) -> Result<PathBuf> {
    let dst = move_file(src, dst, overwrite)?;
    tag_file(&dst, album)?;
    Ok(dst)
}

/// Remove every empty directory below `path`, bottom-up, then `path` itself
/// if it ended up empty. Failures (not empty, already gone) are ignored.
pub fn remove_empty_dir_tree(path: &Path) {
    if let Ok(entries) = std::fs::read_dir(path) {
        for entry in entries.flatten() {
            if entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
                remove_empty_dir_tree(&entry.path());
            }
        }
    }
    if std::fs::remove_dir(path).is_ok() {
        debug!("Removed empty directory {}", path.display());
    }
}

/// Remove `dir` and then each of its ancestors while they are empty, never
/// touching `root` or anything outside it.
pub fn remove_empty_ancestors(dir: &Path, root: &Path) {
    let mut current = dir.to_path_buf();
    while current.starts_with(root) && current != root {
        if std::fs::remove_dir(&current).is_err() && current.exists() {
            break;
        }
        match current.parent() {
            Some(parent) => current = parent.to_path_buf(),
            None => break,
        }
    }
}

/// Path of `path` relative to `root` with `/` separators.
pub fn relative_slash_path(path: &Path, root: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    Some(
        rel.components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/"),
    )
}

/// Expand `pattern` (relative to `root`) into the matching files and
/// directories, sorted by path.
pub fn glob_paths(root: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let relative = pattern.trim_start_matches("./").trim_start_matches('/');
    let full = format!("{}/{}", glob::Pattern::escape(&root.to_string_lossy()), relative);
    let paths = glob::glob_with(&full, MatchMode::Path.options()).map_err(|source| {
        ExtractError::Glob {
            pattern: pattern.to_string(),
            source,
        }
    })?;

    let mut out = Vec::new();
    for entry in paths {
        match entry {
            Ok(path) if path != root => out.push(path),
            Ok(_) => {}
            Err(e) => debug!("Skipping unreadable path {}: {}", e.path().display(), e.error()),
        }
    }
    out.sort();
    Ok(out)
}

/// Like [`glob_paths`] but keeps regular files only.
pub fn glob_files(root: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    Ok(glob_paths(root, pattern)?
        .into_iter()
        .filter(|p| p.is_file())
        .collect())
}

/// Whether `pattern` matches at least one path below `root`.
pub fn glob_has_match(root: &Path, pattern: &str) -> Result<bool> {
    Ok(!glob_paths(root, pattern)?.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"data").unwrap();
    }

    #[test]
    fn copy_into_existing_directory_keeps_basename() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("in/theme.bin");
        touch(&src);
        let out = dir.path().join("out");
        fs::create_dir(&out).unwrap();

        let dst = copy_file(&src, &out, false).unwrap();
        assert_eq!(dst, out.join("theme.bin"));
        assert!(dst.is_file());
        assert!(src.is_file());
    }

    #[test]
    fn copy_creates_missing_parents() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("theme.bin");
        touch(&src);
        let dst = dir.path().join("a/b/renamed.bin");

        assert_eq!(copy_file(&src, &dst, false).unwrap(), dst);
        assert!(dst.is_file());
    }

    #[test]
    fn existing_destination_is_a_distinct_error() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("theme.bin");
        let dst = dir.path().join("out/theme.bin");
        touch(&src);
        touch(&dst);

        let err = copy_file(&src, &dst, false).unwrap_err();
        assert!(matches!(err, ExtractError::AlreadyExists(p) if p == dst));

        fs::write(&src, b"new").unwrap();
        copy_file(&src, &dst, true).unwrap();
        assert_eq!(fs::read(&dst).unwrap(), b"new");
    }

    #[test]
    fn move_removes_source() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("a/track.bin");
        touch(&src);
        let dst = move_file(&src, &dir.path().join("track.bin"), false).unwrap();
        assert!(dst.is_file());
        assert!(!src.exists());
    }

    #[test]
    fn prune_removes_only_empty_subtrees() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("game");
        fs::create_dir_all(root.join("a/b/c")).unwrap();
        fs::create_dir_all(root.join("x/y")).unwrap();
        touch(&root.join("x/keep.bin"));

        remove_empty_dir_tree(&root);

        assert!(!root.join("a").exists());
        assert!(!root.join("x/y").exists());
        assert!(root.join("x/keep.bin").is_file());
    }

    #[test]
    fn prune_removes_root_when_nothing_is_left() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("game");
        fs::create_dir_all(root.join("a/b")).unwrap();
        remove_empty_dir_tree(&root);
        assert!(!root.exists());
    }

    #[test]
    fn ancestors_stop_at_root_and_non_empty_dirs() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("game");
        fs::create_dir_all(root.join("a/b/c")).unwrap();
        touch(&root.join("a/keep.bin"));

        remove_empty_ancestors(&root.join("a/b/c"), &root);

        assert!(!root.join("a/b").exists());
        assert!(root.join("a").is_dir());
        assert!(root.is_dir());
    }

    #[test]
    fn glob_lists_sorted_matches() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("music/b.ogg"));
        touch(&root.join("music/a.ogg"));
        touch(&root.join("music/sub/c.ogg"));
        touch(&root.join("music/readme.txt"));

        let found = glob_files(root, "music/*.ogg").unwrap();
        assert_eq!(found, vec![root.join("music/a.ogg"), root.join("music/b.ogg")]);

        let deep = glob_files(root, "**/*.ogg").unwrap();
        assert_eq!(deep.len(), 3);
    }

    #[test]
    fn glob_on_missing_base_is_empty() {
        let dir = tempdir().unwrap();
        assert!(glob_paths(dir.path(), "nothing/*.ogg").unwrap().is_empty());
        assert!(!glob_has_match(dir.path(), "nothing/*.ogg").unwrap());
    }

    #[test]
    fn literal_glob_returns_existing_path() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("data/music.zip"));
        assert_eq!(
            glob_paths(dir.path(), "data/music.zip").unwrap(),
            vec![dir.path().join("data/music.zip")]
        );
        assert!(glob_paths(dir.path(), "data/other.zip").unwrap().is_empty());
    }

    #[test]
    fn root_with_glob_characters_is_taken_literally() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("Game [Deluxe] (v1.0)");
        touch(&root.join("music/a.ogg"));
        assert_eq!(glob_files(&root, "music/*.ogg").unwrap(), vec![root.join("music/a.ogg")]);
    }

    #[test]
    fn malformed_pattern_is_a_glob_error() {
        let dir = tempdir().unwrap();
        let err = glob_paths(dir.path(), "music/[a.ogg").unwrap_err();
        assert!(matches!(err, ExtractError::Glob { .. }));
    }
}
