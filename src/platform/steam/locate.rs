//! Steam game path resolution

use std::path::{Path, PathBuf};

/// Path of `folder` inside a library root.
fn common_dir(root: &Path, folder: &str) -> PathBuf {
    root.join("steamapps").join("common").join(folder)
}

/// Find the install directory of a game.
///
/// Roots are searched in order and, within each root, the candidate folder
/// names in declared order. Returns `None` when the game is not installed.
pub fn find_install_dir(roots: &[PathBuf], folders: &[String]) -> Option<PathBuf> {
    roots
        .iter()
        .flat_map(|root| folders.iter().map(move |folder| common_dir(root, folder)))
        .find(|candidate| candidate.is_dir())
}
