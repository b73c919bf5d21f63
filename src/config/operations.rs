// Building the run settings from command-line arguments

use std::path::PathBuf;

use tracing::debug;

use super::types::{FormatFilter, Settings};
use crate::args::Args;
use crate::error::{ExtractError, Result};
use crate::platform::steam::discover_library_roots;

pub fn build_settings(args: &Args) -> Result<Settings> {
    let output_path = args
        .output_path
        .clone()
        .ok_or_else(|| ExtractError::Config("--outputpath is required".to_string()))?;
    if !output_path.is_dir() {
        return Err(ExtractError::Config(format!(
            "outputpath {} is not a directory",
            output_path.display()
        )));
    }

    let library_roots = library_roots(args.steam_library_path.as_ref())?;
    debug!("Steam library folders: {:?}", library_roots);

    Ok(Settings {
        output_path,
        library_roots,
        album_suffix: args.album_suffix.clone(),
        format: FormatFilter::parse(&args.format),
        overwrite: args.overwrite,
        rescan: args.rescan,
        min_duration: args.min_duration,
    })
}

/// An explicit library path wins; otherwise ask the local Steam installation.
fn library_roots(explicit: Option<&PathBuf>) -> Result<Vec<PathBuf>> {
    if let Some(path) = explicit {
        if !path.is_dir() {
            return Err(ExtractError::Config(format!(
                "steamlibrarypath {} is not a directory",
                path.display()
            )));
        }
        return Ok(vec![path.clone()]);
    }

    let roots = discover_library_roots()?;
    if roots.is_empty() {
        return Err(ExtractError::Steam(
            "no Steam library directory found, use --steamlibrarypath instead".to_string(),
        ));
    }
    Ok(roots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::tempdir;

    #[test]
    fn settings_follow_arguments() {
        let out = tempdir().unwrap();
        let lib = tempdir().unwrap();
        let args = Args::parse_from([
            "vgmx",
            "-o",
            out.path().to_str().unwrap(),
            "--steamlibrarypath",
            lib.path().to_str().unwrap(),
            "--format",
            "mp3",
            "--overwrite",
            "--minduration",
            "10",
            "-a",
            "",
        ]);
        let settings = build_settings(&args).unwrap();
        assert_eq!(settings.output_path, out.path());
        assert_eq!(settings.library_roots, vec![lib.path().to_path_buf()]);
        assert_eq!(settings.format, FormatFilter::Extension("mp3".into()));
        assert!(settings.overwrite);
        assert!(!settings.rescan);
        assert_eq!(settings.min_duration, 10);
        assert_eq!(settings.album_suffix, "");
    }

    #[test]
    fn output_path_must_be_a_directory() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("file");
        std::fs::write(&file, "").unwrap();
        let args = Args::parse_from([
            "vgmx",
            "-o",
            file.to_str().unwrap(),
            "--steamlibrarypath",
            dir.path().to_str().unwrap(),
        ]);
        let err = build_settings(&args).unwrap_err();
        assert!(err.to_string().contains("is not a directory"));
    }

    #[test]
    fn library_path_must_be_a_directory() {
        let dir = tempdir().unwrap();
        let args = Args::parse_from([
            "vgmx",
            "-o",
            dir.path().to_str().unwrap(),
            "--steamlibrarypath",
            dir.path().join("missing").to_str().unwrap(),
        ]);
        assert!(build_settings(&args).is_err());
    }
}
