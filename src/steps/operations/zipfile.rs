use std::fs::File;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};
use zip::ZipArchive;

use super::skip_item;
use crate::error::{ExtractError, Result};
use crate::file_util::{compile_patterns, matches_any, move_and_tag, tag_file};
use crate::pipeline::RunContext;
use crate::recipe::{ZipStep, patterns_or};
use crate::steps::StepReport;
use crate::steps::pure::entry_basename;

fn zip_error(path: &Path) -> impl FnOnce(zip::result::ZipError) -> ExtractError + '_ {
    move |source| ExtractError::Zip {
        path: path.to_path_buf(),
        source,
    }
}

/// Write entry `name` below `dest` at its archive path. `None` when the
/// entry path would escape `dest`.
fn extract_entry(
    archive: &mut ZipArchive<File>,
    archive_path: &Path,
    name: &str,
    dest: &Path,
) -> Result<Option<PathBuf>> {
    let mut entry = archive.by_name(name).map_err(zip_error(archive_path))?;
    let Some(rel) = entry.enclosed_name() else {
        return Ok(None);
    };
    let extracted = dest.join(rel);
    if let Some(parent) = extracted.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ExtractError::io(parent, e))?;
    }
    let mut out = File::create(&extracted).map_err(|e| ExtractError::io(&extracted, e))?;
    std::io::copy(&mut entry, &mut out).map_err(|e| ExtractError::io(&extracted, e))?;
    Ok(Some(extracted))
}

impl ZipStep {
    /// Entry names selected by the first include pattern that matches
    /// anything, minus directories and excluded entries.
    fn select_entries<'n>(&self, names: &[&'n str]) -> Result<Vec<&'n str>> {
        let excludes = match &self.zipexcludespec {
            Some(spec) => compile_patterns(&spec.patterns())?,
            None => Vec::new(),
        };
        let candidates: Vec<&str> = names
            .iter()
            .copied()
            .filter(|n| !n.ends_with('/'))
            .filter(|n| !matches_any(&excludes, n))
            .collect();

        for include in compile_patterns(&patterns_or(&self.zipfilespec, "*"))? {
            let matched: Vec<&str> = candidates
                .iter()
                .copied()
                .filter(|n| include.is_match(n))
                .collect();
            if !matched.is_empty() {
                trace!("zipfilespec '{}' matched {} entries", include.as_str(), matched.len());
                return Ok(matched);
            }
        }
        Ok(Vec::new())
    }

    pub fn execute(&self, ctx: &RunContext) -> Result<Option<StepReport>> {
        let archive_path = ctx.install_dir.join(&self.zipfile);
        let file = File::open(&archive_path).map_err(|e| ExtractError::io(&archive_path, e))?;
        let mut archive = ZipArchive::new(file).map_err(zip_error(&archive_path))?;

        let names: Vec<String> = archive.file_names().map(str::to_string).collect();
        let name_refs: Vec<&str> = names.iter().map(String::as_str).collect();

        let mut report = StepReport::default();
        for name in self.select_entries(&name_refs)? {
            let flat = ctx.output_dir.join(entry_basename(name));
            if flat.exists() && !ctx.settings.overwrite {
                trace!("  {} already exists, skipping", flat.display());
                continue;
            }

            let extracted = extract_entry(&mut archive, &archive_path, name, &ctx.output_dir);
            let extracted = match extracted {
                Ok(Some(path)) => path,
                Ok(None) => {
                    debug!("  {}: unsafe entry path, skipping", name);
                    continue;
                }
                Err(e) => {
                    skip_item(name, &e);
                    continue;
                }
            };

            let placed = if extracted == flat {
                tag_file(&flat, &ctx.album)
            } else {
                move_and_tag(&extracted, &flat, &ctx.album, true).map(|_| ())
            };
            if let Err(e) = placed {
                skip_item(name, &e);
                continue;
            }
            debug!("  {}", name);
            report.items.push(name.to_string());
        }
        Ok(Some(report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::recipe::{Filespec, GameRecipe};
    use std::fs;
    use std::io::Write;
    use tempfile::tempdir;
    use zip::write::SimpleFileOptions;

    fn write_zip(path: &Path, entries: &[(&str, &str)]) {
        let mut writer = zip::ZipWriter::new(File::create(path).unwrap());
        for (name, body) in entries {
            if name.ends_with('/') {
                writer.add_directory(*name, SimpleFileOptions::default()).unwrap();
            } else {
                writer.start_file(*name, SimpleFileOptions::default()).unwrap();
                writer.write_all(body.as_bytes()).unwrap();
            }
        }
        writer.finish().unwrap();
    }

    fn step(include: Option<Vec<&str>>, exclude: Option<Vec<&str>>) -> ZipStep {
        let spec = |v: Vec<&str>| Filespec::Many(v.into_iter().map(String::from).collect());
        ZipStep {
            zipfile: "music.zip".into(),
            zipfilespec: include.map(spec),
            zipexcludespec: exclude.map(spec),
        }
    }

    fn recipe() -> GameRecipe {
        GameRecipe {
            name: "Game".into(),
            folders: vec!["Game".into()],
            steps: Vec::new(),
            source_dir: PathBuf::new(),
        }
    }

    #[test]
    fn first_matching_pattern_wins() {
        let s = step(Some(vec!["*.flac", "*.ogg", "*.mp3"]), None);
        let names = ["ost/", "ost/a.ogg", "ost/b.mp3", "readme.txt"];
        assert_eq!(s.select_entries(&names).unwrap(), vec!["ost/a.ogg"]);
    }

    #[test]
    fn excluded_entries_are_ignored() {
        let s = step(None, Some(vec!["*.txt", "sfx/*"]));
        let names = ["ost/a.ogg", "sfx/hit.ogg", "readme.txt"];
        assert_eq!(s.select_entries(&names).unwrap(), vec!["ost/a.ogg"]);
    }

    #[test]
    fn entries_are_flattened_into_output() {
        let install = tempdir().unwrap();
        let output = tempdir().unwrap();
        write_zip(
            &install.path().join("music.zip"),
            &[("ost/", ""), ("ost/disc1/a.ogg", "a"), ("ost/b.ogg", "b"), ("notes.txt", "n")],
        );
        fs::write(output.path().join("b.ogg"), "old").unwrap();

        let settings = Settings::default();
        let ctx = RunContext::new(
            &recipe(),
            &settings,
            install.path().to_path_buf(),
            output.path().to_path_buf(),
        );
        let report = step(Some(vec!["*.ogg"]), None).execute(&ctx).unwrap().unwrap();

        assert_eq!(report.items, vec!["ost/disc1/a.ogg".to_string()]);
        assert_eq!(fs::read_to_string(output.path().join("a.ogg")).unwrap(), "a");
        assert_eq!(fs::read_to_string(output.path().join("b.ogg")).unwrap(), "old");
        assert!(!output.path().join("notes.txt").exists());
    }

    #[test]
    fn unwritable_entry_does_not_stop_the_rest() {
        let install = tempdir().unwrap();
        let output = tempdir().unwrap();
        write_zip(
            &install.path().join("music.zip"),
            &[("a", "file"), ("a/b.ogg", "b"), ("z.ogg", "z")],
        );

        let settings = Settings::default();
        let ctx = RunContext::new(
            &recipe(),
            &settings,
            install.path().to_path_buf(),
            output.path().to_path_buf(),
        );
        let report = step(None, None).execute(&ctx).unwrap().unwrap();

        assert_eq!(report.items, vec!["a".to_string(), "z.ogg".to_string()]);
        assert_eq!(fs::read_to_string(output.path().join("z.ogg")).unwrap(), "z");
        assert!(!output.path().join("b.ogg").exists());
    }

    #[test]
    fn missing_archive_is_fatal() {
        let install = tempdir().unwrap();
        let settings = Settings::default();
        let ctx = RunContext::new(
            &recipe(),
            &settings,
            install.path().to_path_buf(),
            install.path().join("out"),
        );
        assert!(matches!(
            step(None, None).execute(&ctx),
            Err(ExtractError::Io { .. })
        ));
    }
}
