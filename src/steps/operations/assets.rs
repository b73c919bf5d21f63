use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info, trace, warn};
use walkdir::WalkDir;

use super::process::{find_tool, run_captured};
use super::skip_item;
use crate::error::{ExtractError, Result};
use crate::file_util::{
    GlobPattern, compile_patterns, glob_files, matches_any, meets_min_duration, move_and_tag,
    relative_slash_path,
};
use crate::pipeline::RunContext;
use crate::recipe::{AssetsStep, patterns_or};
use crate::steps::StepReport;

const STAGING_DIR: &str = "ExportedProject-staging";

/// Include and exclude patterns for exported objects, matched against the
/// path relative to the exported `Assets` directory.
struct ObjectFilter {
    include: Vec<GlobPattern>,
    exclude: Vec<GlobPattern>,
}

impl ObjectFilter {
    fn new(step: &AssetsStep) -> Result<Self> {
        Ok(Self {
            include: compile_patterns(&patterns_or(&step.assetsfilespec, "*"))?,
            exclude: match &step.assetsexcludespec {
                Some(spec) => compile_patterns(&spec.patterns())?,
                None => Vec::new(),
            },
        })
    }

    fn accepts(&self, rel: &str) -> bool {
        !matches_any(&self.exclude, rel) && matches_any(&self.include, rel)
    }
}

/// Exported object files below `assets`, sorted.
fn exported_objects(assets: &Path) -> Result<Vec<PathBuf>> {
    if !assets.is_dir() {
        return Ok(Vec::new());
    }
    let mut objects = Vec::new();
    for entry in WalkDir::new(assets).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() {
            objects.push(entry.into_path());
        }
    }
    Ok(objects)
}

fn remove_staging(staging: &Path) {
    if let Err(e) = std::fs::remove_dir_all(staging)
        && e.kind() != std::io::ErrorKind::NotFound
    {
        warn!("Could not remove {}: {}", staging.display(), e);
    }
}

impl AssetsStep {
    /// Move the accepted objects of one export from `assets` into the output
    /// directory, returning their relative paths.
    fn collect_objects(&self, assets: &Path, ctx: &RunContext) -> Result<Vec<String>> {
        let filter = ObjectFilter::new(self)?;
        let mut moved = Vec::new();
        for object in exported_objects(assets)? {
            let Some(rel) = relative_slash_path(&object, assets) else {
                continue;
            };
            if !filter.accepts(&rel) {
                trace!("  {} filtered out", rel);
                continue;
            }
            if !meets_min_duration(&object, ctx.settings.min_duration) {
                debug!("  {} is shorter than {}s, skipping", rel, ctx.settings.min_duration);
                continue;
            }
            let dest = ctx.output_dir.join(&rel);
            match move_and_tag(&object, &dest, &ctx.album, ctx.settings.overwrite) {
                Ok(_) => {
                    debug!("  {}", rel);
                    moved.push(rel);
                }
                Err(e) => skip_item(&rel, &e),
            }
        }
        Ok(moved)
    }

    pub fn execute(&self, ctx: &RunContext) -> Result<Option<StepReport>> {
        let Some(ripper) = find_tool("AssetRipper") else {
            info!("AssetRipper is not installed, skipping");
            return Ok(None);
        };

        let mut containers = Vec::new();
        for pattern in self.assetsfile.patterns() {
            containers.extend(glob_files(&ctx.install_dir, &pattern)?);
        }
        if containers.is_empty() {
            warn!("No asset files match {:?}", self.assetsfile.patterns());
            return Ok(None);
        }

        let staging = ctx.output_dir.join(STAGING_DIR);
        let mut report = StepReport::default();
        for container in containers {
            remove_staging(&staging);
            std::fs::create_dir_all(&staging).map_err(|e| ExtractError::io(&staging, e))?;

            let mut cmd = Command::new(&ripper);
            cmd.arg("-q")
                .arg("-o")
                .arg(&staging)
                .arg("--logFile")
                .arg(staging.join("AssetRipper.log"))
                .arg(&container);
            let output = run_captured(&mut cmd)?;
            report.absorb(&output);

            let assets = staging.join("ExportedProject").join("Assets");
            let collected = match exported_objects(&assets) {
                Ok(objects) if objects.is_empty() => {
                    Err(ExtractError::NoAssetsExtracted(container))
                }
                Ok(_) => self.collect_objects(&assets, ctx),
                Err(e) => Err(e),
            };
            remove_staging(&staging);
            report.items.extend(collected?);
        }
        Ok(Some(report))
    }
}
