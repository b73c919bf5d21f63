use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::skip_item;
use crate::config::FormatFilter;
use crate::error::{ExtractError, Result};
use crate::file_util::{
    copy_and_tag, glob_files, glob_has_match, meets_min_duration, relative_slash_path,
};
use crate::pipeline::RunContext;
use crate::recipe::{Filespec, FilespecStep};
use crate::steps::StepReport;
use crate::steps::pure::narrow_patterns;

impl FilespecStep {
    /// The single pattern this step copies, after format filtering.
    ///
    /// A pattern list is narrowed to the patterns of the requested format
    /// that match something in `install_dir`; only the first survivor is
    /// used. `None` means there is nothing to do.
    pub fn select_pattern(
        &self,
        install_dir: &Path,
        format: &FormatFilter,
    ) -> Result<Option<String>> {
        let candidates = match &self.filespec {
            Filespec::One(pattern) => return Ok(Some(pattern.clone())),
            Filespec::Many(patterns) => patterns,
        };
        if format.is_all() {
            return Ok(candidates.first().cloned());
        }
        for pattern in narrow_patterns(candidates, format) {
            if glob_has_match(install_dir, &pattern)? {
                return Ok(Some(pattern));
            }
        }
        Ok(None)
    }

    /// Output directory for `file`, mirroring its location below the strip
    /// path when one is configured.
    fn destination_dir(&self, file: &Path, ctx: &RunContext) -> PathBuf {
        let Some(strip) = self.strip_glob_path.as_deref().filter(|s| !s.is_empty()) else {
            return ctx.output_dir.clone();
        };
        let base = ctx.install_dir.join(strip);
        match file.parent().and_then(|p| p.strip_prefix(&base).ok()) {
            Some(rel) => ctx.output_dir.join(rel),
            None => {
                warn!(
                    "{} is not below strip path {}, copying to the output root",
                    file.display(),
                    strip
                );
                ctx.output_dir.clone()
            }
        }
    }

    pub fn execute(&self, ctx: &RunContext) -> Result<Option<StepReport>> {
        let Some(pattern) = self.select_pattern(&ctx.install_dir, &ctx.settings.format)? else {
            debug!("No filespec of the requested format matches, skipping");
            return Ok(None);
        };

        let mut report = StepReport::default();
        for file in glob_files(&ctx.install_dir, &pattern)? {
            let rel = relative_slash_path(&file, &ctx.install_dir)
                .unwrap_or_else(|| file.display().to_string());

            if !meets_min_duration(&file, ctx.settings.min_duration) {
                debug!("  {} is shorter than {}s, skipping", rel, ctx.settings.min_duration);
                continue;
            }

            let dest_dir = self.destination_dir(&file, ctx);
            if let Err(e) = std::fs::create_dir_all(&dest_dir) {
                skip_item(&rel, &ExtractError::io(&dest_dir, e));
                continue;
            }

            match copy_and_tag(&file, &dest_dir, &ctx.album, ctx.settings.overwrite) {
                Ok(_) => {
                    debug!("  {}", rel);
                    report.items.push(rel);
                }
                Err(e) => skip_item(&rel, &e),
            }
        }
        Ok(Some(report))
    }
}
