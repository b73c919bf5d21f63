use std::io::ErrorKind;

use tracing::{debug, warn};

use crate::error::Result;
use crate::file_util::{
    compile_patterns, glob_files, matches_any, meets_min_duration, relative_slash_path,
};
use crate::pipeline::RunContext;
use crate::recipe::{FilterStep, patterns_or};
use crate::steps::StepReport;

impl FilterStep {
    /// Delete output files outside the include set, inside the exclude set,
    /// or shorter than the minimum duration.
    pub fn execute(&self, ctx: &RunContext) -> Result<Option<StepReport>> {
        let include = compile_patterns(&patterns_or(&self.filterincludespec, "*"))?;
        let exclude = match &self.filterexcludespec {
            Some(spec) => compile_patterns(&spec.patterns())?,
            None => Vec::new(),
        };

        let mut report = StepReport::default();
        for pattern in self.filterfilespec.patterns() {
            for file in glob_files(&ctx.output_dir, &pattern)? {
                let Some(rel) = relative_slash_path(&file, &ctx.output_dir) else {
                    continue;
                };
                let reason = if !matches_any(&include, &rel) {
                    "not included"
                } else if matches_any(&exclude, &rel) {
                    "excluded"
                } else if !meets_min_duration(&file, ctx.settings.min_duration) {
                    "too short"
                } else {
                    continue;
                };

                match std::fs::remove_file(&file) {
                    Ok(()) => {
                        debug!("  removed {} ({})", rel, reason);
                        report.items.push(rel);
                    }
                    Err(e) if e.kind() == ErrorKind::NotFound => {}
                    Err(e) => warn!("  could not remove {}: {}", rel, e),
                }
            }
        }
        Ok(Some(report))
    }
}
