use tracing::{debug, warn};

use crate::error::Result;
use crate::file_util::{glob_files, relative_slash_path, tag_file};
use crate::pipeline::RunContext;
use crate::recipe::TagStep;
use crate::steps::StepReport;

impl TagStep {
    /// Tag files that are already in the output directory, typically ones a
    /// helper or external tool wrote without tagging.
    pub fn execute(&self, ctx: &RunContext) -> Result<Option<StepReport>> {
        let mut report = StepReport::default();
        for pattern in self.tag_filespec.patterns() {
            for file in glob_files(&ctx.output_dir, &pattern)? {
                let rel = relative_slash_path(&file, &ctx.output_dir)
                    .unwrap_or_else(|| file.display().to_string());
                match tag_file(&file, &ctx.album) {
                    Ok(()) => {
                        debug!("  tagged {}", rel);
                        report.items.push(rel);
                    }
                    Err(e) => warn!("  {}: {}", rel, e),
                }
            }
        }
        Ok(Some(report))
    }
}
