use std::cmp::Reverse;
use std::path::PathBuf;

use tracing::debug;

use super::skip_item;
use crate::error::Result;
use crate::file_util::{glob_paths, move_file, relative_slash_path, remove_empty_ancestors};
use crate::pipeline::RunContext;
use crate::recipe::FlattenStep;
use crate::steps::StepReport;

impl FlattenStep {
    /// Move matching output files to the output root and drop the
    /// directories they leave empty.
    pub fn execute(&self, ctx: &RunContext) -> Result<Option<StepReport>> {
        let root = &ctx.output_dir;
        let mut report = StepReport::default();
        let mut emptied: Vec<PathBuf> = Vec::new();

        for pattern in self.flattenfilespec.patterns() {
            for path in glob_paths(root, &pattern)? {
                if path.is_dir() {
                    emptied.push(path);
                    continue;
                }
                let Some(parent) = path.parent() else {
                    continue;
                };
                if parent == root.as_path() {
                    continue;
                }
                let rel = relative_slash_path(&path, root)
                    .unwrap_or_else(|| path.display().to_string());
                emptied.push(parent.to_path_buf());
                match move_file(&path, root, ctx.settings.overwrite) {
                    Ok(_) => {
                        debug!("  {}", rel);
                        report.items.push(rel);
                    }
                    Err(e) => skip_item(&rel, &e),
                }
            }
        }

        emptied.sort_by(|a, b| {
            Reverse(a.components().count())
                .cmp(&Reverse(b.components().count()))
                .then_with(|| a.cmp(b))
        });
        emptied.dedup();
        for dir in &emptied {
            remove_empty_ancestors(dir, root);
        }
        Ok(Some(report))
    }
}
