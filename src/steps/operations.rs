// Step execution - one module per step variant
// Each module adds `execute` to its step type via an impl block.

mod assets;
mod filespec;
mod filter;
mod flatten;
mod helper;
mod icoextract;
pub mod process;
mod quickbms;
mod tag;
mod xwb;
mod zipfile;

use tracing::{trace, warn};

use crate::error::ExtractError;

/// Log a failure that only affects one item; the step carries on.
fn skip_item(item: &str, err: &ExtractError) {
    match err {
        ExtractError::AlreadyExists(path) => {
            trace!("  {} already exists, skipping", path.display())
        }
        _ => warn!("  {}: {}", item, err),
    }
}
