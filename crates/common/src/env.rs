//! Environment/runtime helpers
//!
//! Startup sanity check for the directory the service reports on.

use std::path::Path;

use tracing::{info, warn};

/// Log the state of the target directory at startup.
///
/// A missing or non-directory target is only a warning: the report endpoint
/// exists precisely to surface that condition at request time.
pub async fn check_target_dir(dir: &Path) -> bool {
    match tokio::fs::metadata(dir).await {
        Ok(meta) if meta.is_dir() => {
            info!(dir = %dir.display(), "target directory present");
            true
        }
        Ok(_) => {
            warn!(dir = %dir.display(), "target path exists but is not a directory");
            false
        }
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "target directory not found; write checks will fail");
            false
        }
    }
}
