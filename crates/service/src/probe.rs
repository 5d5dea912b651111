//! Individual directory checks and the write probe.
//!
//! Every function here answers with a value; none of them fail the caller.

use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::{DateTime, SecondsFormat, Utc};

use crate::errors::ProbeError;
use crate::report::WriteOutcome;

/// Whether `path` exists and is a directory (symlinks followed).
pub fn is_dir(path: &Path) -> bool {
    fs::metadata(path).map(|m| m.is_dir()).unwrap_or(false)
}

/// The platform's own answer to "may the effective user write here".
///
/// On unix this is `access(2)` with `W_OK`, which can disagree with an actual
/// write on read-only mounts or under ACLs and sandboxes.
#[cfg(unix)]
pub fn is_writable(path: &Path) -> bool {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let Ok(c_path) = CString::new(path.as_os_str().as_bytes()) else {
        return false;
    };
    // SAFETY: c_path is a valid NUL-terminated string for the duration of the call.
    unsafe { libc::access(c_path.as_ptr(), libc::W_OK) == 0 }
}

#[cfg(not(unix))]
pub fn is_writable(path: &Path) -> bool {
    fs::metadata(path).map(|m| !m.permissions().readonly()).unwrap_or(false)
}

/// Symlink-free absolute form of `path`, `None` if it cannot be resolved.
pub fn canonical_path(path: &Path) -> Option<PathBuf> {
    fs::canonicalize(path).ok()
}

/// Probe file body: `ok <rfc3339 seconds, numeric offset>\n`.
pub fn probe_content(now: DateTime<Utc>) -> String {
    format!("ok {}\n", now.to_rfc3339_opts(SecondsFormat::Secs, false))
}

fn remove_quietly(path: &Path) {
    let _ = fs::remove_file(path);
}

/// Create `target` with `content`, returning the number of bytes written.
pub fn write_file(target: &Path, content: &str) -> Result<usize, ProbeError> {
    fs::write(target, content.as_bytes())
        .map(|()| content.len())
        .map_err(|e| ProbeError::write(target, e))
}

/// Remove any stale probe, write a fresh one, and remove it again on success.
///
/// A failed write is not followed by a second removal: nothing was created.
pub fn write_probe(target: &Path, content: &str) -> WriteOutcome {
    remove_quietly(target);
    match write_file(target, content) {
        Ok(bytes) => {
            remove_quietly(target);
            WriteOutcome::Ok { bytes }
        }
        Err(e) => WriteOutcome::Failed { message: Some(e.to_string()) },
    }
}
