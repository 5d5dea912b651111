use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::identity::Identity;

/// Result of the write probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum WriteOutcome {
    Ok { bytes: usize },
    Failed { message: Option<String> },
}

impl WriteOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, WriteOutcome::Ok { .. })
    }

    /// Label used for logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            WriteOutcome::Ok { .. } => "ok",
            WriteOutcome::Failed { .. } => "failed",
        }
    }
}

/// Everything one check found out about the target directory.
#[derive(Debug, Clone, Serialize)]
pub struct FsCheckReport {
    /// `None` when the platform has no effective uid to report.
    pub identity: Option<Identity>,
    pub config_dir: PathBuf,
    pub is_dir: bool,
    pub is_writable: bool,
    pub realpath: Option<PathBuf>,
    pub write: WriteOutcome,
}

fn yes_no(b: bool) -> &'static str {
    if b { "yes" } else { "no" }
}

impl FsCheckReport {
    pub fn render_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for FsCheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(id) = &self.identity {
            writeln!(f, "whoami (posix_geteuid): {} ({})", id.uid, id.display_name())?;
        }
        writeln!(f, "configDir: {}", self.config_dir.display())?;
        writeln!(f, "is_dir: {}", yes_no(self.is_dir))?;
        writeln!(f, "is_writable(dir): {}", yes_no(self.is_writable))?;
        match &self.realpath {
            Some(p) => writeln!(f, "realpath(configDir): {}", p.display())?,
            None => writeln!(f, "realpath(configDir): ")?,
        }
        match &self.write {
            WriteOutcome::Ok { bytes } => writeln!(f, "write_test: OK ({bytes} bytes)"),
            WriteOutcome::Failed { message } => {
                writeln!(f, "write_test: FAILED")?;
                match message.as_deref() {
                    Some(msg) if !msg.is_empty() => writeln!(f, "php_error: {msg}"),
                    _ => Ok(()),
                }
            }
        }
    }
}
