use std::time::Instant;

use chrono::{DateTime, Utc};
use configs::FsCheckConfig;
use tracing::{info, warn};

use crate::identity::IdentitySource;
use crate::observability;
use crate::probe;
use crate::report::{FsCheckReport, WriteOutcome};

/// Runs the directory checks for one configured target.
///
/// Holds no mutable state; share it behind an `Arc`.
pub struct FsChecker {
    config: FsCheckConfig,
    identity: Box<dyn IdentitySource>,
}

impl FsChecker {
    pub fn new(config: FsCheckConfig, identity: impl IdentitySource + 'static) -> Self {
        Self { config, identity: Box::new(identity) }
    }

    pub fn config(&self) -> &FsCheckConfig {
        &self.config
    }

    /// Run every check against the target directory. Never fails: each
    /// problem ends up as a field of the report.
    pub fn run(&self) -> FsCheckReport {
        self.run_at(Utc::now())
    }

    /// Same as [`FsChecker::run`] with the probe timestamp supplied.
    pub fn run_at(&self, now: DateTime<Utc>) -> FsCheckReport {
        let started = Instant::now();
        let dir = self.config.config_dir.as_path();

        let identity = self.identity.effective_identity();
        let is_dir = probe::is_dir(dir);
        let is_writable = probe::is_writable(dir);
        let realpath = probe::canonical_path(dir);
        let write = probe::write_probe(&self.config.probe_path(), &probe::probe_content(now));

        if let WriteOutcome::Failed { message } = &write {
            warn!(dir = %dir.display(), error = message.as_deref().unwrap_or(""), "write probe failed");
        }
        info!(
            dir = %dir.display(),
            uid = identity.as_ref().map(|i| i.uid),
            is_dir,
            writable = is_writable,
            outcome = write.label(),
            "fs check completed"
        );
        observability::record_probe(write.label(), started.elapsed().as_secs_f64());

        FsCheckReport {
            identity,
            config_dir: self.config.config_dir.clone(),
            is_dir,
            is_writable,
            realpath,
            write,
        }
    }
}
