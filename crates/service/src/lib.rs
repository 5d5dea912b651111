//! Filesystem write-capability checks.
//! - `identity`: who the process runs as.
//! - `probe`: the individual directory checks and the write probe.
//! - `report`: the report model and its plain-text rendering.
//! - `checker`: runs the checks in order against a configured directory.

pub mod errors;
pub mod identity;
pub mod probe;
pub mod report;
pub mod checker;
pub mod observability;

pub use checker::FsChecker;
pub use report::{FsCheckReport, WriteOutcome};
