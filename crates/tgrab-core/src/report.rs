//! Operation reporting for grab and explode runs.

use std::collections::BTreeMap;
use std::path::PathBuf;

/// Report of a recursive archive explosion.
///
/// Failures inside the pipeline are contained per archive and show up here
/// as warnings; counters cover the whole recursion tree.
#[derive(Debug, Clone, Default)]
pub struct ExplodeReport {
    /// Number of archives successfully exploded, nested ones included.
    pub archives_exploded: usize,

    /// Number of nested archives discovered and exploded during recursion.
    pub nested_archives: usize,

    /// Archive entries skipped (unsafe paths inside an archive).
    pub entries_skipped: usize,

    /// Warnings generated by contained per-archive failures.
    pub warnings: Vec<String>,
}

impl ExplodeReport {
    /// Creates a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a warning message to the report.
    pub fn add_warning(&mut self, message: String) {
        self.warnings.push(message);
    }

    /// Returns whether any warnings were generated.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Folds another report (e.g. from a nested recursion) into this one.
    pub fn merge(&mut self, other: Self) {
        self.archives_exploded += other.archives_exploded;
        self.nested_archives += other.nested_archives;
        self.entries_skipped += other.entries_skipped;
        self.warnings.extend(other.warnings);
    }
}

/// Report of a grab run over one or more tickets.
#[derive(Debug, Clone, Default)]
pub struct GrabReport {
    /// Number of tickets visited.
    pub tickets_processed: usize,

    /// Attachments downloaded during this run.
    pub attachments_downloaded: usize,

    /// Attachments skipped because the destination file already existed.
    pub attachments_skipped: usize,

    /// Attachments that failed to download (logged and skipped).
    pub download_failures: usize,

    /// Ticket directory → attachment paths downloaded into it, relative to
    /// the ticket directory.
    pub grabs: BTreeMap<PathBuf, Vec<PathBuf>>,

    /// Aggregated result of exploding the downloaded archives.
    pub explode: ExplodeReport,

    /// Warnings generated by contained per-attachment failures.
    pub warnings: Vec<String>,
}

impl GrabReport {
    /// Creates a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a warning message to the report.
    pub fn add_warning(&mut self, message: String) {
        self.warnings.push(message);
    }

    /// Returns whether this run or any of its explosions produced warnings.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty() || self.explode.has_warnings()
    }
}

/// Callback trait for progress reporting during a grab run.
///
/// Implement this to surface per-ticket and per-attachment progress (the CLI
/// drives a progress bar with it). All methods have empty defaults in
/// [`NoopProgress`]; implement only what you need.
pub trait GrabProgress {
    /// Called when a ticket starts being processed.
    ///
    /// `current` is 1-indexed, `total` is the number of tickets in this run.
    fn on_ticket_start(&mut self, ticket_id: u64, current: usize, total: usize);

    /// Called before an attachment download begins.
    fn on_attachment_start(&mut self, file_name: &str);

    /// Called after an attachment has been written and exploded.
    fn on_attachment_complete(&mut self, file_name: &str);

    /// Called when the whole run is complete.
    fn on_complete(&mut self);
}

/// No-op implementation of [`GrabProgress`].
#[derive(Debug, Default)]
pub struct NoopProgress;

impl GrabProgress for NoopProgress {
    fn on_ticket_start(&mut self, _ticket_id: u64, _current: usize, _total: usize) {}

    fn on_attachment_start(&mut self, _file_name: &str) {}

    fn on_attachment_complete(&mut self, _file_name: &str) {}

    fn on_complete(&mut self) {}
}
