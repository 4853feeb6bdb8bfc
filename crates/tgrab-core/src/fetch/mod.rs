//! Attachment retrieval from helpdesk tickets.
//!
//! The [`TicketSource`] trait is the seam to the remote API; [`grab`] drives
//! the download loop and hands every written file to the explode pipeline.

pub mod zendesk;

use std::fs;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use crate::error::FetchError;
use crate::explode::ExplodeOptions;
use crate::explode::explode;
use crate::report::GrabProgress;
use crate::report::GrabReport;

/// Which tickets a grab run covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketSelection {
    /// Explicit ticket ids.
    Ids(Vec<u64>),
    /// Every unsolved ticket assigned to the given agent (`me` for the
    /// authenticated user).
    AssignedOpen {
        /// Agent whose open tickets to search.
        agent: String,
    },
}

/// One comment event on a ticket, in posting order.
#[derive(Debug, Clone, Default)]
pub struct CommentEvent {
    /// Attachments carried by this comment (possibly none).
    pub attachments: Vec<Attachment>,
}

/// A downloadable attachment reference.
#[derive(Debug, Clone)]
pub struct Attachment {
    /// Filename as reported by the helpdesk.
    pub file_name: String,
    /// Opaque reference the source can stream bytes from.
    pub content_url: String,
}

/// Source of tickets, comment events, and attachment bytes.
///
/// [`zendesk::ZendeskClient`] implements this against the Zendesk REST API;
/// tests substitute an in-memory double.
pub trait TicketSource {
    /// Resolves a selection to concrete ticket ids.
    fn tickets(&self, selection: &TicketSelection) -> Result<Vec<u64>, FetchError>;

    /// Lists a ticket's comment events, oldest first.
    fn comment_events(&self, ticket_id: u64) -> Result<Vec<CommentEvent>, FetchError>;

    /// Streams an attachment's bytes into `dest`, returning the byte count.
    fn download(&self, content_url: &str, dest: &mut dyn Write) -> Result<u64, FetchError>;
}

/// Options controlling a grab run.
#[derive(Debug, Clone)]
pub struct GrabOptions {
    /// Directory attachments are grabbed into.
    pub work_dir: PathBuf,
    /// Options for the explode pipeline run on each downloaded file.
    pub explode: ExplodeOptions,
}

/// Downloads every attachment of the selected tickets and explodes archive
/// attachments in place.
///
/// Attachments land at `<work_dir>/<ticket>/comments/<n>/<file name>`, with
/// `n` the 1-indexed comment number. An attachment whose destination file
/// already exists is skipped, so re-runs are idempotent. Per-attachment
/// failures (download errors, unsafe names, corrupt archives) are recorded
/// as report warnings and never abort the remaining attachments or tickets.
///
/// # Errors
///
/// Returns an error only when the run cannot start at all: the work
/// directory cannot be created or the ticket selection cannot be resolved.
pub fn grab(
    source: &dyn TicketSource,
    selection: &TicketSelection,
    options: &GrabOptions,
    progress: &mut dyn GrabProgress,
) -> Result<GrabReport, FetchError> {
    let mut report = GrabReport::new();

    fs::create_dir_all(&options.work_dir)?;
    let tickets = source.tickets(selection)?;
    let total = tickets.len();

    for (i, &ticket_id) in tickets.iter().enumerate() {
        progress.on_ticket_start(ticket_id, i + 1, total);
        report.tickets_processed += 1;

        let events = match source.comment_events(ticket_id) {
            Ok(events) => events,
            Err(e) => {
                report.add_warning(format!("ticket {ticket_id}: failed to list comments: {e}"));
                continue;
            }
        };

        let ticket_dir = options.work_dir.join(ticket_id.to_string());
        for (index, event) in events.iter().enumerate() {
            let comment_num = index + 1;
            let comment_dir = ticket_dir.join("comments").join(comment_num.to_string());

            for attachment in &event.attachments {
                grab_attachment(
                    source,
                    attachment,
                    ticket_id,
                    &ticket_dir,
                    &comment_dir,
                    comment_num,
                    options,
                    progress,
                    &mut report,
                );
            }
        }
    }

    progress.on_complete();
    Ok(report)
}

/// Downloads and explodes a single attachment; every failure is contained.
#[allow(clippy::too_many_arguments)]
fn grab_attachment(
    source: &dyn TicketSource,
    attachment: &Attachment,
    ticket_id: u64,
    ticket_dir: &Path,
    comment_dir: &Path,
    comment_num: usize,
    options: &GrabOptions,
    progress: &mut dyn GrabProgress,
    report: &mut GrabReport,
) {
    let name = &attachment.file_name;

    if !is_plain_file_name(name) {
        report.add_warning(
            FetchError::UnsafeAttachmentName { name: name.clone() }.to_string(),
        );
        return;
    }

    let dest = comment_dir.join(name);
    if dest.is_file() {
        report.attachments_skipped += 1;
        return;
    }

    progress.on_attachment_start(name);

    if let Err(e) = fs::create_dir_all(comment_dir) {
        report.add_warning(format!(
            "ticket {ticket_id}: failed to create {}: {e}",
            comment_dir.display()
        ));
        return;
    }

    match download_to_file(source, &attachment.content_url, comment_dir, &dest) {
        Ok(_) => {
            report.attachments_downloaded += 1;
            report
                .grabs
                .entry(ticket_dir.to_path_buf())
                .or_default()
                .push(
                    PathBuf::from("comments")
                        .join(comment_num.to_string())
                        .join(name),
                );

            report.explode.merge(explode(&dest, &options.explode));
            progress.on_attachment_complete(name);
        }
        Err(e) => {
            report.download_failures += 1;
            report.add_warning(format!(
                "ticket {ticket_id}: failed to download {name}: {e}"
            ));
        }
    }
}

/// Streams a download into a staging file and renames it into place, so an
/// interrupted transfer never leaves a partial file that a later run would
/// mistake for a completed one.
fn download_to_file(
    source: &dyn TicketSource,
    content_url: &str,
    comment_dir: &Path,
    dest: &Path,
) -> Result<u64, FetchError> {
    let mut staging = tempfile::Builder::new()
        .prefix(".tgrab-download-")
        .tempfile_in(comment_dir)?;

    let bytes = source.download(content_url, staging.as_file_mut())?;
    staging.flush()?;
    staging
        .persist(dest)
        .map_err(|e| FetchError::Io(e.error))?;

    Ok(bytes)
}

/// Accepts only plain file names: no separators, no traversal, not empty.
fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains('/') && !name.contains('\\')
}
