//! Helpdesk ticket attachment retrieval with recursive archive explosion.
//!
//! `tgrab-core` downloads the attachments posted on helpdesk ticket
//! comments and "explodes" any archive attachments: archives are detected
//! by filename suffix, extracted next to the downloaded file under their
//! base name, and any archives found inside are exploded in turn. Failures
//! are contained per archive and per attachment; a corrupt upload never
//! aborts the batch.
//!
//! # Examples
//!
//! ```no_run
//! use tgrab_core::explode::{explode, ExplodeOptions};
//!
//! let report = explode("7399/comments/2/logs.tar.gz".as_ref(), &ExplodeOptions::default());
//! println!("exploded {} archive(s)", report.archives_exploded);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod explode;
pub mod fetch;
pub mod formats;
pub mod report;
pub mod test_utils;

mod copy;

// Re-export main API types
pub use error::ExplodeError;
pub use error::FetchError;
pub use error::Result;
pub use explode::ExplodeOptions;
pub use explode::explode;
pub use fetch::GrabOptions;
pub use fetch::TicketSelection;
pub use fetch::TicketSource;
pub use fetch::grab;
pub use formats::ArchiveKind;
pub use report::ExplodeReport;
pub use report::GrabProgress;
pub use report::GrabReport;
pub use report::NoopProgress;
