//! Archive format detection and per-format readers.

pub mod detect;
mod gzip;
mod tar;
mod zip;

pub use detect::ArchiveKind;
pub use detect::Detected;
pub use detect::detect;

use std::path::Path;

use crate::Result;

/// Extracts `source` into the `scratch` directory according to its detected
/// kind.
///
/// Returns the number of archive entries that were skipped because their
/// paths were unsafe. The file handle is released on every exit path.
///
/// # Errors
///
/// Returns [`crate::ExplodeError::CorruptArchive`] when the container cannot
/// be parsed and [`crate::ExplodeError::ExtractFailure`] when writing content
/// fails. Callers contain either case to the single archive being processed.
pub(crate) fn extract_into(
    kind: ArchiveKind,
    source: &Path,
    scratch: &Path,
    base: &str,
) -> Result<usize> {
    match kind {
        ArchiveKind::Zip => zip::extract(source, scratch),
        ArchiveKind::Gzip => gzip::extract(source, scratch, base).map(|()| 0),
        ArchiveKind::Tar | ArchiveKind::TarGz | ArchiveKind::TarBz2 => {
            tar::extract(source, scratch).map(|()| 0)
        }
    }
}
