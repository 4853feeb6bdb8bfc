//! Archive type detection from filename suffixes.

/// Supported archive kinds, derived purely from the filename suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArchiveKind {
    /// ZIP archive.
    Zip,
    /// Single-stream gzip file (not a tar).
    Gzip,
    /// Tar archive (uncompressed).
    Tar,
    /// Gzip-compressed tar archive.
    TarGz,
    /// Bzip2-compressed tar archive.
    TarBz2,
}

impl ArchiveKind {
    /// Returns a human-readable name for this kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Zip => "zip",
            Self::Gzip => "gzip",
            Self::Tar => "tar",
            Self::TarGz => "tar+gzip",
            Self::TarBz2 => "tar+bzip2",
        }
    }
}

/// Result of classifying a filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detected {
    /// The recognized archive kind.
    pub kind: ArchiveKind,
    /// Filename with the recognized suffix stripped.
    pub base: String,
}

/// Recognized suffixes, most specific first.
///
/// Ordering matters: compound suffixes must win over the generic ones they
/// end with (`.tar.gz` before `.gz`), otherwise the base name comes out
/// wrong.
const SUFFIXES: &[(&str, ArchiveKind)] = &[
    (".tar.gz", ArchiveKind::TarGz),
    (".tar.bz2", ArchiveKind::TarBz2),
    (".tar.bz", ArchiveKind::TarBz2),
    (".tgz", ArchiveKind::TarGz),
    (".tar", ArchiveKind::Tar),
    (".zip", ArchiveKind::Zip),
    (".gz", ArchiveKind::Gzip),
];

/// Classifies a filename by its archive suffix.
///
/// Returns the archive kind and the base name (filename with the suffix
/// stripped), or `None` when the name carries no supported suffix, which
/// simply means "not an archive", not an error. Suffix matching is ASCII
/// case-insensitive; the base name keeps its original casing. A name that
/// is nothing but a suffix (empty base) is not treated as an archive.
///
/// # Examples
///
/// ```
/// use tgrab_core::formats::detect::{detect, ArchiveKind};
///
/// let hit = detect("logs.tar.gz").unwrap();
/// assert_eq!(hit.kind, ArchiveKind::TarGz);
/// assert_eq!(hit.base, "logs");
///
/// assert!(detect("report.pdf").is_none());
/// ```
#[must_use]
pub fn detect(file_name: &str) -> Option<Detected> {
    let lower = file_name.to_ascii_lowercase();

    for &(suffix, kind) in SUFFIXES {
        if lower.ends_with(suffix) && lower.len() > suffix.len() {
            let base = file_name[..file_name.len() - suffix.len()].to_string();
            return Some(Detected { kind, base });
        }
    }

    None
}
