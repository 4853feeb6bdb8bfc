//! Recursive archive explosion.
//!
//! The pipeline per archive: classify by suffix, extract into a uniquely
//! named scratch directory beside the archive, normalize the result to
//! `<parent>/<base name>`, then walk the normalized output and re-run the
//! pipeline on every child. All paths are explicit; the process working
//! directory is never consulted or mutated, so independent explosions may
//! run in parallel.

mod normalize;

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use crate::ExplodeError;
use crate::Result;
use crate::formats;
use crate::formats::Detected;
use crate::report::ExplodeReport;

/// Default bound on nested-archive recursion.
pub const DEFAULT_MAX_DEPTH: usize = 16;

/// Options controlling a recursive explosion.
#[derive(Debug, Clone)]
pub struct ExplodeOptions {
    /// Maximum nesting depth before archives are skipped with a warning.
    ///
    /// Bounds what a hostile deeply-nested archive can make the pipeline
    /// do; the recursion itself cannot cycle because it only descends into
    /// freshly created output.
    pub max_depth: usize,
}

impl Default for ExplodeOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// What happened to one candidate file.
enum Outcome {
    /// No recognized archive suffix; the file was left untouched.
    NotArchive,
    /// Exploded; `produced` tells whether any output was created (an empty
    /// archive explodes to nothing).
    Exploded { produced: bool },
    /// Extraction failed and was contained as a report warning.
    Failed,
}

/// Recursively explodes `source` and everything nested within it.
///
/// A file without a recognized archive suffix is a no-op. Failures are
/// contained per archive and recorded as warnings on the returned report;
/// there is no fatal error path: one corrupt attachment among many must
/// never abort a batch. The source file itself is always left in place;
/// archives *discovered during recursion* are removed once they have been
/// exploded, so only their exploded form remains.
///
/// # Examples
///
/// ```no_run
/// use tgrab_core::explode::{explode, ExplodeOptions};
///
/// let report = explode("ticket/comments/1/logs.tar.gz".as_ref(), &ExplodeOptions::default());
/// for warning in &report.warnings {
///     eprintln!("{warning}");
/// }
/// ```
#[must_use]
pub fn explode(source: &Path, options: &ExplodeOptions) -> ExplodeReport {
    let mut report = ExplodeReport::new();
    explode_inner(source, 0, options, &mut report);
    report
}

fn explode_inner(
    source: &Path,
    depth: usize,
    options: &ExplodeOptions,
    report: &mut ExplodeReport,
) -> Outcome {
    let Some(name) = source.file_name().and_then(|n| n.to_str()) else {
        return Outcome::NotArchive;
    };
    let Some(hit) = formats::detect(name) else {
        return Outcome::NotArchive;
    };

    if depth >= options.max_depth {
        report.add_warning(
            ExplodeError::DepthLimit {
                path: source.to_path_buf(),
                limit: options.max_depth,
            }
            .to_string(),
        );
        return Outcome::Failed;
    }

    match explode_one(source, &hit, report) {
        Ok(output) => {
            report.archives_exploded += 1;
            if depth > 0 {
                report.nested_archives += 1;
            }
            if let Some(ref dir) = output
                && dir.is_dir()
            {
                descend(dir, depth, options, report);
            }
            Outcome::Exploded {
                produced: output.is_some(),
            }
        }
        Err(e) => {
            // Taxonomy messages carry the offending path; bare I/O errors
            // need it prefixed.
            let warning = match &e {
                ExplodeError::Io(_) => format!("{}: {e}", source.display()),
                _ => e.to_string(),
            };
            report.add_warning(warning);
            Outcome::Failed
        }
    }
}

/// Explodes exactly one archive: scratch, extract, normalize.
///
/// The scratch directory lives in the archive's parent so the final rename
/// never crosses filesystems, and it is removed on every failure path up to
/// normalization (afterwards partial output is kept; no rollback).
fn explode_one(
    source: &Path,
    hit: &Detected,
    report: &mut ExplodeReport,
) -> Result<Option<PathBuf>> {
    let parent = parent_of(source);

    let scratch = tempfile::Builder::new()
        .prefix(".tgrab-explode-")
        .tempdir_in(&parent)?;

    report.entries_skipped += formats::extract_into(hit.kind, source, scratch.path(), &hit.base)?;

    normalize::normalize(scratch, &parent, &hit.base)
}

/// Directory the archive lives in; a bare relative filename resolves to
/// the current directory.
fn parent_of(source: &Path) -> PathBuf {
    match source.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Re-runs the pipeline on every immediate child of a normalized directory.
fn descend(dir: &Path, depth: usize, options: &ExplodeOptions, report: &mut ExplodeReport) {
    // Snapshot the listing up front: exploding children mutates the
    // directory underneath us.
    let children = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            report.add_warning(format!("failed to list {}: {e}", dir.display()));
            return;
        }
    };
    let mut paths = Vec::new();
    for entry in children {
        match entry {
            Ok(entry) => paths.push(entry.path()),
            Err(e) => report.add_warning(format!("failed to list {}: {e}", dir.display())),
        }
    }

    for child in paths {
        if let Outcome::Exploded { produced: true } =
            explode_inner(&child, depth + 1, options, report)
        {
            // The nested archive has been replaced by its exploded form;
            // drop the now-redundant container file.
            if let Err(e) = fs::remove_file(&child) {
                report.add_warning(format!(
                    "failed to remove exploded archive {}: {e}",
                    child.display()
                ));
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_utils::{gz_bytes, zip_bytes};

    #[test]
    fn test_not_an_archive_is_noop() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("report.pdf");
        fs::write(&path, b"%PDF-1.4").unwrap();

        let report = explode(&path, &ExplodeOptions::default());

        assert_eq!(report.archives_exploded, 0);
        assert!(!report.has_warnings());
        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_depth_limit_records_warning() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("data.zip");
        fs::write(&path, zip_bytes(&[("data/x.txt", b"x")])).unwrap();

        let options = ExplodeOptions { max_depth: 0 };
        let report = explode(&path, &options);

        assert_eq!(report.archives_exploded, 0);
        assert!(report.warnings.iter().any(|w| w.contains("depth limit")));
    }

    #[test]
    fn test_gzip_promotes_decompressed_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("console.log.gz");
        fs::write(&path, gz_bytes(b"booted\n")).unwrap();

        let report = explode(&path, &ExplodeOptions::default());

        assert_eq!(report.archives_exploded, 1);
        assert!(!report.has_warnings());
        assert_eq!(
            fs::read_to_string(temp.path().join("console.log")).unwrap(),
            "booted\n"
        );
        // The source stays in place.
        assert!(path.exists());
    }

    #[test]
    fn test_parent_of_bare_filename_is_current_dir() {
        assert_eq!(parent_of(Path::new("x.zip")), PathBuf::from("."));
        assert_eq!(parent_of(Path::new("sub/x.zip")), PathBuf::from("sub"));
        assert_eq!(parent_of(Path::new("/tmp/x.zip")), PathBuf::from("/tmp"));
    }
}
