//! Extraction normalization.
//!
//! Reconciles whatever an archive extracted into its scratch directory with
//! the archive's base name: a single entry matching the base name is
//! promoted up one level, anything else is rolled into a directory named
//! after the base.

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use tempfile::TempDir;

use crate::ExplodeError;
use crate::Result;

/// Decides the final on-disk shape of a freshly extracted scratch directory.
///
/// Consumes the scratch directory: it is either renamed into its final form
/// or removed. Returns the final output path, or `None` when the archive
/// extracted to nothing (the empty-archive case creates no output at all).
pub(crate) fn normalize(scratch: TempDir, parent: &Path, base: &str) -> Result<Option<PathBuf>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(scratch.path())? {
        names.push(entry?.file_name());
    }

    if names.is_empty() {
        // Empty archive: dropping the scratch dir removes it.
        return Ok(None);
    }

    let target = parent.join(base);

    if names.len() == 1 && names[0] == *base {
        // The classic "tar.gz contains a dir named like itself" and
        // "txt.gz contains one file" cases: promote the entry up one level.
        let single = scratch.path().join(&names[0]);
        fs::rename(&single, &target).map_err(|e| ExplodeError::ArrangeFailure {
            from: single.clone(),
            to: target.clone(),
            source: e,
        })?;
        return Ok(Some(target));
    }

    // Multiple entries, or a single entry with a different name: keep the
    // container, renamed after the archive's base. Cleanup is disabled
    // first so a failed rename degrades to an orphaned scratch directory
    // instead of deleted output.
    let from = scratch.keep();
    fs::rename(&from, &target).map_err(|e| ExplodeError::ArrangeFailure {
        from: from.clone(),
        to: target.clone(),
        source: e,
    })?;
    Ok(Some(target))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn scratch_in(parent: &Path) -> TempDir {
        tempfile::Builder::new()
            .prefix(".tgrab-explode-")
            .tempdir_in(parent)
            .unwrap()
    }

    #[test]
    fn test_empty_scratch_produces_nothing() {
        let parent = tempfile::tempdir().unwrap();
        let scratch = scratch_in(parent.path());
        let scratch_path = scratch.path().to_path_buf();

        let out = normalize(scratch, parent.path(), "data").unwrap();

        assert!(out.is_none());
        assert!(!scratch_path.exists());
        assert!(!parent.path().join("data").exists());
    }

    #[test]
    fn test_single_matching_entry_is_promoted() {
        let parent = tempfile::tempdir().unwrap();
        let scratch = scratch_in(parent.path());
        let scratch_path = scratch.path().to_path_buf();
        fs::write(scratch.path().join("data"), b"payload").unwrap();

        let out = normalize(scratch, parent.path(), "data").unwrap();

        assert_eq!(out, Some(parent.path().join("data")));
        assert_eq!(fs::read(parent.path().join("data")).unwrap(), b"payload");
        assert!(!scratch_path.exists());
    }

    #[test]
    fn test_single_matching_directory_is_promoted() {
        let parent = tempfile::tempdir().unwrap();
        let scratch = scratch_in(parent.path());
        fs::create_dir(scratch.path().join("logs")).unwrap();
        fs::write(scratch.path().join("logs/app.log"), b"line").unwrap();

        let out = normalize(scratch, parent.path(), "logs").unwrap();

        assert_eq!(out, Some(parent.path().join("logs")));
        assert!(parent.path().join("logs/app.log").exists());
    }

    #[test]
    fn test_single_mismatched_entry_is_rolled() {
        let parent = tempfile::tempdir().unwrap();
        let scratch = scratch_in(parent.path());
        fs::write(scratch.path().join("README"), b"hi").unwrap();

        let out = normalize(scratch, parent.path(), "bundle").unwrap();

        assert_eq!(out, Some(parent.path().join("bundle")));
        assert!(parent.path().join("bundle/README").exists());
    }

    #[test]
    fn test_multiple_entries_are_rolled() {
        let parent = tempfile::tempdir().unwrap();
        let scratch = scratch_in(parent.path());
        fs::write(scratch.path().join("a.txt"), b"a").unwrap();
        fs::write(scratch.path().join("b.txt"), b"b").unwrap();

        let out = normalize(scratch, parent.path(), "bar").unwrap();

        assert_eq!(out, Some(parent.path().join("bar")));
        assert!(parent.path().join("bar/a.txt").exists());
        assert!(parent.path().join("bar/b.txt").exists());
    }

    #[test]
    fn test_no_scratch_residue_after_roll() {
        let parent = tempfile::tempdir().unwrap();
        let scratch = scratch_in(parent.path());
        fs::write(scratch.path().join("a.txt"), b"a").unwrap();
        fs::write(scratch.path().join("b.txt"), b"b").unwrap();

        normalize(scratch, parent.path(), "bar").unwrap();

        let leftovers: Vec<_> = fs::read_dir(parent.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .filter(|n| n.to_string_lossy().starts_with(".tgrab-explode-"))
            .collect();
        assert!(leftovers.is_empty(), "scratch residue: {leftovers:?}");
    }

    #[test]
    fn test_occupied_target_is_arrange_failure() {
        let parent = tempfile::tempdir().unwrap();
        fs::create_dir(parent.path().join("bar")).unwrap();
        fs::write(parent.path().join("bar/keep.txt"), b"precious").unwrap();

        let scratch = scratch_in(parent.path());
        fs::write(scratch.path().join("a.txt"), b"a").unwrap();
        fs::write(scratch.path().join("b.txt"), b"b").unwrap();

        let err = normalize(scratch, parent.path(), "bar").unwrap_err();

        assert!(matches!(err, ExplodeError::ArrangeFailure { .. }));
        // Existing output is never rolled back.
        assert!(parent.path().join("bar/keep.txt").exists());
    }
}
