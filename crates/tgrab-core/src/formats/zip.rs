//! ZIP archive reader.

use std::fs::File;
use std::fs::create_dir_all;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;

use crate::ExplodeError;
use crate::Result;
use crate::copy::copy_chunked;

/// Extracts every entry of a ZIP archive into `dest`.
///
/// Entries whose stored paths cannot be safely joined under `dest`
/// (absolute paths, `..` components) are skipped and counted rather than
/// extracted; the skip count is returned.
pub(crate) fn extract(source: &Path, dest: &Path) -> Result<usize> {
    let file = File::open(source)?;
    let mut archive = ::zip::ZipArchive::new(file).map_err(|e| ExplodeError::CorruptArchive {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;

    let mut skipped = 0;

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).map_err(|e| ExplodeError::CorruptArchive {
            path: source.to_path_buf(),
            reason: format!("failed to read entry {i}: {e}"),
        })?;

        let Some(rel_path) = entry.enclosed_name() else {
            skipped += 1;
            continue;
        };
        let out_path = dest.join(rel_path);

        if entry.is_dir() {
            create_dir_all(&out_path).map_err(|e| ExplodeError::ExtractFailure {
                path: source.to_path_buf(),
                source: e,
            })?;
            continue;
        }

        if let Some(parent) = out_path.parent() {
            create_dir_all(parent).map_err(|e| ExplodeError::ExtractFailure {
                path: source.to_path_buf(),
                source: e,
            })?;
        }

        let out_file = File::create(&out_path).map_err(|e| ExplodeError::ExtractFailure {
            path: source.to_path_buf(),
            source: e,
        })?;
        let mut writer = BufWriter::new(out_file);
        copy_chunked(&mut entry, &mut writer).map_err(|e| ExplodeError::ExtractFailure {
            path: source.to_path_buf(),
            source: e,
        })?;
        writer.flush().map_err(|e| ExplodeError::ExtractFailure {
            path: source.to_path_buf(),
            source: e,
        })?;
    }

    Ok(skipped)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_utils::zip_bytes;
    use std::fs;

    #[test]
    fn test_extract_writes_entries() {
        let temp = tempfile::tempdir().unwrap();
        let archive = temp.path().join("data.zip");
        fs::write(
            &archive,
            zip_bytes(&[("a.txt", b"alpha"), ("sub/b.txt", b"beta")]),
        )
        .unwrap();

        let dest = temp.path().join("out");
        fs::create_dir(&dest).unwrap();
        let skipped = extract(&archive, &dest).unwrap();

        assert_eq!(skipped, 0);
        assert_eq!(fs::read_to_string(dest.join("a.txt")).unwrap(), "alpha");
        assert_eq!(fs::read_to_string(dest.join("sub/b.txt")).unwrap(), "beta");
    }

    #[test]
    fn test_extract_rejects_garbage() {
        let temp = tempfile::tempdir().unwrap();
        let archive = temp.path().join("broken.zip");
        fs::write(&archive, b"this is not a zip file").unwrap();

        let dest = temp.path().join("out");
        fs::create_dir(&dest).unwrap();
        let err = extract(&archive, &dest).unwrap_err();

        assert!(matches!(err, ExplodeError::CorruptArchive { .. }));
        assert_eq!(fs::read_dir(&dest).unwrap().count(), 0);
    }

    #[test]
    fn test_extract_empty_archive_writes_nothing() {
        let temp = tempfile::tempdir().unwrap();
        let archive = temp.path().join("empty.zip");
        fs::write(&archive, zip_bytes(&[])).unwrap();

        let dest = temp.path().join("out");
        fs::create_dir(&dest).unwrap();
        extract(&archive, &dest).unwrap();

        assert_eq!(fs::read_dir(&dest).unwrap().count(), 0);
    }
}
