//! Test utilities for building archive fixtures in memory.
//!
//! Shared by unit and integration tests; panics on I/O errors are
//! acceptable here.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::io::Cursor;
use std::io::Write;

/// Builds an in-memory tar archive from `(path, content)` entries.
///
/// Paths ending in `/` become directory entries.
#[must_use]
pub fn tar_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut builder = tar::Builder::new(Vec::new());
    for &(path, data) in entries {
        let mut header = tar::Header::new_gnu();
        if path.ends_with('/') {
            header.set_size(0);
            header.set_mode(0o755);
            header.set_entry_type(tar::EntryType::Directory);
            header.set_cksum();
            builder
                .append_data(&mut header, path, std::io::empty())
                .unwrap();
        } else {
            header.set_size(data.len() as u64);
            header.set_mode(0o644);
            header.set_cksum();
            builder.append_data(&mut header, path, data).unwrap();
        }
    }
    builder.into_inner().unwrap()
}

/// Builds an in-memory gzip-compressed tar archive.
#[must_use]
pub fn tar_gz_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let tar = tar_bytes(entries);
    let mut encoder = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(&tar).unwrap();
    encoder.finish().unwrap()
}

/// Builds an in-memory bzip2-compressed tar archive.
#[must_use]
pub fn tar_bz2_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let tar = tar_bytes(entries);
    let mut encoder = bzip2::write::BzEncoder::new(Vec::new(), bzip2::Compression::default());
    encoder.write_all(&tar).unwrap();
    encoder.finish().unwrap()
}

/// Builds an in-memory ZIP archive from `(path, content)` entries.
///
/// Paths ending in `/` become directory entries. Files are stored
/// uncompressed.
#[must_use]
pub fn zip_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    use zip::write::SimpleFileOptions;

    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Stored)
        .unix_permissions(0o644);

    for &(path, data) in entries {
        if path.ends_with('/') {
            writer.add_directory(path, options).unwrap();
        } else {
            writer.start_file(path, options).unwrap();
            writer.write_all(data).unwrap();
        }
    }

    writer.finish().unwrap().into_inner()
}

/// Gzip-compresses a byte payload (a single-stream `.gz`, not a tar).
#[must_use]
pub fn gz_bytes(data: &[u8]) -> Vec<u8> {
    let mut encoder = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tar_bytes_roundtrip() {
        let data = tar_bytes(&[("file.txt", b"hello")]);
        assert!(!data.is_empty());

        let mut archive = tar::Archive::new(Cursor::new(data));
        let names: Vec<String> = archive
            .entries()
            .unwrap()
            .map(|e| e.unwrap().path().unwrap().display().to_string())
            .collect();
        assert_eq!(names, vec!["file.txt"]);
    }

    #[test]
    fn test_gz_bytes_has_magic() {
        let data = gz_bytes(b"payload");
        assert_eq!(&data[..2], &[0x1f, 0x8b]);
    }

    #[test]
    fn test_zip_bytes_not_empty_for_zero_entries() {
        // A zero-entry zip is still a valid container with a central
        // directory record.
        let data = zip_bytes(&[]);
        assert!(!data.is_empty());
    }
}
