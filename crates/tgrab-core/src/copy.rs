//! Chunked copy helper shared by the archive readers.
//!
//! Attachments may be large, so decompressed content is always moved in
//! fixed-size chunks; nothing in the pipeline buffers a whole file in
//! memory.

use std::io::Read;
use std::io::Write;

/// Chunk size for streaming copies (64KB).
const COPY_CHUNK_SIZE: usize = 64 * 1024;

/// Copies everything from `reader` to `writer` in fixed-size chunks.
///
/// Returns the total number of bytes copied.
///
/// # Errors
///
/// Returns the underlying I/O error if reading or writing fails.
pub(crate) fn copy_chunked<R: Read, W: Write>(
    reader: &mut R,
    writer: &mut W,
) -> std::io::Result<u64> {
    let mut buf = vec![0u8; COPY_CHUNK_SIZE];
    let mut total: u64 = 0;

    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        writer.write_all(&buf[..n])?;
        total += n as u64;
    }

    Ok(total)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_copy_small_input() {
        let mut input = Cursor::new(b"hello world".to_vec());
        let mut output = Vec::new();
        let copied = copy_chunked(&mut input, &mut output).unwrap();
        assert_eq!(copied, 11);
        assert_eq!(output, b"hello world");
    }

    #[test]
    fn test_copy_empty_input() {
        let mut input = Cursor::new(Vec::new());
        let mut output = Vec::new();
        let copied = copy_chunked(&mut input, &mut output).unwrap();
        assert_eq!(copied, 0);
        assert!(output.is_empty());
    }

    #[test]
    fn test_copy_crosses_chunk_boundary() {
        let data = vec![7u8; COPY_CHUNK_SIZE * 2 + 17];
        let mut input = Cursor::new(data.clone());
        let mut output = Vec::new();
        let copied = copy_chunked(&mut input, &mut output).unwrap();
        assert_eq!(copied, data.len() as u64);
        assert_eq!(output, data);
    }
}
