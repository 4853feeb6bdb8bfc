//! Single-stream gzip reader (a compressed file, not a tar).

use std::fs::File;
use std::io::BufReader;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;

use flate2::read::GzDecoder;

use crate::ExplodeError;
use crate::Result;
use crate::copy::copy_chunked;

/// Decompresses `source` verbatim into `<dest>/<base>`.
///
/// Content is streamed in fixed-size chunks; the whole file is never held
/// in memory.
pub(crate) fn extract(source: &Path, dest: &Path, base: &str) -> Result<()> {
    let file = File::open(source)?;
    let mut decoder = GzDecoder::new(BufReader::new(file));

    let out_path = dest.join(base);
    let out_file = File::create(&out_path).map_err(|e| ExplodeError::ExtractFailure {
        path: source.to_path_buf(),
        source: e,
    })?;
    let mut writer = BufWriter::new(out_file);

    copy_chunked(&mut decoder, &mut writer).map_err(|e| classify(e, source))?;
    writer.flush().map_err(|e| ExplodeError::ExtractFailure {
        path: source.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

/// An undecodable stream is a corrupt archive; other failures are write
/// errors.
fn classify(e: std::io::Error, source: &Path) -> ExplodeError {
    match e.kind() {
        std::io::ErrorKind::InvalidData | std::io::ErrorKind::InvalidInput => {
            ExplodeError::CorruptArchive {
                path: source.to_path_buf(),
                reason: e.to_string(),
            }
        }
        _ => ExplodeError::ExtractFailure {
            path: source.to_path_buf(),
            source: e,
        },
    }
}
