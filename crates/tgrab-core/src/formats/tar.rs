//! Tar-family archive reader.
//!
//! Covers plain tar, tar+gzip, and tar+bzip2. The compression codec is
//! sniffed from the stream's magic bytes rather than trusted from the
//! filename, so a `.tgz` that is really an uncompressed tar still extracts.

use std::fs::File;
use std::io::BufReader;
use std::io::Read;
use std::io::Seek;
use std::io::SeekFrom;
use std::path::Path;

use bzip2::read::BzDecoder;
use flate2::read::GzDecoder;

use crate::ExplodeError;
use crate::Result;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];
const BZIP2_MAGIC: [u8; 3] = [b'B', b'Z', b'h'];

/// Compression codec wrapped around a tar stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TarCodec {
    Plain,
    Gzip,
    Bzip2,
}

/// Reads the leading magic bytes and rewinds the file.
fn sniff_codec(file: &mut File) -> std::io::Result<TarCodec> {
    let mut magic = [0u8; 3];
    let mut filled = 0;
    while filled < magic.len() {
        let n = file.read(&mut magic[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    file.seek(SeekFrom::Start(0))?;

    if filled >= 2 && magic[..2] == GZIP_MAGIC {
        Ok(TarCodec::Gzip)
    } else if filled >= 3 && magic == BZIP2_MAGIC {
        Ok(TarCodec::Bzip2)
    } else {
        Ok(TarCodec::Plain)
    }
}

/// Extracts all entries of a tar-family archive into `dest` in one
/// operation.
pub(crate) fn extract(source: &Path, dest: &Path) -> Result<()> {
    let mut file = File::open(source)?;
    let codec = sniff_codec(&mut file)?;
    let reader = BufReader::new(file);

    match codec {
        TarCodec::Plain => unpack(tar::Archive::new(reader), source, dest),
        TarCodec::Gzip => unpack(tar::Archive::new(GzDecoder::new(reader)), source, dest),
        TarCodec::Bzip2 => unpack(tar::Archive::new(BzDecoder::new(reader)), source, dest),
    }
}

fn unpack<R: Read>(mut archive: tar::Archive<R>, source: &Path, dest: &Path) -> Result<()> {
    archive.unpack(dest).map_err(|e| classify(e, source))
}

/// Maps an unpack error onto the taxonomy: undecodable input is a corrupt
/// archive, anything else is a write failure.
fn classify(e: std::io::Error, source: &Path) -> ExplodeError {
    match e.kind() {
        std::io::ErrorKind::InvalidData | std::io::ErrorKind::UnexpectedEof => {
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
