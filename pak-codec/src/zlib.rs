//! `Decompressor` impl backed by `flate2`'s zlib inflate.

use std::io::Read;

use flate2::read::ZlibDecoder;
use pak_archive::{Decompressor, Error as ArchiveError, Result as ArchiveResult};
use tracing::trace;

use crate::error::Error;

/// Inflates a single zlib stream, the codec named `"Zlib"` in a PAK trailer's
/// compression-method table (and the implied codec for method index 1 on pre-v8
/// archives, which carry no method table at all).
#[derive(Debug, Default)]
pub struct ZlibDecompressor;

impl ZlibDecompressor {
    fn inflate(&self, input: &[u8], max_output_len: usize) -> Result<Vec<u8>, Error> {
        let mut decoder = ZlibDecoder::new(input);
        let mut out = Vec::with_capacity(max_output_len.min(1 << 20));
        // Read one byte past the cap so an over-long stream is caught here rather than
        // after buffering the whole thing.
        let mut limited = (&mut decoder).take(max_output_len as u64 + 1);
        limited
            .read_to_end(&mut out)
            .map_err(|e| Error::Zlib(e.to_string()))?;

        if out.len() > max_output_len {
            return Err(Error::OutputTooLarge {
                actual: out.len(),
                max: max_output_len,
            });
        }

        Ok(out)
    }
}

impl Decompressor for ZlibDecompressor {
    fn decompress(&self, input: &[u8], max_output_len: usize) -> ArchiveResult<Vec<u8>> {
        trace!(input_len = input.len(), max_output_len, "zlib inflate");
        self.inflate(input, max_output_len)
            .map_err(|e| ArchiveError::CodecFailure(e.to_string()))
    }

    fn name(&self) -> &str {
        "Zlib"
    }
}
