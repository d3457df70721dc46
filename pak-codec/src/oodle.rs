//! Placeholder for the proprietary LZ codec ("Oodle" in the trailer's method-name table).
//!
//! Unreal Engine's shipped PAK readers link a closed-source Oodle library to handle this
//! method; this crate cannot redistribute it. [`OodleDecompressor`] exists so the method
//! index resolves to a named, diagnosable codec rather than silently falling through to
//! "unregistered method" — callers who have their own Oodle bindings should implement
//! [`pak_archive::Decompressor`] directly and register it in place of this stub.

use pak_archive::{Decompressor, Error as ArchiveError, Result as ArchiveResult};
use tracing::warn;

use crate::error::Error;

/// Recognizes the "Oodle" compression method by name but cannot decode it.
#[derive(Debug, Default)]
pub struct OodleDecompressor;

impl Decompressor for OodleDecompressor {
    fn decompress(&self, _input: &[u8], _max_output_len: usize) -> ArchiveResult<Vec<u8>> {
        warn!("oodle decompression requested but this crate carries no Oodle implementation");
        Err(ArchiveError::CodecFailure(
            Error::NotImplemented("oodle").to_string(),
        ))
    }

    fn name(&self) -> &str {
        "Oodle"
    }
}
