//! Error type for the codec crate, distinct from `pak_archive::Error`: these are codec-level
//! failures before they're wrapped into `Error::CodecFailure` by the core.

use thiserror::Error;

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors a concrete [`crate::Decompressor`] impl can raise.
#[derive(Error, Debug)]
pub enum Error {
    #[error("zlib inflate failed: {0}")]
    Zlib(String),

    #[error("decompressed output exceeds the declared cap ({actual} > {max})")]
    OutputTooLarge { actual: usize, max: usize },

    #[error("codec not implemented: {0}")]
    NotImplemented(&'static str),
}
