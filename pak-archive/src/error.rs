//! Error types for PAK archive parsing and extraction.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for PAK archive operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error kinds that can occur while reading a PAK archive.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("archive too small to contain a trailer ({len} bytes, need at least {min} bytes)")]
    TooSmall { len: u64, min: u64 },

    #[error("magic not found while scanning for trailer")]
    MagicNotFound,

    #[error("unsupported archive version: {0}")]
    UnsupportedVersion(u32),

    #[error("malformed string at offset {offset}: {reason}")]
    MalformedString { offset: u64, reason: String },

    #[error("malformed length for {entity} at offset {offset}: {value}")]
    MalformedLength {
        entity: &'static str,
        offset: u64,
        value: i64,
    },

    #[error("offset out of range for {entity}: {offset} (archive length {archive_len})")]
    OffsetOutOfRange {
        entity: &'static str,
        offset: u64,
        archive_len: u64,
    },

    #[error("compression block mismatch for {entity}: {reason}")]
    BlockMismatch { entity: &'static str, reason: String },

    #[error("encryption is not supported: {entity}")]
    EncryptionUnsupported { entity: &'static str },

    #[error("codec failure: {0}")]
    CodecFailure(String),

    #[error("extraction cancelled")]
    Cancelled,

    #[error("{path}: {source}")]
    WithPath {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Attach an archive path to an error for a single, self-contained diagnostic line.
    pub fn with_path(self, path: impl Into<PathBuf>) -> Error {
        Error::WithPath {
            path: path.into(),
            source: Box::new(self),
        }
    }

    /// Coarse classification, useful for a CLI collaborator computing exit codes.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Io(_) => ErrorKind::Io,
            Error::TooSmall { .. }
            | Error::MagicNotFound
            | Error::UnsupportedVersion(_)
            | Error::MalformedString { .. }
            | Error::MalformedLength { .. }
            | Error::OffsetOutOfRange { .. } => ErrorKind::InvalidArchive,
            Error::BlockMismatch { .. }
            | Error::EncryptionUnsupported { .. }
            | Error::CodecFailure(_)
            | Error::Cancelled => ErrorKind::ExtractionFailed,
            Error::WithPath { source, .. } => source.kind(),
        }
    }
}

/// Coarse error classification mirroring the exit-code contract of a hosting CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Io,
    InvalidArchive,
    ExtractionFailed,
}

/// Validates that a decoded offset lies within `[0, archive_len)` before it's used to seek.
/// `entity` names the field being checked, for the error message.
pub fn check_offset(entity: &'static str, offset: i64, archive_len: u64) -> Result<()> {
    if offset < 0 || offset as u64 >= archive_len {
        return Err(Error::OffsetOutOfRange {
            entity,
            offset: offset as u64,
            archive_len,
        });
    }
    Ok(())
}
