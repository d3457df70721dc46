//! Index decoding: dispatches to the legacy flat-list layout (v<10) or the modern
//! header-plus-blob layout (v≥10), and resolves the modern full directory tree when present.

pub mod directory;
pub mod legacy;
pub mod modern;

pub use directory::{Directory, DirectoryFile, DirectoryIndex};
pub use legacy::{IndexRecord, LegacyIndex};
pub use modern::{IndexLocator, ModernIndex};

use crate::config::ReaderConfig;
use crate::error::{check_offset, Result};
use crate::source::PakSource;
use crate::trailer::Trailer;

/// The decoded index, in whichever of the two on-disk forms the archive version uses.
#[derive(Debug, Clone)]
pub enum Index {
    Legacy(LegacyIndex),
    Modern {
        header: ModernIndex,
        directory_index: Option<DirectoryIndex>,
    },
}

/// Decodes the index described by `trailer`, seeking to `trailer.index_offset` first.
pub fn decode_index(
    src: &mut impl PakSource,
    trailer: &Trailer,
    config: &ReaderConfig,
    archive_len: u64,
) -> Result<Index> {
    check_offset("trailer.index_offset", trailer.index_offset, archive_len)?;
    src.seek_to(trailer.index_offset as u64)?;

    if trailer.version < 10 {
        let legacy = legacy::decode_legacy_index(src, trailer.version, config.max_string_len, archive_len)?;
        return Ok(Index::Legacy(legacy));
    }

    let header = modern::decode_modern_index(src, config.max_string_len)?;

    let directory_index = if let Some(locator) = header.full_directory_index {
        check_offset("index.full_directory_index.offset", locator.offset, archive_len)?;
        src.seek_to(locator.offset as u64)?;
        Some(directory::decode_directory_index(src, config.max_string_len)?)
    } else {
        None
    };

    Ok(Index::Modern {
        header,
        directory_index,
    })
}
