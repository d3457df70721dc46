//! Modern (v≥10) index header: mount point, optional locators, and the encoded-entry-info
//! blob. The blob itself is expanded entry-by-entry by [`crate::encoded_entry`].

use crate::error::{Error, Result};
use crate::primitives::{read_bool_u32, read_hash20, read_i32, read_i64, read_nul_string, read_u32, read_u64, Hash20};
use crate::source::PakSource;

/// Offset/size/hash locator for an optional side index (path-hash or full-directory).
#[derive(Debug, Clone, Copy)]
pub struct IndexLocator {
    pub offset: i64,
    pub size: i64,
    pub hash: Hash20,
}

/// The decoded header of a modern index, ahead of expanding individual encoded entries.
#[derive(Debug, Clone)]
pub struct ModernIndex {
    pub mount_point: String,
    pub entry_count: i32,
    pub path_hash_seed: u64,
    pub path_hash_index: Option<IndexLocator>,
    pub full_directory_index: Option<IndexLocator>,
    pub encoded_entries: Vec<u8>,
    pub record_count: u32,
}

fn decode_locator(src: &mut impl PakSource) -> Result<IndexLocator> {
    let offset = read_i64(src)?;
    let size = read_i64(src)?;
    let hash = read_hash20(src)?;
    Ok(IndexLocator { offset, size, hash })
}

/// Decodes a modern index header at the source's current position (expected to already be
/// seeked to `trailer.index_offset`).
pub fn decode_modern_index(src: &mut impl PakSource, max_string_len: u32) -> Result<ModernIndex> {
    let mount_point = read_nul_string(src, max_string_len)?;
    let entry_count = read_i32(src)?;
    let path_hash_seed = read_u64(src)?;

    let path_hash_index = if read_bool_u32(src)? {
        Some(decode_locator(src)?)
    } else {
        None
    };

    let full_directory_index = if read_bool_u32(src)? {
        Some(decode_locator(src)?)
    } else {
        None
    };

    let blob_offset = src.position()?;
    let blob_len = read_i32(src)?;
    if blob_len < 0 {
        return Err(Error::MalformedLength {
            entity: "index.encoded_entries_length",
            offset: blob_offset,
            value: blob_len as i64,
        });
    }
    let encoded_entries = src.read_exact_bytes(blob_len as usize)?;

    let record_count = read_u32(src)?;

    Ok(ModernIndex {
        mount_point,
        entry_count,
        path_hash_seed,
        path_hash_index,
        full_directory_index,
        encoded_entries,
        record_count,
    })
}
