//! Expansion of the compact 32-bit "encoded entry info" descriptor used by v≥10 indexes.

use crate::bitfield::BitField;
use crate::error::Result;
use crate::primitives::{read_i32, read_u32, read_u64};
use crate::source::PakSource;

const COMPRESSION_BLOCK_SIZE: BitField = BitField::new("compression_block_size", 0, 6);
const COMPRESSION_BLOCK_COUNT: BitField = BitField::new("compression_block_count", 6, 16);
const ENCRYPTED: BitField = BitField::new("encrypted", 22, 1);
const COMPRESSION_METHOD_INDEX: BitField = BitField::new("compression_method_index", 23, 6);
const SIZE_32_SAFE: BitField = BitField::new("size_32_bit_safe", 29, 1);
const UNCOMPRESSED_SIZE_32_SAFE: BitField = BitField::new("uncompressed_size_32_bit_safe", 30, 1);
const OFFSET_32_SAFE: BitField = BitField::new("offset_32_bit_safe", 31, 1);

/// The unpacked form of a 32-bit encoded entry descriptor plus its follow-on fields.
#[derive(Debug, Clone, Copy)]
pub struct EncodedRecord {
    /// Raw 6-bit compression block size field, in the units the format declares (nominally
    /// 64 KiB); kept verbatim and unused by the extraction engine, which derives actual
    /// block sizes from each block's `endOffset - startOffset`.
    pub compression_block_size_raw: u32,
    pub compression_block_count: u32,
    pub encrypted: bool,
    pub compression_method_index: u32,
    pub size_32_bit_safe: bool,
    pub uncompressed_size_32_bit_safe: bool,
    pub offset_32_bit_safe: bool,
    pub offset: i64,
    pub uncompressed_size: i64,
    pub compressed_size: i64,
}

/// Reads one encoded entry at the source's current position: the packed word, then its
/// conditional follow-on offset / uncompressed-size / compressed-size words.
pub fn decode_encoded_record(src: &mut impl PakSource) -> Result<EncodedRecord> {
    let word = read_u32(src)?;

    let compression_block_size_raw = COMPRESSION_BLOCK_SIZE.extract(word);
    let compression_block_count = COMPRESSION_BLOCK_COUNT.extract(word);
    let encrypted = ENCRYPTED.extract_bool(word);
    let compression_method_index = COMPRESSION_METHOD_INDEX.extract(word);
    let size_32_bit_safe = SIZE_32_SAFE.extract_bool(word);
    let uncompressed_size_32_bit_safe = UNCOMPRESSED_SIZE_32_SAFE.extract_bool(word);
    let offset_32_bit_safe = OFFSET_32_SAFE.extract_bool(word);

    let offset = if offset_32_bit_safe {
        read_u32(src)? as i64
    } else {
        read_u64(src)? as i64
    };

    let uncompressed_size = if uncompressed_size_32_bit_safe {
        read_u32(src)? as i64
    } else {
        read_u64(src)? as i64
    };

    let compressed_size = if compression_method_index != 0 {
        if size_32_bit_safe {
            read_u32(src)? as i64
        } else {
            read_u64(src)? as i64
        }
    } else {
        uncompressed_size
    };

    Ok(EncodedRecord {
        compression_block_size_raw,
        compression_block_count,
        encrypted,
        compression_method_index,
        size_32_bit_safe,
        uncompressed_size_32_bit_safe,
        offset_32_bit_safe,
        offset,
        uncompressed_size,
        compressed_size,
    })
}

/// Reads an `i32` offset into the encoded-entry-info blob (as used by the directory index),
/// returning it as a `u32` byte offset.
pub fn decode_blob_offset(src: &mut impl PakSource) -> Result<u32> {
    Ok(read_i32(src)? as u32)
}
