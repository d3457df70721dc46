//! Per-file metadata (`Record`) and its compression block table.

use crate::error::{Error, Result};
use crate::primitives::{read_hash20, read_i64, read_u32, read_u64, read_u8, Hash20};
use crate::source::PakSource;

/// One compressed chunk of a file's payload. Offsets are always stored archive-absolute
/// after decoding; see [`decode_record`] for the relative-to-absolute adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionBlock {
    pub start_offset: i64,
    pub end_offset: i64,
}

impl CompressionBlock {
    pub fn len(&self) -> i64 {
        self.end_offset - self.start_offset
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Full per-file metadata as laid out on disk for versions 1 through 11.
#[derive(Debug, Clone)]
pub struct Record {
    pub offset: i64,
    pub compressed_size: i64,
    pub uncompressed_size: i64,
    pub compression_method_index: u32,
    pub timestamp: Option<u64>,
    pub data_hash: Hash20,
    pub compression_blocks: Vec<CompressionBlock>,
    pub encrypted: bool,
    pub compression_block_uncompressed_size: u32,
}

/// A decoded [`Record`] plus the archive offset of its payload, immediately following the
/// Record bytes. The payload itself is never eagerly read.
#[derive(Debug, Clone)]
pub struct DataRecord {
    pub record: Record,
    pub data_offset: u64,
}

/// Decodes a Record starting at the source's current position, per the version-conditional
/// layout, and returns it along with the position immediately after it.
pub fn decode_record(src: &mut impl PakSource, version: u32) -> Result<DataRecord> {
    let start = src.position()?;

    let offset = read_signed_field(src, "record.offset")?;
    let compressed_size = read_signed_field(src, "record.compressed_size")?;
    let uncompressed_size = read_signed_field(src, "record.uncompressed_size")?;
    let compression_method_index = read_u32(src)?;

    let timestamp = if version <= 1 {
        Some(read_u64(src)?)
    } else {
        None
    };

    let data_hash = read_hash20(src)?;

    let mut compression_blocks = Vec::new();
    let mut encrypted = false;
    let mut compression_block_uncompressed_size = 0u32;

    if version >= 3 {
        if compression_method_index != 0 {
            let block_count = read_u32(src)?;
            compression_blocks.reserve(block_count as usize);
            for _ in 0..block_count {
                let mut start_offset = read_i64(src)?;
                let mut end_offset = read_i64(src)?;
                if version >= 7 {
                    start_offset += start as i64;
                    end_offset += start as i64;
                }
                compression_blocks.push(CompressionBlock {
                    start_offset,
                    end_offset,
                });
            }
        }
        encrypted = read_u8(src)? != 0;
        compression_block_uncompressed_size = read_u32(src)?;
    }

    let record = Record {
        offset,
        compressed_size,
        uncompressed_size,
        compression_method_index,
        timestamp,
        data_hash,
        compression_blocks,
        encrypted,
        compression_block_uncompressed_size,
    };

    let data_offset = src.position()?;
    Ok(DataRecord { record, data_offset })
}

fn read_signed_field(src: &mut impl PakSource, entity: &'static str) -> Result<i64> {
    let offset = src.position()?;
    let value = read_i64(src)?;
    if value < 0 {
        return Err(Error::MalformedLength {
            entity,
            offset,
            value,
        });
    }
    Ok(value)
}
