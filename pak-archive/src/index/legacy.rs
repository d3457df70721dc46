//! Legacy (v<10) flat-list index: mount point followed by a run of IndexRecords.
//!
//! Each IndexRecord carries a full Record inline (as stored in the index itself) plus, once
//! resolved, the DataRecord obtained by decoding the Record stored again at the data section
//! (`embedded.offset`) — that second copy is what actually pins down `dataOffset`.

use crate::error::{check_offset, Result};
use crate::primitives::read_nul_string;
use crate::record::{decode_record, DataRecord, Record};
use crate::source::PakSource;

/// One entry of a legacy index: its filename, the Record embedded inline in the index, and
/// the DataRecord resolved by re-decoding at `embedded.offset` in the data section.
#[derive(Debug, Clone)]
pub struct IndexRecord {
    pub filename: String,
    pub embedded: Record,
    pub resolved: DataRecord,
}

/// A decoded legacy index: mount point plus the flat list of entries.
#[derive(Debug, Clone)]
pub struct LegacyIndex {
    pub mount_point: String,
    pub records: Vec<IndexRecord>,
}

/// Decodes a legacy index at the source's current position (expected to already be seeked
/// to `trailer.index_offset`).
pub fn decode_legacy_index(
    src: &mut impl PakSource,
    version: u32,
    max_string_len: u32,
    archive_len: u64,
) -> Result<LegacyIndex> {
    let mount_point = read_nul_string(src, max_string_len)?;
    let record_count = crate::primitives::read_u32(src)?;

    let mut records = Vec::with_capacity(record_count as usize);
    for _ in 0..record_count {
        let filename = read_nul_string(src, max_string_len)?;
        let embedded = decode_record(src, version)?.record;

        let walk_position = src.position()?;
        check_offset("record.offset", embedded.offset, archive_len)?;
        src.seek_to(embedded.offset as u64)?;
        let resolved = decode_record(src, version)?;
        src.seek_to(walk_position)?;

        records.push(IndexRecord {
            filename,
            embedded,
            resolved,
        });
    }

    Ok(LegacyIndex {
        mount_point,
        records,
    })
}
