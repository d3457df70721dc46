//! Resolves a `DataRecord` to bytes and streams them to a sink, decompressing block-by-block
//! when the record is compressed.

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::ReaderConfig;
use crate::decompress::CodecResolver;
use crate::error::{check_offset, Error, Result};
use crate::record::DataRecord;
use crate::source::PakSource;
use crate::trailer::Trailer;

/// Cooperative cancellation: checked once per compression block. The default never cancels.
pub trait CancelToken {
    fn is_cancelled(&self) -> bool;
}

/// A token that never signals cancellation.
pub struct NeverCancel;

impl CancelToken for NeverCancel {
    fn is_cancelled(&self) -> bool {
        false
    }
}

/// Streams a `DataRecord`'s payload to `sink`, decompressing as needed.
///
/// Encrypted records are rejected (`EncryptionUnsupported`) rather than attempted.
pub fn extract_data_record(
    src: &mut impl PakSource,
    data_record: &DataRecord,
    trailer: &Trailer,
    resolver: &dyn CodecResolver,
    config: &ReaderConfig,
    sink: &mut dyn Write,
    cancel: &dyn CancelToken,
    archive_len: u64,
) -> Result<()> {
    let record = &data_record.record;

    if record.encrypted {
        return Err(Error::EncryptionUnsupported { entity: "record" });
    }

    if record.compression_method_index == 0 {
        check_offset("data_record.data_offset", data_record.data_offset as i64, archive_len)?;
        return stream_uncompressed(src, data_record.data_offset, record.compressed_size as u64, sink, config.extraction_chunk_size);
    }

    let method_name = trailer.compression_method_name(record.compression_method_index);
    let decompressor = resolver
        .resolve(record.compression_method_index, method_name)
        .ok_or_else(|| Error::CodecFailure(format!(
            "no decompressor registered for method index {}",
            record.compression_method_index
        )))?;

    debug!(
        method = decompressor.name(),
        blocks = record.compression_blocks.len(),
        "extracting compressed record"
    );

    for (i, block) in record.compression_blocks.iter().enumerate() {
        if cancel.is_cancelled() {
            warn!(block = i, "extraction cancelled before block read");
            return Err(Error::Cancelled);
        }

        if block.end_offset < block.start_offset {
            return Err(Error::BlockMismatch {
                entity: "compression_block",
                reason: format!("block {i} has end_offset < start_offset"),
            });
        }

        check_offset("compression_block.start_offset", block.start_offset, archive_len)?;
        let block_len = (block.end_offset - block.start_offset) as usize;
        let compressed = src.read_at(block.start_offset as u64, block_len)?;
        let decompressed = decompressor.decompress(
            &compressed,
            record.compression_block_uncompressed_size as usize,
        )?;
        sink.write_all(&decompressed)?;
    }

    Ok(())
}

fn stream_uncompressed(
    src: &mut impl PakSource,
    data_offset: u64,
    len: u64,
    sink: &mut dyn Write,
    chunk_size: usize,
) -> Result<()> {
    src.seek_to(data_offset)?;
    let mut remaining = len;
    let chunk_size = chunk_size.max(1) as u64;

    while remaining > 0 {
        let this_chunk = remaining.min(chunk_size) as usize;
        let buf = src.read_exact_bytes(this_chunk)?;
        sink.write_all(&buf)?;
        remaining -= this_chunk as u64;
    }

    Ok(())
}

/// Joins path segments (each possibly containing further `/`-separated components),
/// dropping empty, `.`, and `..` segments, and renders them with the host separator.
pub fn normalize_output_path(parts: &[&str]) -> PathBuf {
    let mut out = PathBuf::new();
    for part in parts {
        for segment in part.split('/') {
            if segment.is_empty() || segment == "." || segment == ".." {
                continue;
            }
            out.push(segment);
        }
    }
    out
}

/// Creates parent directories and truncates any existing file at `path`, returning an open
/// writable file handle.
pub fn open_truncated(path: &Path) -> Result<std::fs::File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?)
}
