//! The `PakArchive` facade: wires the Trailer Locator, Trailer Decoder, Index Decoder,
//! Encoded-Entry Expander and Extraction Engine behind a small session-shaped API.

use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::ReaderConfig;
use crate::decompress::CodecResolver;
use crate::encoded_entry::decode_encoded_record;
use crate::error::{check_offset, Error, Result};
use crate::extract::{self, CancelToken, NeverCancel};
use crate::index::{self, Index};
use crate::record::{decode_record, DataRecord};
use crate::source::PakSource;
use crate::trailer::{self, Trailer};

/// One file known to the archive: its logical output path and enough context to resolve a
/// `DataRecord` on demand.
#[derive(Debug, Clone)]
pub struct Entry {
    pub logical_path: PathBuf,
    location: EntryLocation,
}

#[derive(Debug, Clone)]
enum EntryLocation {
    Legacy { index: usize },
    Modern { encoded_entry_offset: u32 },
}

/// An opened PAK archive: its trailer and decoded index, plus the byte source needed to
/// resolve individual records and stream payloads.
pub struct PakArchive<S> {
    source: S,
    trailer: Trailer,
    index: Index,
    config: ReaderConfig,
    archive_len: u64,
}

impl<S: PakSource> PakArchive<S> {
    /// Opens an archive: locates and decodes the trailer, then decodes its index.
    pub fn open(mut source: S, config: ReaderConfig) -> Result<Self> {
        let archive_len = source.len()?;
        let location = trailer::locate_trailer(&mut source, archive_len)?;
        let trailer = trailer::decode_trailer(
            &mut source,
            archive_len,
            location.version,
            config.strict_v8_slot_count,
        )?;
        info!(version = trailer.version, index_offset = trailer.index_offset, "pak trailer decoded");

        let index = index::decode_index(&mut source, &trailer, &config, archive_len)?;

        Ok(Self {
            source,
            trailer,
            index,
            config,
            archive_len,
        })
    }

    /// The decoded trailer.
    pub fn trailer(&self) -> &Trailer {
        &self.trailer
    }

    /// The mount point prefixed to every entry's logical path.
    pub fn mount_point(&self) -> &str {
        match &self.index {
            Index::Legacy(legacy) => &legacy.mount_point,
            Index::Modern { header, .. } => &header.mount_point,
        }
    }

    /// Lists every entry known to the archive, in index order.
    pub fn entries(&self) -> Vec<Entry> {
        let mount_point = self.mount_point();
        match &self.index {
            Index::Legacy(legacy) => legacy
                .records
                .iter()
                .enumerate()
                .map(|(i, r)| Entry {
                    logical_path: extract::normalize_output_path(&[mount_point, r.filename.as_str()]),
                    location: EntryLocation::Legacy { index: i },
                })
                .collect(),
            Index::Modern {
                directory_index, ..
            } => {
                let mut out = Vec::new();
                if let Some(dirs) = directory_index {
                    for dir in &dirs.directories {
                        for file in &dir.files {
                            out.push(Entry {
                                logical_path: extract::normalize_output_path(&[
                                    mount_point,
                                    dir.name.as_str(),
                                    file.filename.as_str(),
                                ]),
                                location: EntryLocation::Modern {
                                    encoded_entry_offset: file.encoded_entry_offset,
                                },
                            });
                        }
                    }
                }
                out
            }
        }
    }

    fn resolve_data_record(&mut self, entry: &Entry) -> Result<DataRecord> {
        match (&entry.location, &self.index) {
            (EntryLocation::Legacy { index }, Index::Legacy(legacy)) => {
                Ok(legacy.records[*index].resolved.clone())
            }
            (EntryLocation::Modern { encoded_entry_offset }, Index::Modern { header, .. }) => {
                let mut blob = Cursor::new(&header.encoded_entries);
                blob.set_position(*encoded_entry_offset as u64);
                let encoded = decode_encoded_record(&mut blob)?;

                check_offset("encoded_entry.offset", encoded.offset, self.archive_len)?;
                self.source.seek_to(encoded.offset as u64)?;
                decode_record(&mut self.source, self.trailer.version)
            }
            _ => Err(Error::CodecFailure(
                "entry location does not match this archive's index form".to_string(),
            )),
        }
    }

    /// Streams one entry's decompressed payload to `sink`.
    pub fn extract_to_writer(
        &mut self,
        entry: &Entry,
        resolver: &dyn CodecResolver,
        sink: &mut dyn Write,
    ) -> Result<()> {
        let data_record = self.resolve_data_record(entry)?;
        extract::extract_data_record(
            &mut self.source,
            &data_record,
            &self.trailer,
            resolver,
            &self.config,
            sink,
            &NeverCancel,
            self.archive_len,
        )
    }

    /// Streams one entry's decompressed payload to `sink`, checking `cancel` between blocks.
    pub fn extract_to_writer_cancellable(
        &mut self,
        entry: &Entry,
        resolver: &dyn CodecResolver,
        sink: &mut dyn Write,
        cancel: &dyn CancelToken,
    ) -> Result<()> {
        let data_record = self.resolve_data_record(entry)?;
        extract::extract_data_record(
            &mut self.source,
            &data_record,
            &self.trailer,
            resolver,
            &self.config,
            sink,
            cancel,
            self.archive_len,
        )
    }

    /// Extracts one entry under `output_root`, creating parent directories and truncating
    /// any existing file.
    pub fn extract_to(
        &mut self,
        entry: &Entry,
        resolver: &dyn CodecResolver,
        output_root: &Path,
    ) -> Result<PathBuf> {
        let dest = output_root.join(&entry.logical_path);
        let mut file = extract::open_truncated(&dest)
            .map_err(|e| e.with_path(dest.clone()))?;
        self.extract_to_writer(entry, resolver, &mut file)
            .map_err(|e| e.with_path(dest.clone()))?;
        Ok(dest)
    }
}
