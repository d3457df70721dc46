//! Full directory index (modern, v≥10): a tree of directories each listing files that point
//! into the encoded-entry-info blob.

use crate::error::Result;
use crate::primitives::{read_nul_string, read_u32};
use crate::source::PakSource;

/// One file within a directory of the full directory index.
#[derive(Debug, Clone)]
pub struct DirectoryFile {
    pub filename: String,
    /// Byte offset of this file's encoded entry within the encoded-entry-info blob.
    pub encoded_entry_offset: u32,
}

/// One directory of the full directory index.
#[derive(Debug, Clone)]
pub struct Directory {
    pub name: String,
    pub files: Vec<DirectoryFile>,
}

/// A fully decoded directory index.
#[derive(Debug, Clone)]
pub struct DirectoryIndex {
    pub directories: Vec<Directory>,
}

/// Decodes the full directory index at the source's current position (expected to already
/// be seeked to the locator's recorded offset).
pub fn decode_directory_index(src: &mut impl PakSource, max_string_len: u32) -> Result<DirectoryIndex> {
    let directory_count = read_u32(src)?;
    let mut directories = Vec::with_capacity(directory_count as usize);

    for _ in 0..directory_count {
        let name = read_nul_string(src, max_string_len)?;
        let file_count = read_u32(src)?;
        let mut files = Vec::with_capacity(file_count as usize);
        for _ in 0..file_count {
            let filename = read_nul_string(src, max_string_len)?;
            let encoded_entry_offset = crate::encoded_entry::decode_blob_offset(src)?;
            files.push(DirectoryFile {
                filename,
                encoded_entry_offset,
            });
        }
        directories.push(Directory { name, files });
    }

    Ok(DirectoryIndex { directories })
}
