//! End-to-end scenarios assembling small synthetic `.pak` archives byte-by-byte and driving
//! them through `PakArchive::open` / `entries` / `extract_to_writer` / `extract_to`.

use std::io::{Cursor, Read, Write};

use flate2::write::ZlibEncoder;
use flate2::Compression;

use pak_archive::{CodecResolver, Decompressor, Error, PakArchive, ReaderConfig};

fn zlib_compress(data: &[u8]) -> Vec<u8> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

struct TestZlib;

impl Decompressor for TestZlib {
    fn decompress(&self, input: &[u8], max_output_len: usize) -> pak_archive::Result<Vec<u8>> {
        let mut decoder = flate2::read::ZlibDecoder::new(input);
        let mut out = Vec::new();
        decoder
            .read_to_end(&mut out)
            .map_err(|e| Error::CodecFailure(e.to_string()))?;
        if out.len() > max_output_len {
            return Err(Error::CodecFailure("output exceeds cap".into()));
        }
        Ok(out)
    }

    fn name(&self) -> &str {
        "Zlib"
    }
}

struct TestResolver;

impl CodecResolver for TestResolver {
    fn resolve(&self, method_index: u32, _method_name: Option<&str>) -> Option<&dyn Decompressor> {
        if method_index == 1 {
            Some(&TestZlib)
        } else {
            None
        }
    }
}

fn nul_string(s: &str) -> Vec<u8> {
    let mut buf = Vec::new();
    let len = s.len() as i32 + 1;
    buf.extend_from_slice(&len.to_le_bytes());
    buf.extend_from_slice(s.as_bytes());
    buf.push(0);
    buf
}

#[allow(clippy::too_many_arguments)]
fn write_record(
    buf: &mut Vec<u8>,
    version: u32,
    offset: i64,
    compressed_size: i64,
    uncompressed_size: i64,
    method: u32,
    blocks: &[(i64, i64)],
    encrypted: bool,
    block_uncompressed_size: u32,
) {
    buf.extend_from_slice(&offset.to_le_bytes());
    buf.extend_from_slice(&compressed_size.to_le_bytes());
    buf.extend_from_slice(&uncompressed_size.to_le_bytes());
    buf.extend_from_slice(&method.to_le_bytes());
    if version <= 1 {
        buf.extend_from_slice(&0u64.to_le_bytes());
    }
    buf.extend_from_slice(&[0u8; 20]); // data hash, unused by these scenarios
    if version >= 3 {
        if method != 0 {
            buf.extend_from_slice(&(blocks.len() as u32).to_le_bytes());
            for (s, e) in blocks {
                buf.extend_from_slice(&s.to_le_bytes());
                buf.extend_from_slice(&e.to_le_bytes());
            }
        }
        buf.push(encrypted as u8);
        buf.extend_from_slice(&block_uncompressed_size.to_le_bytes());
    }
}

fn write_trailer_pre_v8(buf: &mut Vec<u8>, version: u32, index_offset: i64, index_size: i64) {
    if version >= 7 {
        buf.extend_from_slice(&[0u8; 16]); // encryption guid
    }
    if version >= 4 {
        buf.push(0); // encrypted index flag
    }
    buf.extend_from_slice(&pak_archive::trailer::MAGIC.to_le_bytes());
    buf.extend_from_slice(&version.to_le_bytes());
    buf.extend_from_slice(&index_offset.to_le_bytes());
    buf.extend_from_slice(&index_size.to_le_bytes());
    buf.extend_from_slice(&[0u8; 20]); // index hash
}

fn write_trailer_v8_plus(
    buf: &mut Vec<u8>,
    version: u32,
    index_offset: i64,
    index_size: i64,
    methods: &[&str; 5],
) {
    buf.extend_from_slice(&[0u8; 16]); // encryption guid
    buf.push(0); // encrypted index flag
    buf.extend_from_slice(&pak_archive::trailer::MAGIC.to_le_bytes());
    buf.extend_from_slice(&version.to_le_bytes());
    buf.extend_from_slice(&index_offset.to_le_bytes());
    buf.extend_from_slice(&index_size.to_le_bytes());
    buf.extend_from_slice(&[0u8; 20]); // index hash
    if version == 9 {
        buf.push(0); // frozen index flag
    }
    for name in methods {
        let mut slot = name.as_bytes().to_vec();
        slot.resize(32, 0);
        buf.extend_from_slice(&slot);
    }
}

/// Builds a v7 legacy-index archive with one zlib-compressed file whose on-disk block
/// offsets are Record-relative (scenario S2 + S4 combined).
fn build_v7_legacy_archive(plaintext: &[u8]) -> Vec<u8> {
    let compressed = zlib_compress(plaintext);

    let mut archive = vec![0u8; 2048]; // filler before the data section
    let record_start = archive.len() as i64; // P = 2048

    // Record header, with a placeholder block pair we'll patch once we know the header length.
    let header_start = archive.len();
    write_record(
        &mut archive,
        7,
        record_start,
        compressed.len() as i64,
        plaintext.len() as i64,
        1,
        &[(0, compressed.len() as i64)], // patched below
        false,
        plaintext.len() as u32,
    );
    let header_len = (archive.len() - header_start) as i64;

    // v>=7 block offsets are Record-relative: raw = absolute - P. The block starts right
    // after the header we just wrote, i.e. raw_start == header_len.
    let raw_start = header_len;
    let raw_end = header_len + compressed.len() as i64;
    // Patch the block pair in place (two i64 fields right before the trailing encrypted/
    // block-uncompressed-size fields): recompute by rewriting the whole record cleanly.
    archive.truncate(header_start);
    write_record(
        &mut archive,
        7,
        record_start,
        compressed.len() as i64,
        plaintext.len() as i64,
        1,
        &[(raw_start, raw_end)],
        false,
        plaintext.len() as u32,
    );

    archive.extend_from_slice(&compressed);

    let index_offset = archive.len() as i64;
    archive.extend_from_slice(&nul_string("../../../Game/"));
    archive.extend_from_slice(&1u32.to_le_bytes()); // record count
    archive.extend_from_slice(&nul_string("hello.txt"));
    // Embedded copy: only `offset` matters for resolution, so keep it uncompressed/simple.
    write_record(
        &mut archive,
        7,
        record_start,
        plaintext.len() as i64,
        plaintext.len() as i64,
        0,
        &[],
        false,
        0,
    );
    let index_size = archive.len() as i64 - index_offset;

    write_trailer_pre_v8(&mut archive, 7, index_offset, index_size);
    archive
}

/// Builds a v11 modern-index archive with a full directory index and one zlib-compressed
/// file (scenario S3).
fn build_v11_modern_archive(plaintext: &[u8]) -> Vec<u8> {
    let compressed = zlib_compress(plaintext);

    let mut archive = Vec::new();
    let record_start = archive.len() as i64; // P = 0
    let header_start = archive.len();
    write_record(
        &mut archive,
        11,
        record_start,
        compressed.len() as i64,
        plaintext.len() as i64,
        1,
        &[(0, compressed.len() as i64)],
        false,
        plaintext.len() as u32,
    );
    let header_len = (archive.len() - header_start) as i64;
    archive.truncate(header_start);
    write_record(
        &mut archive,
        11,
        record_start,
        compressed.len() as i64,
        plaintext.len() as i64,
        1,
        &[(header_len, header_len + compressed.len() as i64)],
        false,
        plaintext.len() as u32,
    );
    archive.extend_from_slice(&compressed);

    // Encoded-entry-info blob: one entry, all fields 32-bit-safe.
    let mut blob = Vec::new();
    let word: u32 = (1u32 << 29) | (1u32 << 30) | (1u32 << 31) | (1u32 << 23); // method=1, all *_32_safe
    blob.extend_from_slice(&word.to_le_bytes());
    blob.extend_from_slice(&(record_start as u32).to_le_bytes()); // offset
    blob.extend_from_slice(&(plaintext.len() as u32).to_le_bytes()); // uncompressed size
    blob.extend_from_slice(&(compressed.len() as u32).to_le_bytes()); // compressed size

    let index_offset = archive.len() as i64;
    archive.extend_from_slice(&nul_string("../../../Game/"));
    archive.extend_from_slice(&1i32.to_le_bytes()); // entry count
    archive.extend_from_slice(&0xDEADBEEFu64.to_le_bytes()); // path hash seed
    archive.extend_from_slice(&0u32.to_le_bytes()); // hasPathHashIndex = false
    archive.extend_from_slice(&1u32.to_le_bytes()); // hasFullDirectoryIndex = true

    let fdi_locator_pos = archive.len();
    archive.extend_from_slice(&0i64.to_le_bytes()); // placeholder offset, patched below
    archive.extend_from_slice(&(0i64).to_le_bytes()); // size, patched below
    archive.extend_from_slice(&[0u8; 20]); // hash

    archive.extend_from_slice(&(blob.len() as i32).to_le_bytes());
    archive.extend_from_slice(&blob);
    archive.extend_from_slice(&1u32.to_le_bytes()); // trailing record count

    let fdi_offset = archive.len() as i64;
    archive.extend_from_slice(&1u32.to_le_bytes()); // directory count
    archive.extend_from_slice(&nul_string("Content/"));
    archive.extend_from_slice(&1u32.to_le_bytes()); // file count
    archive.extend_from_slice(&nul_string("world.txt"));
    archive.extend_from_slice(&0i32.to_le_bytes()); // encoded entry offset into blob
    let fdi_size = archive.len() as i64 - fdi_offset;

    archive[fdi_locator_pos..fdi_locator_pos + 8].copy_from_slice(&fdi_offset.to_le_bytes());
    archive[fdi_locator_pos + 8..fdi_locator_pos + 16].copy_from_slice(&fdi_size.to_le_bytes());

    let index_size = archive.len() as i64 - index_offset;
    write_trailer_v8_plus(
        &mut archive,
        11,
        index_offset,
        index_size,
        &["Zlib", "", "", "", ""],
    );
    archive
}

#[test]
fn s2_s4_v7_legacy_compressed_record_with_relative_blocks() {
    let plaintext = b"Hello, PAK archive world! This payload is compressed with zlib for the legacy v7 scenario.";
    let archive_bytes = build_v7_legacy_archive(plaintext);

    let mut archive = PakArchive::open(Cursor::new(archive_bytes), ReaderConfig::default()).unwrap();
    assert_eq!(archive.trailer().version, 7);
    assert_eq!(archive.mount_point(), "../../../Game/");

    let entries = archive.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(
        entries[0].logical_path,
        std::path::PathBuf::from("Game/hello.txt")
    );

    let mut out = Vec::new();
    archive
        .extract_to_writer(&entries[0], &TestResolver, &mut out)
        .unwrap();
    assert_eq!(out, plaintext);
}

#[test]
fn s3_v11_modern_directory_index_round_trip() {
    let plaintext = b"Modern index content, addressed through the full directory tree and the encoded entry blob.";
    let archive_bytes = build_v11_modern_archive(plaintext);

    let mut archive = PakArchive::open(Cursor::new(archive_bytes), ReaderConfig::default()).unwrap();
    assert_eq!(archive.trailer().version, 11);

    let entries = archive.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(
        entries[0].logical_path,
        std::path::PathBuf::from("Game/Content/world.txt")
    );

    let mut out = Vec::new();
    archive
        .extract_to_writer(&entries[0], &TestResolver, &mut out)
        .unwrap();
    assert_eq!(out, plaintext);
}

#[test]
fn s5_unsupported_version_byte_is_rejected() {
    let mut archive = vec![0u8; 1024];
    archive.extend_from_slice(&pak_archive::trailer::MAGIC.to_le_bytes());
    archive.push(0x0C);
    archive.extend_from_slice(&[0u8; 200]);

    let result = PakArchive::open(Cursor::new(archive), ReaderConfig::default());
    assert!(matches!(result, Err(Error::UnsupportedVersion(0x0C))));
}

#[test]
fn s6_truncated_archive_is_rejected_without_seeking() {
    let archive = vec![0u8; 100];
    let result = PakArchive::open(Cursor::new(archive), ReaderConfig::default());
    assert!(matches!(result, Err(Error::TooSmall { len: 100, .. })));
}

#[test]
fn extraction_is_idempotent_across_runs() {
    let plaintext = b"idempotence check: extracting twice must produce identical bytes on disk.";
    let archive_bytes = build_v7_legacy_archive(plaintext);

    let dir = tempfile::tempdir().unwrap();

    let mut archive = PakArchive::open(Cursor::new(archive_bytes), ReaderConfig::default()).unwrap();
    let entries = archive.entries();

    let first = archive.extract_to(&entries[0], &TestResolver, dir.path()).unwrap();
    let first_bytes = std::fs::read(&first).unwrap();

    let second = archive.extract_to(&entries[0], &TestResolver, dir.path()).unwrap();
    let second_bytes = std::fs::read(&second).unwrap();

    assert_eq!(first, second);
    assert_eq!(first_bytes, second_bytes);
    assert_eq!(first_bytes, plaintext);
}

#[test]
fn v8_trailer_with_method_table_and_uncompressed_entry() {
    let plaintext = b"stored, not compressed";

    let mut archive = Vec::new();
    let record_start = archive.len() as i64;
    write_record(
        &mut archive,
        8,
        record_start,
        plaintext.len() as i64,
        plaintext.len() as i64,
        0,
        &[],
        false,
        0,
    );
    archive.extend_from_slice(plaintext);

    let index_offset = archive.len() as i64;
    archive.extend_from_slice(&nul_string("Game/"));
    archive.extend_from_slice(&1u32.to_le_bytes());
    archive.extend_from_slice(&nul_string("stored.bin"));
    write_record(
        &mut archive,
        8,
        record_start,
        plaintext.len() as i64,
        plaintext.len() as i64,
        0,
        &[],
        false,
        0,
    );
    let index_size = archive.len() as i64 - index_offset;

    write_trailer_v8_plus(&mut archive, 8, index_offset, index_size, &["Zlib", "", "", "", ""]);

    let mut opened = PakArchive::open(Cursor::new(archive), ReaderConfig::default()).unwrap();
    assert_eq!(opened.trailer().compression_method_name(1), Some("Zlib"));

    let entries = opened.entries();
    let mut out = Vec::new();
    opened
        .extract_to_writer(&entries[0], &TestResolver, &mut out)
        .unwrap();
    assert_eq!(out, plaintext);
}
