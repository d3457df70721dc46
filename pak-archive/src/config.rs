//! Tunable caps and defaults for the PAK reader.

/// Caller-tunable limits consumed by the primitive decoder and extraction engine.
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Maximum accepted length (including terminator) for a length-prefixed NUL-terminated
    /// string. Declared lengths above this cap are treated as malformed.
    pub max_string_len: u32,

    /// Chunk size used when streaming an uncompressed record's payload to a sink.
    pub extraction_chunk_size: usize,

    /// When `true`, a v8 trailer is rejected with `UnsupportedVersion` rather than decoded
    /// with the 5-slot compression-method table this reader assumes for all v>=8 archives.
    /// Shipped readers use 5 slots for v8 too; this is an escape hatch for a caller who
    /// knows their corpus uses the 4-slot v8 layout instead and wants a hard failure rather
    /// than a silently misparsed trailer (see the v8 slot-count open question).
    pub strict_v8_slot_count: bool,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            max_string_len: 4096,
            extraction_chunk_size: 1024 * 1024,
            strict_v8_slot_count: false,
        }
    }
}
