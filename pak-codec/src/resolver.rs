//! Default [`CodecResolver`] wiring compression-method names to the concrete decompressors
//! in this crate, with room for a caller to register additional codecs by name.

use std::collections::HashMap;

use pak_archive::{CodecResolver, Decompressor};
use tracing::debug;

use crate::oodle::OodleDecompressor;
use crate::zlib::ZlibDecompressor;

/// Resolves a PAK compression-method index/name to a [`Decompressor`].
///
/// Recognizes `"Zlib"` (case-insensitively) and `"Oodle"` by name. Pre-v8 archives carry no
/// method-name table at all, so method index 1 with no name is treated as zlib by
/// convention — the same convention the format's other ecosystem readers use. Any other
/// populated name falls through to codecs registered via [`PakCodecResolver::with_codec`].
pub struct PakCodecResolver {
    zlib: ZlibDecompressor,
    oodle: OodleDecompressor,
    extra: HashMap<String, Box<dyn Decompressor>>,
}

impl PakCodecResolver {
    /// A resolver recognizing only the codecs this crate implements.
    pub fn new() -> Self {
        Self {
            zlib: ZlibDecompressor,
            oodle: OodleDecompressor,
            extra: HashMap::new(),
        }
    }

    /// Registers an additional codec under `name`, matched case-insensitively against the
    /// trailer's compression-method table.
    pub fn with_codec(mut self, name: impl Into<String>, codec: Box<dyn Decompressor>) -> Self {
        self.extra.insert(name.into().to_ascii_lowercase(), codec);
        self
    }
}

impl Default for PakCodecResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl CodecResolver for PakCodecResolver {
    fn resolve(&self, method_index: u32, method_name: Option<&str>) -> Option<&dyn Decompressor> {
        match method_name.map(|n| n.to_ascii_lowercase()) {
            Some(name) if name == "zlib" => Some(&self.zlib),
            Some(name) if name == "oodle" => Some(&self.oodle),
            Some(name) if !name.is_empty() => {
                let codec = self.extra.get(&name).map(|c| c.as_ref());
                if codec.is_none() {
                    debug!(method_index, name, "no codec registered for method name");
                }
                codec
            }
            // No method-name table (pre-v8) or an empty slot: method index 1 means zlib by
            // the format's long-standing convention.
            _ if method_index == 1 => Some(&self.zlib),
            _ => {
                debug!(method_index, "no codec registered for method index");
                None
            }
        }
    }
}
