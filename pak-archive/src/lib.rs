//! Format engine for Unreal Engine `.pak` archives: trailer discovery, version-conditional
//! record and index decoding, and block-wise extraction through a pluggable decompressor.
//!
//! This crate never links a concrete compression codec. Callers provide one (or more) by
//! implementing [`Decompressor`] and [`CodecResolver`] — see the `pak-codec` crate for a
//! zlib-backed implementation.

pub mod bitfield;
pub mod config;
pub mod decompress;
pub mod encoded_entry;
pub mod error;
pub mod extract;
pub mod index;
pub mod model;
pub mod primitives;
pub mod record;
pub mod source;
pub mod trailer;

pub use config::ReaderConfig;
pub use decompress::{CodecResolver, Decompressor};
pub use error::{Error, ErrorKind, Result};
pub use extract::{CancelToken, NeverCancel};
pub use index::Index;
pub use model::{Entry, PakArchive};
pub use primitives::{Guid, Hash20};
pub use record::{CompressionBlock, DataRecord, Record};
pub use source::PakSource;
pub use trailer::Trailer;
