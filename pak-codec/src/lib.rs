//! Concrete [`pak_archive::Decompressor`] implementations for `pak-archive`: zlib inflate
//! via `flate2`, a named placeholder for the proprietary Oodle codec, and a default
//! [`CodecResolver`] wiring compression-method names to both.
//!
//! Kept as a separate crate so `pak-archive` never links a codec library directly — the
//! core consumes `Decompressor` as a capability, and this crate is one way to supply it.

mod error;
mod oodle;
mod resolver;
mod zlib;

pub use error::Error;
pub use oodle::OodleDecompressor;
pub use resolver::PakCodecResolver;
pub use zlib::ZlibDecompressor;

pub use pak_archive::{CodecResolver, Decompressor};
