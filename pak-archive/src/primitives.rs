//! Little-endian primitive decoding: integers, GUID, fixed hash, NUL-terminated strings.

use byteorder::{LittleEndian, ReadBytesExt};

use crate::error::{Error, Result};
use crate::source::PakSource;

/// A 16-byte GUID, stored and compared as raw bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Guid(pub [u8; 16]);

/// A 20-byte content hash, rendered as uppercase hex without separators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Hash20(pub [u8; 20]);

impl Hash20 {
    pub fn to_hex(self) -> String {
        hex::encode_upper(self.0)
    }
}

impl std::fmt::Display for Hash20 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

pub fn read_u8(src: &mut impl PakSource) -> Result<u8> {
    Ok(src.read_u8()?)
}

pub fn read_u16(src: &mut impl PakSource) -> Result<u16> {
    Ok(src.read_u16::<LittleEndian>()?)
}

pub fn read_u32(src: &mut impl PakSource) -> Result<u32> {
    Ok(src.read_u32::<LittleEndian>()?)
}

pub fn read_i32(src: &mut impl PakSource) -> Result<i32> {
    Ok(src.read_i32::<LittleEndian>()?)
}

pub fn read_u64(src: &mut impl PakSource) -> Result<u64> {
    Ok(src.read_u64::<LittleEndian>()?)
}

pub fn read_i64(src: &mut impl PakSource) -> Result<i64> {
    Ok(src.read_i64::<LittleEndian>()?)
}

pub fn read_bool_u32(src: &mut impl PakSource) -> Result<bool> {
    Ok(read_u32(src)? != 0)
}

pub fn read_guid(src: &mut impl PakSource) -> Result<Guid> {
    let mut buf = [0u8; 16];
    std::io::Read::read_exact(src, &mut buf)?;
    Ok(Guid(buf))
}

pub fn read_hash20(src: &mut impl PakSource) -> Result<Hash20> {
    let mut buf = [0u8; 20];
    std::io::Read::read_exact(src, &mut buf)?;
    Ok(Hash20(buf))
}

/// Reads a length-prefixed (i32, includes the terminator), NUL-terminated ASCII string.
///
/// A declared length of `<= 0` or greater than `max_len` fails with `MalformedString`.
pub fn read_nul_string(src: &mut impl PakSource, max_len: u32) -> Result<String> {
    let offset = src.position()?;
    let declared_len = read_i32(src)?;
    if declared_len <= 0 || declared_len as u32 > max_len {
        return Err(Error::MalformedString {
            offset,
            reason: format!("declared length {declared_len} out of range (max {max_len})"),
        });
    }

    let mut buf = vec![0u8; declared_len as usize];
    std::io::Read::read_exact(src, &mut buf)?;

    if buf.last() != Some(&0) {
        return Err(Error::MalformedString {
            offset,
            reason: "string is not NUL-terminated".to_string(),
        });
    }
    buf.pop();

    String::from_utf8(buf).map_err(|e| Error::MalformedString {
        offset,
        reason: format!("not valid ASCII/UTF-8: {e}"),
    })
}

/// Reads a fixed-size slot (used for the compression-method name table) as a NUL-terminated
/// ASCII string. An all-NUL slot yields an empty string.
pub fn read_fixed_nul_string(src: &mut impl PakSource, slot_len: usize) -> Result<String> {
    let offset = src.position()?;
    let mut buf = vec![0u8; slot_len];
    std::io::Read::read_exact(src, &mut buf)?;

    if buf[0] == 0 {
        return Ok(String::new());
    }

    let nul_pos = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    let s = std::str::from_utf8(&buf[..nul_pos]).map_err(|e| Error::MalformedString {
        offset,
        reason: format!("not valid ASCII/UTF-8: {e}"),
    })?;
    Ok(s.to_string())
}
