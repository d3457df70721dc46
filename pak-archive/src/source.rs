//! Seekable random-access byte source over a PAK archive.

use std::io::{self, Read, Seek, SeekFrom};

use crate::error::{Error, Result};

/// A seekable, randomly-readable byte source. Blanket-implemented for anything that is
/// `Read + Seek`, so `File`, `BufReader<File>`, and `Cursor<Vec<u8>>` all work directly.
pub trait PakSource: Read + Seek {
    /// Total length of the underlying stream, in bytes.
    fn len(&mut self) -> Result<u64> {
        let current = self.stream_position()?;
        let end = self.seek(SeekFrom::End(0))?;
        self.seek(SeekFrom::Start(current))?;
        Ok(end)
    }

    /// Current absolute position.
    fn position(&mut self) -> Result<u64> {
        Ok(self.stream_position()?)
    }

    /// Seek to an absolute offset.
    fn seek_to(&mut self, offset: u64) -> Result<()> {
        self.seek(SeekFrom::Start(offset))?;
        Ok(())
    }

    /// Read exactly `len` bytes at the current position.
    fn read_exact_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; len];
        self.read_exact(&mut buf)
            .map_err(map_short_read(len))?;
        Ok(buf)
    }

    /// Read `len` bytes starting at `offset` without disturbing callers that track position
    /// themselves (the cursor is left at `offset + len`).
    fn read_at(&mut self, offset: u64, len: usize) -> Result<Vec<u8>> {
        self.seek_to(offset)?;
        self.read_exact_bytes(len)
    }
}

impl<T: Read + Seek + ?Sized> PakSource for T {}

fn map_short_read(requested: usize) -> impl FnOnce(io::Error) -> Error {
    move |e| {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            Error::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("short read: wanted {requested} bytes"),
            ))
        } else {
            Error::Io(e)
        }
    }
}
