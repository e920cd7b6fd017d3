//! Types for decoding mod description records
//!

use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{Cursor, Read};
use tracing::{instrument, trace};

use crate::{
    error::{Error, Result},
    types::{ArkString, Metadata, ModFile, ModInfo, ModMetaInfo, StringArray},
};

/// Cursor over a record buffer
///
/// Every read checks the remaining length first, so running off the end of the buffer is reported as
/// [`Error::TruncatedInput`] with the offset of the field that did not fit.
///
/// ```
/// use ark_mod::read::RecordReader;
///
/// let mut reader = RecordReader::new(b"\x04\x00\x00\x00abc\x00");
/// assert_eq!(reader.read_string()?.as_bytes(), b"abc");
/// assert_eq!(reader.position(), 8);
/// # Ok::<(), ark_mod::error::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct RecordReader<'a> {
    cursor: Cursor<&'a [u8]>,
}

impl<'a> RecordReader<'a> {
    /// Start reading at the beginning of `data`
    pub fn new(data: &'a [u8]) -> Self {
        Self::at(data, 0)
    }

    /// Start reading at `position` in `data`
    pub fn at(data: &'a [u8], position: usize) -> Self {
        let mut cursor = Cursor::new(data);
        cursor.set_position(position as u64);
        Self { cursor }
    }

    /// Current offset into the buffer
    pub fn position(&self) -> usize {
        self.cursor.position() as usize
    }

    /// Bytes left after the current offset
    pub fn remaining(&self) -> usize {
        self.cursor.get_ref().len().saturating_sub(self.position())
    }

    fn ensure(&self, needed: usize) -> Result<()> {
        if needed > self.remaining() {
            return Err(Error::TruncatedInput {
                offset: self.cursor.position(),
                needed: needed as u64,
                available: self.remaining() as u64,
            });
        }
        Ok(())
    }

    /// Read a single byte
    pub fn read_u8(&mut self) -> Result<u8> {
        self.ensure(1)?;
        Ok(self.cursor.read_u8()?)
    }

    /// Read a little endian 32-bit integer
    pub fn read_u32(&mut self) -> Result<u32> {
        self.ensure(4)?;
        Ok(self.cursor.read_u32::<LittleEndian>()?)
    }

    /// Read a little endian 64-bit integer
    pub fn read_u64(&mut self) -> Result<u64> {
        self.ensure(8)?;
        Ok(self.cursor.read_u64::<LittleEndian>()?)
    }

    /// Read `N` raw bytes
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        self.ensure(N)?;
        let mut buffer = [0u8; N];
        self.cursor.read_exact(&mut buffer)?;
        Ok(buffer)
    }

    /// Read a length prefixed string, dropping its final byte
    ///
    /// The final byte is the null terminator and is not checked. A zero length reads as an empty string.
    pub fn read_string(&mut self) -> Result<ArkString> {
        let start = self.cursor.position();
        let len = self.read_u32()? as usize;
        if let Err(e) = self.ensure(len) {
            self.cursor.set_position(start);
            return Err(e);
        }

        let mut buffer = vec![0u8; len];
        self.cursor.read_exact(&mut buffer)?;
        buffer.pop();

        Ok(ArkString::new(buffer))
    }

    /// Read a count prefixed list of strings
    pub fn read_string_array(&mut self) -> Result<StringArray> {
        let count = self.read_u32()? as usize;

        // every entry takes at least its 4 byte length
        let mut items = Vec::with_capacity(count.min(self.remaining() / 4));
        for _ in 0..count {
            items.push(self.read_string()?);
        }

        Ok(StringArray::new(items))
    }

    /// Read a count prefixed list of key/value pairs
    pub fn read_metadata(&mut self) -> Result<Metadata> {
        let count = self.read_u32()? as usize;

        let mut entries = Vec::with_capacity(count.min(self.remaining() / 8));
        for _ in 0..count {
            let key = self.read_string()?;
            let value = self.read_string()?;
            entries.push((key, value));
        }

        Ok(Metadata::new(entries))
    }
}

/// Decode the length prefixed string at `cursor` in `data`
///
/// Returns the string and the offset just past it.
pub fn decode_string(data: &[u8], cursor: usize) -> Result<(ArkString, usize)> {
    let mut reader = RecordReader::at(data, cursor);
    let value = reader.read_string()?;
    Ok((value, reader.position()))
}

/// Records that can be decoded from a byte buffer
pub trait Decode: Sized {
    /// Decode from the current position of `reader`
    fn read_from(reader: &mut RecordReader<'_>) -> Result<Self>;

    /// Decode from the start of `data`, anything after the record is ignored
    fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::read_from(&mut RecordReader::new(data))
    }
}

impl Decode for ModInfo {
    #[instrument(skip_all, err)]
    fn read_from(reader: &mut RecordReader<'_>) -> Result<Self> {
        let mod_name = reader.read_string()?;
        let map_filenames = reader.read_string_array()?;
        let trailer = reader.read_array()?;

        trace!(%mod_name, maps = map_filenames.len(), "read mod info");
        Ok(ModInfo {
            mod_name,
            map_filenames,
            trailer,
        })
    }
}

impl Decode for ModMetaInfo {
    #[instrument(skip_all, err)]
    fn read_from(reader: &mut RecordReader<'_>) -> Result<Self> {
        let entries = reader.read_metadata()?;

        trace!(entries = entries.len(), "read mod meta info");
        Ok(ModMetaInfo { entries })
    }
}

impl Decode for ModFile {
    #[instrument(skip_all, err)]
    fn read_from(reader: &mut RecordReader<'_>) -> Result<Self> {
        let mod_id = reader.read_u64()?;
        let mod_name = reader.read_string()?;
        let mod_path = reader.read_string()?;
        let map_filenames = reader.read_string_array()?;
        let magic = reader.read_array()?;
        let mod_type = reader.read_u8()?;
        let metadata = reader.read_metadata()?;

        trace!(mod_id, %mod_name, mod_type, "read mod file");
        Ok(ModFile {
            mod_id,
            mod_name,
            mod_path,
            map_filenames,
            magic,
            mod_type,
            metadata,
        })
    }
}
