//! Types for encoding mod description records
//!

use byteorder::{LittleEndian, WriteBytesExt};
use std::io::Write;
use tracing::instrument;

use crate::{
    error::{Error, Result},
    types::{Metadata, ModFile, ModInfo, ModMetaInfo, StringArray},
};

fn length_field(field: &'static str, len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| Error::FieldTooLarge { field, len })
}

/// Extends [`Write`] with the primitives records are built from
pub trait WriteRecordExt: Write {
    /// Write a length prefixed string, the length counts the null terminator written after `value`
    fn write_string(&mut self, value: &[u8]) -> Result<()> {
        let len = length_field("string", value.len().saturating_add(1))?;
        self.write_u32::<LittleEndian>(len)?;
        self.write_all(value)?;
        self.write_u8(0)?;
        Ok(())
    }

    /// Write a count prefixed list of strings
    fn write_string_array(&mut self, items: &StringArray) -> Result<()> {
        self.write_u32::<LittleEndian>(length_field("string array", items.len())?)?;
        for item in items {
            self.write_string(item)?;
        }
        Ok(())
    }

    /// Write a count prefixed list of key/value pairs
    fn write_metadata(&mut self, entries: &Metadata) -> Result<()> {
        self.write_u32::<LittleEndian>(length_field("metadata", entries.len())?)?;
        for (key, value) in entries {
            self.write_string(key)?;
            self.write_string(value)?;
        }
        Ok(())
    }
}

impl<W: Write + ?Sized> WriteRecordExt for W {}

/// Encode a single length prefixed string
pub fn encode_string(value: &[u8]) -> Result<Vec<u8>> {
    let mut buffer = Vec::with_capacity(value.len() + 5);
    buffer.write_string(value)?;
    Ok(buffer)
}

/// Records that can be encoded to bytes
pub trait Encode {
    /// Encode to `writer`
    fn write_to<W: Write>(&self, writer: &mut W) -> Result<()>;

    /// Encode into a new buffer
    fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;
        Ok(buffer)
    }
}

impl Encode for ModInfo {
    #[instrument(skip_all, err)]
    fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_string(&self.mod_name)?;
        writer.write_string_array(&self.map_filenames)?;
        writer.write_all(&self.trailer)?;
        Ok(())
    }
}

impl Encode for ModMetaInfo {
    #[instrument(skip_all, err)]
    fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_metadata(&self.entries)
    }
}

impl Encode for ModFile {
    #[instrument(skip_all, fields(mod_id = self.mod_id), err)]
    fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_u64::<LittleEndian>(self.mod_id)?;
        writer.write_string(&self.mod_name)?;
        writer.write_string(&self.mod_path)?;
        writer.write_string_array(&self.map_filenames)?;
        writer.write_all(&self.magic)?;
        writer.write_u8(self.mod_type)?;
        writer.write_metadata(&self.metadata)?;
        Ok(())
    }
}
